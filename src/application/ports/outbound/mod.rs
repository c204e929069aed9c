//! Outbound ports - Interfaces the application requires from infrastructure

pub mod catalog_port;
pub mod repository_port;

pub use catalog_port::ContentCatalogPort;
pub use repository_port::CampaignRepositoryPort;
