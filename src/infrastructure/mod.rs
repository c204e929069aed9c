//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Persistence: in-memory campaign store behind the repository port
//! - Catalog: static kingdom content loaded from JSON
//! - HTTP: REST API routes
//! - Config: Application configuration
//! - State: Shared application state

pub mod catalog;
pub mod config;
pub mod http;
pub mod persistence;
pub mod state;
