//! Application layer - Use cases, DTOs, and outbound ports

pub mod dto;
pub mod ports;
pub mod services;
