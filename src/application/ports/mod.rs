//! Ports - Boundary interfaces of the application layer

pub mod outbound;
