//! Sphere and connection data.

pub mod bodies;
pub mod connections;
