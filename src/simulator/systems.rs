//! Per-frame passes over the body store and the connection graph.

pub mod connectivity;
pub mod force_compute;
pub mod location_detect;
pub mod position_update;
