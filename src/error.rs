//! Error types raised at the boundary of the simulator.
//!
//! Nothing in here is fatal for the frame loop. Callers that run inside a
//! frame log these and skip the offending contribution.

use crate::simulator::components::{bodies::BodyKey, connections::ConnectionId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("no sphere with key {0}")]
    UnknownBody(BodyKey),
    #[error("no connection with id {0}")]
    UnknownConnection(ConnectionId),
    #[error("rejected edit: {0}")]
    InvalidEdit(#[from] EditError),
}

/// Reasons an editor submission is refused. The edited element keeps its
/// previous values whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("field `{field}` is not a number: {value:?}")]
    NotNumeric { field: &'static str, value: String },
    #[error("field `{field}` must be finite")]
    NotFinite { field: &'static str },
    #[error("mass must be positive, got {0}")]
    NonPositiveMass(f64),
    #[error("length must not be negative, got {0}")]
    NegativeLength(f64),
    #[error("spring constant must be positive, got {0}")]
    NonPositiveSpringConstant(f64),
    #[error("damping constant must not be negative, got {0}")]
    NegativeDampingConstant(f64),
    #[error("unknown field `{0}`")]
    UnknownField(String),
}
