use thiserror::Error;

use crate::spatial::BodyHandle;

/// Precondition violations surfaced by the engine.
///
/// Numeric edge cases (near-zero distances, tangent contacts) never show up
/// here; they are absorbed locally by epsilon guards.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("polygon needs at least 3 vertices, got {vertices}")]
    DegeneratePolygon { vertices: usize },
    #[error("flat vertex buffer needs x,y pairs, got {len} coordinates")]
    OddCoordinateCount { len: usize },
    #[error("polygon vertex {index} is not finite")]
    NonFiniteVertex { index: usize },
    #[error("mass must be positive (or infinite for immovable bodies), got {0}")]
    InvalidMass(f64),
    #[error("elasticity must be finite and non-negative, got {0}")]
    InvalidElasticity(f64),
    #[error("time step must be finite and non-negative, got {0}")]
    InvalidTimeStep(f64),
    #[error("body {0} is not in the scene")]
    UnknownBody(BodyHandle),
    #[error("a rule needs distinct bodies, got {0} twice")]
    DuplicateBody(BodyHandle),
    #[error("a force rule needs at least one body")]
    EmptyBodySet,
    #[error("{rule} acts on exactly {expected} bodies, got {got}")]
    WrongBodyCount { rule: &'static str, expected: usize, got: usize },
    #[error("index {index} is past the end of the scene ({len} bodies)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("invalid scene config: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::InvalidConfig(err.to_string())
    }
}
