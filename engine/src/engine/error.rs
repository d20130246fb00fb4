// engine/src/engine/error.rs
#![forbid(unsafe_code)]

use thiserror::Error;

use crate::engine::circuit::SegmentRole;
use crate::engine::geometry::Direction;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CircuitError {
    #[error("invalid direction code {0} (expected 0..=3)")]
    InvalidDirection(u8),

    #[error("direction {0:?} is not supported for wire placement")]
    UnsupportedDirection(Direction),

    #[error("no circuit found after {attempts} attempts")]
    NoCircuitFound { attempts: u32 },

    #[error("unknown asset identity `{0}`")]
    UnknownAsset(String),

    #[error("no {role:?} asset spans {length} holes")]
    MissingLength { role: SegmentRole, length: u8 },

    #[error("malformed circuit: {0}")]
    MalformedCircuit(String),
}

impl CircuitError {
    /// Fatal errors point at a programming or asset-configuration problem and must not be
    /// retried. Only search exhaustion is a plain "try again with another seed" failure.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CircuitError::NoCircuitFound { .. })
    }
}
