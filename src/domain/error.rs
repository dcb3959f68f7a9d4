//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::RobotId;

/// Domain errors cover invalid domain values and the invariant
/// violations that `Swarm::verify` can report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid key range: min {min} is greater than max {max}")]
    InvalidKeyRange { min: RobotId, max: RobotId },

    #[error("unknown robot type: {0}")]
    UnknownRobotType(String),

    #[error("unknown robot state: {0}")]
    UnknownRobotState(String),

    #[error("ordering violated at {id}: expected key in ({low:?}, {high:?})")]
    OrderViolation {
        id: RobotId,
        low: Option<RobotId>,
        high: Option<RobotId>,
    },

    #[error("key {0} is outside the swarm key range")]
    OutOfRange(RobotId),

    #[error("cached height of {id} is {cached}, computed {computed}")]
    HeightMismatch {
        id: RobotId,
        cached: i32,
        computed: i32,
    },

    #[error("node {id} is unbalanced (left {left}, right {right})")]
    Unbalanced { id: RobotId, left: i32, right: i32 },

    #[error("cached size is {cached}, counted {counted}")]
    SizeMismatch { cached: usize, counted: usize },
}
