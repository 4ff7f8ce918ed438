//! Typed failures returned by the store, the registry, the active task state
//! machine and the report aggregator.
//!
//! Every variant maps onto one of the kinds exposed to callers through
//! [`HoursError::kind`]. A failed operation never leaves partial writes
//! behind: the transaction it ran in is dropped before the error reaches the
//! caller.

use thiserror::Error;

/// Record kinds that can be looked up by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Group,
    Task,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Group => write!(f, "group"),
            RecordKind::Task => write!(f, "task"),
        }
    }
}

#[derive(Debug, Error)]
pub enum HoursError {
    #[error("{kind} #{id} does not exist")]
    NotFound { kind: RecordKind, id: u64 },

    #[error("task #{0} is already active, stop it first")]
    AlreadyActive(u64),

    #[error("no task is active")]
    NotActive,

    #[error("stop time {end} precedes start time {start}")]
    InvalidTimeRange { start: String, end: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid timestamp '{0}', expected YYYY-MM-DDTHH:MM:SSZ")]
    InvalidTimestamp(String),

    #[error("store failure: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("operation did not complete: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl HoursError {
    pub fn task_not_found(id: u64) -> Self {
        HoursError::NotFound { kind: RecordKind::Task, id }
    }

    pub fn group_not_found(id: u64) -> Self {
        HoursError::NotFound { kind: RecordKind::Group, id }
    }

    /// Name of the error kind as reported on the request/response surface.
    pub fn kind(&self) -> &'static str {
        match self {
            HoursError::NotFound { .. } => "NotFound",
            HoursError::AlreadyActive(_) => "AlreadyActive",
            HoursError::NotActive => "NotActive",
            HoursError::InvalidTimeRange { .. } => "InvalidTimeRange",
            HoursError::InvalidInput(_) | HoursError::InvalidTimestamp(_) => "InvalidInput",
            HoursError::Store(_) | HoursError::Serialization(_) | HoursError::Worker(_) => "StoreFailure",
        }
    }
}

pub type Result<T, E = HoursError> = std::result::Result<T, E>;
