//! Error types for decoding, import parsing and schedule parsing

use thiserror::Error;

/// Identity decoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("event string must be in format '{expected}': {identity}")]
    MalformedIdentity {
        identity: String,
        expected: &'static str,
    },
}

/// Import key parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("unexpected format of ID ({raw:?}), expected EVENT,PIPELINE_ID")]
    BadFormat { raw: String },
}

/// Schedule expression parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("empty spec string")]
    Empty,

    #[error("expected exactly 6 fields, found {found}: {expression}")]
    FieldCount { found: usize, expression: String },

    #[error("unrecognized descriptor: {0}")]
    UnknownDescriptor(String),

    #[error("invalid day-of-week {value:?}: {reason}")]
    DayOfWeek { value: String, reason: String },

    #[error("failed to parse duration {input:?}: {reason}")]
    InvalidInterval { input: String, reason: String },

    #[error("{0}")]
    Syntax(String),
}
