//! Lifecycle error types

use cron_trigger_client::ClientError;
use cron_trigger_types::{DecodeError, Diagnostic, ImportError};
use thiserror::Error;

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("invalid cron trigger: {}", summarize(.diagnostics))]
    Validation { diagnostics: Vec<Diagnostic> },

    #[error(transparent)]
    Remote(#[from] ClientError),

    #[error("failed to delete cron trigger: {0}")]
    DeleteFailed(#[source] ClientError),

    #[error("inconsistent trigger identity: {0}")]
    InconsistentIdentity(#[from] DecodeError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("{0}")]
    UnsupportedOperation(&'static str),
}

fn summarize(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| d.detail.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for lifecycle operations
pub type Result<T> = std::result::Result<T, LifecycleError>;
