//! Error taxonomy exposed by the domain services.
//!
//! Repositories propagate `anyhow::Error` with context; services classify
//! those faults so the UI boundary can tell a blocking validation message
//! apart from a non-blocking storage alert.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Rejected input. The state is untouched; surfaced as a blocking
    /// user-facing message.
    #[error("{0}")]
    Validation(String),

    /// Persisted data could not be loaded or parsed. The in-memory state
    /// stays at defaults; no partial hydration.
    #[error("failed to load saved data")]
    Load(#[source] anyhow::Error),

    /// A save failed. The in-memory transition is already committed and is
    /// not rolled back; memory and disk diverge until the next successful
    /// write.
    #[error("failed to save data")]
    Storage(#[source] anyhow::Error),

    /// The reminder scheduler rejected a request.
    #[error("failed to schedule reminders")]
    Scheduler(#[source] anyhow::Error),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
