use thiserror::Error;

/// Everything that can stop a counting pass. No variant ever carries a partial total.
#[derive(Debug, Error)]
pub enum CountError {
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("could not allocate {len} slots for the {what}")]
    AllocationFailure { what: &'static str, len: usize },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to start worker {worker}: {source}")]
    Spawn {
        worker: usize,
        #[source]
        source: std::io::Error,
    },
}

impl CountError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        CountError::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CountError>;
