use initia_vanity_keys::DeriveError;
use initia_vanity_pattern::PatternError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("invalid configuration: {0}")]
    InvalidPattern(#[from] PatternError),
    #[error("invalid configuration: count must be at least 1")]
    InvalidTargetCount,
    #[error("invalid configuration: number of threads must be at least 1")]
    InvalidThreadCount,
    #[error("generator has already been started")]
    AlreadyStarted,
    #[error(transparent)]
    Derivation(#[from] DeriveError),
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl SearchError {
    /// Errors caused by the caller's settings rather than the machine
    pub fn is_config_error(&self) -> bool {
        match self {
            SearchError::InvalidPattern(_)
            | SearchError::InvalidTargetCount
            | SearchError::InvalidThreadCount => true,
            SearchError::Derivation(e) => e.is_fatal(),
            SearchError::AlreadyStarted | SearchError::ThreadPool(_) => false,
        }
    }
}
