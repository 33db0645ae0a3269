use thiserror::Error;

pub type Result<T> = std::result::Result<T, NavigationError>;

/// Setup failures. Navigation itself never fails: missing targets are no-ops.
#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Navigator requires a running tokio runtime")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),

    #[error("Invalid navigation config: {0}")]
    InvalidConfig(String),
}
