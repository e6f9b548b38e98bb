use std::io;
use std::result;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppendError {
    #[error("job id is not a valid file name: {0:?}")]
    InvalidJobId(String),
    #[error("failed to acquire job lock: {0}")]
    Lock(#[source] io::Error),
    #[error("failed to write job data: {0}")]
    Io(#[from] io::Error),
    #[error("append task did not complete: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl AppendError {
    /// Whether a redelivery of the same work item could succeed.
    ///
    /// Lock and write failures are transient (full disk, permissions being
    /// fixed, contention); a bad job id will fail the same way every time.
    pub fn is_transient(&self) -> bool {
        !matches!(self, AppendError::InvalidJobId(_))
    }
}

pub type Result<T> = result::Result<T, AppendError>;
