use crate::errors::{AppendError, Result};
use crate::lock::JobLock;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// Appends data chunks to per-job files under a base directory.
///
/// One file per job id, created on first write and never deleted. Every
/// append takes the job's advisory file lock first, so concurrent writers
/// (threads or whole processes sharing the directory) are serialized per job
/// and their chunks never interleave.
#[derive(Clone, Debug)]
pub struct Appender {
    base_dir: PathBuf,
}

impl Appender {
    /// Create the base directory if it does not exist and return a handle.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Append `data` plus a trailing newline to the file for `job_id`.
    ///
    /// Blocks until the job's lock is free (no timeout), then opens the file
    /// in append mode, writes, flushes, and releases the lock. The lock is
    /// released on every exit path, including write failure. Appends to other
    /// job ids are never blocked by this one.
    pub async fn append(&self, job_id: &str, data: &str) -> Result<()> {
        validate_job_id(job_id)?;
        let file_path = self.base_dir.join(job_id);
        let lock_path = self.base_dir.join(format!("{}.lock", job_id));

        // single buffer so the chunk and its newline land in one write
        let mut buf = Vec::with_capacity(data.len() + 1);
        buf.extend_from_slice(data.as_bytes());
        buf.push(b'\n');

        let written = data.len();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let _lock = JobLock::acquire(&lock_path).map_err(AppendError::Lock)?;
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&file_path)?;
            file.write_all(&buf)?;
            file.flush()?;
            Ok(())
        })
        .await??;

        debug!(job_id, bytes = written, "appended chunk");
        Ok(())
    }
}

/// The job id names the output file, so it must be a single path component.
fn validate_job_id(job_id: &str) -> Result<()> {
    let bad = job_id.is_empty()
        || job_id == "."
        || job_id == ".."
        || job_id.contains('/')
        || job_id.contains('\\')
        || job_id.contains('\0');
    if bad {
        return Err(AppendError::InvalidJobId(job_id.to_string()));
    }
    Ok(())
}
