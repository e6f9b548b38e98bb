//! Durable per-job append primitives: a work-item payload type, a named
//! advisory file lock, and the `Appender` that serializes writers per job.

mod appender;
pub mod errors;
mod lock;
pub mod types;

pub use appender::Appender;
pub use errors::AppendError;
pub use lock::JobLock;
pub use types::WorkItem;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn basic() {
        let dir = tempfile::tempdir().expect("tempdir");
        let appender = Appender::new(dir.path()).expect("new appender");
        let item = WorkItem {
            job_id: "job42".into(),
            data: "hello world!".into(),
        };
        appender
            .append(&item.job_id, &item.data)
            .await
            .expect("append err");
        let contents = std::fs::read_to_string(dir.path().join("job42")).expect("read");
        assert_eq!(contents, "hello world!\n");
    }
}
