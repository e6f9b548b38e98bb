use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

/// An exclusive advisory lock on a named marker file.
///
/// Built on the OS file lock (`flock`), so it excludes writers in other
/// processes, not just other threads. If the holding process dies the kernel
/// releases the lock when the descriptor closes, so a crashed writer can
/// never wedge a job. Locks on different paths are independent.
pub struct JobLock {
    file: File,
}

impl JobLock {
    /// Acquire the lock, blocking until it is free. No timeout.
    pub fn acquire(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
        file.lock_exclusive()?;
        Ok(Self { file })
    }
}

impl Drop for JobLock {
    fn drop(&mut self) {
        // closing the descriptor would release the lock anyway
        let _ = self.file.unlock();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn second_acquire_blocks_until_release() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("job1.lock");

        let held = JobLock::acquire(&path).expect("first acquire");

        let acquired = Arc::new(AtomicBool::new(false));
        let handle = {
            let acquired = acquired.clone();
            let path = path.clone();
            thread::spawn(move || {
                let _lock = JobLock::acquire(&path).expect("second acquire");
                acquired.store(true, Ordering::SeqCst);
            })
        };

        thread::sleep(Duration::from_millis(100));
        assert!(
            !acquired.load(Ordering::SeqCst),
            "second acquire succeeded while lock was held"
        );

        drop(held);
        handle.join().expect("locking thread panicked");
        assert!(acquired.load(Ordering::SeqCst));
    }

    #[test]
    fn locks_on_different_paths_are_independent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let _a = JobLock::acquire(&dir.path().join("a.lock")).expect("lock a");
        // must not block on a's lock
        let _b = JobLock::acquire(&dir.path().join("b.lock")).expect("lock b");
    }

    #[test]
    fn reacquire_after_drop() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("job1.lock");
        drop(JobLock::acquire(&path).expect("first acquire"));
        let _again = JobLock::acquire(&path).expect("reacquire");
    }
}
