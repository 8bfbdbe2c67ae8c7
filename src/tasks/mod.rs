use std::future::Future;
use std::path::Path;
use std::time::{Duration, SystemTime};

use tokio::runtime::Runtime;
use tracing::{debug, warn};

use crate::error::LauncherResult;

/// Scratch directories older than this are considered leftovers from a
/// previous run.
const EXTRACT_DIR_MAX_AGE: Duration = Duration::from_secs(60 * 60);

/// The shared worker pool for fire-and-forget startup work.
///
/// Backed by a tokio runtime owned here: blocking jobs land on its blocking
/// pool, which grows on demand and reaps idle threads. Submission returns
/// immediately and no job result or failure ever reaches the submitter;
/// each job contains its own errors and at most logs them. No ordering
/// holds between submitted jobs.
pub struct Tasks {
    runtime: Option<Runtime>,
}

impl Tasks {
    pub fn new() -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .thread_name("emberlight-worker")
            .enable_all()
            .build()?;
        Ok(Self {
            runtime: Some(runtime),
        })
    }

    fn runtime(&self) -> &Runtime {
        // Only `drop` takes the runtime out.
        self.runtime.as_ref().expect("runtime present until drop")
    }

    /// Submit a blocking job. Returns immediately; the job's panics and
    /// errors stay inside the pool.
    pub fn submit<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        drop(self.runtime().spawn_blocking(job));
    }

    /// Spawn a detached async job, same contract as [`Tasks::submit`].
    pub fn spawn<F>(&self, job: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        drop(self.runtime().spawn(job));
    }
}

impl Drop for Tasks {
    fn drop(&mut self) {
        // Jobs are fire-and-forget; teardown must not wait for a job that
        // blocks indefinitely.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

/// Purge extraction-scratch directories left behind by a previous run.
///
/// Startup job: runs on the worker pool, absorbs every error. Entries still
/// younger than the age cutoff may belong to a concurrently exiting
/// process and are left alone.
pub fn cleanup_extract_dir(extract_dir: &Path) {
    let entries = match std::fs::read_dir(extract_dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };

    let now = SystemTime::now();
    let mut removed = 0usize;

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        match remove_if_stale(&path, now) {
            Ok(true) => removed += 1,
            Ok(false) => {}
            Err(err) => {
                warn!(path = ?path, error = %err, "could not purge scratch directory");
            }
        }
    }

    if removed > 0 {
        debug!(count = removed, "purged stale extraction scratch");
    }
}

fn remove_if_stale(path: &Path, now: SystemTime) -> LauncherResult<bool> {
    let modified = std::fs::metadata(path)?.modified()?;
    let age = now.duration_since(modified).unwrap_or(Duration::ZERO);
    if age < EXTRACT_DIR_MAX_AGE {
        return Ok(false);
    }
    std::fs::remove_dir_all(path)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Instant;
    use tempfile::TempDir;

    #[test]
    fn submit_returns_before_a_blocked_job_completes() {
        let tasks = Tasks::new().unwrap();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let (started_tx, started_rx) = mpsc::channel::<()>();

        let begin = Instant::now();
        tasks.submit(move || {
            started_tx.send(()).unwrap();
            // Block until the test releases us.
            let _ = release_rx.recv();
        });
        let submit_elapsed = begin.elapsed();

        // The job really is running and still blocked, yet submit returned.
        started_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("job never started");
        assert!(submit_elapsed < Duration::from_secs(1));

        release_tx.send(()).unwrap();
    }

    #[test]
    fn dropping_tasks_does_not_wait_for_blocked_jobs() {
        let tasks = Tasks::new().unwrap();
        let (_keep_tx, block_rx) = mpsc::channel::<()>();
        tasks.submit(move || {
            let _ = block_rx.recv();
        });

        let begin = Instant::now();
        drop(tasks);
        assert!(begin.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn panicking_job_does_not_poison_the_pool() {
        let tasks = Tasks::new().unwrap();
        tasks.submit(|| panic!("contained"));

        let (tx, rx) = mpsc::channel::<u32>();
        tasks.submit(move || {
            tx.send(99).unwrap();
        });
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), 99);
    }

    #[test]
    fn cleanup_removes_only_stale_directories() {
        let tmp = TempDir::new().unwrap();
        let stale = tmp.path().join("stale");
        let fresh = tmp.path().join("fresh");
        std::fs::create_dir_all(&stale).unwrap();
        std::fs::create_dir_all(&fresh).unwrap();

        // Age the stale directory past the cutoff.
        let old = SystemTime::now() - (EXTRACT_DIR_MAX_AGE + Duration::from_secs(60));
        let file_time = std::fs::File::open(&stale).unwrap();
        file_time.set_modified(old).unwrap();
        drop(file_time);

        cleanup_extract_dir(tmp.path());
        assert!(!stale.exists());
        assert!(fresh.exists());
    }

    #[test]
    fn cleanup_of_missing_directory_is_a_no_op() {
        let tmp = TempDir::new().unwrap();
        cleanup_extract_dir(&tmp.path().join("never-created"));
    }
}
