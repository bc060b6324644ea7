//! Background task runner.
//!
//! The egui loop must never block on the network. Requests run on a tokio
//! runtime owned by the app and report back over a `std::sync::mpsc`
//! channel that the UI polls once per frame.

use std::future::Future;
use std::sync::mpsc::{channel, Receiver, TryRecvError};

use tokio::runtime::{Builder, Runtime};

pub struct TaskRunner {
    runtime: Runtime,
}

impl TaskRunner {
    pub fn new() -> std::io::Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("docshelf-io")
            .enable_all()
            .build()?;
        Ok(Self { runtime })
    }

    /// Run `future` in the background; its output arrives on the returned receiver
    pub fn spawn<F, T>(&self, future: F) -> PendingTask<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = channel();
        self.runtime.spawn(async move {
            let _ = tx.send(future.await);
        });
        PendingTask { rx }
    }
}

/// Result slot for a spawned task
pub struct PendingTask<T> {
    rx: Receiver<T>,
}

/// What polling a pending task yielded
#[derive(Debug, PartialEq, Eq)]
pub enum Poll<T> {
    Ready(T),
    Pending,
    /// The task ended without reporting (it panicked)
    Lost,
}

impl<T> PendingTask<T> {
    pub fn poll(&self) -> Poll<T> {
        match self.rx.try_recv() {
            Ok(value) => Poll::Ready(value),
            Err(TryRecvError::Empty) => Poll::Pending,
            Err(TryRecvError::Disconnected) => Poll::Lost,
        }
    }

    /// Block until the task reports. Only for tests and shutdown paths.
    pub fn wait(self) -> Option<T> {
        self.rx.recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_spawn_delivers_result() {
        let runner = TaskRunner::new().unwrap();
        let task = runner.spawn(async { 40 + 2 });
        assert_eq!(task.wait(), Some(42));
    }

    #[test]
    fn test_poll_pending_then_ready() {
        let runner = TaskRunner::new().unwrap();
        let task = runner.spawn(async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            "done"
        });
        assert_eq!(task.poll(), Poll::Pending);
        std::thread::sleep(Duration::from_millis(300));
        assert_eq!(task.poll(), Poll::Ready("done"));
    }

    #[test]
    fn test_panicking_task_is_lost() {
        let runner = TaskRunner::new().unwrap();
        let task = runner.spawn(async {
            if true {
                panic!("boom");
            }
            1
        });
        std::thread::sleep(Duration::from_millis(200));
        assert_eq!(task.poll(), Poll::Lost);
    }
}
