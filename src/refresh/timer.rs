use std::time::Duration;

use tokio::task::JoinHandle;

/// A scheduled refresh, as reported by
/// [`RefreshCoordinator::pending_timer`](super::RefreshCoordinator::pending_timer).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingRefresh {
    /// Epoch milliseconds at which the refresh fires.
    pub fire_at_ms: u64,
    /// Delay the timer was armed with.
    pub delay: Duration,
}

/// Owning handle to the background task of a one-shot refresh timer.
///
/// Dropping the handle aborts the task.
#[derive(Debug)]
pub(crate) struct RefreshTimer {
    pub(crate) id: u64,
    pending: PendingRefresh,
    handle: Option<JoinHandle<()>>,
}

impl RefreshTimer {
    pub(crate) fn new(id: u64, pending: PendingRefresh, handle: JoinHandle<()>) -> Self {
        Self {
            id,
            pending,
            handle: Some(handle),
        }
    }

    pub(crate) fn pending(&self) -> PendingRefresh {
        self.pending
    }

    /// Aborts the timer task.
    pub(crate) fn cancel(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Releases the handle without aborting; used by the timer task on itself.
    pub(crate) fn detach(mut self) {
        self.handle.take();
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn pending() -> PendingRefresh {
        PendingRefresh {
            fire_at_ms: 10,
            delay: Duration::from_millis(10),
        }
    }

    fn flag_task(flag: &Arc<AtomicBool>) -> JoinHandle<()> {
        let flag = Arc::clone(flag);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            flag.store(true, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_aborts_task() {
        let fired = Arc::new(AtomicBool::new(false));
        let timer = RefreshTimer::new(1, pending(), flag_task(&fired));

        timer.cancel();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(!fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn drop_aborts_task() {
        let fired = Arc::new(AtomicBool::new(false));
        drop(RefreshTimer::new(1, pending(), flag_task(&fired)));

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(!fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn detach_lets_task_finish() {
        let fired = Arc::new(AtomicBool::new(false));
        let timer = RefreshTimer::new(1, pending(), flag_task(&fired));
        assert_eq!(timer.pending().delay, Duration::from_millis(10));

        timer.detach();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(fired.load(Ordering::SeqCst));
    }
}
