//! Timer scheduler backed by tokio tasks.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::AbortHandle;
use tracing::trace;

use crate::ports::{TimerHandle, TimerScheduler, TimerTask};

/// Runs each scheduled task on its own tokio task after a `sleep`.
///
/// Cancelling aborts the sleeping task.
pub struct TokioTimerScheduler {
    runtime: Handle,
    next_id: AtomicU64,
    active: Arc<DashMap<u64, AbortHandle>>,
}

impl TokioTimerScheduler {
    /// Scheduler on the given runtime.
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            next_id: AtomicU64::new(1),
            active: Arc::new(DashMap::new()),
        }
    }

    /// Scheduler on the runtime of the calling context.
    pub fn current() -> Result<Self, tokio::runtime::TryCurrentError> {
        Handle::try_current().map(Self::new)
    }

    /// Timers scheduled and neither fired nor cancelled.
    pub fn active_timers(&self) -> usize {
        self.active.len()
    }
}

impl TimerScheduler for TokioTimerScheduler {
    fn schedule_once(&self, delay: Duration, task: TimerTask) -> TimerHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let active = self.active.clone();

        let (registered_tx, registered_rx) = oneshot::channel::<()>();

        let join = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            // Only remove the entry once it has been inserted.
            let _ = registered_rx.await;
            active.remove(&id);
            task();
        });

        self.active.insert(id, join.abort_handle());
        let _ = registered_tx.send(());

        TimerHandle::new(id)
    }

    fn cancel(&self, handle: TimerHandle) {
        if let Some((_, abort)) = self.active.remove(&handle.get()) {
            abort.abort();
            trace!(timer = %handle, "Cancelled timer");
        }
    }
}

impl Drop for TokioTimerScheduler {
    fn drop(&mut self) {
        for entry in self.active.iter() {
            entry.value().abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize};

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let scheduler = TokioTimerScheduler::current().unwrap();
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();

        scheduler.schedule_once(
            Duration::from_secs(30),
            Box::new(move || flag.store(true, Ordering::SeqCst)),
        );
        assert_eq!(scheduler.active_timers(), 1);

        tokio::time::sleep(Duration::from_secs(29)).await;
        assert!(!fired.load(Ordering::SeqCst));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(fired.load(Ordering::SeqCst));
        assert_eq!(scheduler.active_timers(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_firing() {
        let scheduler = TokioTimerScheduler::current().unwrap();
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();

        let handle = scheduler.schedule_once(
            Duration::from_secs(1),
            Box::new(move || flag.store(true, Ordering::SeqCst)),
        );
        scheduler.cancel(handle);
        scheduler.cancel(handle);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(!fired.load(Ordering::SeqCst));
        assert_eq!(scheduler.active_timers(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_zero_delay_timers_leave_no_entries() {
        let scheduler = TokioTimerScheduler::current().unwrap();
        let fired = Arc::new(AtomicUsize::new(0));

        for _ in 0..200 {
            let counter = fired.clone();
            scheduler.schedule_once(
                Duration::ZERO,
                Box::new(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                }),
            );
        }

        while fired.load(Ordering::SeqCst) < 200 {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        assert_eq!(scheduler.active_timers(), 0);
    }

    #[test]
    fn test_current_outside_runtime_fails() {
        assert!(TokioTimerScheduler::current().is_err());
    }
}
