//! Viewer-local timers
//!
//! Every timer is a spawned task whose handle aborts it on drop, so clearing
//! the owner (unmount, resource change) cancels everything still pending.

use std::future::Future;
use std::time::Duration;

use tokio::task::AbortHandle;
use tokio::time::sleep;

pub struct ScopedTimer {
    handle: AbortHandle,
}

impl ScopedTimer {
    /// Run `task` once `delay` has elapsed, unless dropped first
    pub fn after<F>(delay: Duration, task: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            task.await;
        })
        .abort_handle();
        Self { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Timers owned by the mounted viewer: one idle-hide slot plus any number of
/// seek-feedback dismissals
#[derive(Default)]
pub struct ViewerTimers {
    hide: Option<ScopedTimer>,
    feedback: Vec<ScopedTimer>,
}

impl ViewerTimers {
    /// Arm a new idle-hide timer, cancelling the previous one
    pub fn replace_hide(&mut self, timer: ScopedTimer) {
        self.hide = Some(timer);
    }

    pub fn cancel_hide(&mut self) {
        self.hide = None;
    }

    pub fn push_feedback(&mut self, timer: ScopedTimer) {
        self.feedback.retain(|t| !t.is_finished());
        self.feedback.push(timer);
    }

    pub fn clear(&mut self) {
        self.hide = None;
        self.feedback.clear();
    }

    #[cfg(test)]
    pub fn pending(&self) -> usize {
        let hide = self.hide.iter().filter(|t| !t.is_finished()).count();
        hide + self.feedback.iter().filter(|t| !t.is_finished()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_timer(delay_ms: u64, fired: &Arc<AtomicUsize>) -> ScopedTimer {
        let fired = fired.clone();
        ScopedTimer::after(Duration::from_millis(delay_ms), async move {
            fired.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn timer_fires_after_delay() {
        let fired = Arc::new(AtomicUsize::new(0));
        let _timer = counting_timer(100, &fired);

        sleep(Duration::from_millis(50)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        sleep(Duration::from_millis(100)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_timer_never_fires() {
        let fired = Arc::new(AtomicUsize::new(0));
        drop(counting_timer(100, &fired));

        sleep(Duration::from_millis(500)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn replacing_hide_keeps_a_single_pending_timer() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut timers = ViewerTimers::default();
        timers.replace_hide(counting_timer(100, &fired));
        timers.replace_hide(counting_timer(100, &fired));
        tokio::task::yield_now().await;
        assert_eq!(timers.pending(), 1);

        sleep(Duration::from_millis(200)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn clear_cancels_everything() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut timers = ViewerTimers::default();
        timers.replace_hide(counting_timer(100, &fired));
        timers.push_feedback(counting_timer(50, &fired));
        timers.push_feedback(counting_timer(60, &fired));
        timers.clear();

        sleep(Duration::from_millis(500)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(timers.pending(), 0);
    }
}
