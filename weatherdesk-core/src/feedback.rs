use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;

/// How long "Copied!" stays visible after a copy action.
pub const COPY_RESET_DELAY: Duration = Duration::from_millis(2000);

/// Copy-to-clipboard feedback with a bounded lifetime.
///
/// Each copy action sets the flag and schedules a reset for one fixed window
/// later. A repeated copy restarts the window (the pending reset is aborted,
/// never stacked), and dropping the owner aborts it too, so the reset task
/// can never fire against state nobody observes anymore.
#[derive(Debug, Default)]
pub struct CopyFeedback {
    copied: Arc<AtomicBool>,
    reset: Option<JoinHandle<()>>,
}

impl CopyFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copied(&self) -> bool {
        self.copied.load(Ordering::SeqCst)
    }

    /// Record a copy action and (re)schedule the reset.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mark_copied(&mut self) {
        if let Some(pending) = self.reset.take() {
            pending.abort();
        }

        self.copied.store(true, Ordering::SeqCst);

        let flag = Arc::clone(&self.copied);
        self.reset = Some(tokio::spawn(async move {
            tokio::time::sleep(COPY_RESET_DELAY).await;
            flag.store(false, Ordering::SeqCst);
        }));
    }
}

impl Drop for CopyFeedback {
    fn drop(&mut self) {
        if let Some(pending) = self.reset.take() {
            pending.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One step past the reset deadline.
    const PAST_DELAY: Duration = Duration::from_millis(2001);

    #[tokio::test(start_paused = true)]
    async fn copy_sets_flag_and_resets_after_delay() {
        let mut feedback = CopyFeedback::new();
        assert!(!feedback.copied());

        feedback.mark_copied();
        assert!(feedback.copied());

        tokio::time::sleep(PAST_DELAY).await;
        assert!(!feedback.copied());
    }

    #[tokio::test(start_paused = true)]
    async fn flag_holds_until_the_window_elapses() {
        let mut feedback = CopyFeedback::new();
        feedback.mark_copied();

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(feedback.copied());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(!feedback.copied());
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_copy_restarts_the_window_instead_of_stacking() {
        let mut feedback = CopyFeedback::new();
        feedback.mark_copied();

        tokio::time::sleep(Duration::from_millis(1500)).await;
        feedback.mark_copied();

        // The first window's deadline passes without clearing the flag.
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(feedback.copied());

        // The restarted window's deadline does.
        tokio::time::sleep(Duration::from_millis(1001)).await;
        assert!(!feedback.copied());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_the_pending_reset() {
        let mut feedback = CopyFeedback::new();
        feedback.mark_copied();
        let flag = Arc::clone(&feedback.copied);

        drop(feedback);
        tokio::time::sleep(PAST_DELAY).await;

        // The reset never ran: dropping the owner aborted it.
        assert!(flag.load(Ordering::SeqCst));
    }
}
