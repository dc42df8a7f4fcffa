//! Ctrl-C handling for the `process` command.
//!
//! The first interrupt asks the pipeline to stop at the next row boundary.
//! A second one, typically sent while a long back-off or request is still
//! pending, means the user wants out now.

use std::future::Future;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::warn;

/// Exit status used when a second interrupt aborts the run (128 + SIGINT).
pub const FORCED_EXIT_CODE: i32 = 130;

/// How the interrupt watcher finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    /// Interrupts could not be listened for; the flag was never set.
    Unavailable,
    /// One interrupt was seen and the flag is set; no second one can follow.
    Graceful,
    /// A second interrupt arrived after the flag was set.
    Forced,
}

/// Waits for interrupts produced by `next_signal` and sets `cancel` on the
/// first one.
pub async fn watch<F, Fut>(mut next_signal: F, cancel: Arc<AtomicBool>) -> Interrupt
where
    F: FnMut() -> Fut,
    Fut: Future<Output = io::Result<()>>,
{
    if let Err(e) = next_signal().await {
        warn!(error = %e, "Cannot listen for interrupts");
        return Interrupt::Unavailable;
    }
    warn!("Interrupt received; stopping after the current row (press Ctrl-C again to abort)");
    cancel.store(true, Ordering::SeqCst);

    match next_signal().await {
        Ok(()) => {
            warn!("Second interrupt received; aborting without writing output");
            Interrupt::Forced
        }
        Err(e) => {
            warn!(error = %e, "Cannot listen for a second interrupt");
            Interrupt::Graceful
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    fn scripted(
        script: Vec<io::Result<()>>,
    ) -> impl FnMut() -> std::pin::Pin<Box<dyn Future<Output = io::Result<()>> + Send>> {
        let mut queue: VecDeque<io::Result<()>> = script.into();
        move || {
            let next = queue.pop_front();
            Box::pin(async move {
                match next {
                    Some(result) => result,
                    None => std::future::pending().await,
                }
            })
        }
    }

    #[tokio::test]
    async fn second_interrupt_forces_exit() {
        let cancel = Arc::new(AtomicBool::new(false));

        let outcome = watch(scripted(vec![Ok(()), Ok(())]), Arc::clone(&cancel)).await;

        assert_eq!(outcome, Interrupt::Forced);
        assert!(cancel.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn first_interrupt_only_sets_the_flag() {
        let cancel = Arc::new(AtomicBool::new(false));

        let outcome = watch(
            scripted(vec![Ok(()), Err(io::Error::other("listener closed"))]),
            Arc::clone(&cancel),
        )
        .await;

        assert_eq!(outcome, Interrupt::Graceful);
        assert!(cancel.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn listener_failure_leaves_the_flag_clear() {
        let cancel = Arc::new(AtomicBool::new(false));

        let outcome = watch(
            scripted(vec![Err(io::Error::other("no signal support"))]),
            Arc::clone(&cancel),
        )
        .await;

        assert_eq!(outcome, Interrupt::Unavailable);
        assert!(!cancel.load(Ordering::SeqCst));
    }
}
