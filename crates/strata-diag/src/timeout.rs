//! Bounded-wait helper for long-running operations.
//!
//! [`with_timeout`] is best-effort only: losing the race never stops the
//! underlying work, it only stops the caller from waiting on it. There is
//! no built-in retry anywhere in the core; a timed-out operation must be
//! explicitly re-requested by the caller.

use std::time::Duration;

use crossbeam_channel::{RecvTimeoutError, bounded};
use thiserror::Error;

use crate::reporter::reporter;

/// The operation did not produce a result before the deadline.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("operation timed out")]
pub struct TimeoutError;

/// Runs `op` on a worker thread and waits at most `timeout` for its result.
///
/// On timeout, emits `warn_message` (if supplied) through the process-wide
/// reporter exactly once and returns [`TimeoutError`]. The worker itself is
/// never cancelled; if it completes later its result is dropped unobserved.
pub fn with_timeout<T, F>(
    op: F,
    timeout: Duration,
    warn_message: Option<&str>,
) -> Result<T, TimeoutError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let (sender, receiver) = bounded::<T>(1);

    std::thread::Builder::new()
        .name("strata-timed-op".into())
        .spawn(move || {
            // The receiver may already be gone; a late result is dropped.
            let _ = sender.send(op());
        })
        .expect("Failed to spawn timed-op worker thread");

    match receiver.recv_timeout(timeout) {
        Ok(value) => Ok(value),
        Err(RecvTimeoutError::Timeout) => {
            if let Some(msg) = warn_message {
                reporter().warn(msg);
            }
            Err(TimeoutError)
        }
        // A worker that died without replying is indistinguishable from one
        // that never finishes.
        Err(RecvTimeoutError::Disconnected) => Err(TimeoutError),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::reporter::{CapturingReporter, set_reporter, test_reporter_guard};

    #[test]
    fn test_returns_value_when_op_finishes_in_time() {
        let result = with_timeout(|| 42, Duration::from_secs(5), None);
        assert_eq!(result, Ok(42));
    }

    #[test]
    fn test_times_out_and_warns_exactly_once() {
        let _guard = test_reporter_guard();
        let capture = Arc::new(CapturingReporter::new());
        set_reporter(capture.clone());

        let result = with_timeout(
            || std::thread::sleep(Duration::from_secs(30)),
            Duration::from_millis(20),
            Some("generation deadline exceeded"),
        );

        assert_eq!(result, Err(TimeoutError));
        let matching = capture
            .warnings()
            .iter()
            .filter(|msg| *msg == "generation deadline exceeded")
            .count();
        assert_eq!(matching, 1);
    }

    #[test]
    fn test_timeout_without_message_emits_no_warning() {
        let _guard = test_reporter_guard();
        let capture = Arc::new(CapturingReporter::new());
        set_reporter(capture.clone());

        let result = with_timeout(
            || std::thread::sleep(Duration::from_secs(30)),
            Duration::from_millis(20),
            None,
        );

        assert_eq!(result, Err(TimeoutError));
        assert!(capture.warnings().is_empty());
    }
}
