//! Process-wide, swappable diagnostics sink.
//!
//! Every Strata component routes its warnings through [`reporter()`] instead
//! of logging directly, so tests can substitute a [`CapturingReporter`] and
//! assert on emitted diagnostics. The global handle is a documented
//! convenience and test seam; it defaults to a `tracing`-backed sink.

use std::sync::{Arc, LazyLock, Mutex, RwLock};

/// A sink for diagnostics emitted by the voxel core.
///
/// Implementations must be cheap to call and must not panic; the core
/// assumes reporting always succeeds.
pub trait Reporter: Send + Sync {
    /// Report a recoverable problem (degraded environment, timed-out wait).
    fn warn(&self, msg: &str);
    /// Report a failure the caller will also observe as an error value.
    fn error(&self, msg: &str);
    /// Report noteworthy but healthy behavior.
    fn info(&self, msg: &str);
}

/// Default sink: forwards every message to the `tracing` subscriber.
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }
}

/// Severity attached to a captured message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportLevel {
    /// Informational message.
    Info,
    /// Warning.
    Warn,
    /// Error.
    Error,
}

/// Test sink that records every message along with its severity.
///
/// Install with [`set_reporter`], keep a clone of the `Arc`, and inspect the
/// captured messages after exercising the code under test.
#[derive(Default)]
pub struct CapturingReporter {
    entries: Mutex<Vec<(ReportLevel, String)>>,
}

impl CapturingReporter {
    /// Creates an empty capturing sink.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, level: ReportLevel, msg: &str) {
        let mut entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.push((level, msg.to_string()));
    }

    /// All captured messages, in emission order.
    pub fn messages(&self) -> Vec<(ReportLevel, String)> {
        match self.entries.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Captured warning messages only.
    pub fn warnings(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(level, _)| *level == ReportLevel::Warn)
            .map(|(_, msg)| msg)
            .collect()
    }
}

impl Reporter for CapturingReporter {
    fn warn(&self, msg: &str) {
        self.push(ReportLevel::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.push(ReportLevel::Error, msg);
    }

    fn info(&self, msg: &str) {
        self.push(ReportLevel::Info, msg);
    }
}

static REPORTER: LazyLock<RwLock<Arc<dyn Reporter>>> =
    LazyLock::new(|| RwLock::new(Arc::new(TracingReporter)));

/// Serializes tests that swap the global sink; parallel test threads would
/// otherwise capture each other's diagnostics.
#[cfg(test)]
pub(crate) static TEST_REPORTER_LOCK: Mutex<()> = Mutex::new(());

/// Lock helper for tests using [`TEST_REPORTER_LOCK`].
#[cfg(test)]
pub(crate) fn test_reporter_guard() -> std::sync::MutexGuard<'static, ()> {
    match TEST_REPORTER_LOCK.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Replaces the process-wide report sink.
pub fn set_reporter(sink: Arc<dyn Reporter>) {
    let mut guard = match REPORTER.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    *guard = sink;
}

/// Returns the current process-wide report sink.
pub fn reporter() -> Arc<dyn Reporter> {
    let guard = match REPORTER.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    Arc::clone(&guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capturing_reporter_records_levels_in_order() {
        let capture = CapturingReporter::new();
        capture.info("a");
        capture.warn("b");
        capture.error("c");

        let messages = capture.messages();
        assert_eq!(
            messages,
            vec![
                (ReportLevel::Info, "a".to_string()),
                (ReportLevel::Warn, "b".to_string()),
                (ReportLevel::Error, "c".to_string()),
            ]
        );
        assert_eq!(capture.warnings(), vec!["b".to_string()]);
    }

    #[test]
    fn test_set_reporter_swaps_global_sink() {
        let _guard = test_reporter_guard();
        let capture = Arc::new(CapturingReporter::new());
        set_reporter(capture.clone());

        reporter().warn("routed through the global handle");

        assert!(
            capture
                .warnings()
                .iter()
                .any(|msg| msg == "routed through the global handle")
        );

        // Restore the default so other tests see the tracing sink.
        set_reporter(Arc::new(TracingReporter));
    }
}
