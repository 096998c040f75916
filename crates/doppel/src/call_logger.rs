//! Call-recording double that stands in for a GUI layer.
//!
//! The logic under test talks to a [`CallLogger`] exactly as it would talk to
//! a real view; tests then assert on the recorded call names and clear the
//! log between phases.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use tracing::trace;

/// Records the names of GUI calls made against it, in order.
///
/// Handles are cheap to clone and share one underlying log, so the logic
/// under test and the assertion site can hold the same double. Only the call
/// name is kept; arguments are not part of this double's contract.
#[derive(Clone, Debug, Default)]
pub struct CallLogger {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLogger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one GUI call under `name`.
    pub fn call(&self, name: impl Into<String>) {
        let name = name.into();
        trace!(call = %name, "gui call recorded");
        self.calls.lock().unwrap().push(name);
    }

    /// Snapshot of the recorded call names, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Empties the call log.
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    // Drained before any comparison so a failed check still leaves the log
    // empty and the next check phase starts clean.
    fn take_calls(&self) -> Vec<String> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }

    /// Checks that exactly the expected calls were made, then clears the log.
    ///
    /// Without `verify_order` the comparison is set-based: ordering and
    /// duplicates are ignored, but extra or missing names fail. With
    /// `verify_order` the recorded sequence must match `expected` exactly,
    /// duplicates included.
    ///
    /// The log is cleared whether the check passes or not.
    ///
    /// # Panics
    /// Panics when the recorded calls do not match, naming the missing and
    /// unexpected calls.
    #[track_caller]
    pub fn check_gui_calls(&self, expected: &[&str], verify_order: bool) {
        let calls = self.take_calls();
        if verify_order {
            assert!(
                calls == expected,
                "gui calls out of order: expected {expected:?}, got {calls:?}"
            );
        } else {
            let recorded: BTreeSet<&str> = calls.iter().map(String::as_str).collect();
            let wanted: BTreeSet<&str> = expected.iter().copied().collect();
            let missing: Vec<&str> = wanted.difference(&recorded).copied().collect();
            let unexpected: Vec<&str> = recorded.difference(&wanted).copied().collect();
            assert!(
                missing.is_empty() && unexpected.is_empty(),
                "gui calls do not match: missing {missing:?}, unexpected {unexpected:?}"
            );
        }
    }

    /// Looser variant of [`check_gui_calls`]: extra recorded calls are
    /// tolerated.
    ///
    /// Every name in `expected` must appear among the recorded calls; with
    /// `verify_order`, the first occurrence of each expected name must come
    /// no earlier than the first occurrence of the previous one. Every name
    /// in `not_expected` must be absent.
    ///
    /// The log is cleared whether the check passes or not.
    ///
    /// # Panics
    /// Panics when an expected call is missing or out of order, or when a
    /// `not_expected` call was recorded.
    #[track_caller]
    pub fn check_gui_calls_partial(
        &self,
        expected: Option<&[&str]>,
        not_expected: Option<&[&str]>,
        verify_order: bool,
    ) {
        let calls = self.take_calls();
        if let Some(expected) = expected {
            let not_called: Vec<&str> = expected
                .iter()
                .copied()
                .filter(|name| !calls.iter().any(|c| c == name))
                .collect();
            assert!(not_called.is_empty(), "these calls haven't been made: {not_called:?}");
            if verify_order {
                let mut max_index = 0;
                for name in expected {
                    // Presence was checked above.
                    let index = calls.iter().position(|c| c == name).unwrap();
                    assert!(
                        index >= max_index,
                        "the call {name:?} hasn't been made in the correct order (got {calls:?})"
                    );
                    max_index = index;
                }
            }
        }
        if let Some(not_expected) = not_expected {
            let called: Vec<&str> = not_expected
                .iter()
                .copied()
                .filter(|name| calls.iter().any(|c| c == name))
                .collect();
            assert!(called.is_empty(), "these calls shouldn't have been made: {called:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    fn logger_with(calls: &[&str]) -> CallLogger {
        let logger = CallLogger::new();
        for call in calls {
            logger.call(*call);
        }
        logger
    }

    #[test]
    fn records_calls_in_order() {
        let logger = logger_with(&["refresh", "show", "refresh"]);
        assert_eq!(logger.calls(), ["refresh", "show", "refresh"]);
    }

    #[test]
    fn clear_calls_empties_the_log() {
        let logger = logger_with(&["refresh"]);
        logger.clear_calls();
        assert!(logger.calls().is_empty());
    }

    #[test]
    fn unordered_check_ignores_order_and_duplicates() {
        let logger = logger_with(&["b", "a", "b"]);
        logger.check_gui_calls(&["a", "b"], false);
    }

    #[test]
    fn ordered_check_requires_exact_sequence() {
        let logger = logger_with(&["a", "b", "a"]);
        logger.check_gui_calls(&["a", "b", "a"], true);
    }

    #[rstest]
    #[case(&["a"], &["a", "b"], false)]
    #[case(&["a", "b", "c"], &["a", "b"], false)]
    #[case(&["b", "a"], &["a", "b"], true)]
    fn mismatched_check_panics(
        #[case] recorded: &[&str],
        #[case] expected: &[&str],
        #[case] verify_order: bool,
    ) {
        let logger = logger_with(recorded);
        let result =
            catch_unwind(AssertUnwindSafe(|| logger.check_gui_calls(expected, verify_order)));
        assert!(result.is_err());
    }

    #[test]
    fn failed_check_still_clears_the_log() {
        let logger = logger_with(&["a"]);
        let result = catch_unwind(AssertUnwindSafe(|| logger.check_gui_calls(&["b"], false)));
        assert!(result.is_err());
        assert!(logger.calls().is_empty());
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    fn partial_check_tolerates_extra_calls(#[case] verify_order: bool) {
        let logger = logger_with(&["x", "a", "y", "b"]);
        logger.check_gui_calls_partial(Some(&["a", "b"]), None, verify_order);
    }

    #[test]
    fn partial_check_without_order_accepts_any_order() {
        let logger = logger_with(&["b", "a"]);
        logger.check_gui_calls_partial(Some(&["a", "b"]), None, false);
    }

    #[test]
    fn partial_check_with_order_rejects_reversed_calls() {
        let logger = logger_with(&["b", "a"]);
        let result = catch_unwind(AssertUnwindSafe(|| {
            logger.check_gui_calls_partial(Some(&["a", "b"]), None, true);
        }));
        assert!(result.is_err());
    }

    #[test]
    fn partial_check_rejects_forbidden_calls() {
        let logger = logger_with(&["a", "c"]);
        let result = catch_unwind(AssertUnwindSafe(|| {
            logger.check_gui_calls_partial(None, Some(&["c"]), false);
        }));
        assert!(result.is_err());
    }

    #[test]
    fn partial_check_clears_even_on_failure() {
        let logger = logger_with(&["a"]);
        let result = catch_unwind(AssertUnwindSafe(|| {
            logger.check_gui_calls_partial(Some(&["missing"]), None, false);
        }));
        assert!(result.is_err());
        assert!(logger.calls().is_empty());
    }

    #[test]
    fn clones_share_one_log() {
        let logger = CallLogger::new();
        let handle = logger.clone();
        handle.call("refresh");
        assert_eq!(logger.calls(), ["refresh"]);
    }
}
