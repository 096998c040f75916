//! Injectable wall-clock capability.
//!
//! Code under test that needs "now" reads it from a [`Clock`] instead of the
//! process-wide time source, so a test can freeze the date by patching the
//! clock's offset cell without touching global state.

use crate::patch::PatchCell;
use chrono::{DateTime, Local, NaiveDate, TimeDelta};

/// Wall-clock time source with a patchable whole-day offset.
///
/// The offset defaults to zero, so an unpatched clock reads real time. Use
/// [`Patcher::patch_today`](crate::patch::Patcher::patch_today) to shift it.
#[derive(Debug)]
pub struct Clock {
    offset: PatchCell<TimeDelta>,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    #[must_use]
    pub fn new() -> Self {
        Self { offset: PatchCell::new(TimeDelta::zero()) }
    }

    /// The current local time, shifted backwards by the patched offset.
    #[must_use]
    pub fn now(&self) -> DateTime<Local> {
        Local::now() - self.offset.get()
    }

    /// Today's date as seen through this clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Seconds since the Unix epoch as seen through this clock, for code
    /// that consumes raw timestamps.
    #[must_use]
    pub fn timestamp(&self) -> i64 {
        self.now().timestamp()
    }

    /// The offset cell the patcher operates on.
    #[must_use]
    pub fn offset(&self) -> &PatchCell<TimeDelta> {
        &self.offset
    }
}
