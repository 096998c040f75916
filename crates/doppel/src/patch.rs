//! Reversible value patching with guaranteed restoration.
//!
//! Code under test reads its replaceable dependencies out of [`PatchCell`]
//! slots; a [`Patcher`] temporarily overrides those slots and unwinds every
//! override in reverse order when it is dropped or explicitly unpatched.

use crate::clock::Clock;
use crate::stat::{FileStat, StatSource};
use chrono::{Local, NaiveDate};
use std::path::Path;
use std::sync::Mutex;
use tracing::trace;

/// A replaceable slot for a value the code under test depends on.
///
/// Cells are the injection points the [`Patcher`] operates on. `new` is
/// const, so a cell can be declared `static` when a dependency is shared
/// across a module.
#[derive(Debug)]
pub struct PatchCell<T> {
    value: Mutex<T>,
}

impl<T: Clone> PatchCell<T> {
    pub const fn new(value: T) -> Self {
        Self { value: Mutex::new(value) }
    }

    /// Clones the current value out of the cell.
    #[must_use]
    pub fn get(&self) -> T {
        self.value.lock().unwrap().clone()
    }

    /// Installs `value` and returns the previous one.
    pub fn replace(&self, value: T) -> T {
        std::mem::replace(&mut *self.value.lock().unwrap(), value)
    }
}

/// Applies temporary overrides and unwinds them on [`Patcher::unpatch`] or
/// drop.
///
/// Construction is side-effect-free. Restoration runs in reverse order of
/// application, so repeated patches of the same cell unwind like a stack,
/// and it runs on every exit path, panics included.
#[derive(Default)]
pub struct Patcher<'a> {
    undo: Vec<Box<dyn FnOnce() + 'a>>,
}

impl<'a> Patcher<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self { undo: Vec::new() }
    }

    /// Replaces the cell's value, remembering the old one for restoration.
    pub fn patch<T: Clone + 'a>(&mut self, cell: &'a PatchCell<T>, replace_with: T) {
        let old = cell.replace(replace_with);
        trace!(cell = std::any::type_name::<T>(), "patch applied");
        self.undo.push(Box::new(move || {
            cell.replace(old);
        }));
    }

    /// Shifts `clock` so that it reads the given date as today.
    ///
    /// The shift is a constant whole-day offset applied to every subsequent
    /// read, so times derived from the clock stay consistent with the frozen
    /// date for the lifetime of the patch.
    ///
    /// # Panics
    /// Panics if the year/month/day triple is not a valid calendar date.
    #[track_caller]
    pub fn patch_today(&mut self, clock: &'a Clock, year: i32, month: u32, day: u32) {
        let new_today = NaiveDate::from_ymd_opt(year, month, day)
            .unwrap_or_else(|| panic!("invalid date {year:04}-{month:02}-{day:02}"));
        let delta = Local::now().date_naive() - new_today;
        self.patch(clock.offset(), delta);
    }

    /// Installs a fake stat record for `path`, removed again on unpatch.
    pub fn patch_stat(&mut self, source: &'a StatSource, path: impl AsRef<Path>, stat: FileStat) {
        let path = path.as_ref().to_path_buf();
        let previous = source.install(path.clone(), stat);
        trace!(path = %path.display(), "stat override installed");
        self.undo.push(Box::new(move || {
            source.restore(&path, previous);
        }));
    }

    /// Restores every patched value, most recently applied first.
    ///
    /// Draining, hence safe to call more than once; the drop handler becomes
    /// a no-op after an explicit unpatch.
    pub fn unpatch(&mut self) {
        while let Some(undo) = self.undo.pop() {
            undo();
        }
    }
}

impl Drop for Patcher<'_> {
    fn drop(&mut self) {
        self.unpatch();
    }
}
