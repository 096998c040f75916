//! Temporary-directory fixture and test-data location.

use std::path::{Path, PathBuf};

/// Runs `f` with a fresh temporary directory.
///
/// The directory is removed recursively once `f` returns, on every exit path
/// including panics.
///
/// # Panics
/// Panics when the temporary directory cannot be created.
pub fn with_tmpdir<R>(f: impl FnOnce(&Path) -> R) -> R {
    let dir = tempfile::tempdir().expect("create temporary directory");
    f(dir.path())
}

/// Locates files under a fixed test-data directory.
#[derive(Debug)]
pub struct TestData {
    base: PathBuf,
}

impl TestData {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Resolves `relative` against the base directory.
    ///
    /// # Panics
    /// Panics immediately when the resolved path does not exist, so a typo in
    /// a data path fails at the lookup site instead of deep inside the test.
    #[track_caller]
    #[must_use]
    pub fn filepath(&self, relative: impl AsRef<Path>) -> PathBuf {
        let path = self.base.join(relative);
        assert!(path.exists(), "missing test data file: {}", path.display());
        path
    }
}
