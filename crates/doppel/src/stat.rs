//! Fake file metadata for filesystem-dependent logic.
//!
//! Logic under test reads metadata through a [`StatSource`] instead of
//! calling the platform directly. Only the paths a test cares about need
//! faking; everything else falls through to the real filesystem.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};
use std::{fs, io};

/// The file metadata subset the test suites care about.
///
/// The defaults are plausible stats for a directory, so a test only has to
/// spell out the fields it actually asserts on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileStat {
    pub size: u64,
    /// Seconds since the Unix epoch.
    pub modified: i64,
    /// Seconds since the Unix epoch.
    pub accessed: i64,
    /// Seconds since the Unix epoch.
    pub created: i64,
    /// Unix-style mode bits (file type and permissions).
    pub mode: u32,
}

impl Default for FileStat {
    fn default() -> Self {
        Self {
            size: 1734,
            modified: 1_257_873_561,
            accessed: 1_257_942_648,
            created: 1_257_873_561,
            mode: 0o40_755,
        }
    }
}

/// Resolves file metadata, preferring installed overrides.
///
/// Overrides are installed through
/// [`Patcher::patch_stat`](crate::patch::Patcher::patch_stat) so they obey
/// the same stack discipline as value patches.
#[derive(Debug, Default)]
pub struct StatSource {
    overrides: Mutex<HashMap<PathBuf, FileStat>>,
}

impl StatSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata for `path`: the installed override if any, otherwise the
    /// real file's.
    ///
    /// # Errors
    /// Propagates the underlying I/O error when no override is installed and
    /// the real file cannot be inspected.
    pub fn stat(&self, path: impl AsRef<Path>) -> io::Result<FileStat> {
        let path = path.as_ref();
        if let Some(stat) = self.overrides.lock().unwrap().get(path) {
            return Ok(stat.clone());
        }
        let meta = fs::metadata(path)?;
        Ok(FileStat {
            size: meta.len(),
            modified: epoch_secs(meta.modified()),
            accessed: epoch_secs(meta.accessed()),
            created: epoch_secs(meta.created()),
            mode: if meta.is_dir() { 0o40_755 } else { 0o100_644 },
        })
    }

    pub(crate) fn install(&self, path: PathBuf, stat: FileStat) -> Option<FileStat> {
        self.overrides.lock().unwrap().insert(path, stat)
    }

    pub(crate) fn restore(&self, path: &Path, previous: Option<FileStat>) {
        let mut overrides = self.overrides.lock().unwrap();
        match previous {
            Some(stat) => {
                overrides.insert(path.to_path_buf(), stat);
            }
            None => {
                overrides.remove(path);
            }
        }
    }
}

// Platforms without a creation or access time report zero rather than
// failing the whole stat.
fn epoch_secs(time: io::Result<SystemTime>) -> i64 {
    time.ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::with_tmpdir;
    use crate::patch::Patcher;

    #[test]
    fn override_takes_precedence_over_the_filesystem() {
        let source = StatSource::new();
        let mut patcher = Patcher::new();

        patcher.patch_stat(&source, "ghost/file", FileStat { size: 42, ..FileStat::default() });
        let stat = source.stat("ghost/file").unwrap();
        assert_eq!(stat.size, 42);
    }

    #[test]
    fn unpatch_removes_the_override() {
        let source = StatSource::new();
        let mut patcher = Patcher::new();

        patcher.patch_stat(&source, "ghost/file", FileStat::default());
        patcher.unpatch();

        assert!(source.stat("ghost/file").is_err());
    }

    #[test]
    fn nested_overrides_restore_the_previous_one() {
        let source = StatSource::new();
        let mut patcher = Patcher::new();

        patcher.patch_stat(&source, "ghost/file", FileStat { size: 1, ..FileStat::default() });
        patcher.patch_stat(&source, "ghost/file", FileStat { size: 2, ..FileStat::default() });
        assert_eq!(source.stat("ghost/file").unwrap().size, 2);

        patcher.unpatch();
        assert!(source.stat("ghost/file").is_err());
    }

    #[test]
    fn real_files_fall_through() {
        with_tmpdir(|tmp| {
            let file = tmp.join("data.txt");
            fs::write(&file, b"hello").unwrap();

            let source = StatSource::new();
            let stat = source.stat(&file).unwrap();
            assert_eq!(stat.size, 5);
            assert!(stat.modified > 0);
        });
    }
}
