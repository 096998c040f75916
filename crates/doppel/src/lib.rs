//! Test-support toolkit for desktop-application suites.
//!
//! Provides call-logging GUI doubles, reversible value patching with
//! guaranteed restoration, an injectable clock for frozen-date tests, a
//! call-argument recorder, and small assertion and fixture helpers.
//!
//! Everything is scoped to a single test's lifetime: each test constructs its
//! own doubles, patcher and temporary directory, and cleanup runs on every
//! exit path, panics included. Nothing here is meant as a general-purpose
//! mocking framework.

pub mod app;
pub mod asserts;
pub mod call_logger;
pub mod clock;
pub mod fixtures;
pub mod patch;
pub mod record;
pub mod stat;

pub use app::{GuiRegistry, TestApp};
pub use asserts::{assert_almost_equal, eq_, eq_msg};
pub use call_logger::CallLogger;
pub use clock::Clock;
pub use fixtures::{TestData, with_tmpdir};
pub use patch::{PatchCell, Patcher};
pub use record::{ArgMap, LoggedFn, Signature, VARIADIC_KEY, unify_args};
pub use stat::{FileStat, StatSource};
