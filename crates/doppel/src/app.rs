//! Wiring between logic under test and its GUI doubles.
//!
//! Doubles are parked in an explicit registry under the name they were
//! created with, so lookups are typed and a misspelled name fails fast
//! instead of silently creating a fresh double.

use crate::call_logger::CallLogger;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Explicit name → view map owned by a test application (or any other
/// holder a test wants to park doubles on).
#[derive(Debug, Default)]
pub struct GuiRegistry {
    views: Mutex<BTreeMap<String, CallLogger>>,
}

impl GuiRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `view` under `name`, replacing any previous registration.
    pub fn register(&self, name: impl Into<String>, view: CallLogger) {
        self.views.lock().unwrap().insert(name.into(), view);
    }

    /// Returns the view registered under `name`.
    ///
    /// # Panics
    /// Panics if no view was registered under that name.
    #[track_caller]
    #[must_use]
    pub fn view(&self, name: &str) -> CallLogger {
        self.views
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_else(|| panic!("no gui double registered under {name:?}"))
    }

    /// Clears the call log of every registered view.
    pub fn clear_all(&self) {
        for view in self.views.lock().unwrap().values() {
            view.clear_calls();
        }
    }
}

/// Base for test applications.
///
/// Owns the main-window value `W` (the default construction parent handed to
/// logic objects) and the registry of GUI doubles created through
/// [`TestApp::make_gui`].
#[derive(Debug, Default)]
pub struct TestApp<W> {
    main_window: W,
    guis: GuiRegistry,
}

impl<W> TestApp<W> {
    pub fn new(main_window: W) -> Self {
        Self { main_window, guis: GuiRegistry::new() }
    }

    #[must_use]
    pub fn main_window(&self) -> &W {
        &self.main_window
    }

    #[must_use]
    pub fn guis(&self) -> &GuiRegistry {
        &self.guis
    }

    /// Constructs a logic object with a fresh recording view and the
    /// application's main window as parent.
    ///
    /// The view is registered under `name` on the application itself and the
    /// constructed logic object is returned.
    pub fn make_gui<T>(&self, name: &str, ctor: impl FnOnce(CallLogger, &W) -> T) -> T {
        self.make_gui_with(name, CallLogger::new(), &self.guis, ctor)
    }

    /// Variant of [`TestApp::make_gui`] with an explicit view and holder.
    pub fn make_gui_with<T>(
        &self,
        name: &str,
        view: CallLogger,
        holder: &GuiRegistry,
        ctor: impl FnOnce(CallLogger, &W) -> T,
    ) -> T {
        holder.register(name, view.clone());
        ctor(view, &self.main_window)
    }

    /// Fetches the view registered under `name` for assertions.
    ///
    /// # Panics
    /// Panics if no view was registered under that name.
    #[track_caller]
    #[must_use]
    pub fn gui(&self, name: &str) -> CallLogger {
        self.guis.view(name)
    }

    /// Clears every registered view's call log between test phases.
    pub fn clear_gui_calls(&self) {
        self.guis.clear_all();
    }
}
