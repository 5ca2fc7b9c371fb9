//! Light/dark theme state.
//!
//! The toggle runs in the visitor's browser, but its behaviour is modelled
//! here so the rules live in one place and can be tested:
//!
//! - [`ThemeState::load`] resolves the initial theme from the stored
//!   preference, falling back to the system preference when nothing usable
//!   is stored or storage cannot be read.
//! - [`ThemeState::toggle`] flips between light and dark and persists the
//!   new value.
//! - [`ThemeState::persist`] writes the current value; write failures are
//!   swallowed so a locked-down browser still gets a working toggle.
//!
//! `static/theme.js` is the browser half. [`script`] and [`head_script`]
//! inject [`STORAGE_KEY`] and [`DARK_CLASS`] into it so both sides agree on
//! names.
//!
//! Nothing in the build calls [`ThemeState`]; it is the reference model for
//! the shipped script. `tests/browser_theme.rs` clicks the real toggle in
//! Chrome and checks the page's class and `localStorage` against a
//! `ThemeState` fed the same system preference and stored value.

use std::collections::HashMap;
use std::fmt;

/// `localStorage` key holding the visitor's explicit choice.
pub const STORAGE_KEY: &str = "theme";

/// Class on `<html>` that switches the stylesheet to dark colors.
pub const DARK_CLASS: &str = "dark";

const THEME_JS: &str = include_str!("../static/theme.js");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Theme> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage access failed (private browsing, disabled cookies, quota).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageUnavailable;

/// Durable key/value storage for the preference (`localStorage` in the browser).
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageUnavailable>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageUnavailable>;
}

/// In-memory store. `unavailable()` builds one that fails every access.
#[derive(Debug)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    available: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            available: true,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            values: HashMap::new(),
            available: false,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageUnavailable> {
        if !self.available {
            return Err(StorageUnavailable);
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageUnavailable> {
        if !self.available {
            return Err(StorageUnavailable);
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Current theme plus the store it persists to.
#[derive(Debug)]
pub struct ThemeState<S> {
    current: Theme,
    store: S,
}

impl<S: PreferenceStore> ThemeState<S> {
    /// Resolve the initial theme: stored choice first, then the system preference.
    pub fn load(store: S, system_prefers_dark: bool) -> Self {
        let system = if system_prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        };
        let current = match store.get(STORAGE_KEY) {
            Ok(Some(stored)) => Theme::parse(&stored).unwrap_or(system),
            Ok(None) | Err(StorageUnavailable) => system,
        };
        Self { current, store }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flip the theme and persist it. Returns the new theme.
    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.toggled();
        self.persist();
        self.current
    }

    /// Write the current theme to the store, ignoring storage failures.
    pub fn persist(&mut self) {
        if self.store.set(STORAGE_KEY, self.current.as_str()).is_err() {
            log::trace!("theme preference not persisted: storage unavailable");
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Toggle script, placed at the end of `<body>`.
pub fn script() -> String {
    THEME_JS
        .replace("__STORAGE_KEY__", STORAGE_KEY)
        .replace("__DARK_CLASS__", DARK_CLASS)
}

/// Tiny `<head>` script applying the initial theme before first paint.
pub fn head_script() -> String {
    format!(
        "(function(){{var t=null;try{{t=localStorage.getItem('{key}');}}catch(e){{}}\
         if(t!=='light'&&t!=='dark'){{t=window.matchMedia('(prefers-color-scheme: dark)').matches?'dark':'light';}}\
         document.documentElement.classList.toggle('{class}',t==='dark');}})();",
        key = STORAGE_KEY,
        class = DARK_CLASS,
    )
}
