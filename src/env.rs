use std::env as stdenv;
use std::ffi::OsStr;
use std::path::PathBuf;

/// Startup configuration the interpreter consults for its whole lifetime.
///
/// The environment contains:
/// - `search_paths`: the directories searched for external commands, in order.
///   Empty entries from the `PATH` value are kept here and skipped at lookup.
/// - `home`: the directory `cd` falls back to, if known.
///
/// Both are captured once; later changes to the process environment are not
/// observed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    pub search_paths: Vec<PathBuf>,
    pub home: Option<PathBuf>,
}

impl Environment {
    /// Build an environment from a raw `PATH`-style value and a home directory.
    pub fn new(search_path: Option<&OsStr>, home: Option<PathBuf>) -> Self {
        Self {
            search_paths: search_path.map(split_search_path).unwrap_or_default(),
            home,
        }
    }

    /// Capture `PATH` and `HOME` from the current process.
    pub fn from_process() -> Self {
        Self::new(
            stdenv::var_os("PATH").as_deref(),
            stdenv::var_os("HOME").map(PathBuf::from),
        )
    }

    /// Replace individual values, leaving the rest untouched.
    pub fn with_overrides(mut self, search_path: Option<&str>, home: Option<PathBuf>) -> Self {
        if let Some(value) = search_path {
            self.search_paths = split_search_path(OsStr::new(value));
        }
        if home.is_some() {
            self.home = home;
        }
        self
    }
}

/// Split a delimiter-separated directory list, keeping empty segments.
pub fn split_search_path(value: &OsStr) -> Vec<PathBuf> {
    stdenv::split_paths(value).collect()
}
