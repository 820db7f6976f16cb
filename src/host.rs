//! Filesystem collaborators the interpreter consults.
//!
//! Everything that touches the real filesystem or the process working
//! directory goes through [`Host`], so the resolver and `cd` can be exercised
//! against a fake in tests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub trait Host {
    /// Whether anything exists at `path` (symlinks followed).
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is a file the current user may execute.
    fn is_executable(&self, path: &Path) -> bool;

    /// Whether `path` names an existing directory.
    ///
    /// A missing path, or one whose prefix is not a directory, is `Ok(false)`.
    /// Other failures (e.g. permission denied while probing) are errors.
    fn is_dir(&self, path: &Path) -> io::Result<bool>;

    fn current_dir(&self) -> io::Result<PathBuf>;

    fn set_current_dir(&self, path: &Path) -> io::Result<()>;
}

/// The real operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsHost;

impl Host for OsHost {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    #[cfg(unix)]
    fn is_executable(&self, path: &Path) -> bool {
        use nix::unistd::{AccessFlags, access};
        // Mode bits alone say nothing about who may run the file.
        fs::metadata(path).is_ok_and(|metadata| metadata.is_file())
            && access(path, AccessFlags::X_OK).is_ok()
    }

    #[cfg(not(unix))]
    fn is_executable(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> io::Result<bool> {
        match fs::metadata(path) {
            Ok(metadata) => Ok(metadata.is_dir()),
            Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn set_current_dir(&self, path: &Path) -> io::Result<()> {
        std::env::set_current_dir(path)
    }
}

/// The OS-provided text of an I/O error, without the ` (os error N)` suffix
/// that `io::Error`'s `Display` appends.
pub fn os_message(err: &io::Error) -> String {
    let text = err.to_string();
    match err.raw_os_error() {
        Some(code) => text
            .strip_suffix(&format!(" (os error {code})"))
            .map(str::to_owned)
            .unwrap_or(text),
        None => text,
    }
}
