use crate::host::Host;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Find the first directory in `search_paths` that holds an executable `name`.
///
/// Behavior:
/// - Directories are tried in order; empty entries are skipped, never read as
///   the current directory.
/// - A candidate must exist and be executable. A non-executable match does not
///   stop the search, so a later executable copy still wins.
/// - No search paths, or no match, returns `None`.
pub fn find_executable(host: &dyn Host, name: &str, search_paths: &[PathBuf]) -> Option<PathBuf> {
    search_paths
        .iter()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(name))
        .find(|candidate| is_runnable(host, candidate))
}

fn is_runnable(host: &dyn Host, candidate: &Path) -> bool {
    let found = host.exists(candidate) && host.is_executable(candidate);
    trace!(candidate = %candidate.display(), found, "checked search path entry");
    found
}
