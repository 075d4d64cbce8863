//! Path normalization utilities
//!
//! Paths written into properties files and JVM arguments always use forward
//! slashes, whatever the host platform.

use std::path::{Path, PathBuf};

/// Convert a path to its forward-slash string representation
pub fn to_normalized_str(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Resolve `path` against `base` unless it is already absolute
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
