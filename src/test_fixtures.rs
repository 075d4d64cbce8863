//! Test fixtures for file system based tests.
//!
//! ```ignore
//! use crate::test_fixtures::{create_temp_dir, create_test_files};
//!
//! let temp = create_temp_dir();
//! create_test_files(&temp, &[("src/grinder/config/grinder.properties", "grinder.script=a.py")]);
//! ```

use tempfile::TempDir;

/// Create a temp directory in the system temp location.
///
/// Uses `crate::temp::temp_dir_base()` so temp dirs are never created under
/// the current working directory.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(crate::temp::temp_dir_base()).expect("Failed to create temp directory")
}

/// Create files below `temp` from `(relative path, content)` pairs,
/// creating parent directories as needed.
///
/// # Panics
///
/// Panics if any file cannot be created.
pub fn create_test_files(temp: &TempDir, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = temp.path().join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&full_path, content).expect("Failed to write test file");
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_create_temp_dir() {
        let temp = create_temp_dir();
        assert!(temp.path().exists());
    }

    #[test]
    fn test_create_test_files() {
        let temp = create_temp_dir();
        create_test_files(
            &temp,
            &[
                ("src/grinder/config/grinder.properties", "grinder.script=a.py"),
                ("tests/a.py", "print 'a'"),
            ],
        );

        let content = std::fs::read_to_string(temp.path().join("src/grinder/config/grinder.properties"))
            .expect("Failed to read");
        assert_eq!(content, "grinder.script=a.py");
        assert!(temp.path().join("tests/a.py").is_file());
    }
}
