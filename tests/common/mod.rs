//! Common test utilities for grinderctl integration tests

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// A throwaway project directory
#[allow(dead_code)]
pub struct TestProject {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestProject {
    /// Create an empty project
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// A project with the default layout: one properties file under
    /// `src/grinder/config`, a script under `src/test/jython` and a manifest
    /// pointing at it.
    pub fn with_default_layout() -> Self {
        let project = Self::new();
        project.write_file(
            "src/grinder/config/grinder.properties",
            "grinder.script=smoke.py\ngrinder.threads=1\ngrinder.runs=1\n",
        );
        project.write_file("src/test/jython/smoke.py", "from net.grinder.script import Test\n");
        project.write_file("grinder.yaml", "test_dir: src/test/jython\n");
        project
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the project
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in the project
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// grinderctl running inside this project, isolated from the caller's
    /// environment
    pub fn cmd(&self) -> Command {
        let mut cmd = grinderctl_cmd();
        cmd.current_dir(&self.path)
            .env_remove("GRINDERCTL_PROJECT")
            .env_remove("RUST_LOG")
            .env("HOME", &self.path);
        cmd
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn grinderctl_cmd() -> Command {
    Command::cargo_bin("grinderctl").unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_file_operations() {
        let project = TestProject::new();
        project.write_file("a/b.txt", "hello");
        assert!(project.file_exists("a/b.txt"));
        assert_eq!(project.read_file("a/b.txt"), "hello");
    }

    #[test]
    fn test_default_layout() {
        let project = TestProject::with_default_layout();
        assert!(project.file_exists("grinder.yaml"));
        assert!(project.file_exists("src/test/jython/smoke.py"));
    }
}
