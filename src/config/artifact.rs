//! Resolved dependency artifacts and the local artifact repository layout

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A dependency already resolved by the build tool to a file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub group: String,
    pub artifact: String,
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,

    /// Location of the resolved artifact file
    pub file: PathBuf,
}

impl Artifact {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
        file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
            classifier: None,
            file: file.into(),
        }
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    /// Classifier, treating an empty string as absent.
    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref().filter(|c| !c.is_empty())
    }

    /// Path of this artifact relative to a repository root:
    /// `<group as dirs>/<artifact>/<version>/<artifact>-<version>[-<classifier>].jar`
    pub fn repository_path(&self) -> PathBuf {
        let mut path: PathBuf = self.group.split('.').collect();
        path.push(&self.artifact);
        path.push(&self.version);

        let file_name = match self.classifier() {
            Some(classifier) => format!("{}-{}-{}.jar", self.artifact, self.version, classifier),
            None => format!("{}-{}.jar", self.artifact, self.version),
        };
        path.push(file_name);
        path
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)?;
        if let Some(classifier) = self.classifier() {
            write!(f, ":{classifier}")?;
        }
        Ok(())
    }
}

/// Root of the local artifact repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRepository {
    root: PathBuf,
}

impl LocalRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<home>/.m2/repository`, falling back to a relative `.m2/repository`
    /// when no home directory is known.
    pub fn default_location() -> Self {
        let home = dirs::home_dir().unwrap_or_default();
        Self::new(home.join(".m2").join("repository"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of `artifact` inside this repository.
    pub fn artifact_path(&self, artifact: &Artifact) -> PathBuf {
        self.root.join(artifact.repository_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent() -> Artifact {
        Artifact::new(
            "net.sourceforge.grinder",
            "grinder-dcr-agent",
            "3.11",
            "/repo/net/sourceforge/grinder/grinder-dcr-agent/3.11/grinder-dcr-agent-3.11.jar",
        )
    }

    #[test]
    fn test_repository_path_layout() {
        assert_eq!(
            agent().repository_path(),
            PathBuf::from("net/sourceforge/grinder/grinder-dcr-agent/3.11/grinder-dcr-agent-3.11.jar")
        );
    }

    #[test]
    fn test_repository_path_with_classifier() {
        let artifact = agent().with_classifier("jdk6");
        assert!(
            artifact
                .repository_path()
                .ends_with("grinder-dcr-agent-3.11-jdk6.jar")
        );
    }

    #[test]
    fn test_empty_classifier_is_ignored() {
        let artifact = agent().with_classifier("");
        assert_eq!(artifact.classifier(), None);
        assert!(artifact.repository_path().ends_with("grinder-dcr-agent-3.11.jar"));
    }

    #[test]
    fn test_local_repository_artifact_path() {
        let repo = LocalRepository::new("/home/tester/.m2/repository");
        assert_eq!(
            repo.artifact_path(&agent()),
            PathBuf::from(
                "/home/tester/.m2/repository/net/sourceforge/grinder/grinder-dcr-agent/3.11/grinder-dcr-agent-3.11.jar"
            )
        );
    }

    #[test]
    fn test_display_coordinates() {
        assert_eq!(
            agent().with_classifier("jdk6").to_string(),
            "net.sourceforge.grinder:grinder-dcr-agent:3.11:jdk6"
        );
    }

    #[test]
    fn test_deserialize_without_classifier() {
        let yaml = "group: net.sourceforge.grinder\nartifact: grinder-core\nversion: '3.11'\nfile: /tmp/core.jar\n";
        let artifact: Artifact = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(artifact.classifier, None);
        assert_eq!(artifact.file, PathBuf::from("/tmp/core.jar"));
    }
}
