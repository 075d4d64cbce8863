//! Command helper utilities

use std::path::{Path, PathBuf};

use crate::cli::RunFlags;
use crate::common::path_normalizer::resolve_against;
use crate::config::manifest::MANIFEST_FILE;
use crate::config::settings::resolve_project_dir;
use crate::config::{Manifest, RunSettings};
use crate::error::Result;

/// Project directory and the manifest found for it
#[derive(Debug)]
pub struct Project {
    pub dir: PathBuf,
    pub manifest: Manifest,
}

/// Open the project. The default manifest may be absent; an explicitly
/// named one must exist.
pub fn open_project(project: Option<&Path>, manifest: Option<&Path>) -> Result<Project> {
    let dir = resolve_project_dir(project)?;
    let manifest = match manifest {
        Some(path) => Manifest::load(&resolve_against(&dir, path))?,
        None => Manifest::load_or_default(&dir.join(MANIFEST_FILE))?,
    };
    Ok(Project { dir, manifest })
}

/// Layer defaults, manifest and flags into run settings.
pub fn resolve_settings(
    project: Option<&Path>,
    manifest: Option<&Path>,
    flags: &RunFlags,
) -> Result<RunSettings> {
    let project = open_project(project, manifest)?;
    RunSettings::resolve(&project.dir, &project.manifest, &flags.to_overrides())
}
