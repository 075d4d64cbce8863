//! Launching the Grinder agent and console
//!
//! A [`LaunchPlan`] is built from a prepared run and either printed
//! (`--dry-run`) or executed in the project directory.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::{DaemonOption, PreparedRun};
use crate::error::{Result, launch};

pub const AGENT_MAIN_CLASS: &str = "net.grinder.Grinder";
pub const CONSOLE_MAIN_CLASS: &str = "net.grinder.Console";

/// A fully spelled out command line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchPlan {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

fn classpath_args(run: &PreparedRun) -> Vec<String> {
    match run.configuration.classpath() {
        Some(classpath) if !classpath.is_empty() => vec!["-cp".to_string(), classpath.to_string()],
        _ => Vec::new(),
    }
}

impl LaunchPlan {
    /// `<java> [jvm arguments] -cp <classpath> net.grinder.Grinder [-daemon <s>] <properties>`
    pub fn agent(java: &str, run: &PreparedRun, daemon: DaemonOption, working_dir: &Path) -> Self {
        let mut args: Vec<String> = run
            .configuration
            .jvm_arguments()
            .map(|a| a.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        args.extend(classpath_args(run));
        args.push(AGENT_MAIN_CLASS.to_string());
        if daemon.enabled {
            args.push("-daemon".to_string());
            args.push(daemon.period_seconds().to_string());
        }
        args.push(run.layout.properties_file.display().to_string());

        Self {
            program: java.to_string(),
            args,
            working_dir: working_dir.to_path_buf(),
        }
    }

    /// `<java> -cp <classpath> net.grinder.Console [-headless]`
    pub fn console(java: &str, run: &PreparedRun, headless: bool, working_dir: &Path) -> Self {
        let mut args = classpath_args(run);
        args.push(CONSOLE_MAIN_CLASS.to_string());
        if headless {
            args.push("-headless".to_string());
        }

        Self {
            program: java.to_string(),
            args,
            working_dir: working_dir.to_path_buf(),
        }
    }

    /// Run the plan to completion. A spawn failure or an unsuccessful exit
    /// status is an error.
    pub fn execute(&self) -> Result<()> {
        info!(program = %self.program, "launching");
        debug!(command = %self, dir = %self.working_dir.display(), "launch plan");

        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.working_dir)
            .status()
            .map_err(|e| launch::failed(&self.program, e.to_string()))?;

        if status.success() {
            Ok(())
        } else {
            Err(launch::failed(&self.program, format!("exited with {status}")))
        }
    }
}

fn quote(arg: &str) -> String {
    if arg.is_empty() || arg.chars().any(char::is_whitespace) {
        format!("'{}'", arg.replace('\'', "'\\''"))
    } else {
        arg.to_string()
    }
}

impl fmt::Display for LaunchPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}
