use anyhow::{bail, Result};
use std::path::Path;

use crate::config::RunMode;
use crate::console::Console;
use crate::execution::{RunError, RunOutcome, ScriptExecutor};
use crate::manifest::{Manifest, ManifestLoad};
use crate::package_managers::NodePackageManager;
use crate::types::{validate_selection, Invocation, ScriptChoice};

#[cfg_attr(test, mockall::automock)]
pub trait ScriptPrompt {
    /// Values of the chosen scripts. Empty when the user picks nothing.
    fn select(&mut self, choices: &[ScriptChoice]) -> Result<Vec<String>>;
}

/// How a `list` run ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowOutcome {
    NoManifest,
    NoScripts,
    Cancelled,
    Succeeded,
    Interrupted,
}

pub struct Workflow<'a> {
    pub project_dir: &'a Path,
    pub run_mode: RunMode,
    pub console: Console,
}

impl<'a> Workflow<'a> {
    /// Load the manifest, let the user pick a script and run it.
    pub fn list_scripts(
        &self,
        prompt: &mut dyn ScriptPrompt,
        executor: &dyn ScriptExecutor,
    ) -> Result<WorkflowOutcome> {
        let manifest = match Manifest::load(self.project_dir)? {
            ManifestLoad::Missing => {
                self.console.failure(&format!(
                    "No package.json found in {}.",
                    describe_dir(self.project_dir)
                ));
                return Ok(WorkflowOutcome::NoManifest);
            }
            ManifestLoad::Loaded(manifest) => manifest,
        };

        if manifest.is_empty() {
            self.console.warning("No scripts found in package.json.");
            return Ok(WorkflowOutcome::NoScripts);
        }

        let choices = ScriptChoice::from_manifest(&manifest);
        let selected = prompt.select(&choices)?;
        if let Err(message) = validate_selection(&selected) {
            bail!(message);
        }

        let Some(script) = selected.first() else {
            self.console.notice("No script selected. Exiting...");
            return Ok(WorkflowOutcome::Cancelled);
        };
        let Some(command) = manifest.command(script) else {
            bail!("Script '{}' not found", script);
        };

        let package_manager = NodePackageManager::detect(self.project_dir);
        if self.run_mode == RunMode::PackageManager && !package_manager.is_installed() {
            tracing::warn!(program = package_manager.program(), "not found on PATH");
        }

        let invocation = Invocation::resolve(self.run_mode, package_manager, script, command);
        match self.run_mode {
            RunMode::PackageManager => self.console.info(&format!(
                "\nRunning script: {} using {}...\n",
                script, package_manager
            )),
            RunMode::Direct => self
                .console
                .info(&format!("\nRunning script: {} ({})...\n", script, command)),
        }

        match executor.execute(&invocation)? {
            RunOutcome::Succeeded { stdout } => {
                self.console
                    .success_block(&format!("Output for \"{}\":", script), &stdout);
                Ok(WorkflowOutcome::Succeeded)
            }
            RunOutcome::Failed { code, stderr } => {
                self.console
                    .failure_block(&format!("Error running script \"{}\":", script), &stderr);
                Err(RunError::ScriptFailed {
                    script: script.clone(),
                    code,
                }
                .into())
            }
            RunOutcome::Interrupted => {
                self.console
                    .failure(&format!("Script \"{}\" interrupted.", script));
                Ok(WorkflowOutcome::Interrupted)
            }
        }
    }
}

fn describe_dir(dir: &Path) -> String {
    let is_cwd = dir == Path::new(".")
        || std::env::current_dir().is_ok_and(|cwd| cwd == dir);
    if is_cwd {
        "the current directory".to_string()
    } else {
        dir.display().to_string()
    }
}
