use crate::config::RunMode;
use crate::manifest::Manifest;
use crate::package_managers::NodePackageManager;

pub const MULTI_SELECTION_MESSAGE: &str = "Please select only one script at a time.";

/// One row of the picker: what is shown, and what selecting it yields.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptChoice {
    pub name: String,
    pub value: String,
    pub command: String,
}

impl ScriptChoice {
    pub fn from_manifest(manifest: &Manifest) -> Vec<Self> {
        manifest
            .scripts
            .iter()
            .map(|(name, command)| Self {
                name: name.clone(),
                value: name.clone(),
                command: command.clone(),
            })
            .collect()
    }
}

/// Accepts an empty or single selection; anything larger gets the message
/// shown under the picker.
pub fn validate_selection<T>(selected: &[T]) -> Result<(), &'static str> {
    if selected.len() > 1 {
        return Err(MULTI_SELECTION_MESSAGE);
    }
    Ok(())
}

/// A script resolved to the command line handed to the shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub script: String,
    pub command_line: String,
    pub run_mode: RunMode,
}

impl Invocation {
    pub fn resolve(
        run_mode: RunMode,
        package_manager: NodePackageManager,
        script: &str,
        command: &str,
    ) -> Self {
        let command_line = match run_mode {
            RunMode::PackageManager => package_manager.run_command_line(script),
            RunMode::Direct => command.to_string(),
        };
        Self {
            script: script.to_string(),
            command_line,
            run_mode,
        }
    }
}
