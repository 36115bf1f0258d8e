use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::cli::{Cli, Commands};
use crate::config::{no_color_requested, resolve_theme, Settings};
use crate::console::Console;
use crate::execution::{Interrupts, RunError, ShellExecutor};
use crate::themes::Theme;
use crate::tui::TerminalPrompt;
use crate::workflow::{Workflow, WorkflowOutcome};

impl Cli {
    /// Runs the selected command and returns the process exit code.
    pub fn execute(&self) -> i32 {
        // Settings may fail to load; errors still honor --theme and NO_COLOR.
        let theme = resolve_theme(self.theme, no_color_requested(), Theme::default());
        let mut console = Console::new(theme);

        match self.run(&mut console) {
            Ok(outcome) => {
                tracing::debug!(?outcome, "done");
                0
            }
            Err(err) => {
                console.error(&err);
                // Only a failed script changes the exit status.
                err.downcast_ref::<RunError>()
                    .map_or(0, RunError::exit_code)
            }
        }
    }

    fn run(&self, console: &mut Console) -> Result<WorkflowOutcome> {
        let project_dir = self.project_dir()?;
        let settings = Settings::load(&project_dir).context("Failed to load settings")?;
        *console = Console::new(settings.get_effective_theme(self.theme));

        match self.command.unwrap_or_default() {
            Commands::List => self.list(&project_dir, &settings, *console),
        }
    }

    fn project_dir(&self) -> Result<PathBuf> {
        match &self.dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().context("Failed to read the current directory"),
        }
    }

    fn list(
        &self,
        project_dir: &Path,
        settings: &Settings,
        console: Console,
    ) -> Result<WorkflowOutcome> {
        let theme = settings.get_effective_theme(self.theme);
        let run_mode = self.run_mode.unwrap_or(settings.run_mode);
        let output = self.output.unwrap_or(settings.output);
        tracing::debug!(dir = %project_dir.display(), ?run_mode, ?output, "listing scripts");

        let interrupts = Interrupts::install().context("Failed to install the Ctrl-C handler")?;
        let executor = ShellExecutor::new(project_dir, output, interrupts);
        let mut prompt = TerminalPrompt::new(theme);

        let workflow = Workflow {
            project_dir,
            run_mode,
            console,
        };
        workflow.list_scripts(&mut prompt, &executor)
    }
}
