use anyhow::{bail, Result};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdin, stdout, IsTerminal};

use crate::themes::Theme;
use crate::types::ScriptChoice;
use crate::workflow::ScriptPrompt;

use super::app::Picker;
use super::ui::run_event_loop;
use super::utils::{prepare_terminal, restore_terminal};

/// The interactive picker, drawn full-screen on the controlling terminal.
pub struct TerminalPrompt {
    theme: Theme,
}

impl TerminalPrompt {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }
}

impl ScriptPrompt for TerminalPrompt {
    fn select(&mut self, choices: &[ScriptChoice]) -> Result<Vec<String>> {
        if !stdin().is_terminal() || !stdout().is_terminal() {
            bail!("choosing a script needs an interactive terminal");
        }

        prepare_terminal()?;
        let _guard = scopeguard::guard((), |_| {
            if let Err(err) = restore_terminal() {
                tracing::warn!(error = %err, "failed to restore terminal");
            }
        });

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        let mut picker = Picker::new(choices, self.theme);
        let selected = run_event_loop(&mut terminal, &mut picker)?;
        tracing::debug!(?selected, "picker closed");
        Ok(selected)
    }
}
