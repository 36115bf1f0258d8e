use crossterm::style::Stylize;

use crate::themes::{Theme, Tone};

/// User-facing messages printed outside the picker.
#[derive(Debug, Clone, Copy)]
pub struct Console {
    theme: Theme,
}

impl Console {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn paint(&self, tone: Tone, text: &str) -> String {
        match tone.console_color(self.theme) {
            Some(color) => text.with(color).to_string(),
            None => text.to_string(),
        }
    }

    pub fn failure(&self, message: &str) {
        println!("{}", self.paint(Tone::Failure, message));
    }

    pub fn warning(&self, message: &str) {
        println!("{}", self.paint(Tone::Warning, message));
    }

    pub fn notice(&self, message: &str) {
        println!("{}", self.paint(Tone::Notice, message));
    }

    pub fn info(&self, message: &str) {
        println!("{}", self.paint(Tone::Info, message));
    }

    /// A success label, followed by `body` when there is one.
    pub fn success_block(&self, label: &str, body: &str) {
        println!("{}", self.paint(Tone::Success, label));
        if !body.is_empty() {
            print!("{}", with_trailing_newline(body));
        }
    }

    pub fn failure_block(&self, label: &str, body: &str) {
        eprintln!("{}", self.paint(Tone::Failure, label));
        if !body.is_empty() {
            eprint!("{}", with_trailing_newline(body));
        }
    }

    pub fn error(&self, err: &anyhow::Error) {
        eprintln!("{} {:#}", self.paint(Tone::Failure, "An error occurred:"), err);
    }
}

fn with_trailing_newline(body: &str) -> String {
    if body.ends_with('\n') {
        body.to_string()
    } else {
        format!("{}\n", body)
    }
}
