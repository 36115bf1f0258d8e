mod app;
mod run;
mod ui;
mod utils;

pub use run::TerminalPrompt;
