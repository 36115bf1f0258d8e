use crate::config::{OutputMode, RunMode};
use crate::themes::Theme;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sp")]
#[command(author = "Oliver Steele <steele@osteele.com>")]
#[command(version)]
#[command(about = "Pick a script from package.json and run it with the project's package manager", long_about = None)]
pub struct Cli {
    /// Project directory containing package.json (defaults to the current directory)
    #[arg(short, long, global = true)]
    pub dir: Option<PathBuf>,

    /// Set the color theme (dark, light or nocolor)
    #[arg(long, global = true)]
    pub theme: Option<Theme>,

    /// How to run the script: package-manager (`<pm> run <name>`) or direct (the command as written)
    #[arg(long, global = true)]
    pub run_mode: Option<RunMode>,

    /// Print script output when it finishes (captured) or as it happens (streamed)
    #[arg(long, global = true)]
    pub output: Option<OutputMode>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Commands {
    /// List all scripts in package.json
    #[default]
    List,
}
