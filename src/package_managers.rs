use std::fmt;
use std::path::Path;

/// Lock files checked in priority order; the first one present decides.
const LOCK_FILES: &[(&str, NodePackageManager)] = &[
    ("yarn.lock", NodePackageManager::Yarn),
    ("pnpm-lock.yaml", NodePackageManager::Pnpm),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodePackageManager {
    Npm,
    Yarn,
    Pnpm,
}

impl NodePackageManager {
    /// Decide which package manager owns `dir` from its lock files. Falls
    /// back to npm, which needs no lock file.
    pub fn detect(dir: &Path) -> Self {
        let pm = LOCK_FILES
            .iter()
            .find(|(lock_file, _)| dir.join(lock_file).exists())
            .map(|&(_, pm)| pm)
            .unwrap_or(Self::Npm);
        tracing::debug!(
            dir = %dir.display(),
            package_manager = %pm,
            "detected package manager"
        );
        pm
    }

    pub fn program(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        }
    }

    /// Shell command line that runs `script` through this package manager.
    pub fn run_command_line(&self, script: &str) -> String {
        format!("{} run {}", self.program(), quote_arg(script))
    }

    pub fn is_installed(&self) -> bool {
        which::which(self.program()).is_ok()
    }
}

impl fmt::Display for NodePackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

fn quote_arg(arg: &str) -> String {
    let plain = arg.chars().all(|c| {
        c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.' | '/' | '@' | '+' | '=')
    });
    if plain && !arg.is_empty() {
        return arg.to_string();
    }
    if cfg!(windows) {
        quote_cmd(arg)
    } else {
        quote_sh(arg)
    }
}

fn quote_sh(arg: &str) -> String {
    format!("'{}'", arg.replace('\'', r"'\''"))
}

/// cmd.exe has no escape inside double quotes; a quote is doubled instead.
fn quote_cmd(arg: &str) -> String {
    format!("\"{}\"", arg.replace('"', "\"\""))
}
