use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::themes::Theme;

const CONFIG_FILE_NAME: &str = ".sp.toml";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub run_mode: RunMode,
    #[serde(default)]
    pub output: OutputMode,
}

/// How the selected script is turned into a shell command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunMode {
    /// `<package manager> run <name>`
    #[default]
    PackageManager,
    /// The command text exactly as written in the manifest.
    Direct,
}

impl FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "package-manager" | "pm" => Ok(RunMode::PackageManager),
            "direct" => Ok(RunMode::Direct),
            _ => Err(format!("Invalid run mode: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Buffer the script's output and print it once the script finishes.
    #[default]
    Captured,
    /// Relay output line by line while the script runs.
    Streamed,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "captured" => Ok(OutputMode::Captured),
            "streamed" => Ok(OutputMode::Streamed),
            _ => Err(format!("Invalid output mode: {}", s)),
        }
    }
}

impl Settings {
    pub fn load(project_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path(project_dir);
        tracing::debug!(path = %config_path.display(), "loading settings");

        let s = Config::builder()
            .set_default("theme", "dark")?
            .set_default("run_mode", "package-manager")?
            .set_default("output", "captured")?
            .add_source(File::from(config_path).required(false))
            .add_source(Environment::with_prefix("SP"))
            .build()?;

        s.try_deserialize()
    }

    fn get_config_path(project_dir: &Path) -> PathBuf {
        // First check the project directory
        let local_config = project_dir.join(CONFIG_FILE_NAME);
        if local_config.exists() {
            return local_config;
        }

        // Fall back to home directory
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_FILE_NAME)
    }

    pub fn get_effective_theme(&self, cli_theme: Option<Theme>) -> Theme {
        resolve_theme(cli_theme, no_color_requested(), self.theme)
    }
}

pub fn no_color_requested() -> bool {
    std::env::var_os("NO_COLOR").is_some()
}

/// Theme to use before and after settings are loaded.
pub fn resolve_theme(cli_theme: Option<Theme>, no_color: bool, configured: Theme) -> Theme {
    // Priority order:
    // 1. CLI argument (if present)
    // 2. Environment variable NO_COLOR (if present)
    // 3. Settings (config file, then SP_THEME)
    if let Some(theme) = cli_theme {
        return theme;
    }

    if no_color {
        return Theme::NoColor;
    }

    configured
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn reads_project_config_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "theme = \"light\"\nrun_mode = \"direct\"\noutput = \"streamed\"\n",
        )
        .unwrap();

        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.run_mode, RunMode::Direct);
        assert_eq!(settings.output, OutputMode::Streamed);
    }

    #[test]
    fn rejects_unknown_run_mode() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "run_mode = \"sideways\"\n").unwrap();

        assert!(Settings::load(dir.path()).is_err());
    }

    #[test]
    fn cli_theme_wins() {
        let settings = Settings::default();
        assert_eq!(settings.get_effective_theme(Some(Theme::Light)), Theme::Light);
    }

    #[test]
    fn no_color_beats_configured_theme() {
        assert_eq!(resolve_theme(None, true, Theme::Light), Theme::NoColor);
        assert_eq!(resolve_theme(None, true, Theme::default()), Theme::NoColor);
        assert_eq!(resolve_theme(Some(Theme::Dark), true, Theme::Light), Theme::Dark);
        assert_eq!(resolve_theme(None, false, Theme::Light), Theme::Light);
    }

    #[test]
    fn parses_mode_names() {
        assert_eq!("package-manager".parse(), Ok(RunMode::PackageManager));
        assert_eq!("Direct".parse(), Ok(RunMode::Direct));
        assert_eq!("streamed".parse(), Ok(OutputMode::Streamed));
        assert!("loud".parse::<OutputMode>().is_err());
    }
}
