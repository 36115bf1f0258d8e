use crossterm::style::Color as ConsoleColor;
use ratatui::style::Color;
use serde::Deserialize;
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    NoColor,
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            "nocolor" => Ok(Theme::NoColor),
            _ => Err(format!("Invalid theme: {}", s)),
        }
    }
}

/// The roles a piece of text can play in the picker and in console messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Command,
    Key,
    Success,
    Failure,
    Warning,
    Info,
    Notice,
}

impl Tone {
    pub fn color(&self, theme: Theme) -> Color {
        match theme {
            Theme::NoColor => Color::Reset,
            Theme::Dark => match self {
                Self::Command => Color::Rgb(0, 255, 0),   // Bright green
                Self::Key => Color::Rgb(0, 255, 255),     // Cyan
                Self::Success => Color::Rgb(50, 205, 50), // Lime green
                Self::Failure => Color::Rgb(255, 99, 71), // Tomato
                Self::Warning => Color::Rgb(255, 215, 0), // Gold
                Self::Info => Color::Rgb(0, 191, 255),    // Deep sky blue
                Self::Notice => Color::Rgb(135, 206, 235),
            },
            Theme::Light => match self {
                Self::Command => Color::Rgb(0, 128, 0),
                Self::Key => Color::Rgb(0, 139, 139),
                Self::Success => Color::Rgb(0, 100, 0),
                Self::Failure => Color::Rgb(178, 34, 34), // Firebrick
                Self::Warning => Color::Rgb(184, 134, 11), // Dark goldenrod
                Self::Info => Color::Rgb(0, 102, 204),
                Self::Notice => Color::Rgb(0, 0, 139),
            },
        }
    }

    /// Same palette as [`Tone::color`], for text printed outside the picker.
    pub fn console_color(&self, theme: Theme) -> Option<ConsoleColor> {
        match self.color(theme) {
            Color::Rgb(r, g, b) => Some(ConsoleColor::Rgb { r, g, b }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_theme_names_case_insensitively() {
        assert_eq!("Dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!("LIGHT".parse::<Theme>(), Ok(Theme::Light));
        assert_eq!("nocolor".parse::<Theme>(), Ok(Theme::NoColor));
        assert!("solarized".parse::<Theme>().is_err());
    }

    #[test]
    fn no_color_theme_has_no_console_colors() {
        assert_eq!(Tone::Command.console_color(Theme::NoColor), None);
        assert!(Tone::Command.console_color(Theme::Dark).is_some());
    }
}
