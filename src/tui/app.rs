use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;

use crate::themes::Theme;
use crate::types::{validate_selection, ScriptChoice};

#[derive(Debug, PartialEq, Eq)]
pub enum PickerAction {
    Continue,
    Confirm(Vec<String>),
    Cancel,
}

/// State of the checkbox list: cursor, toggled rows and the last
/// validation message.
pub struct Picker<'a> {
    pub choices: &'a [ScriptChoice],
    pub state: ListState,
    pub toggled: Vec<bool>,
    pub error: Option<&'static str>,
    pub theme: Theme,
}

impl<'a> Picker<'a> {
    pub fn new(choices: &'a [ScriptChoice], theme: Theme) -> Self {
        let mut state = ListState::default();
        if !choices.is_empty() {
            state.select(Some(0));
        }
        Self {
            choices,
            state,
            toggled: vec![false; choices.len()],
            error: None,
            theme,
        }
    }

    // The list does not wrap around at either end.
    pub fn next(&mut self) {
        if let Some(i) = self.state.selected() {
            if i + 1 < self.choices.len() {
                self.state.select(Some(i + 1));
            }
        }
    }

    pub fn previous(&mut self) {
        if let Some(i) = self.state.selected() {
            self.state.select(Some(i.saturating_sub(1)));
        }
    }

    pub fn toggle(&mut self) {
        if let Some(i) = self.state.selected() {
            self.toggled[i] = !self.toggled[i];
            self.error = None;
        }
    }

    pub fn selected_values(&self) -> Vec<String> {
        self.choices
            .iter()
            .zip(&self.toggled)
            .filter(|&(_, &on)| on)
            .map(|(choice, _)| choice.value.clone())
            .collect()
    }

    pub fn confirm(&mut self) -> PickerAction {
        let values = self.selected_values();
        match validate_selection(&values) {
            Ok(()) => PickerAction::Confirm(values),
            Err(message) => {
                self.error = Some(message);
                PickerAction::Continue
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PickerAction {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                PickerAction::Cancel
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.previous();
                PickerAction::Continue
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.next();
                PickerAction::Continue
            }
            KeyCode::Char(' ') => {
                self.toggle();
                PickerAction::Continue
            }
            KeyCode::Enter => self.confirm(),
            KeyCode::Char('q') | KeyCode::Esc => PickerAction::Cancel,
            _ => PickerAction::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MULTI_SELECTION_MESSAGE;

    fn choices() -> Vec<ScriptChoice> {
        ["build", "test", "lint"]
            .iter()
            .map(|name| ScriptChoice {
                name: name.to_string(),
                value: name.to_string(),
                command: format!("run-{}", name),
            })
            .collect()
    }

    fn press(picker: &mut Picker, code: KeyCode) -> PickerAction {
        picker.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn enter_without_toggling_confirms_nothing() {
        let choices = choices();
        let mut picker = Picker::new(&choices, Theme::NoColor);
        assert_eq!(press(&mut picker, KeyCode::Enter), PickerAction::Confirm(Vec::new()));
    }

    #[test]
    fn space_toggles_the_row_under_the_cursor() {
        let choices = choices();
        let mut picker = Picker::new(&choices, Theme::NoColor);
        press(&mut picker, KeyCode::Down);
        press(&mut picker, KeyCode::Char(' '));

        assert_eq!(
            press(&mut picker, KeyCode::Enter),
            PickerAction::Confirm(vec!["test".to_string()])
        );
    }

    #[test]
    fn two_toggled_rows_keep_the_prompt_open() {
        let choices = choices();
        let mut picker = Picker::new(&choices, Theme::NoColor);
        press(&mut picker, KeyCode::Char(' '));
        press(&mut picker, KeyCode::Char('j'));
        press(&mut picker, KeyCode::Char(' '));

        assert_eq!(press(&mut picker, KeyCode::Enter), PickerAction::Continue);
        assert_eq!(picker.error, Some(MULTI_SELECTION_MESSAGE));

        // Untoggling one clears the message and allows confirming.
        press(&mut picker, KeyCode::Char(' '));
        assert_eq!(picker.error, None);
        assert_eq!(
            press(&mut picker, KeyCode::Enter),
            PickerAction::Confirm(vec!["build".to_string()])
        );
    }

    #[test]
    fn cursor_stops_at_both_ends() {
        let choices = choices();
        let mut picker = Picker::new(&choices, Theme::NoColor);
        press(&mut picker, KeyCode::Up);
        assert_eq!(picker.state.selected(), Some(0));

        for _ in 0..5 {
            press(&mut picker, KeyCode::Down);
        }
        assert_eq!(picker.state.selected(), Some(2));
    }

    #[test]
    fn escape_q_and_ctrl_c_cancel() {
        let choices = choices();
        let mut picker = Picker::new(&choices, Theme::NoColor);
        assert_eq!(press(&mut picker, KeyCode::Esc), PickerAction::Cancel);
        assert_eq!(press(&mut picker, KeyCode::Char('q')), PickerAction::Cancel);
        assert_eq!(
            picker.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            PickerAction::Cancel
        );
    }
}
