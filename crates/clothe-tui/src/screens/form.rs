use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use super::ScreenSpec;
use crate::common::{TaskState, TextField};

/// Which element of a form has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(usize),
    Action(usize),
}

/// State of one displayed screen: its fields, output area and in-flight request.
///
/// A fresh `FormScreen` is created every time its view becomes active, so
/// nothing outlives the screen.
#[derive(Debug)]
pub struct FormScreen {
    pub spec: &'static ScreenSpec,
    pub fields: Vec<TextField>,
    pub focus: Focus,
    pub output: String,
    pub task: TaskState,
}

impl FormScreen {
    pub fn new(spec: &'static ScreenSpec) -> Self {
        let fields = spec.fields.iter().map(|f| TextField::new(f.masked)).collect();
        let focus = if spec.fields.is_empty() {
            Focus::Action(0)
        } else {
            Focus::Field(0)
        };
        Self {
            spec,
            fields,
            focus,
            output: String::new(),
            task: TaskState::default(),
        }
    }

    /// The text field backend actions read from.
    pub fn input(&self) -> Option<&TextField> {
        self.fields.first()
    }

    pub fn set_output(&mut self, text: impl Into<String>) {
        self.output = text.into();
    }

    /// Handles a key; returns the index of an action to run, if any.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<usize> {
        if matches!(key.kind, KeyEventKind::Release) {
            return None;
        }

        match key.code {
            KeyCode::F(n) => self.spec.action_for_shortcut(n),
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                None
            }
            KeyCode::Enter => match self.focus {
                Focus::Action(i) => Some(i),
                Focus::Field(i) if i + 1 < self.fields.len() => {
                    self.focus = Focus::Field(i + 1);
                    None
                }
                Focus::Field(_) => (!self.spec.actions.is_empty()).then_some(0),
            },
            _ => {
                if let Focus::Field(i) = self.focus
                    && let Some(field) = self.fields.get_mut(i)
                {
                    field.input(key);
                }
                None
            }
        }
    }

    /// Inserts pasted text into the focused field.
    pub fn paste(&mut self, text: &str) {
        if let Focus::Field(i) = self.focus
            && let Some(field) = self.fields.get_mut(i)
        {
            field.insert_str(text);
        }
    }

    fn focus_slots(&self) -> usize {
        self.fields.len() + self.spec.actions.len()
    }

    fn focus_index(&self) -> usize {
        match self.focus {
            Focus::Field(i) => i,
            Focus::Action(i) => self.fields.len() + i,
        }
    }

    fn set_focus_index(&mut self, index: usize) {
        self.focus = if index < self.fields.len() {
            Focus::Field(index)
        } else {
            Focus::Action(index - self.fields.len())
        };
    }

    fn focus_next(&mut self) {
        let slots = self.focus_slots();
        if slots > 0 {
            self.set_focus_index((self.focus_index() + 1) % slots);
        }
    }

    fn focus_prev(&mut self) {
        let slots = self.focus_slots();
        if slots > 0 {
            self.set_focus_index((self.focus_index() + slots - 1) % slots);
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::screens::{LOGIN, PRIMARY};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_function_keys_trigger_actions() {
        let mut screen = FormScreen::new(&PRIMARY);
        assert_eq!(screen.handle_key(key(KeyCode::F(1))), Some(0));
        assert_eq!(screen.handle_key(key(KeyCode::F(2))), Some(1));
        assert_eq!(screen.handle_key(key(KeyCode::F(9))), None);
    }

    #[test]
    fn test_enter_on_last_field_submits_first_action() {
        let mut screen = FormScreen::new(&LOGIN);
        screen.handle_key(key(KeyCode::Char('a')));
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), None);
        assert_eq!(screen.focus, Focus::Field(1));
        screen.handle_key(key(KeyCode::Char('b')));
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), Some(0));

        assert_eq!(screen.fields[0].text(), "a");
        assert_eq!(screen.fields[1].text(), "b");
    }

    #[test]
    fn test_tab_cycles_through_fields_and_actions() {
        let mut screen = FormScreen::new(&PRIMARY);
        screen.handle_key(key(KeyCode::Tab));
        assert_eq!(screen.focus, Focus::Action(0));
        screen.handle_key(key(KeyCode::Tab));
        screen.handle_key(key(KeyCode::Tab));
        screen.handle_key(key(KeyCode::Tab));
        assert_eq!(screen.focus, Focus::Field(0));
        screen.handle_key(key(KeyCode::BackTab));
        assert_eq!(screen.focus, Focus::Action(2));
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), Some(2));
    }

    #[test]
    fn test_typing_on_action_is_ignored() {
        let mut screen = FormScreen::new(&PRIMARY);
        screen.handle_key(key(KeyCode::Tab));
        screen.handle_key(key(KeyCode::Char('x')));
        screen.paste("pasted");
        assert_eq!(screen.input().unwrap().text(), "");
    }
}
