use crossterm::event::KeyCode;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::Theme;

/// Cursor position of a single-line text field
///
/// The text itself lives in the owning app state; this only tracks where
/// edits land.
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    cursor_pos: usize, // char index, 0 = before first char
}

impl TextInputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor_pos(&self) -> usize {
        self.cursor_pos
    }

    pub fn reset(&mut self) {
        self.cursor_pos = 0;
    }

    /// Apply an editing key to `value`
    ///
    /// Returns the new text when it changed, `None` when only the cursor
    /// moved or the key was ignored.
    pub fn handle_key(
        &mut self,
        key: KeyCode,
        value: &str,
        max_length: Option<usize>,
    ) -> Option<String> {
        let char_count = value.chars().count();
        self.cursor_pos = self.cursor_pos.min(char_count);

        match key {
            KeyCode::Char(c) => {
                if max_length.is_some_and(|max| char_count >= max) {
                    return None;
                }
                let mut chars: Vec<char> = value.chars().collect();
                chars.insert(self.cursor_pos, c);
                self.cursor_pos += 1;
                Some(chars.into_iter().collect())
            }
            KeyCode::Backspace if self.cursor_pos > 0 => {
                let mut chars: Vec<char> = value.chars().collect();
                chars.remove(self.cursor_pos - 1);
                self.cursor_pos -= 1;
                Some(chars.into_iter().collect())
            }
            KeyCode::Delete if self.cursor_pos < char_count => {
                let mut chars: Vec<char> = value.chars().collect();
                chars.remove(self.cursor_pos);
                Some(chars.into_iter().collect())
            }
            KeyCode::Left => {
                self.cursor_pos = self.cursor_pos.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                self.cursor_pos = (self.cursor_pos + 1).min(char_count);
                None
            }
            KeyCode::Home => {
                self.cursor_pos = 0;
                None
            }
            KeyCode::End => {
                self.cursor_pos = char_count;
                None
            }
            _ => None,
        }
    }

    /// Render `value` as a line, drawing the cursor when focused
    ///
    /// `mask` replaces every character (password fields). An empty value
    /// shows `placeholder` in the faint style.
    pub fn line(
        &self,
        value: &str,
        placeholder: &str,
        focused: bool,
        mask: Option<char>,
        theme: &Theme,
    ) -> Line<'static> {
        let shown: Vec<char> = match mask {
            Some(m) => value.chars().map(|_| m).collect(),
            None => value.chars().collect(),
        };

        if shown.is_empty() && !focused {
            return Line::from(Span::styled(placeholder.to_string(), theme.faint()));
        }

        let cursor = self.cursor_pos.min(shown.len());
        let before: String = shown[..cursor].iter().collect();
        let under: String = shown.get(cursor).map(|c| c.to_string()).unwrap_or_else(|| " ".into());
        let after: String = shown.get(cursor + 1..).map(|rest| rest.iter().collect()).unwrap_or_default();

        let text = Style::default().fg(theme.text_primary);
        let cursor_style = if focused {
            text.add_modifier(Modifier::REVERSED)
        } else {
            text
        };

        Line::from(vec![
            Span::styled(before, text),
            Span::styled(under, cursor_style),
            Span::styled(after, text),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(state: &mut TextInputState, value: &mut String, text: &str) {
        for c in text.chars() {
            if let Some(next) = state.handle_key(KeyCode::Char(c), value, None) {
                *value = next;
            }
        }
    }

    #[test]
    fn test_insert_and_backspace() {
        let mut state = TextInputState::new();
        let mut value = String::new();
        type_str(&mut state, &mut value, "olá");
        assert_eq!(value, "olá");
        assert_eq!(state.cursor_pos(), 3);

        value = state.handle_key(KeyCode::Backspace, &value, None).unwrap();
        assert_eq!(value, "ol");
        assert!(state.handle_key(KeyCode::Delete, &value, None).is_none());
    }

    #[test]
    fn test_insert_in_middle() {
        let mut state = TextInputState::new();
        let mut value = "ac".to_string();
        state.handle_key(KeyCode::End, &value, None);
        state.handle_key(KeyCode::Left, &value, None);
        type_str(&mut state, &mut value, "b");
        assert_eq!(value, "abc");

        state.handle_key(KeyCode::Home, &value, None);
        value = state.handle_key(KeyCode::Delete, &value, None).unwrap();
        assert_eq!(value, "bc");
    }

    #[test]
    fn test_max_length() {
        let mut state = TextInputState::new();
        let mut value = String::new();
        for c in "abcdef".chars() {
            if let Some(next) = state.handle_key(KeyCode::Char(c), &value, Some(3)) {
                value = next;
            }
        }
        assert_eq!(value, "abc");
    }

    #[test]
    fn test_cursor_clamped_after_external_clear() {
        let mut state = TextInputState::new();
        let mut value = String::new();
        type_str(&mut state, &mut value, "texto");

        value.clear();
        let next = state.handle_key(KeyCode::Char('x'), &value, None).unwrap();
        assert_eq!(next, "x");
    }
}
