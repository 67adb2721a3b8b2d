use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fmt;
use std::time::Duration;

/// A key plus the modifiers that must be held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::empty(),
        }
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    pub fn alt(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::ALT,
        }
    }

    /// Binding for a terminal key event
    ///
    /// Shift is dropped where the key code already carries it (BackTab and
    /// typed characters), since terminals disagree on reporting it.
    pub fn from_event(event: &KeyEvent) -> Self {
        let mut modifiers = event.modifiers;
        if matches!(event.code, KeyCode::BackTab | KeyCode::Char(_)) {
            modifiers.remove(KeyModifiers::SHIFT);
        }
        Self {
            code: event.code,
            modifiers,
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        *self == Self::from_event(event)
    }
}

impl From<KeyCode> for KeyBinding {
    fn from(code: KeyCode) -> Self {
        Self::new(code)
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            f.write_str("Ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            f.write_str("Alt+")?;
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("Space"),
            KeyCode::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            KeyCode::Enter => f.write_str("Enter"),
            KeyCode::Esc => f.write_str("Esc"),
            KeyCode::Tab => f.write_str("Tab"),
            KeyCode::BackTab => f.write_str("Shift+Tab"),
            KeyCode::Up => f.write_str("↑"),
            KeyCode::Down => f.write_str("↓"),
            KeyCode::Left => f.write_str("←"),
            KeyCode::Right => f.write_str("→"),
            KeyCode::F(n) => write!(f, "F{}", n),
            other => write!(f, "{:?}", other),
        }
    }
}

/// Inputs an app wants to receive, declared from `subscriptions()`
pub enum Subscription<Msg> {
    Keyboard {
        key: KeyBinding,
        msg: Msg,
        description: String,
    },

    /// Fires `msg` every `interval` while the subscription is declared
    Timer { interval: Duration, msg: Msg },
}

impl<Msg> Subscription<Msg> {
    pub fn keyboard(key: impl Into<KeyBinding>, description: impl Into<String>, msg: Msg) -> Self {
        Subscription::Keyboard {
            key: key.into(),
            msg,
            description: description.into(),
        }
    }

    pub fn ctrl_key(code: KeyCode, description: impl Into<String>, msg: Msg) -> Self {
        Self::keyboard(KeyBinding::ctrl(code), description, msg)
    }

    pub fn timer(interval: Duration, msg: Msg) -> Self {
        Subscription::Timer { interval, msg }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backtab_ignores_shift() {
        let event = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert!(KeyBinding::new(KeyCode::BackTab).matches(&event));
    }

    #[test]
    fn test_ctrl_must_be_held() {
        let plain = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        let ctrl = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert!(!KeyBinding::ctrl(KeyCode::Char('a')).matches(&plain));
        assert!(KeyBinding::ctrl(KeyCode::Char('a')).matches(&ctrl));
    }

    #[test]
    fn test_display() {
        assert_eq!(KeyBinding::ctrl(KeyCode::Char('x')).to_string(), "Ctrl+X");
        assert_eq!(KeyBinding::alt(KeyCode::Char('1')).to_string(), "Alt+1");
        assert_eq!(KeyBinding::new(KeyCode::Char(' ')).to_string(), "Space");
    }
}
