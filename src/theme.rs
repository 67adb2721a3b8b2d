//! Process-wide light/dark preference

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::storage::{Storage, keys};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeVariant {
    #[default]
    Light,
    Dark,
}

impl ThemeVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeVariant::Light => "light",
            ThemeVariant::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeVariant::Light => ThemeVariant::Dark,
            ThemeVariant::Dark => ThemeVariant::Light,
        }
    }
}

impl FromStr for ThemeVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeVariant::Light),
            "dark" => Ok(ThemeVariant::Dark),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

impl fmt::Display for ThemeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Theme flag backed by the `unex.theme` record
pub struct ThemeState {
    storage: Arc<dyn Storage>,
}

impl ThemeState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Persisted theme, or light when unset or unreadable
    pub fn current(&self) -> ThemeVariant {
        match self.storage.get(keys::THEME) {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                log::warn!("Ignoring saved theme: {}", e);
                ThemeVariant::default()
            }),
            None => ThemeVariant::default(),
        }
    }

    /// Flip the theme and persist it
    pub fn toggle(&self) -> ThemeVariant {
        let next = self.current().toggled();
        self.storage.set(keys::THEME, next.as_str());
        log::info!("Theme switched to {}", next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_defaults_to_light() {
        let theme = ThemeState::new(Arc::new(MemoryStorage::new()));
        assert_eq!(theme.current(), ThemeVariant::Light);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let storage = Arc::new(MemoryStorage::new());
        let theme = ThemeState::new(storage.clone());

        assert_eq!(theme.toggle(), ThemeVariant::Dark);
        assert_eq!(storage.get(keys::THEME).as_deref(), Some("dark"));
        assert_eq!(theme.toggle(), ThemeVariant::Light);
        assert_eq!(theme.current(), ThemeVariant::Light);
    }

    #[test]
    fn test_unreadable_value_falls_back() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(keys::THEME, "sepia");

        let theme = ThemeState::new(storage);
        assert_eq!(theme.current(), ThemeVariant::Light);
        assert_eq!(theme.toggle(), ThemeVariant::Dark);
    }
}
