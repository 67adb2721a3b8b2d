/*
Catppuccin palettes: Latte renders the light theme, Mocha the dark one.
Only the roles the portal draws with are kept.
*/

use ratatui::style::{Color, Modifier, Style};

use crate::theme::ThemeVariant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub accent_primary: Color,
    pub accent_secondary: Color,
    pub accent_error: Color,
    pub accent_warning: Color,
    pub accent_success: Color,
    pub accent_info: Color,

    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_tertiary: Color,

    pub border_primary: Color,
    pub border_focused: Color,

    pub bg_base: Color,
    pub bg_surface: Color,
    pub bg_overlay: Color,
}

impl Theme {
    pub fn new(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Light => Self::latte(),
            ThemeVariant::Dark => Self::mocha(),
        }
    }

    fn mocha() -> Self {
        Self {
            accent_primary: Color::Rgb(0x89, 0xb4, 0xfa),   // blue
            accent_secondary: Color::Rgb(0xcb, 0xa6, 0xf7), // mauve
            accent_error: Color::Rgb(0xf3, 0x8b, 0xa8),     // red
            accent_warning: Color::Rgb(0xfa, 0xb3, 0x87),   // peach
            accent_success: Color::Rgb(0xa6, 0xe3, 0xa1),   // green
            accent_info: Color::Rgb(0x89, 0xdc, 0xeb),      // sky
            text_primary: Color::Rgb(0xcd, 0xd6, 0xf4),
            text_secondary: Color::Rgb(0xa6, 0xad, 0xc8),
            text_tertiary: Color::Rgb(0x7f, 0x84, 0x9c),
            border_primary: Color::Rgb(0x58, 0x5b, 0x70),
            border_focused: Color::Rgb(0x89, 0xb4, 0xfa),
            bg_base: Color::Rgb(0x1e, 0x1e, 0x2e),
            bg_surface: Color::Rgb(0x31, 0x32, 0x44),
            bg_overlay: Color::Rgb(0x18, 0x18, 0x25),
        }
    }

    fn latte() -> Self {
        Self {
            accent_primary: Color::Rgb(0x1e, 0x66, 0xf5),
            accent_secondary: Color::Rgb(0x88, 0x39, 0xef),
            accent_error: Color::Rgb(0xd2, 0x0f, 0x39),
            accent_warning: Color::Rgb(0xfe, 0x64, 0x0b),
            accent_success: Color::Rgb(0x40, 0xa0, 0x2b),
            accent_info: Color::Rgb(0x04, 0xa5, 0xe5),
            text_primary: Color::Rgb(0x4c, 0x4f, 0x69),
            text_secondary: Color::Rgb(0x6c, 0x6f, 0x85),
            text_tertiary: Color::Rgb(0x8c, 0x8f, 0xa1),
            border_primary: Color::Rgb(0xac, 0xb0, 0xbe),
            border_focused: Color::Rgb(0x1e, 0x66, 0xf5),
            bg_base: Color::Rgb(0xef, 0xf1, 0xf5),
            bg_surface: Color::Rgb(0xcc, 0xd0, 0xda),
            bg_overlay: Color::Rgb(0xe6, 0xe9, 0xef),
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text_primary).bg(self.bg_base)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn faint(&self) -> Style {
        Style::default().fg(self.text_tertiary)
    }

    pub fn heading(&self) -> Style {
        Style::default()
            .fg(self.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border_primary)
        }
    }

    /// Highlighted row or focused control
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.bg_base)
            .bg(self.accent_primary)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variants_differ() {
        let light = Theme::new(ThemeVariant::Light);
        let dark = Theme::new(ThemeVariant::Dark);
        assert_ne!(light, dark);
        assert_eq!(light.bg_base, Color::Rgb(0xef, 0xf1, 0xf5));
        assert_eq!(dark.bg_base, Color::Rgb(0x1e, 0x1e, 0x2e));
    }
}
