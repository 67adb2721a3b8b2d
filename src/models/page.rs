use std::fmt;

/// Top-level pages of the authenticated shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Home,
    Courses,
    Calendar,
    Chat,
    Guide,
    Map,
    Profile,
    Admin,
}

impl Page {
    /// Entries listed in the sidebar body, in display order
    pub const SIDEBAR: [Page; 6] = [
        Page::Home,
        Page::Courses,
        Page::Calendar,
        Page::Chat,
        Page::Guide,
        Page::Map,
    ];

    /// Pages reachable with Alt+<digit>, 1-based
    pub const SHORTCUTS: [Page; 7] = [
        Page::Home,
        Page::Courses,
        Page::Calendar,
        Page::Chat,
        Page::Guide,
        Page::Map,
        Page::Profile,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "Início",
            Page::Courses => "Cursos",
            Page::Calendar => "Calendário",
            Page::Chat => "Chat",
            Page::Guide => "Tutoriais",
            Page::Map => "Mapa",
            Page::Profile => "Perfil",
            Page::Admin => "Admin",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Page::Home => "⌂",
            Page::Courses => "▤",
            Page::Calendar => "▦",
            Page::Chat => "✉",
            Page::Guide => "?",
            Page::Map => "⌖",
            Page::Profile => "☺",
            Page::Admin => "⚙",
        }
    }

    /// Page bound to Alt+`digit`
    pub fn from_shortcut(digit: char) -> Option<Page> {
        let index = digit.to_digit(10)? as usize;
        index
            .checked_sub(1)
            .and_then(|i| Self::SHORTCUTS.get(i))
            .copied()
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_total() {
        let all = [
            Page::Home,
            Page::Courses,
            Page::Calendar,
            Page::Chat,
            Page::Guide,
            Page::Map,
            Page::Profile,
            Page::Admin,
        ];
        let labels: Vec<&str> = all.iter().map(Page::label).collect();
        assert_eq!(
            labels,
            vec!["Início", "Cursos", "Calendário", "Chat", "Tutoriais", "Mapa", "Perfil", "Admin"]
        );
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(Page::from_shortcut('1'), Some(Page::Home));
        assert_eq!(Page::from_shortcut('4'), Some(Page::Chat));
        assert_eq!(Page::from_shortcut('7'), Some(Page::Profile));
        assert_eq!(Page::from_shortcut('0'), None);
        assert_eq!(Page::from_shortcut('8'), None);
        assert_eq!(Page::from_shortcut('x'), None);
    }
}
