use crate::models::Page;

/// Which page the shell shows, plus the sidebar overlay flag
#[derive(Debug, Clone, Default)]
pub struct Navigation {
    current: Page,
    sidebar_open: bool,
}

impl Navigation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch pages unconditionally and close the sidebar
    pub fn navigate(&mut self, target: Page) {
        if self.current != target {
            log::debug!("Navigating {:?} -> {:?}", self.current, target);
        }
        self.current = target;
        self.sidebar_open = false;
    }

    pub fn current(&self) -> Page {
        self.current
    }

    pub fn current_label(&self) -> &'static str {
        self.current.label()
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }

    pub fn is_sidebar_open(&self) -> bool {
        self.sidebar_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_home() {
        let nav = Navigation::new();
        assert_eq!(nav.current(), Page::Home);
        assert_eq!(nav.current_label(), "Início");
        assert!(!nav.is_sidebar_open());
    }

    #[test]
    fn test_last_navigation_wins() {
        let mut nav = Navigation::new();
        nav.navigate(Page::Calendar);
        nav.navigate(Page::Chat);
        assert_eq!(nav.current(), Page::Chat);
        assert_eq!(nav.current_label(), "Chat");
    }

    #[test]
    fn test_admin_has_no_guard() {
        let mut nav = Navigation::new();
        nav.navigate(Page::Admin);
        assert_eq!(nav.current_label(), "Admin");
    }

    #[test]
    fn test_navigate_closes_sidebar() {
        let mut nav = Navigation::new();
        nav.toggle_sidebar();
        assert!(nav.is_sidebar_open());

        nav.navigate(Page::Map);
        assert!(!nav.is_sidebar_open());

        nav.toggle_sidebar();
        nav.toggle_sidebar();
        assert!(!nav.is_sidebar_open());
    }
}
