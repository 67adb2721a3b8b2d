/// Selection in a vertical list; moving past either end wraps around
#[derive(Debug, Clone)]
pub struct ListState {
    selected: usize,
}

impl Default for ListState {
    fn default() -> Self {
        Self::new()
    }
}

impl ListState {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    /// Selected index, or `None` for an empty list
    pub fn selected(&self, item_count: usize) -> Option<usize> {
        (item_count > 0).then(|| self.selected.min(item_count - 1))
    }

    pub fn select(&mut self, index: usize) {
        self.selected = index;
    }

    pub fn move_up(&mut self, item_count: usize) {
        let Some(current) = self.selected(item_count) else {
            return;
        };
        self.selected = if current > 0 { current - 1 } else { item_count - 1 };
    }

    pub fn move_down(&mut self, item_count: usize) {
        let Some(current) = self.selected(item_count) else {
            return;
        };
        self.selected = if current + 1 < item_count { current + 1 } else { 0 };
    }

    /// First row to draw so the selection stays inside `visible_height` rows
    pub fn scroll_offset(&self, item_count: usize, visible_height: usize) -> usize {
        match self.selected(item_count) {
            Some(selected) if visible_height > 0 && selected >= visible_height => {
                selected + 1 - visible_height
            }
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_wraps_around() {
        let mut list = ListState::new();
        list.move_up(3);
        assert_eq!(list.selected(3), Some(2));
        list.move_down(3);
        assert_eq!(list.selected(3), Some(0));
    }

    #[test]
    fn test_empty_list() {
        let mut list = ListState::new();
        list.move_down(0);
        assert_eq!(list.selected(0), None);
        assert_eq!(list.scroll_offset(0, 5), 0);
    }

    #[test]
    fn test_scroll_follows_selection() {
        let mut list = ListState::new();
        list.select(7);
        assert_eq!(list.scroll_offset(10, 5), 3);
        assert_eq!(list.scroll_offset(10, 0), 0);
        list.select(2);
        assert_eq!(list.scroll_offset(10, 5), 0);
    }
}
