//! Selection and scroll for a vertical list.

const WINDOW_SIZE: usize = 10;

/// Cursor over a list of `len` items with a scroll window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListNav {
    /// Currently selected item.
    pub selected: usize,
    /// Index of the first visible item.
    pub scroll: usize,
}

impl ListNav {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the selection up. Returns `true` if it moved.
    pub fn up(&mut self) -> bool {
        if self.selected > 0 {
            self.selected -= 1;
            self.ensure_visible();
            true
        } else {
            false
        }
    }

    /// Moves the selection down within `len` items. Returns `true` if it moved.
    pub fn down(&mut self, len: usize) -> bool {
        if self.selected + 1 < len {
            self.selected += 1;
            self.ensure_visible();
            true
        } else {
            false
        }
    }

    /// Keeps the selection valid after the list shrank.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
        if self.scroll > self.selected {
            self.scroll = self.selected;
        }
    }

    pub fn reset(&mut self) {
        self.selected = 0;
        self.scroll = 0;
    }

    fn ensure_visible(&mut self) {
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + WINDOW_SIZE {
            self.scroll = self.selected + 1 - WINDOW_SIZE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_up_at_top() {
        let mut nav = ListNav::new();
        assert!(!nav.up());
        assert_eq!(nav.selected, 0);
    }

    #[test]
    fn test_down_stops_at_end() {
        let mut nav = ListNav {
            selected: 2,
            scroll: 0,
        };
        assert!(!nav.down(3));
        assert_eq!(nav.selected, 2);
    }

    #[test]
    fn test_down_on_empty_list() {
        let mut nav = ListNav::new();
        assert!(!nav.down(0));
        assert_eq!(nav.selected, 0);
    }

    #[test]
    fn test_scroll_follows_selection() {
        let mut nav = ListNav::new();
        for _ in 0..12 {
            nav.down(20);
        }
        assert_eq!(nav.selected, 12);
        assert_eq!(nav.scroll, 3);

        for _ in 0..10 {
            nav.up();
        }
        assert_eq!(nav.selected, 2);
        assert_eq!(nav.scroll, 2);
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut nav = ListNav {
            selected: 8,
            scroll: 5,
        };
        nav.clamp(3);
        assert_eq!(nav.selected, 2);
        assert_eq!(nav.scroll, 2);
    }

    #[test]
    fn test_clamp_empty() {
        let mut nav = ListNav {
            selected: 4,
            scroll: 1,
        };
        nav.clamp(0);
        assert_eq!(nav.selected, 0);
        assert_eq!(nav.scroll, 0);
    }
}
