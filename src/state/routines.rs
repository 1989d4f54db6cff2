//! Routines page navigation: folder → template → block panes.

use super::list::ListNav;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoutinePane {
    #[default]
    Folders,
    Templates,
    Blocks,
}

impl RoutinePane {
    pub fn title(self) -> &'static str {
        match self {
            RoutinePane::Folders => "Folders",
            RoutinePane::Templates => "Templates",
            RoutinePane::Blocks => "Blocks",
        }
    }
}

/// Cursor state for the three routine panes.
///
/// Moving up a level keeps the deeper selections; changing the folder or
/// template resets the selections below it.
#[derive(Debug, Clone, Default)]
pub struct RoutinesState {
    pub pane: RoutinePane,
    pub folder: ListNav,
    pub template: ListNav,
    pub block: ListNav,
}

impl RoutinesState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves focus one pane to the left. Does not wrap.
    pub fn focus_left(&mut self) -> bool {
        let next = match self.pane {
            RoutinePane::Folders => return false,
            RoutinePane::Templates => RoutinePane::Folders,
            RoutinePane::Blocks => RoutinePane::Templates,
        };
        self.pane = next;
        true
    }

    /// Moves focus one pane to the right if that pane has items.
    pub fn focus_right(&mut self, next_pane_len: usize) -> bool {
        if next_pane_len == 0 {
            return false;
        }
        let next = match self.pane {
            RoutinePane::Folders => RoutinePane::Templates,
            RoutinePane::Templates => RoutinePane::Blocks,
            RoutinePane::Blocks => return false,
        };
        self.pane = next;
        true
    }

    pub fn up(&mut self) -> bool {
        let moved = self.focused_mut().up();
        if moved {
            self.reset_below();
        }
        moved
    }

    pub fn down(&mut self, len: usize) -> bool {
        let moved = self.focused_mut().down(len);
        if moved {
            self.reset_below();
        }
        moved
    }

    fn focused_mut(&mut self) -> &mut ListNav {
        match self.pane {
            RoutinePane::Folders => &mut self.folder,
            RoutinePane::Templates => &mut self.template,
            RoutinePane::Blocks => &mut self.block,
        }
    }

    fn reset_below(&mut self) {
        match self.pane {
            RoutinePane::Folders => {
                self.template.reset();
                self.block.reset();
            }
            RoutinePane::Templates => self.block.reset(),
            RoutinePane::Blocks => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_on_folders() {
        let state = RoutinesState::new();
        assert_eq!(state.pane, RoutinePane::Folders);
    }

    #[test]
    fn test_focus_right_requires_items() {
        let mut state = RoutinesState::new();
        assert!(!state.focus_right(0));
        assert_eq!(state.pane, RoutinePane::Folders);
        assert!(state.focus_right(2));
        assert_eq!(state.pane, RoutinePane::Templates);
        assert!(state.focus_right(1));
        assert!(!state.focus_right(1));
        assert_eq!(state.pane, RoutinePane::Blocks);
    }

    #[test]
    fn test_focus_left_stops_at_folders() {
        let mut state = RoutinesState {
            pane: RoutinePane::Blocks,
            ..Default::default()
        };
        assert!(state.focus_left());
        assert!(state.focus_left());
        assert!(!state.focus_left());
        assert_eq!(state.pane, RoutinePane::Folders);
    }

    #[test]
    fn test_changing_folder_resets_deeper_panes() {
        let mut state = RoutinesState::new();
        state.template.selected = 2;
        state.block.selected = 1;
        assert!(state.down(3));
        assert_eq!(state.folder.selected, 1);
        assert_eq!(state.template.selected, 0);
        assert_eq!(state.block.selected, 0);
    }

    #[test]
    fn test_moving_block_keeps_template() {
        let mut state = RoutinesState {
            pane: RoutinePane::Blocks,
            ..Default::default()
        };
        state.template.selected = 1;
        state.down(2);
        assert_eq!(state.block.selected, 1);
        assert_eq!(state.template.selected, 1);
    }
}
