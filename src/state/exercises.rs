//! Exercises page navigation and input mode.

use super::list::ListNav;
use crate::key_handler::InputMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExercisesMode {
    #[default]
    Browse,
    /// Typing into the library search box.
    Search,
    /// Typing the name in the new-exercise form.
    Form,
}

#[derive(Debug, Clone, Default)]
pub struct ExercisesState {
    pub mode: ExercisesMode,
    pub list: ListNav,
}

impl ExercisesState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_mode(&self) -> InputMode {
        match self.mode {
            ExercisesMode::Browse => InputMode::Navigate,
            ExercisesMode::Search | ExercisesMode::Form => InputMode::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_mode_follows_page_mode() {
        let mut state = ExercisesState::new();
        assert_eq!(state.input_mode(), InputMode::Navigate);
        state.mode = ExercisesMode::Search;
        assert_eq!(state.input_mode(), InputMode::Text);
        state.mode = ExercisesMode::Form;
        assert_eq!(state.input_mode(), InputMode::Text);
    }
}
