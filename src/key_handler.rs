use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Back,
    Help,
    NextTab,
    SelectTab(usize),
    ToggleSidebar,
    NavigateUp,
    NavigateDown,
    NavigateLeft,
    NavigateRight,
    Select,
    InputChar(char),
    Backspace,
    None,
}

/// How plain character keys should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Single-key shortcuts.
    #[default]
    Navigate,
    /// A text field has focus; characters are typed, not shortcuts.
    Text,
}

#[derive(Debug, Default)]
pub struct KeyHandler;

impl KeyHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn on_key_event(&self, key: KeyEvent, mode: InputMode) -> KeyAction {
        if let (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) =
            (key.modifiers, key.code)
        {
            return KeyAction::Quit;
        }
        match mode {
            InputMode::Navigate => self.navigate_key(key),
            InputMode::Text => self.text_key(key),
        }
    }

    fn navigate_key(&self, key: KeyEvent) -> KeyAction {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc) => KeyAction::Back,
            (_, KeyCode::Char('q')) => KeyAction::Quit,
            (_, KeyCode::Char('?')) => KeyAction::Help,
            (KeyModifiers::NONE, KeyCode::Tab) => KeyAction::NextTab,
            (_, KeyCode::Char('b')) => KeyAction::ToggleSidebar,
            (_, KeyCode::Char(c @ '1'..='9')) => KeyAction::SelectTab(c as usize - '1' as usize),
            (_, KeyCode::Up | KeyCode::Char('k')) => KeyAction::NavigateUp,
            (_, KeyCode::Down | KeyCode::Char('j')) => KeyAction::NavigateDown,
            (_, KeyCode::Left | KeyCode::Char('h')) => KeyAction::NavigateLeft,
            (_, KeyCode::Right | KeyCode::Char('l')) => KeyAction::NavigateRight,
            (_, KeyCode::Enter) => KeyAction::Select,
            (_, KeyCode::Backspace) => KeyAction::Backspace,
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => KeyAction::InputChar(c),
            _ => KeyAction::None,
        }
    }

    fn text_key(&self, key: KeyEvent) -> KeyAction {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc) => KeyAction::Back,
            (_, KeyCode::Enter) => KeyAction::Select,
            (_, KeyCode::Backspace) => KeyAction::Backspace,
            (_, KeyCode::Tab | KeyCode::Right) => KeyAction::NavigateRight,
            (_, KeyCode::BackTab | KeyCode::Left) => KeyAction::NavigateLeft,
            (_, KeyCode::Up) => KeyAction::NavigateUp,
            (_, KeyCode::Down) => KeyAction::NavigateDown,
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => KeyAction::InputChar(c),
            _ => KeyAction::None,
        }
    }
}

/// Outcome of handling one key action on a page. Quitting is decided by
/// the screen, never by a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionResult {
    pub status_message: Option<String>,
}

impl ActionResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn status(msg: impl Into<String>) -> Self {
        Self {
            status_message: Some(msg.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_ctrl_c_quits_in_any_mode() {
        let handler = KeyHandler::new();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.on_key_event(ctrl_c, InputMode::Navigate), KeyAction::Quit);
        assert_eq!(handler.on_key_event(ctrl_c, InputMode::Text), KeyAction::Quit);
    }

    #[test]
    fn test_navigate_shortcuts() {
        let handler = KeyHandler::new();
        let nav = |code| handler.on_key_event(key(code), InputMode::Navigate);
        assert_eq!(nav(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(nav(KeyCode::Char('b')), KeyAction::ToggleSidebar);
        assert_eq!(nav(KeyCode::Char('1')), KeyAction::SelectTab(0));
        assert_eq!(nav(KeyCode::Char('4')), KeyAction::SelectTab(3));
        assert_eq!(nav(KeyCode::Char('j')), KeyAction::NavigateDown);
        assert_eq!(nav(KeyCode::Tab), KeyAction::NextTab);
        assert_eq!(nav(KeyCode::Char('/')), KeyAction::InputChar('/'));
    }

    #[test]
    fn test_text_mode_types_shortcut_letters() {
        let handler = KeyHandler::new();
        let text = |code| handler.on_key_event(key(code), InputMode::Text);
        assert_eq!(text(KeyCode::Char('q')), KeyAction::InputChar('q'));
        assert_eq!(text(KeyCode::Char('b')), KeyAction::InputChar('b'));
        assert_eq!(text(KeyCode::Char('1')), KeyAction::InputChar('1'));
        assert_eq!(text(KeyCode::Esc), KeyAction::Back);
        assert_eq!(text(KeyCode::Tab), KeyAction::NavigateRight);
    }

    #[test]
    fn test_shifted_char_is_input() {
        let handler = KeyHandler::new();
        let shifted = KeyEvent::new(KeyCode::Char('P'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.on_key_event(shifted, InputMode::Text),
            KeyAction::InputChar('P')
        );
    }
}
