use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, ListState, Paragraph},
    Frame,
};

use crate::state::ListNav;

/// Prefixes for status bar messages.
pub fn success(msg: &str) -> String {
    format!("✓ {}", msg)
}

pub fn failure(msg: &str) -> String {
    format!("✗ {}", msg)
}

/// A `ListState` for `nav`, clamped to `item_count`.
pub fn list_state(nav: &ListNav, item_count: usize) -> ListState {
    if item_count == 0 {
        return ListState::default();
    }
    ListState::default()
        .with_selected(Some(nav.selected.min(item_count - 1)))
        .with_offset(nav.scroll)
}

/// Bordered block, highlighted yellow when it has focus.
pub fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let block = Block::bordered().title(title);
    if focused {
        block.border_style(Style::new().yellow())
    } else {
        block
    }
}

/// A single-line text field with a cursor marker.
pub fn render_text_field(frame: &mut Frame, area: Rect, title: &str, value: &str, active: bool) {
    let cursor = if active { "▏" } else { "" };
    let line = Line::from(vec![
        Span::styled("> ", Style::new().gray()),
        Span::raw(value.to_string()),
        Span::styled(cursor, Style::new().yellow()),
    ]);
    frame.render_widget(Paragraph::new(line).block(pane_block(title, active)), area);
}

/// A rectangle of `width` x `height` centered in `area`, clipped to it.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}
