use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};

fn key_line(key: &'static str, text: &'static str, key_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<14}", key), key_style),
        Span::raw(text),
    ])
}

const NAVIGATION: [(&str, &str); 7] = [
    ("↑↓ / k j", "Move through lists"),
    ("← → / h l", "Change pane or form field"),
    ("Tab / 1-4", "Next tab / jump to tab"),
    ("b", "Collapse or expand the sidebar"),
    ("Enter", "Open dashboard, confirm"),
    ("Esc", "Cancel input, back to landing"),
    ("q / Ctrl-C", "Quit"),
];

const PAGES: [(&str, &str); 4] = [
    ("Clients", "s: cycle the selected client's status"),
    ("Routines", "Pick folder, template and block; Enter commits a staged exercise"),
    ("Exercises", "/: search  m/e: filter  c: clear  n: new  a: stage for block"),
    ("Staged input", "Digits edit sets/reps/rest, ←/→ switch field, Esc discards"),
];

/// Key reference shown over the current screen when `?` is pressed.
#[derive(Debug, Default)]
pub struct HelpPage;

impl HelpPage {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(Style::new().bg(Color::Black)), area);

        let [nav_area, pages_area, tip_area] = Layout::vertical([
            Constraint::Length(NAVIGATION.len() as u16 + 2),
            Constraint::Length(PAGES.len() as u16 + 2),
            Constraint::Min(0),
        ])
        .areas(area);

        let nav: Vec<Line> = NAVIGATION
            .iter()
            .map(|&(k, t)| key_line(k, t, Style::new().bold().cyan()))
            .collect();
        frame.render_widget(
            Paragraph::new(nav).block(Block::bordered().title("Navigation")),
            nav_area,
        );

        let pages: Vec<Line> = PAGES
            .iter()
            .map(|&(k, t)| key_line(k, t, Style::new().bold().magenta()))
            .collect();
        frame.render_widget(
            Paragraph::new(pages).block(Block::bordered().title("Pages")),
            pages_area,
        );

        frame.render_widget(
            Paragraph::new(vec![
                Line::from("Stage an exercise on Exercises, then commit it from Routines.").gray(),
                Line::from("Press ? again to close this help.").gray(),
            ])
            .block(Block::bordered().title("Tips")),
            tip_area,
        );
    }
}
