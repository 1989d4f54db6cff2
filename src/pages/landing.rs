use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
    Frame,
};

use crate::ui_utils::centered;

/// Small pill-shaped label shown above the landing headline.
#[derive(Debug, Clone)]
pub struct Badge<'a> {
    pub label: &'a str,
}

impl Widget for Badge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Line::from(vec![
            Span::styled(" ● ", Style::new().black().on_green()),
            Span::styled(format!(" {} ", self.label), Style::new().green().bold()),
        ])
        .centered()
        .render(area, buf);
    }
}

const FEATURES: [(&str, &str); 4] = [
    ("Clients", "Track every client's goal, status and last session"),
    ("Overview", "See active clients and weekly training at a glance"),
    ("Routines", "Organise templates in folders and build them block by block"),
    ("Exercises", "Filter the library or add your own movements"),
];

/// The feature list in the middle of the landing page.
#[derive(Debug, Clone, Default)]
pub struct LandingFeatures;

impl Widget for LandingFeatures {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line> = FEATURES
            .iter()
            .flat_map(|(title, text)| {
                [
                    Line::from(vec![
                        Span::styled(format!("{:<10}", title), Style::new().cyan().bold()),
                        Span::raw(*text),
                    ]),
                    Line::from(""),
                ]
            })
            .collect();
        Paragraph::new(lines).render(area, buf);
    }
}

#[derive(Debug, Default)]
pub struct LandingPage;

impl LandingPage {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let card = centered(area, 78, 16);
        let block = Block::bordered().title(" Welcome ").blue();
        let inner = block.inner(card);
        frame.render_widget(block, card);

        let [badge, _, headline, _, features, hint] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        frame.render_widget(Badge { label: "Coachdesk for trainers" }, badge);
        frame.render_widget(
            Line::from("Your clients and programming, in one terminal.")
                .bold()
                .centered(),
            headline,
        );
        frame.render_widget(LandingFeatures, features.inner(Margin::new(2, 0)));
        frame.render_widget(
            Line::from("Enter: open dashboard   ?: help   q: quit")
                .gray()
                .centered(),
            hint,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_badge_renders_label() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        Badge { label: "Beta" }.render(area, &mut buf);
        assert!(buffer_text(&buf).contains("Beta"));
    }

    #[test]
    fn test_landing_lists_features() {
        let mut terminal = Terminal::new(TestBackend::new(90, 24)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                LandingPage::new().render(frame, area);
            })
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        for (title, _) in FEATURES {
            assert!(text.contains(title), "missing feature {}", title);
        }
        assert!(text.contains("open dashboard"));
    }
}
