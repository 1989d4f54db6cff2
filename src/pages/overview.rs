use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, List, ListItem, Paragraph},
    Frame,
};

use crate::dashboard::{DashboardContext, Field, PendingExercise, Subscription};
use crate::error::ContextError;
use crate::trainer::DashboardStat;

#[derive(Debug)]
pub struct OverviewPage {
    ctx: DashboardContext,
    subscription: Subscription,
}

fn trend_span(trend: Option<i64>) -> Span<'static> {
    match trend {
        Some(t) if t > 0 => Span::styled(format!(" ▲{}", t), Style::new().green()),
        Some(t) if t < 0 => Span::styled(format!(" ▼{}", -t), Style::new().red()),
        Some(_) => Span::styled(" ·0", Style::new().gray()),
        None => Span::raw(""),
    }
}

fn stat_tile(stat: &DashboardStat) -> Paragraph<'_> {
    Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(stat.value.as_str(), Style::new().bold().cyan()),
            trend_span(stat.trend),
        ])
        .centered(),
    ])
    .block(Block::bordered().title(stat.label.as_str()))
}

impl OverviewPage {
    pub const FIELDS: [Field; 3] = [Field::Stats, Field::RecentClients, Field::PendingExercise];

    pub fn new(ctx: DashboardContext) -> Self {
        Self {
            ctx,
            subscription: Subscription::new(&Self::FIELDS),
        }
    }

    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) -> Result<(), ContextError> {
        let dashboard = self.ctx.handle()?;
        let block = Block::bordered().title("Overview").blue();
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [tiles, banner, recent] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .areas(inner);

        dashboard.read(|d| {
            let constraints = vec![Constraint::Ratio(1, d.stats.len().max(1) as u32); d.stats.len()];
            let cells = Layout::horizontal(constraints).split(tiles);
            for (stat, cell) in d.stats.iter().zip(cells.iter()) {
                frame.render_widget(stat_tile(stat), *cell);
            }

            let pending = match &d.pending_exercise {
                PendingExercise::Absent => Line::from("No exercise staged").gray(),
                PendingExercise::Present { exercise, block_id } => Line::from(vec![
                    Span::styled("Staged: ", Style::new().yellow()),
                    Span::raw(format!("{} → block {}", exercise.name, block_id)),
                    Span::styled("  (commit on Routines)", Style::new().gray()),
                ]),
            };
            frame.render_widget(
                Paragraph::new(pending).block(Block::bordered().title("Pending exercise")),
                banner,
            );

            let items: Vec<ListItem> = d
                .recent_clients
                .iter()
                .map(|r| {
                    ListItem::new(Line::from(vec![
                        Span::styled(format!("{:<24}", r.name), Style::new().bold()),
                        Span::raw(r.last_session.format("%a %d %b").to_string()),
                    ]))
                })
                .collect();
            frame.render_widget(
                List::new(items).block(Block::bordered().title("Recent clients")),
                recent,
            );
        });

        dashboard.sync(&mut self.subscription);
        Ok(())
    }
}
