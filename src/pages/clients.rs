use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use tracing::info;

use crate::dashboard::{DashboardContext, Field, StateUpdate, Subscription};
use crate::error::ContextError;
use crate::key_handler::{ActionResult, KeyAction};
use crate::state::ListNav;
use crate::trainer::{Client, ClientStatus};

#[derive(Debug)]
pub struct ClientsPage {
    ctx: DashboardContext,
    nav: ListNav,
    subscription: Subscription,
}

fn status_style(status: ClientStatus) -> Style {
    match status {
        ClientStatus::Active => Style::new().green(),
        ClientStatus::Paused => Style::new().yellow(),
        ClientStatus::Prospect => Style::new().gray(),
    }
}

fn last_session_label(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "never".into())
}

impl ClientsPage {
    pub const FIELDS: [Field; 1] = [Field::Clients];

    pub fn new(ctx: DashboardContext) -> Self {
        Self {
            ctx,
            nav: ListNav::new(),
            subscription: Subscription::new(&Self::FIELDS),
        }
    }

    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }

    pub fn selected(&self) -> usize {
        self.nav.selected
    }

    pub fn handle_action(&mut self, action: KeyAction) -> Result<ActionResult, ContextError> {
        let dashboard = self.ctx.handle()?;
        let len = dashboard.read(|d| d.clients.len());
        match action {
            KeyAction::NavigateUp => {
                self.nav.up();
            }
            KeyAction::NavigateDown => {
                self.nav.down(len);
            }
            KeyAction::InputChar('s') if len > 0 => {
                let idx = self.nav.selected.min(len - 1);
                dashboard.set_clients(StateUpdate::modify(move |clients: &mut Vec<Client>| {
                    if let Some(client) = clients.get_mut(idx) {
                        client.status = client.status.next();
                    }
                }));
                let (name, status) =
                    dashboard.read(|d| (d.clients[idx].name.clone(), d.clients[idx].status));
                info!(client = %name, status = status.label(), "client status changed");
                return Ok(ActionResult::status(format!("{} is now {}", name, status.label())));
            }
            _ => {}
        }
        Ok(ActionResult::none())
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) -> Result<(), ContextError> {
        let dashboard = self.ctx.handle()?;
        let block = Block::bordered().title("Clients").blue();
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [table_area, detail_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(4)]).areas(inner);

        dashboard.read(|d| {
            self.nav.clamp(d.clients.len());

            let rows: Vec<Row> = d
                .clients
                .iter()
                .map(|c| {
                    Row::new(vec![
                        Cell::from(c.name.clone()),
                        Cell::from(c.status.label()).style(status_style(c.status)),
                        Cell::from(c.sessions_completed.to_string()),
                        Cell::from(last_session_label(c.last_session)),
                    ])
                })
                .collect();
            let table = Table::new(
                rows,
                [
                    Constraint::Percentage(40),
                    Constraint::Length(10),
                    Constraint::Length(10),
                    Constraint::Min(12),
                ],
            )
            .header(Row::new(vec!["Name", "Status", "Sessions", "Last session"]).bold())
            .row_highlight_style(Style::new().reversed())
            .highlight_symbol(">> ");
            let mut state = TableState::default()
                .with_selected((!d.clients.is_empty()).then_some(self.nav.selected))
                .with_offset(self.nav.scroll);
            frame.render_stateful_widget(table, table_area, &mut state);

            let detail = d
                .clients
                .get(self.nav.selected)
                .map(|c| {
                    vec![
                        Line::from(format!("{} <{}>", c.name, c.email)),
                        Line::from(format!("Goal: {}", c.goal)).gray(),
                    ]
                })
                .unwrap_or_else(|| vec![Line::from("No clients yet")]);
            frame.render_widget(
                Paragraph::new(detail).block(Block::bordered().title("s: cycle status")),
                detail_area,
            );
        });

        dashboard.sync(&mut self.subscription);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{DashboardData, DashboardProvider};
    use uuid::Uuid;

    fn client(name: &str, status: ClientStatus) -> Client {
        Client {
            id: Uuid::new_v4(),
            name: name.into(),
            email: "c@example.com".into(),
            goal: "Mobility".into(),
            status,
            sessions_completed: 3,
            last_session: None,
        }
    }

    fn provider() -> DashboardProvider {
        DashboardProvider::mount(DashboardData {
            clients: vec![
                client("Ana", ClientStatus::Active),
                client("Ben", ClientStatus::Prospect),
            ],
            ..Default::default()
        })
    }

    #[test]
    fn test_navigation_bounded_by_clients() {
        let provider = provider();
        let mut page = ClientsPage::new(provider.context());
        page.handle_action(KeyAction::NavigateDown).unwrap();
        page.handle_action(KeyAction::NavigateDown).unwrap();
        assert_eq!(page.selected(), 1);
        page.handle_action(KeyAction::NavigateUp).unwrap();
        assert_eq!(page.selected(), 0);
    }

    #[test]
    fn test_cycle_status_updates_dashboard() {
        let provider = provider();
        let handle = provider.handle();
        let mut page = ClientsPage::new(provider.context());
        page.handle_action(KeyAction::NavigateDown).unwrap();

        let result = page.handle_action(KeyAction::InputChar('s')).unwrap();
        assert_eq!(result.status_message.as_deref(), Some("Ben is now Active"));
        assert_eq!(handle.clients()[1].status, ClientStatus::Active);
        assert_eq!(handle.clients()[0].status, ClientStatus::Active);
        assert!(handle.take_changes().contains(Field::Clients));
    }

    #[test]
    fn test_cycle_status_on_empty_list_is_noop() {
        let provider = DashboardProvider::mount(DashboardData::default());
        let mut page = ClientsPage::new(provider.context());
        let result = page.handle_action(KeyAction::InputChar('s')).unwrap();
        assert_eq!(result, ActionResult::none());
        assert!(!provider.handle().has_changes());
    }

    #[test]
    fn test_last_session_label() {
        assert_eq!(last_session_label(None), "never");
        assert_eq!(
            last_session_label(NaiveDate::from_ymd_opt(2024, 2, 9)),
            "2024-02-09"
        );
    }
}
