use ratatui::{
    layout::Rect,
    style::{Style, Stylize},
    widgets::{Block, List, ListItem, ListState},
    Frame,
};

use crate::dashboard::{DashboardContext, DashboardTab, Field, Subscription};
use crate::error::ContextError;

pub const EXPANDED_WIDTH: u16 = 22;
pub const COLLAPSED_WIDTH: u16 = 5;

/// Tab navigation on the left edge of the dashboard.
#[derive(Debug)]
pub struct Sidebar {
    ctx: DashboardContext,
    subscription: Subscription,
}

impl Sidebar {
    pub const FIELDS: [Field; 2] = [Field::ActiveTab, Field::SidebarCollapsed];

    pub fn new(ctx: DashboardContext) -> Self {
        Self {
            ctx,
            subscription: Subscription::new(&Self::FIELDS),
        }
    }

    pub fn width(collapsed: bool) -> u16 {
        if collapsed {
            COLLAPSED_WIDTH
        } else {
            EXPANDED_WIDTH
        }
    }

    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) -> Result<(), ContextError> {
        let dashboard = self.ctx.handle()?;
        let state = dashboard.state();

        let items: Vec<ListItem> = DashboardTab::ALL
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                if state.sidebar_collapsed {
                    ListItem::new(format!("{}", i + 1))
                } else {
                    ListItem::new(format!("{} {}", i + 1, tab.title()))
                }
            })
            .collect();

        let title = if state.sidebar_collapsed { "" } else { "Menu" };
        let mut list_state = ListState::default().with_selected(Some(state.active_tab.index()));
        frame.render_stateful_widget(
            List::new(items)
                .block(Block::bordered().title(title).green())
                .highlight_style(Style::new().reversed())
                .highlight_symbol(if state.sidebar_collapsed { "" } else { ">> " }),
            area,
            &mut list_state,
        );

        dashboard.sync(&mut self.subscription);
        Ok(())
    }
}
