use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};
use tracing::{debug, trace};

use crate::dashboard::{
    ChangeSet, DashboardContext, DashboardData, DashboardHandle, DashboardProvider, DashboardTab,
    Field, StateUpdate,
};
use crate::error::ContextError;
use crate::key_handler::{ActionResult, InputMode, KeyAction};
use crate::pages::clients::ClientsPage;
use crate::pages::exercises::ExercisesPage;
use crate::pages::overview::OverviewPage;
use crate::pages::routines::RoutinesPage;
use crate::pages::sidebar::Sidebar;
use crate::trainer::{compute_stats, recent_clients};

/// The mounted dashboard: the state provider plus every view reading it.
///
/// Dropping the view drops the provider, after which any context handed
/// out by [`DashboardView::context`] reports [`ContextError::Unmounted`].
#[derive(Debug)]
pub struct DashboardView {
    provider: DashboardProvider,
    sidebar: Sidebar,
    overview: OverviewPage,
    clients: ClientsPage,
    routines: RoutinesPage,
    exercises: ExercisesPage,
    today: NaiveDate,
    recent_limit: usize,
}

impl DashboardView {
    pub fn mount(data: DashboardData, today: NaiveDate, recent_limit: usize) -> Self {
        let provider = DashboardProvider::mount(data);
        let ctx = provider.context();
        Self {
            sidebar: Sidebar::new(ctx.clone()),
            overview: OverviewPage::new(ctx.clone()),
            clients: ClientsPage::new(ctx.clone()),
            routines: RoutinesPage::new(ctx.clone()),
            exercises: ExercisesPage::new(ctx),
            provider,
            today,
            recent_limit,
        }
    }

    pub fn context(&self) -> DashboardContext {
        self.provider.context()
    }

    pub fn handle(&self) -> DashboardHandle {
        self.provider.handle()
    }

    pub fn active_tab(&self) -> DashboardTab {
        self.provider.handle().active_tab()
    }

    /// Whether the active page is taking typed text.
    pub fn input_mode(&self) -> Result<InputMode, ContextError> {
        match self.active_tab() {
            DashboardTab::Routines => self.routines.input_mode(),
            DashboardTab::Exercises => Ok(self.exercises.input_mode()),
            DashboardTab::Overview | DashboardTab::Clients => Ok(InputMode::Navigate),
        }
    }

    /// Handles one key. Returns `Ok(None)` when the user asked to leave the
    /// dashboard.
    pub fn handle_action(&mut self, action: KeyAction) -> Result<Option<ActionResult>, ContextError> {
        let dashboard = self.provider.handle();
        if self.input_mode()? == InputMode::Navigate {
            match action {
                KeyAction::Back => return Ok(None),
                KeyAction::NextTab => {
                    dashboard.set_active_tab(StateUpdate::with(|tab: &DashboardTab| tab.next()));
                    return Ok(Some(ActionResult::none()));
                }
                KeyAction::SelectTab(index) => {
                    if let Some(tab) = DashboardTab::from_index(index) {
                        dashboard.set_active_tab(tab);
                    }
                    return Ok(Some(ActionResult::none()));
                }
                KeyAction::ToggleSidebar => {
                    dashboard.set_sidebar_collapsed(StateUpdate::with(|collapsed: &bool| !collapsed));
                    return Ok(Some(ActionResult::none()));
                }
                _ => {}
            }
        }

        let result = match dashboard.active_tab() {
            DashboardTab::Overview => ActionResult::none(),
            DashboardTab::Clients => self.clients.handle_action(action)?,
            DashboardTab::Routines => self.routines.handle_action(action)?,
            DashboardTab::Exercises => {
                let target = self.routines.selected_block_id()?;
                self.exercises.handle_action(action, target.as_deref())?
            }
        };
        Ok(Some(result))
    }

    /// Drains the change set and recomputes values derived from clients.
    pub fn sync_derived(&mut self) -> ChangeSet {
        let dashboard = self.provider.handle();
        let changes = dashboard.take_changes();
        if changes.is_empty() {
            return changes;
        }
        trace!(fields = ?changes.iter().collect::<Vec<_>>(), "dashboard changed");
        if changes.contains(Field::Clients) {
            let (today, limit) = (self.today, self.recent_limit);
            let (stats, recent) =
                dashboard.read(|d| (compute_stats(&d.clients, today), recent_clients(&d.clients, limit)));
            dashboard.set_stats(stats);
            dashboard.set_recent_clients(recent);
            debug!("recomputed client stats");
        }
        changes
    }

    /// Whether anything the sidebar or the active page shows has changed
    /// since it was last drawn.
    pub fn needs_redraw(&self) -> bool {
        let dashboard = self.provider.handle();
        let page = match dashboard.active_tab() {
            DashboardTab::Overview => self.overview.subscription(),
            DashboardTab::Clients => self.clients.subscription(),
            DashboardTab::Routines => self.routines.subscription(),
            DashboardTab::Exercises => self.exercises.subscription(),
        };
        dashboard.is_stale(self.sidebar.subscription()) || dashboard.is_stale(page)
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) -> Result<(), ContextError> {
        let state = self.provider.handle().state();
        let [side, main] = Layout::horizontal([
            Constraint::Length(Sidebar::width(state.sidebar_collapsed)),
            Constraint::Min(0),
        ])
        .areas(area);

        self.sidebar.render(frame, side)?;
        match state.active_tab {
            DashboardTab::Overview => self.overview.render(frame, main),
            DashboardTab::Clients => self.clients.render(frame, main),
            DashboardTab::Routines => self.routines.render(frame, main),
            DashboardTab::Exercises => self.exercises.render(frame, main),
        }
    }
}
