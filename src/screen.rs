use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Layout},
    style::Stylize,
    text::Line,
    widgets::Block,
    Frame,
};
use tracing::info;

use crate::dashboard::DashboardData;
use crate::error::ContextError;
use crate::key_handler::{InputMode, KeyAction};
use crate::pages::{DashboardView, HelpPage, LandingPage};
use crate::ui_utils::centered;

const READY: &str = "Ready | Press ? for help";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Dashboard,
}

/// Top-level screen: routes between the landing page and the dashboard,
/// and owns the help overlay and status bar.
///
/// The dashboard provider only exists while the dashboard route is active.
#[derive(Debug)]
pub struct Screen {
    route: Route,
    landing: LandingPage,
    help: HelpPage,
    dashboard: Option<DashboardView>,
    seed: DashboardData,
    today: NaiveDate,
    recent_limit: usize,
    show_help: bool,
    status: String,
    dirty: bool,
}

impl Screen {
    pub fn new(seed: DashboardData, today: NaiveDate, recent_limit: usize) -> Self {
        Self {
            route: Route::Landing,
            landing: LandingPage::new(),
            help: HelpPage::new(),
            dashboard: None,
            seed,
            today,
            recent_limit,
            show_help: false,
            status: READY.into(),
            dirty: true,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn dashboard(&self) -> Option<&DashboardView> {
        self.dashboard.as_ref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    /// Mounts a fresh dashboard from the seed data.
    pub fn open_dashboard(&mut self) {
        let view = DashboardView::mount(self.seed.clone(), self.today, self.recent_limit);
        info!(tab = %view.active_tab(), "opening dashboard");
        self.dashboard = Some(view);
        self.route = Route::Dashboard;
        self.status = READY.into();
        self.dirty = true;
    }

    /// Unmounts the dashboard. Its state is discarded.
    pub fn close_dashboard(&mut self) {
        self.dashboard = None;
        self.route = Route::Landing;
        self.status = "Dashboard closed".into();
        self.dirty = true;
        info!("closed dashboard");
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn input_mode(&self) -> Result<InputMode, ContextError> {
        match &self.dashboard {
            Some(view) if !self.show_help => view.input_mode(),
            _ => Ok(InputMode::Navigate),
        }
    }

    /// Applies one key action. Returns `true` when the app should quit.
    pub fn handle_action(&mut self, action: KeyAction) -> Result<bool, ContextError> {
        if action == KeyAction::None {
            return Ok(false);
        }
        self.dirty = true;

        match action {
            KeyAction::Quit => return Ok(true),
            KeyAction::Help => {
                self.show_help = !self.show_help;
                return Ok(false);
            }
            KeyAction::Back if self.show_help => {
                self.show_help = false;
                return Ok(false);
            }
            _ if self.show_help => return Ok(false),
            _ => {}
        }

        let Some(view) = self.dashboard.as_mut() else {
            if action == KeyAction::Select {
                self.open_dashboard();
            }
            return Ok(false);
        };

        match view.handle_action(action)? {
            None => self.close_dashboard(),
            Some(result) => {
                view.sync_derived();
                if let Some(msg) = result.status_message {
                    self.status = msg;
                }
            }
        }
        Ok(false)
    }

    /// Whether the next loop iteration should draw.
    pub fn needs_redraw(&self) -> bool {
        self.dirty || self.dashboard.as_ref().is_some_and(|d| d.needs_redraw())
    }

    pub fn render(&mut self, frame: &mut Frame) -> Result<(), ContextError> {
        let area = frame.area();
        let title = Line::from("Coachdesk").bold().blue().left_aligned();
        let block = Block::bordered().title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [main, status_bar] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

        match self.dashboard.as_mut() {
            Some(view) => view.render(frame, main)?,
            None => self.landing.render(frame, main),
        }

        if self.show_help {
            self.help.render(frame, centered(main, 80, 22));
        }

        let hints = match self.route {
            Route::Landing => "Enter: Open  ?: Help  q: Quit",
            Route::Dashboard => "Tab: Switch tab  b: Sidebar  Esc: Back  ?: Help",
        };
        frame.render_widget(
            Line::from(format!("{}  |  {}", self.status, hints))
                .on_dark_gray()
                .white(),
            status_bar,
        );

        self.dirty = false;
        Ok(())
    }
}
