//! Dashboard state container.
//!
//! All trainer-dashboard UI state (active tab, sidebar collapse, staged
//! exercise, clients, stats, routines and the exercise editing state) lives
//! in one container owned by a [`DashboardProvider`]. Views get at it through
//! an explicitly passed [`DashboardContext`]:
//!
//! ```text
//! App
//! └── Route::Dashboard
//!     ├── DashboardProvider   - owns the state while mounted
//!     └── views ──► DashboardContext ──► DashboardHandle
//!                                        ├── getters
//!                                        ├── set_* (value or fn of previous)
//!                                        └── take_changes / subscriptions
//! ```
//!
//! # Example
//!
//! ```
//! use coachdesk::dashboard::{use_dashboard, DashboardData, DashboardProvider, DashboardTab, StateUpdate};
//!
//! let provider = DashboardProvider::mount(DashboardData::default());
//! let dashboard = use_dashboard(&provider.context()).unwrap();
//!
//! dashboard.set_active_tab(DashboardTab::Clients);
//! dashboard.set_sidebar_collapsed(StateUpdate::with(|collapsed: &bool| !collapsed));
//!
//! assert_eq!(dashboard.active_tab().id(), "clients");
//! assert!(dashboard.sidebar_collapsed());
//! ```

mod changes;
mod context;
mod pending;
mod tab;
mod update;

pub use changes::{ChangeSet, Field, Subscription, Versions};
pub use context::{
    use_dashboard, DashboardContext, DashboardData, DashboardHandle, DashboardProvider,
    DashboardState,
};
pub use pending::PendingExercise;
pub use tab::DashboardTab;
pub use update::StateUpdate;
