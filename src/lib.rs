// Library for testable modules
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod events;
pub mod key_handler;
pub mod logging;
pub mod pages;
pub mod routines;
pub mod screen;
pub mod state;
pub mod trainer;
pub mod ui_utils;

// Re-export main types used in tests
pub use config::Config;
pub use dashboard::{use_dashboard, DashboardContext, DashboardData, DashboardProvider};
pub use data::Store;
pub use error::{ContextError, DeskError, DeskResult};
pub use screen::{Route, Screen};
