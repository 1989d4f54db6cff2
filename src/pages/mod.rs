//! Views. The landing and help pages are plain renderers; everything under
//! the dashboard reads its state through a `DashboardContext`.

pub mod clients;
pub mod dashboard;
pub mod exercises;
pub mod help;
pub mod landing;
pub mod overview;
pub mod routines;
pub mod sidebar;

pub use dashboard::DashboardView;
pub use help::HelpPage;
pub use landing::LandingPage;
