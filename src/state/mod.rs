//! Page-local navigation state.
//!
//! Selection and scroll positions belong to the page that shows them and are
//! not part of the shared dashboard state.
//!
//! ```text
//! DashboardView
//! ├── ClientsPage    - ListNav
//! ├── RoutinesPage   - RoutinesState (folder / template / block panes)
//! └── ExercisesPage  - ExercisesState (browse / search / form)
//! ```

mod exercises;
mod list;
mod routines;

pub use exercises::{ExercisesMode, ExercisesState};
pub use list::ListNav;
pub use routines::{RoutinePane, RoutinesState};
