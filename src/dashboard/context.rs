//! Provider, context and handle for the dashboard state.
//!
//! ```text
//! DashboardProvider ──owns──► Rc<RefCell<Inner>>
//!        │ context()                 ▲
//!        ▼                           │ upgrade
//! DashboardContext (Weak) ──handle()─┘──► DashboardHandle (setters/getters)
//! ```
//!
//! The provider lives exactly as long as the dashboard route is mounted.
//! Views receive a `DashboardContext` through their constructors and turn it
//! into a short-lived `DashboardHandle` for each render or key event.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use super::changes::{ChangeSet, Field, Subscription, Versions};
use super::pending::PendingExercise;
use super::tab::DashboardTab;
use super::update::StateUpdate;
use crate::error::ContextError;
use crate::routines::{
    Exercise, ExerciseFilterState, ExerciseFormState, ExerciseInputsState, RoutineFolder,
    RoutineTemplate,
};
use crate::trainer::{Client, DashboardStat, RecentClient};

/// Layout state of the dashboard shell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardState {
    pub active_tab: DashboardTab,
    pub sidebar_collapsed: bool,
}

/// Every value held by the dashboard container.
///
/// Also used to seed a new provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    pub active_tab: DashboardTab,
    pub sidebar_collapsed: bool,
    pub pending_exercise: PendingExercise,
    pub clients: Vec<Client>,
    pub stats: Vec<DashboardStat>,
    pub recent_clients: Vec<RecentClient>,
    pub folders: Vec<RoutineFolder>,
    pub templates: Vec<RoutineTemplate>,
    pub exercises: Vec<Exercise>,
    pub exercise_filter: ExerciseFilterState,
    pub exercise_form: ExerciseFormState,
    pub exercise_inputs: ExerciseInputsState,
}

#[derive(Debug)]
struct Inner {
    data: DashboardData,
    versions: Versions,
    dirty: BTreeSet<Field>,
}

/// Owner of the dashboard state. Dropping it unmounts the dashboard.
#[derive(Debug)]
pub struct DashboardProvider {
    inner: Rc<RefCell<Inner>>,
}

impl DashboardProvider {
    pub fn mount(data: DashboardData) -> Self {
        debug!(
            tab = %data.active_tab,
            clients = data.clients.len(),
            templates = data.templates.len(),
            "dashboard mounted"
        );
        Self {
            inner: Rc::new(RefCell::new(Inner {
                data,
                versions: Versions::default(),
                dirty: BTreeSet::new(),
            })),
        }
    }

    pub fn context(&self) -> DashboardContext {
        DashboardContext {
            provider: Some(Rc::downgrade(&self.inner)),
        }
    }

    pub fn handle(&self) -> DashboardHandle {
        DashboardHandle {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl Drop for DashboardProvider {
    fn drop(&mut self) {
        debug!("dashboard unmounted");
    }
}

/// What a view holds to reach the dashboard state.
///
/// Cloning is cheap. A context never keeps the state alive on its own.
#[derive(Debug, Clone, Default)]
pub struct DashboardContext {
    provider: Option<Weak<RefCell<Inner>>>,
}

impl DashboardContext {
    /// A context for views mounted outside the dashboard route.
    pub fn detached() -> Self {
        Self { provider: None }
    }

    pub fn is_attached(&self) -> bool {
        self.provider
            .as_ref()
            .is_some_and(|weak| weak.strong_count() > 0)
    }

    pub fn handle(&self) -> Result<DashboardHandle, ContextError> {
        let weak = self.provider.as_ref().ok_or(ContextError::MissingProvider)?;
        let inner = weak.upgrade().ok_or(ContextError::Unmounted)?;
        Ok(DashboardHandle { inner })
    }
}

/// Resolves the dashboard state for a consuming view.
///
/// Any read outside a mounted provider fails with [`ContextError`] and never
/// yields default state. The variant says which case applied: a context that
/// was never attached gives `MissingProvider`, and one whose provider has
/// been dropped gives `Unmounted`. Callers that only care that the read was
/// out of scope can treat both the same.
pub fn use_dashboard(ctx: &DashboardContext) -> Result<DashboardHandle, ContextError> {
    ctx.handle()
}

/// Read/write access to the dashboard state for one render or update pass.
///
/// Handles keep the state alive, so they should not outlive the pass that
/// created them.
#[derive(Debug, Clone)]
pub struct DashboardHandle {
    inner: Rc<RefCell<Inner>>,
}

impl DashboardHandle {
    /// Borrows all dashboard values for the duration of `f`.
    ///
    /// `f` must not call setters on this handle.
    pub fn read<R>(&self, f: impl FnOnce(&DashboardData) -> R) -> R {
        f(&self.inner.borrow().data)
    }

    fn get<T: Clone>(&self, pick: fn(&DashboardData) -> &T) -> T {
        pick(&self.inner.borrow().data).clone()
    }

    /// Applies `update` to one field and records the change.
    ///
    /// For functional updates the previous value is cloned out before the
    /// function runs, so the function may read through this handle.
    /// Returns `true` if the stored value changed.
    fn set<T: Clone + PartialEq>(
        &self,
        field: Field,
        pick: fn(&mut DashboardData) -> &mut T,
        update: StateUpdate<T>,
    ) -> bool {
        let next = match update {
            StateUpdate::Replace(value) => value,
            apply => {
                let prev = pick(&mut self.inner.borrow_mut().data).clone();
                apply.resolve(&prev)
            }
        };

        let mut inner = self.inner.borrow_mut();
        let slot = pick(&mut inner.data);
        if *slot == next {
            return false;
        }
        *slot = next;
        inner.versions.bump(field);
        inner.dirty.insert(field);
        trace!(?field, "dashboard field changed");
        true
    }

    pub fn state(&self) -> DashboardState {
        self.read(|d| DashboardState {
            active_tab: d.active_tab,
            sidebar_collapsed: d.sidebar_collapsed,
        })
    }

    pub fn active_tab(&self) -> DashboardTab {
        self.get(|d| &d.active_tab)
    }

    pub fn set_active_tab(&self, update: impl Into<StateUpdate<DashboardTab>>) -> bool {
        self.set(Field::ActiveTab, |d| &mut d.active_tab, update.into())
    }

    pub fn sidebar_collapsed(&self) -> bool {
        self.get(|d| &d.sidebar_collapsed)
    }

    pub fn set_sidebar_collapsed(&self, update: impl Into<StateUpdate<bool>>) -> bool {
        self.set(Field::SidebarCollapsed, |d| &mut d.sidebar_collapsed, update.into())
    }

    pub fn pending_exercise(&self) -> PendingExercise {
        self.get(|d| &d.pending_exercise)
    }

    pub fn set_pending_exercise(&self, update: impl Into<StateUpdate<PendingExercise>>) -> bool {
        self.set(Field::PendingExercise, |d| &mut d.pending_exercise, update.into())
    }

    pub fn clients(&self) -> Vec<Client> {
        self.get(|d| &d.clients)
    }

    pub fn set_clients(&self, update: impl Into<StateUpdate<Vec<Client>>>) -> bool {
        self.set(Field::Clients, |d| &mut d.clients, update.into())
    }

    pub fn stats(&self) -> Vec<DashboardStat> {
        self.get(|d| &d.stats)
    }

    pub fn set_stats(&self, update: impl Into<StateUpdate<Vec<DashboardStat>>>) -> bool {
        self.set(Field::Stats, |d| &mut d.stats, update.into())
    }

    pub fn recent_clients(&self) -> Vec<RecentClient> {
        self.get(|d| &d.recent_clients)
    }

    pub fn set_recent_clients(&self, update: impl Into<StateUpdate<Vec<RecentClient>>>) -> bool {
        self.set(Field::RecentClients, |d| &mut d.recent_clients, update.into())
    }

    pub fn folders(&self) -> Vec<RoutineFolder> {
        self.get(|d| &d.folders)
    }

    pub fn set_folders(&self, update: impl Into<StateUpdate<Vec<RoutineFolder>>>) -> bool {
        self.set(Field::Folders, |d| &mut d.folders, update.into())
    }

    pub fn templates(&self) -> Vec<RoutineTemplate> {
        self.get(|d| &d.templates)
    }

    pub fn set_templates(&self, update: impl Into<StateUpdate<Vec<RoutineTemplate>>>) -> bool {
        self.set(Field::Templates, |d| &mut d.templates, update.into())
    }

    pub fn exercises(&self) -> Vec<Exercise> {
        self.get(|d| &d.exercises)
    }

    pub fn set_exercises(&self, update: impl Into<StateUpdate<Vec<Exercise>>>) -> bool {
        self.set(Field::Exercises, |d| &mut d.exercises, update.into())
    }

    pub fn exercise_filter(&self) -> ExerciseFilterState {
        self.get(|d| &d.exercise_filter)
    }

    pub fn set_exercise_filter(&self, update: impl Into<StateUpdate<ExerciseFilterState>>) -> bool {
        self.set(Field::ExerciseFilter, |d| &mut d.exercise_filter, update.into())
    }

    pub fn exercise_form(&self) -> ExerciseFormState {
        self.get(|d| &d.exercise_form)
    }

    pub fn set_exercise_form(&self, update: impl Into<StateUpdate<ExerciseFormState>>) -> bool {
        self.set(Field::ExerciseForm, |d| &mut d.exercise_form, update.into())
    }

    pub fn exercise_inputs(&self) -> ExerciseInputsState {
        self.get(|d| &d.exercise_inputs)
    }

    pub fn set_exercise_inputs(&self, update: impl Into<StateUpdate<ExerciseInputsState>>) -> bool {
        self.set(Field::ExerciseInputs, |d| &mut d.exercise_inputs, update.into())
    }

    pub fn versions(&self) -> Versions {
        self.inner.borrow().versions
    }

    pub fn has_changes(&self) -> bool {
        !self.inner.borrow().dirty.is_empty()
    }

    /// Drains the fields written since the previous call.
    pub fn take_changes(&self) -> ChangeSet {
        let dirty = std::mem::take(&mut self.inner.borrow_mut().dirty);
        ChangeSet::from_fields(dirty)
    }

    /// Whether the view behind `subscription` needs to render again.
    pub fn is_stale(&self, subscription: &Subscription) -> bool {
        subscription.is_stale(&self.versions())
    }

    pub fn sync(&self, subscription: &mut Subscription) {
        subscription.sync(&self.versions());
    }
}
