//! Change tracking for dashboard fields.

use std::collections::BTreeSet;

/// Identifies one field of the dashboard state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    ActiveTab,
    SidebarCollapsed,
    PendingExercise,
    Clients,
    Stats,
    RecentClients,
    Folders,
    Templates,
    Exercises,
    ExerciseFilter,
    ExerciseForm,
    ExerciseInputs,
}

impl Field {
    pub const COUNT: usize = 12;

    pub const ALL: [Field; Field::COUNT] = [
        Field::ActiveTab,
        Field::SidebarCollapsed,
        Field::PendingExercise,
        Field::Clients,
        Field::Stats,
        Field::RecentClients,
        Field::Folders,
        Field::Templates,
        Field::Exercises,
        Field::ExerciseFilter,
        Field::ExerciseForm,
        Field::ExerciseInputs,
    ];

    pub(crate) fn slot(self) -> usize {
        self as usize
    }
}

/// Fields that changed since the last UI cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    fields: BTreeSet<Field>,
}

impl ChangeSet {
    pub(crate) fn from_fields(fields: BTreeSet<Field>) -> Self {
        Self { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields.iter().copied()
    }
}

/// Per-field version counters, bumped on every effective write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Versions([u64; Field::COUNT]);

impl Versions {
    pub fn get(&self, field: Field) -> u64 {
        self.0[field.slot()]
    }

    pub(crate) fn bump(&mut self, field: Field) {
        self.0[field.slot()] += 1;
    }
}

/// Records which fields a view reads and the versions it last rendered.
///
/// A view is stale once any watched field has been written with a new value
/// since the last [`Subscription::sync`].
#[derive(Debug, Clone)]
pub struct Subscription {
    fields: Vec<Field>,
    seen: Option<Versions>,
}

impl Subscription {
    pub fn new(fields: &[Field]) -> Self {
        Self {
            fields: fields.to_vec(),
            seen: None,
        }
    }

    /// A subscription that has never synced is always stale.
    pub fn is_stale(&self, current: &Versions) -> bool {
        match &self.seen {
            None => true,
            Some(seen) => self.fields.iter().any(|f| seen.get(*f) != current.get(*f)),
        }
    }

    pub fn sync(&mut self, current: &Versions) {
        self.seen = Some(*current);
    }
}
