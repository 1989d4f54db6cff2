//! An exercise staged for a routine block but not yet committed.

use crate::error::RoutineError;
use crate::routines::{commit_exercise, EntryInputs, Exercise, RoutineTemplate};

/// Either both the exercise and its target block, or nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PendingExercise {
    #[default]
    Absent,
    Present { exercise: Exercise, block_id: String },
}

impl PendingExercise {
    pub fn stage(exercise: Exercise, block_id: impl Into<String>) -> Self {
        PendingExercise::Present {
            exercise,
            block_id: block_id.into(),
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, PendingExercise::Present { .. })
    }

    pub fn exercise(&self) -> Option<&Exercise> {
        self.parts().map(|(exercise, _)| exercise)
    }

    pub fn block_id(&self) -> Option<&str> {
        self.parts().map(|(_, block_id)| block_id)
    }

    pub fn parts(&self) -> Option<(&Exercise, &str)> {
        match self {
            PendingExercise::Absent => None,
            PendingExercise::Present { exercise, block_id } => Some((exercise, block_id.as_str())),
        }
    }

    /// Inserts the staged exercise into its block, returning the new
    /// template list.
    pub fn commit(
        &self,
        templates: &[RoutineTemplate],
        inputs: EntryInputs,
    ) -> Result<Vec<RoutineTemplate>, RoutineError> {
        let (exercise, block_id) = self.parts().ok_or(RoutineError::NothingStaged)?;
        commit_exercise(templates, exercise, block_id, inputs)
    }
}
