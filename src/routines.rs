//! Routines feature records: the exercise library, routine folders and
//! templates, and the editing state used to build them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RoutineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Core,
    FullBody,
}

impl MuscleGroup {
    pub const ALL: [MuscleGroup; 7] = [
        MuscleGroup::Chest,
        MuscleGroup::Back,
        MuscleGroup::Legs,
        MuscleGroup::Shoulders,
        MuscleGroup::Arms,
        MuscleGroup::Core,
        MuscleGroup::FullBody,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::Legs => "Legs",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Arms => "Arms",
            MuscleGroup::Core => "Core",
            MuscleGroup::FullBody => "Full body",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    Barbell,
    Dumbbell,
    Machine,
    Cable,
    Kettlebell,
    Bodyweight,
}

impl Equipment {
    pub const ALL: [Equipment; 6] = [
        Equipment::Barbell,
        Equipment::Dumbbell,
        Equipment::Machine,
        Equipment::Cable,
        Equipment::Kettlebell,
        Equipment::Bodyweight,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Equipment::Barbell => "Barbell",
            Equipment::Dumbbell => "Dumbbell",
            Equipment::Machine => "Machine",
            Equipment::Cable => "Cable",
            Equipment::Kettlebell => "Kettlebell",
            Equipment::Bodyweight => "Bodyweight",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self)
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T) -> T {
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    all[(idx + 1) % all.len()]
}

/// Steps an optional filter through `None -> all[0] -> .. -> all[n-1] -> None`.
fn cycle_filter<T: Copy + PartialEq>(all: &[T], current: Option<T>) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(value) => {
            let idx = all.iter().position(|v| *v == value)?;
            all.get(idx + 1).copied()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub muscle_group: MuscleGroup,
    pub equipment: Equipment,
    /// Added by the trainer rather than shipped with the library.
    #[serde(default)]
    pub custom: bool,
}

impl Exercise {
    pub fn new(name: &str, muscle_group: MuscleGroup, equipment: Equipment) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            muscle_group,
            equipment,
            custom: false,
        }
    }
}

/// Filters applied to the exercise library.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseFilterState {
    pub query: String,
    pub muscle_group: Option<MuscleGroup>,
    pub equipment: Option<Equipment>,
}

impl ExerciseFilterState {
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty() || self.muscle_group.is_some() || self.equipment.is_some()
    }

    pub fn matches(&self, exercise: &Exercise) -> bool {
        let query = self.query.trim().to_lowercase();
        (query.is_empty() || exercise.name.to_lowercase().contains(&query))
            && self.muscle_group.is_none_or(|g| g == exercise.muscle_group)
            && self.equipment.is_none_or(|e| e == exercise.equipment)
    }

    pub fn cycle_muscle_group(&mut self) {
        self.muscle_group = cycle_filter(&MuscleGroup::ALL, self.muscle_group);
    }

    pub fn cycle_equipment(&mut self) {
        self.equipment = cycle_filter(&Equipment::ALL, self.equipment);
    }

    /// Short description for the library title bar.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.query.trim().is_empty() {
            parts.push(format!("\"{}\"", self.query.trim()));
        }
        if let Some(group) = self.muscle_group {
            parts.push(group.label().to_string());
        }
        if let Some(equipment) = self.equipment {
            parts.push(equipment.label().to_string());
        }
        if parts.is_empty() {
            "all".into()
        } else {
            parts.join(" + ")
        }
    }
}

/// Returns the exercises that pass `filter`, sorted by name.
pub fn filter_exercises<'a>(
    exercises: &'a [Exercise],
    filter: &ExerciseFilterState,
) -> Vec<&'a Exercise> {
    let mut matched: Vec<&Exercise> = exercises.iter().filter(|e| filter.matches(e)).collect();
    matched.sort_by_key(|e| e.name.to_lowercase());
    matched
}

/// The "new exercise" form on the exercises page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseFormState {
    pub open: bool,
    pub name: String,
    pub muscle_group: MuscleGroup,
    pub equipment: Equipment,
    pub error: Option<String>,
}

impl Default for ExerciseFormState {
    fn default() -> Self {
        Self {
            open: false,
            name: String::new(),
            muscle_group: MuscleGroup::Chest,
            equipment: Equipment::Barbell,
            error: None,
        }
    }
}

impl ExerciseFormState {
    pub fn opened() -> Self {
        Self {
            open: true,
            ..Self::default()
        }
    }

    /// Validates the form into a new custom exercise.
    pub fn submit(&self, existing: &[Exercise]) -> Result<Exercise, RoutineError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(RoutineError::EmptyName);
        }
        if existing.iter().any(|e| e.name.eq_ignore_ascii_case(name)) {
            return Err(RoutineError::DuplicateExercise(name.to_string()));
        }
        Ok(Exercise {
            custom: true,
            ..Exercise::new(name, self.muscle_group, self.equipment)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputField {
    #[default]
    Sets,
    Reps,
    Rest,
}

impl InputField {
    pub fn next(self) -> Self {
        match self {
            InputField::Sets => InputField::Reps,
            InputField::Reps => InputField::Rest,
            InputField::Rest => InputField::Sets,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            InputField::Sets => InputField::Rest,
            InputField::Reps => InputField::Sets,
            InputField::Rest => InputField::Reps,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InputField::Sets => "sets",
            InputField::Reps => "reps",
            InputField::Rest => "rest",
        }
    }
}

/// Raw text typed into the sets/reps/rest inputs before a staged exercise is
/// committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseInputsState {
    pub sets: String,
    pub reps: String,
    pub rest_seconds: String,
    pub focused: InputField,
}

impl Default for ExerciseInputsState {
    fn default() -> Self {
        Self {
            sets: "3".into(),
            reps: "10".into(),
            rest_seconds: "60".into(),
            focused: InputField::Sets,
        }
    }
}

/// Validated values from [`ExerciseInputsState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryInputs {
    pub sets: u8,
    pub reps: u8,
    pub rest_seconds: u16,
}

const MAX_INPUT_LEN: usize = 3;
const DEFAULT_REST_SECONDS: u16 = 60;

impl ExerciseInputsState {
    fn focused_mut(&mut self) -> &mut String {
        match self.focused {
            InputField::Sets => &mut self.sets,
            InputField::Reps => &mut self.reps,
            InputField::Rest => &mut self.rest_seconds,
        }
    }

    /// Appends a digit to the focused input; other characters are ignored.
    pub fn push_digit(&mut self, c: char) {
        let field = self.focused_mut();
        if c.is_ascii_digit() && field.len() < MAX_INPUT_LEN {
            field.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        self.focused_mut().pop();
    }

    pub fn parse(&self) -> Result<EntryInputs, RoutineError> {
        let sets = parse_in_range(&self.sets, "sets", 1, 20)?;
        let reps = parse_in_range(&self.reps, "reps", 1, 100)?;
        let rest_seconds = if self.rest_seconds.trim().is_empty() {
            u32::from(DEFAULT_REST_SECONDS)
        } else {
            parse_in_range(&self.rest_seconds, "rest", 0, 600)?
        };
        Ok(EntryInputs {
            sets: sets as u8,
            reps: reps as u8,
            rest_seconds: rest_seconds as u16,
        })
    }
}

fn parse_in_range(raw: &str, field: &'static str, min: u32, max: u32) -> Result<u32, RoutineError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|v| (min..=max).contains(v))
        .ok_or_else(|| RoutineError::InvalidInput {
            field,
            value: raw.to_string(),
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockEntry {
    pub exercise_id: Uuid,
    pub exercise_name: String,
    pub sets: u8,
    pub reps: u8,
    pub rest_seconds: u16,
}

/// A group of exercises within a template (warm-up, main lift, finisher..).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineBlock {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub entries: Vec<BlockEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineTemplate {
    pub id: Uuid,
    pub name: String,
    pub folder_id: Option<Uuid>,
    #[serde(default)]
    pub blocks: Vec<RoutineBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineFolder {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub template_ids: Vec<Uuid>,
}

/// Templates belonging to `folder`, in the folder's order.
pub fn templates_in_folder<'a>(
    folder: &RoutineFolder,
    templates: &'a [RoutineTemplate],
) -> Vec<&'a RoutineTemplate> {
    folder
        .template_ids
        .iter()
        .filter_map(|id| templates.iter().find(|t| t.id == *id))
        .collect()
}

/// Returns a copy of `templates` with `exercise` appended to block `block_id`.
pub fn commit_exercise(
    templates: &[RoutineTemplate],
    exercise: &Exercise,
    block_id: &str,
    inputs: EntryInputs,
) -> Result<Vec<RoutineTemplate>, RoutineError> {
    let mut next = templates.to_vec();
    let block = next
        .iter_mut()
        .flat_map(|t| t.blocks.iter_mut())
        .find(|b| b.id == block_id)
        .ok_or_else(|| RoutineError::BlockNotFound(block_id.to_string()))?;
    block.entries.push(BlockEntry {
        exercise_id: exercise.id,
        exercise_name: exercise.name.clone(),
        sets: inputs.sets,
        reps: inputs.reps,
        rest_seconds: inputs.rest_seconds,
    });
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> Vec<Exercise> {
        vec![
            Exercise::new("Bench Press", MuscleGroup::Chest, Equipment::Barbell),
            Exercise::new("Incline Dumbbell Press", MuscleGroup::Chest, Equipment::Dumbbell),
            Exercise::new("Back Squat", MuscleGroup::Legs, Equipment::Barbell),
            Exercise::new("Plank", MuscleGroup::Core, Equipment::Bodyweight),
        ]
    }

    fn template_with_block(block_id: &str) -> RoutineTemplate {
        RoutineTemplate {
            id: Uuid::new_v4(),
            name: "Push A".into(),
            folder_id: None,
            blocks: vec![RoutineBlock {
                id: block_id.into(),
                name: "Main".into(),
                entries: Vec::new(),
            }],
        }
    }

    #[test]
    fn test_filter_empty_returns_all_sorted() {
        let lib = library();
        let names: Vec<&str> = filter_exercises(&lib, &ExerciseFilterState::default())
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["Back Squat", "Bench Press", "Incline Dumbbell Press", "Plank"]
        );
    }

    #[test]
    fn test_filter_query_is_case_insensitive() {
        let lib = library();
        let filter = ExerciseFilterState {
            query: "PRESS".into(),
            ..Default::default()
        };
        assert_eq!(filter_exercises(&lib, &filter).len(), 2);
    }

    #[test]
    fn test_filter_combines_group_and_equipment() {
        let lib = library();
        let filter = ExerciseFilterState {
            muscle_group: Some(MuscleGroup::Chest),
            equipment: Some(Equipment::Dumbbell),
            ..Default::default()
        };
        let matched = filter_exercises(&lib, &filter);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "Incline Dumbbell Press");
    }

    #[test]
    fn test_cycle_muscle_group_wraps_to_none() {
        let mut filter = ExerciseFilterState::default();
        filter.cycle_muscle_group();
        assert_eq!(filter.muscle_group, Some(MuscleGroup::Chest));
        for _ in 0..MuscleGroup::ALL.len() - 1 {
            filter.cycle_muscle_group();
        }
        assert_eq!(filter.muscle_group, Some(MuscleGroup::FullBody));
        filter.cycle_muscle_group();
        assert_eq!(filter.muscle_group, None);
    }

    #[test]
    fn test_filter_summary() {
        let filter = ExerciseFilterState {
            query: " row ".into(),
            equipment: Some(Equipment::Cable),
            ..Default::default()
        };
        assert!(filter.is_active());
        assert_eq!(filter.summary(), "\"row\" + Cable");
        assert_eq!(ExerciseFilterState::default().summary(), "all");
    }

    #[test]
    fn test_form_submit_rejects_empty_name() {
        let form = ExerciseFormState {
            name: "   ".into(),
            ..ExerciseFormState::opened()
        };
        assert_eq!(form.submit(&library()), Err(RoutineError::EmptyName));
    }

    #[test]
    fn test_form_submit_rejects_duplicate() {
        let form = ExerciseFormState {
            name: "bench press".into(),
            ..ExerciseFormState::opened()
        };
        assert_eq!(
            form.submit(&library()),
            Err(RoutineError::DuplicateExercise("bench press".into()))
        );
    }

    #[test]
    fn test_form_submit_builds_custom_exercise() {
        let form = ExerciseFormState {
            name: " Landmine Press ".into(),
            muscle_group: MuscleGroup::Shoulders,
            equipment: Equipment::Barbell,
            ..ExerciseFormState::opened()
        };
        let exercise = form.submit(&library()).unwrap();
        assert_eq!(exercise.name, "Landmine Press");
        assert_eq!(exercise.muscle_group, MuscleGroup::Shoulders);
        assert!(exercise.custom);
    }

    #[test]
    fn test_inputs_default_parse() {
        let inputs = ExerciseInputsState::default().parse().unwrap();
        assert_eq!(
            inputs,
            EntryInputs {
                sets: 3,
                reps: 10,
                rest_seconds: 60
            }
        );
    }

    #[test]
    fn test_inputs_push_digit_targets_focused_field() {
        let mut inputs = ExerciseInputsState {
            focused: InputField::Reps,
            ..Default::default()
        };
        inputs.push_digit('2');
        inputs.push_digit('x');
        assert_eq!(inputs.reps, "102");
        inputs.push_digit('5');
        assert_eq!(inputs.reps, "102");
        inputs.pop_char();
        assert_eq!(inputs.reps, "10");
        assert_eq!(inputs.sets, "3");
    }

    #[test]
    fn test_inputs_reject_out_of_range() {
        let inputs = ExerciseInputsState {
            sets: "0".into(),
            ..Default::default()
        };
        assert_eq!(
            inputs.parse(),
            Err(RoutineError::InvalidInput {
                field: "sets",
                value: "0".into()
            })
        );
    }

    #[test]
    fn test_inputs_empty_rest_uses_default() {
        let inputs = ExerciseInputsState {
            rest_seconds: String::new(),
            ..Default::default()
        };
        assert_eq!(inputs.parse().unwrap().rest_seconds, 60);
    }

    #[test]
    fn test_inputs_explicit_rest_in_and_out_of_range() {
        let inputs = ExerciseInputsState {
            rest_seconds: "600".into(),
            ..Default::default()
        };
        assert_eq!(inputs.parse().unwrap().rest_seconds, 600);

        let inputs = ExerciseInputsState {
            rest_seconds: "601".into(),
            ..Default::default()
        };
        assert_eq!(
            inputs.parse(),
            Err(RoutineError::InvalidInput {
                field: "rest",
                value: "601".into()
            })
        );
    }

    #[test]
    fn test_input_field_cycles() {
        assert_eq!(InputField::Sets.next(), InputField::Reps);
        assert_eq!(InputField::Rest.next(), InputField::Sets);
        assert_eq!(InputField::Sets.prev(), InputField::Rest);
    }

    #[test]
    fn test_commit_exercise_appends_entry() {
        let templates = vec![template_with_block("b1")];
        let exercise = Exercise::new("Dip", MuscleGroup::Chest, Equipment::Bodyweight);
        let inputs = EntryInputs {
            sets: 4,
            reps: 8,
            rest_seconds: 90,
        };
        let next = commit_exercise(&templates, &exercise, "b1", inputs).unwrap();
        let entries = &next[0].blocks[0].entries;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].exercise_id, exercise.id);
        assert_eq!(entries[0].sets, 4);
        assert!(templates[0].blocks[0].entries.is_empty());
    }

    #[test]
    fn test_commit_exercise_unknown_block() {
        let templates = vec![template_with_block("b1")];
        let exercise = Exercise::new("Dip", MuscleGroup::Chest, Equipment::Bodyweight);
        let inputs = ExerciseInputsState::default().parse().unwrap();
        assert_eq!(
            commit_exercise(&templates, &exercise, "b9", inputs),
            Err(RoutineError::BlockNotFound("b9".into()))
        );
    }

    #[test]
    fn test_templates_in_folder_follows_folder_order() {
        let a = template_with_block("a");
        let b = template_with_block("b");
        let folder = RoutineFolder {
            id: Uuid::new_v4(),
            name: "Strength".into(),
            template_ids: vec![b.id, Uuid::new_v4(), a.id],
        };
        let templates = vec![a.clone(), b.clone()];
        let ordered = templates_in_folder(&folder, &templates);
        assert_eq!(ordered.len(), 2);
        assert_eq!(ordered[0].id, b.id);
        assert_eq!(ordered[1].id, a.id);
    }
}
