//! Seed data for the dashboard: clients, the exercise library and routines.
//!
//! Data comes either from the built-in sample set or from a JSON file passed
//! with `--data` / `data_file`.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::dashboard::{DashboardData, PendingExercise};
use crate::error::DataError;
use crate::routines::{
    BlockEntry, Equipment, Exercise, ExerciseFilterState, ExerciseFormState, ExerciseInputsState,
    MuscleGroup, RoutineBlock, RoutineFolder, RoutineTemplate,
};
use crate::trainer::{compute_stats, recent_clients, Client, ClientStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Store {
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub folders: Vec<RoutineFolder>,
    #[serde(default)]
    pub templates: Vec<RoutineTemplate>,
}

impl Store {
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let raw = fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store: Store = serde_json::from_str(&raw).map_err(|source| DataError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(block_id) = store.duplicate_block_id() {
            return Err(DataError::DuplicateBlockId {
                path: path.to_path_buf(),
                block_id: block_id.to_string(),
            });
        }
        info!(
            path = %path.display(),
            clients = store.clients.len(),
            exercises = store.exercises.len(),
            templates = store.templates.len(),
            "loaded data file"
        );
        Ok(store)
    }

    /// First block id used by more than one block. Staged exercises name
    /// their target by block id alone, so ids must be unique across templates.
    pub fn duplicate_block_id(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.templates
            .iter()
            .flat_map(|t| t.blocks.iter())
            .map(|b| b.id.as_str())
            .find(|id| !seen.insert(*id))
    }

    /// Builds the initial dashboard values from this store.
    pub fn into_dashboard(self, config: &Config, today: NaiveDate) -> DashboardData {
        DashboardData {
            active_tab: config.default_tab,
            sidebar_collapsed: config.sidebar_collapsed,
            pending_exercise: PendingExercise::Absent,
            stats: compute_stats(&self.clients, today),
            recent_clients: recent_clients(&self.clients, config.recent_clients_limit),
            clients: self.clients,
            folders: self.folders,
            templates: self.templates,
            exercises: self.exercises,
            exercise_filter: ExerciseFilterState::default(),
            exercise_form: ExerciseFormState::default(),
            exercise_inputs: ExerciseInputsState::default(),
        }
    }

    /// A small practice with a handful of clients and two routine folders.
    ///
    /// Session dates are relative to `today` so the overview always has
    /// something recent to show.
    pub fn sample(today: NaiveDate) -> Self {
        let days_ago = |n: i64| Some(today - Duration::days(n));
        let mk_client = |name: &str, goal: &str, status: ClientStatus, sessions: u32, last| Client {
            id: Uuid::new_v4(),
            name: name.into(),
            email: format!("{}@example.com", name.split(' ').next().unwrap_or(name).to_lowercase()),
            goal: goal.into(),
            status,
            sessions_completed: sessions,
            last_session: last,
        };

        let clients = vec![
            mk_client("Maya Torres", "First pull-up", ClientStatus::Active, 24, days_ago(1)),
            mk_client("Jonah Price", "Marathon base", ClientStatus::Active, 41, days_ago(3)),
            mk_client("Priya Nair", "Post-rehab knee", ClientStatus::Active, 12, days_ago(6)),
            mk_client("Leo Brandt", "Powerlifting meet", ClientStatus::Active, 67, days_ago(9)),
            mk_client("Ines Costa", "General fitness", ClientStatus::Paused, 8, days_ago(35)),
            mk_client("Sam Okafor", "Lose 5kg", ClientStatus::Prospect, 0, None),
        ];

        let bench = Exercise::new("Bench Press", MuscleGroup::Chest, Equipment::Barbell);
        let ohp = Exercise::new("Overhead Press", MuscleGroup::Shoulders, Equipment::Barbell);
        let squat = Exercise::new("Back Squat", MuscleGroup::Legs, Equipment::Barbell);
        let rdl = Exercise::new("Romanian Deadlift", MuscleGroup::Legs, Equipment::Barbell);
        let row = Exercise::new("Seated Cable Row", MuscleGroup::Back, Equipment::Cable);
        let pullup = Exercise::new("Pull-up", MuscleGroup::Back, Equipment::Bodyweight);
        let exercises = vec![
            bench.clone(),
            ohp.clone(),
            squat.clone(),
            rdl.clone(),
            row.clone(),
            pullup.clone(),
            Exercise::new("Incline Dumbbell Press", MuscleGroup::Chest, Equipment::Dumbbell),
            Exercise::new("Lateral Raise", MuscleGroup::Shoulders, Equipment::Dumbbell),
            Exercise::new("Leg Press", MuscleGroup::Legs, Equipment::Machine),
            Exercise::new("Goblet Squat", MuscleGroup::Legs, Equipment::Kettlebell),
            Exercise::new("Kettlebell Swing", MuscleGroup::FullBody, Equipment::Kettlebell),
            Exercise::new("Lat Pulldown", MuscleGroup::Back, Equipment::Cable),
            Exercise::new("Triceps Pushdown", MuscleGroup::Arms, Equipment::Cable),
            Exercise::new("Hammer Curl", MuscleGroup::Arms, Equipment::Dumbbell),
            Exercise::new("Plank", MuscleGroup::Core, Equipment::Bodyweight),
            Exercise::new("Dead Bug", MuscleGroup::Core, Equipment::Bodyweight),
        ];

        let entry = |exercise: &Exercise, sets: u8, reps: u8, rest_seconds: u16| BlockEntry {
            exercise_id: exercise.id,
            exercise_name: exercise.name.clone(),
            sets,
            reps,
            rest_seconds,
        };
        let block = |id: &str, name: &str, entries: Vec<BlockEntry>| RoutineBlock {
            id: id.into(),
            name: name.into(),
            entries,
        };

        let strength = Uuid::new_v4();
        let rehab = Uuid::new_v4();

        // Strength folder: upper/lower split
        let upper = RoutineTemplate {
            id: Uuid::new_v4(),
            name: "Upper A".into(),
            folder_id: Some(strength),
            blocks: vec![
                block("upper-a-main", "Main lifts", vec![entry(&bench, 5, 5, 180), entry(&ohp, 3, 8, 120)]),
                block("upper-a-accessory", "Accessories", vec![entry(&row, 3, 12, 90), entry(&pullup, 3, 8, 90)]),
            ],
        };
        let lower = RoutineTemplate {
            id: Uuid::new_v4(),
            name: "Lower A".into(),
            folder_id: Some(strength),
            blocks: vec![
                block("lower-a-main", "Main lifts", vec![entry(&squat, 5, 5, 180)]),
                block("lower-a-accessory", "Accessories", vec![entry(&rdl, 3, 10, 120)]),
            ],
        };

        // Rehab folder: a single empty template to build into
        let knee = RoutineTemplate {
            id: Uuid::new_v4(),
            name: "Knee return".into(),
            folder_id: Some(rehab),
            blocks: vec![
                block("knee-warmup", "Warm-up", Vec::new()),
                block("knee-strength", "Strength", Vec::new()),
            ],
        };

        let folders = vec![
            RoutineFolder {
                id: strength,
                name: "Strength".into(),
                template_ids: vec![upper.id, lower.id],
            },
            RoutineFolder {
                id: rehab,
                name: "Rehab".into(),
                template_ids: vec![knee.id],
            },
        ];

        Self {
            clients,
            exercises,
            folders,
            templates: vec![upper, lower, knee],
        }
    }
}
