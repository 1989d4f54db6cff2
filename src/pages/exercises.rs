use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, Paragraph},
    Frame,
};
use tracing::{debug, info};

use crate::dashboard::{
    DashboardContext, DashboardHandle, Field, PendingExercise, StateUpdate, Subscription,
};
use crate::error::ContextError;
use crate::key_handler::{ActionResult, InputMode, KeyAction};
use crate::routines::{filter_exercises, Exercise, ExerciseFilterState, ExerciseFormState};
use crate::state::{ExercisesMode, ExercisesState};
use crate::ui_utils::{centered, failure, list_state, pane_block, render_text_field, success};

/// The exercise library: filtering, staging into a block, and adding
/// custom exercises.
#[derive(Debug)]
pub struct ExercisesPage {
    ctx: DashboardContext,
    state: ExercisesState,
    subscription: Subscription,
}

impl ExercisesPage {
    pub const FIELDS: [Field; 4] = [
        Field::Exercises,
        Field::ExerciseFilter,
        Field::ExerciseForm,
        Field::PendingExercise,
    ];

    pub fn new(ctx: DashboardContext) -> Self {
        Self {
            ctx,
            state: ExercisesState::new(),
            subscription: Subscription::new(&Self::FIELDS),
        }
    }

    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }

    pub fn mode(&self) -> ExercisesMode {
        self.state.mode
    }

    pub fn input_mode(&self) -> InputMode {
        self.state.input_mode()
    }

    fn selected_exercise(&self, dashboard: &DashboardHandle) -> Option<Exercise> {
        dashboard.read(|d| {
            filter_exercises(&d.exercises, &d.exercise_filter)
                .get(self.state.list.selected)
                .map(|e| (*e).clone())
        })
    }

    /// Handles a key. `target_block` is the block currently selected on the
    /// routines page, if any.
    pub fn handle_action(
        &mut self,
        action: KeyAction,
        target_block: Option<&str>,
    ) -> Result<ActionResult, ContextError> {
        let dashboard = self.ctx.handle()?;
        let result = match self.state.mode {
            ExercisesMode::Browse => self.handle_browse(&dashboard, action, target_block),
            ExercisesMode::Search => self.handle_search(&dashboard, action),
            ExercisesMode::Form => self.handle_form(&dashboard, action),
        };
        Ok(result)
    }

    fn handle_browse(
        &mut self,
        dashboard: &DashboardHandle,
        action: KeyAction,
        target_block: Option<&str>,
    ) -> ActionResult {
        let visible = dashboard.read(|d| filter_exercises(&d.exercises, &d.exercise_filter).len());
        match action {
            KeyAction::NavigateUp => {
                self.state.list.up();
            }
            KeyAction::NavigateDown => {
                self.state.list.down(visible);
            }
            KeyAction::InputChar('/') => {
                self.state.mode = ExercisesMode::Search;
                return ActionResult::status("Search: type to filter, Enter to keep, Esc to clear");
            }
            KeyAction::InputChar('m') => {
                dashboard.set_exercise_filter(StateUpdate::modify(|f: &mut ExerciseFilterState| {
                    f.cycle_muscle_group()
                }));
                self.state.list.reset();
            }
            KeyAction::InputChar('e') => {
                dashboard.set_exercise_filter(StateUpdate::modify(|f: &mut ExerciseFilterState| {
                    f.cycle_equipment()
                }));
                self.state.list.reset();
            }
            KeyAction::InputChar('c') => {
                dashboard.set_exercise_filter(ExerciseFilterState::default());
                self.state.list.reset();
                return ActionResult::status("Filters cleared");
            }
            KeyAction::InputChar('n') => {
                dashboard.set_exercise_form(ExerciseFormState::opened());
                self.state.mode = ExercisesMode::Form;
            }
            KeyAction::InputChar('a') | KeyAction::Select => {
                return self.stage_selected(dashboard, target_block);
            }
            _ => {}
        }
        ActionResult::none()
    }

    fn stage_selected(&self, dashboard: &DashboardHandle, target_block: Option<&str>) -> ActionResult {
        let Some(exercise) = self.selected_exercise(dashboard) else {
            return ActionResult::status(failure("No exercise selected"));
        };
        let Some(block_id) = target_block else {
            return ActionResult::status(failure("Pick a block on the Routines tab first"));
        };
        debug!(exercise = %exercise.name, block = block_id, "staging exercise");
        let msg = format!("Staged {} for {} (commit on Routines)", exercise.name, block_id);
        dashboard.set_pending_exercise(PendingExercise::stage(exercise, block_id));
        ActionResult::status(msg)
    }

    fn handle_search(&mut self, dashboard: &DashboardHandle, action: KeyAction) -> ActionResult {
        match action {
            KeyAction::InputChar(c) => {
                dashboard.set_exercise_filter(StateUpdate::modify(move |f: &mut ExerciseFilterState| {
                    f.query.push(c)
                }));
                self.state.list.reset();
            }
            KeyAction::Backspace => {
                dashboard.set_exercise_filter(StateUpdate::modify(|f: &mut ExerciseFilterState| {
                    f.query.pop();
                }));
                self.state.list.reset();
            }
            KeyAction::Select => self.state.mode = ExercisesMode::Browse,
            KeyAction::Back => {
                dashboard.set_exercise_filter(StateUpdate::modify(|f: &mut ExerciseFilterState| {
                    f.query.clear()
                }));
                self.state.list.reset();
                self.state.mode = ExercisesMode::Browse;
            }
            _ => {}
        }
        ActionResult::none()
    }

    fn handle_form(&mut self, dashboard: &DashboardHandle, action: KeyAction) -> ActionResult {
        match action {
            KeyAction::InputChar(c) => {
                dashboard.set_exercise_form(StateUpdate::modify(move |f: &mut ExerciseFormState| {
                    f.name.push(c);
                    f.error = None;
                }));
            }
            KeyAction::Backspace => {
                dashboard.set_exercise_form(StateUpdate::modify(|f: &mut ExerciseFormState| {
                    f.name.pop();
                    f.error = None;
                }));
            }
            KeyAction::NavigateUp | KeyAction::NavigateDown => {
                dashboard.set_exercise_form(StateUpdate::modify(|f: &mut ExerciseFormState| {
                    f.muscle_group = f.muscle_group.next()
                }));
            }
            KeyAction::NavigateLeft | KeyAction::NavigateRight => {
                dashboard.set_exercise_form(StateUpdate::modify(|f: &mut ExerciseFormState| {
                    f.equipment = f.equipment.next()
                }));
            }
            KeyAction::Back => {
                dashboard.set_exercise_form(ExerciseFormState::default());
                self.state.mode = ExercisesMode::Browse;
            }
            KeyAction::Select => {
                let submitted = dashboard.read(|d| d.exercise_form.submit(&d.exercises));
                match submitted {
                    Ok(exercise) => {
                        let name = exercise.name.clone();
                        dashboard.set_exercises(StateUpdate::modify(move |all: &mut Vec<Exercise>| {
                            all.push(exercise)
                        }));
                        dashboard.set_exercise_form(ExerciseFormState::default());
                        self.state.mode = ExercisesMode::Browse;
                        info!(exercise = %name, "custom exercise added");
                        return ActionResult::status(success(&format!("Added {}", name)));
                    }
                    Err(e) => {
                        let msg = e.to_string();
                        dashboard.set_exercise_form(StateUpdate::modify(move |f: &mut ExerciseFormState| {
                            f.error = Some(msg)
                        }));
                    }
                }
            }
            _ => {}
        }
        ActionResult::none()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) -> Result<(), ContextError> {
        let dashboard = self.ctx.handle()?;

        dashboard.read(|d| {
            let visible = filter_exercises(&d.exercises, &d.exercise_filter);
            self.state.list.clamp(visible.len());

            let [search_area, list_area, hint_area] = Layout::vertical([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .areas(area);

            render_text_field(
                frame,
                search_area,
                "Search",
                &d.exercise_filter.query,
                self.state.mode == ExercisesMode::Search,
            );

            let staged_id = d.pending_exercise.exercise().map(|e| e.id);
            let items: Vec<ListItem> = visible
                .iter()
                .map(|e| {
                    let mut spans = vec![
                        Span::styled(format!("{:<28}", e.name), Style::new().bold()),
                        Span::styled(
                            format!("{:<10} {:<10}", e.muscle_group.label(), e.equipment.label()),
                            Style::new().gray(),
                        ),
                    ];
                    if e.custom {
                        spans.push(Span::styled(" custom", Style::new().magenta()));
                    }
                    if staged_id == Some(e.id) {
                        spans.push(Span::styled(" staged", Style::new().yellow()));
                    }
                    ListItem::new(Line::from(spans))
                })
                .collect();
            let title = format!(
                "Library ({}/{}) filter: {}",
                visible.len(),
                d.exercises.len(),
                d.exercise_filter.summary()
            );
            let mut ls = list_state(&self.state.list, items.len());
            frame.render_stateful_widget(
                List::new(items)
                    .block(pane_block(&title, self.state.mode == ExercisesMode::Browse))
                    .highlight_style(Style::new().reversed())
                    .highlight_symbol(">> "),
                list_area,
                &mut ls,
            );

            frame.render_widget(
                Line::from("/: search  m: muscle  e: equipment  c: clear  n: new  a: stage").gray(),
                hint_area,
            );

            if d.exercise_form.open {
                let form = &d.exercise_form;
                let popup = centered(area, 50, 9);
                frame.render_widget(Clear, popup);
                let mut lines = vec![
                    Line::from(vec![
                        Span::styled("Name: ", Style::new().yellow()),
                        Span::raw(form.name.clone()),
                        Span::styled("▏", Style::new().yellow()),
                    ]),
                    Line::from(format!("Muscle group (↑/↓): {}", form.muscle_group.label())),
                    Line::from(format!("Equipment (←/→): {}", form.equipment.label())),
                    Line::from(""),
                ];
                if let Some(err) = &form.error {
                    lines.push(Line::from(failure(err)).red());
                }
                lines.push(Line::from("Enter: save  Esc: cancel").gray());
                frame.render_widget(
                    Paragraph::new(lines).block(pane_block("New exercise", true)),
                    popup,
                );
            }
        });

        dashboard.sync(&mut self.subscription);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{DashboardData, DashboardProvider};
    use crate::routines::{Equipment, MuscleGroup};

    fn provider() -> DashboardProvider {
        DashboardProvider::mount(DashboardData {
            exercises: vec![
                Exercise::new("Bench Press", MuscleGroup::Chest, Equipment::Barbell),
                Exercise::new("Goblet Squat", MuscleGroup::Legs, Equipment::Kettlebell),
                Exercise::new("Push-up", MuscleGroup::Chest, Equipment::Bodyweight),
            ],
            ..Default::default()
        })
    }

    fn type_text(page: &mut ExercisesPage, text: &str) {
        for c in text.chars() {
            page.handle_action(KeyAction::InputChar(c), None).unwrap();
        }
    }

    #[test]
    fn test_search_updates_filter_query() {
        let provider = provider();
        let handle = provider.handle();
        let mut page = ExercisesPage::new(provider.context());

        page.handle_action(KeyAction::InputChar('/'), None).unwrap();
        assert_eq!(page.input_mode(), InputMode::Text);
        type_text(&mut page, "squat");
        assert_eq!(handle.exercise_filter().query, "squat");

        page.handle_action(KeyAction::Select, None).unwrap();
        assert_eq!(page.mode(), ExercisesMode::Browse);
        assert_eq!(handle.exercise_filter().query, "squat");
    }

    #[test]
    fn test_search_escape_clears_query() {
        let provider = provider();
        let handle = provider.handle();
        let mut page = ExercisesPage::new(provider.context());
        page.handle_action(KeyAction::InputChar('/'), None).unwrap();
        type_text(&mut page, "press");
        page.handle_action(KeyAction::Back, None).unwrap();
        assert_eq!(handle.exercise_filter().query, "");
        assert_eq!(page.mode(), ExercisesMode::Browse);
    }

    #[test]
    fn test_muscle_filter_cycles() {
        let provider = provider();
        let handle = provider.handle();
        let mut page = ExercisesPage::new(provider.context());
        page.handle_action(KeyAction::InputChar('m'), None).unwrap();
        assert_eq!(handle.exercise_filter().muscle_group, Some(MuscleGroup::Chest));
        page.handle_action(KeyAction::InputChar('c'), None).unwrap();
        assert_eq!(handle.exercise_filter(), ExerciseFilterState::default());
    }

    #[test]
    fn test_stage_requires_target_block() {
        let provider = provider();
        let handle = provider.handle();
        let mut page = ExercisesPage::new(provider.context());
        let result = page.handle_action(KeyAction::InputChar('a'), None).unwrap();
        assert!(result.status_message.unwrap().contains("Routines"));
        assert_eq!(handle.pending_exercise(), PendingExercise::Absent);
    }

    #[test]
    fn test_stage_selected_exercise() {
        let provider = provider();
        let handle = provider.handle();
        let mut page = ExercisesPage::new(provider.context());
        // Sorted by name: Bench Press, Goblet Squat, Push-up
        page.handle_action(KeyAction::NavigateDown, None).unwrap();
        page.handle_action(KeyAction::InputChar('a'), Some("b1")).unwrap();

        let pending = handle.pending_exercise();
        let (exercise, block_id) = pending.parts().unwrap();
        assert_eq!(exercise.name, "Goblet Squat");
        assert_eq!(block_id, "b1");
    }

    #[test]
    fn test_form_adds_custom_exercise() {
        let provider = provider();
        let handle = provider.handle();
        let mut page = ExercisesPage::new(provider.context());

        page.handle_action(KeyAction::InputChar('n'), None).unwrap();
        assert!(handle.exercise_form().open);
        assert_eq!(page.input_mode(), InputMode::Text);
        type_text(&mut page, "Farmer Carry");
        page.handle_action(KeyAction::NavigateDown, None).unwrap();
        page.handle_action(KeyAction::Select, None).unwrap();

        let exercises = handle.exercises();
        let added = exercises.iter().find(|e| e.name == "Farmer Carry").unwrap();
        assert!(added.custom);
        assert_eq!(added.muscle_group, MuscleGroup::Back);
        assert!(!handle.exercise_form().open);
        assert_eq!(page.mode(), ExercisesMode::Browse);
    }

    #[test]
    fn test_form_error_keeps_form_open() {
        let provider = provider();
        let handle = provider.handle();
        let mut page = ExercisesPage::new(provider.context());
        page.handle_action(KeyAction::InputChar('n'), None).unwrap();
        type_text(&mut page, "push-UP");
        page.handle_action(KeyAction::Select, None).unwrap();

        let form = handle.exercise_form();
        assert!(form.open);
        assert_eq!(
            form.error.as_deref(),
            Some("an exercise named 'push-UP' already exists")
        );
        assert_eq!(handle.exercises().len(), 3);
        assert_eq!(page.mode(), ExercisesMode::Form);
    }

    #[test]
    fn test_form_escape_closes() {
        let provider = provider();
        let handle = provider.handle();
        let mut page = ExercisesPage::new(provider.context());
        page.handle_action(KeyAction::InputChar('n'), None).unwrap();
        page.handle_action(KeyAction::Back, None).unwrap();
        assert!(!handle.exercise_form().open);
        assert_eq!(page.mode(), ExercisesMode::Browse);
    }
}
