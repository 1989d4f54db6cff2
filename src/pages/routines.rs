use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};
use tracing::{info, warn};

use crate::dashboard::{
    DashboardContext, DashboardData, DashboardHandle, Field, PendingExercise, StateUpdate,
    Subscription,
};
use crate::error::{ContextError, RoutineError};
use crate::key_handler::{ActionResult, InputMode, KeyAction};
use crate::routines::{templates_in_folder, ExerciseInputsState, InputField, RoutineBlock, RoutineTemplate};
use crate::state::{ListNav, RoutinePane, RoutinesState};
use crate::ui_utils::{failure, list_state, pane_block, success};

#[derive(Debug)]
pub struct RoutinesPage {
    ctx: DashboardContext,
    state: RoutinesState,
    subscription: Subscription,
}

/// Templates of the selected folder.
fn folder_templates<'a>(d: &'a DashboardData, state: &RoutinesState) -> Vec<&'a RoutineTemplate> {
    d.folders
        .get(state.folder.selected)
        .map(|f| templates_in_folder(f, &d.templates))
        .unwrap_or_default()
}

fn selected_blocks<'a>(d: &'a DashboardData, state: &RoutinesState) -> &'a [RoutineBlock] {
    folder_templates(d, state)
        .get(state.template.selected)
        .map(|t| t.blocks.as_slice())
        .unwrap_or(&[])
}

impl RoutinesPage {
    pub const FIELDS: [Field; 4] = [
        Field::Folders,
        Field::Templates,
        Field::PendingExercise,
        Field::ExerciseInputs,
    ];

    pub fn new(ctx: DashboardContext) -> Self {
        Self {
            ctx,
            state: RoutinesState::new(),
            subscription: Subscription::new(&Self::FIELDS),
        }
    }

    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }

    pub fn state(&self) -> &RoutinesState {
        &self.state
    }

    /// Text entry while an exercise is staged, so digits go to the inputs.
    pub fn input_mode(&self) -> Result<InputMode, ContextError> {
        let staged = self.ctx.handle()?.read(|d| d.pending_exercise.is_present());
        Ok(if staged {
            InputMode::Text
        } else {
            InputMode::Navigate
        })
    }

    /// Id of the block under the cursor, used as the staging target.
    pub fn selected_block_id(&self) -> Result<Option<String>, ContextError> {
        let dashboard = self.ctx.handle()?;
        Ok(dashboard.read(|d| {
            selected_blocks(d, &self.state)
                .get(self.state.block.selected)
                .map(|b| b.id.clone())
        }))
    }

    pub fn handle_action(&mut self, action: KeyAction) -> Result<ActionResult, ContextError> {
        let dashboard = self.ctx.handle()?;
        if dashboard.read(|d| d.pending_exercise.is_present()) {
            return Ok(self.handle_staged(&dashboard, action));
        }

        let (folders, templates, blocks) = dashboard.read(|d| {
            (
                d.folders.len(),
                folder_templates(d, &self.state).len(),
                selected_blocks(d, &self.state).len(),
            )
        });
        let focused_len = match self.state.pane {
            RoutinePane::Folders => folders,
            RoutinePane::Templates => templates,
            RoutinePane::Blocks => blocks,
        };
        match action {
            KeyAction::NavigateUp => {
                self.state.up();
            }
            KeyAction::NavigateDown => {
                self.state.down(focused_len);
            }
            KeyAction::NavigateLeft => {
                self.state.focus_left();
            }
            KeyAction::NavigateRight | KeyAction::Select => {
                let next_len = match self.state.pane {
                    RoutinePane::Folders => templates,
                    RoutinePane::Templates => blocks,
                    RoutinePane::Blocks => 0,
                };
                self.state.focus_right(next_len);
            }
            _ => {}
        }
        Ok(ActionResult::none())
    }

    fn handle_staged(&mut self, dashboard: &DashboardHandle, action: KeyAction) -> ActionResult {
        match action {
            KeyAction::InputChar(c) if c.is_ascii_digit() => {
                dashboard.set_exercise_inputs(StateUpdate::modify(move |i: &mut ExerciseInputsState| {
                    i.push_digit(c)
                }));
            }
            KeyAction::Backspace => {
                dashboard.set_exercise_inputs(StateUpdate::modify(|i: &mut ExerciseInputsState| {
                    i.pop_char()
                }));
            }
            KeyAction::NavigateRight => {
                dashboard.set_exercise_inputs(StateUpdate::modify(|i: &mut ExerciseInputsState| {
                    i.focused = i.focused.next()
                }));
            }
            KeyAction::NavigateLeft => {
                dashboard.set_exercise_inputs(StateUpdate::modify(|i: &mut ExerciseInputsState| {
                    i.focused = i.focused.prev()
                }));
            }
            KeyAction::Back => {
                dashboard.set_pending_exercise(PendingExercise::Absent);
                dashboard.set_exercise_inputs(ExerciseInputsState::default());
                return ActionResult::status("Staged exercise discarded");
            }
            KeyAction::Select => return self.commit(dashboard),
            _ => {}
        }
        ActionResult::none()
    }

    fn commit(&mut self, dashboard: &DashboardHandle) -> ActionResult {
        let outcome = dashboard.read(|d| {
            let inputs = d.exercise_inputs.parse()?;
            let templates = d.pending_exercise.commit(&d.templates, inputs)?;
            let (exercise, block_id) = d
                .pending_exercise
                .parts()
                .map(|(e, b)| (e.name.clone(), b.to_string()))
                .unwrap_or_default();
            Ok::<_, RoutineError>((templates, exercise, block_id))
        });

        match outcome {
            Ok((templates, exercise, block_id)) => {
                dashboard.set_templates(templates);
                dashboard.set_pending_exercise(PendingExercise::Absent);
                dashboard.set_exercise_inputs(ExerciseInputsState::default());
                info!(exercise = %exercise, block = %block_id, "exercise committed");
                ActionResult::status(success(&format!("Added {} to {}", exercise, block_id)))
            }
            Err(e) => {
                warn!(error = %e, "commit failed");
                ActionResult::status(failure(&e.to_string()))
            }
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) -> Result<(), ContextError> {
        let dashboard = self.ctx.handle()?;

        dashboard.read(|d| {
            self.state.folder.clamp(d.folders.len());
            let templates = folder_templates(d, &self.state);
            self.state.template.clamp(templates.len());
            let blocks = selected_blocks(d, &self.state);
            self.state.block.clamp(blocks.len());

            let staged = d.pending_exercise.parts();
            let [panes_area, commit_area] = Layout::vertical([
                Constraint::Min(0),
                Constraint::Length(if staged.is_some() { 5 } else { 0 }),
            ])
            .areas(area);
            let [folders_area, templates_area, blocks_area] = Layout::horizontal([
                Constraint::Percentage(25),
                Constraint::Percentage(30),
                Constraint::Percentage(45),
            ])
            .areas(panes_area);

            let pane = |p: RoutinePane,
                        items: Vec<ListItem<'static>>,
                        nav: &ListNav,
                        area: Rect,
                        frame: &mut Frame| {
                let mut ls = list_state(nav, items.len());
                frame.render_stateful_widget(
                    List::new(items)
                        .block(pane_block(p.title(), self.state.pane == p))
                        .highlight_style(Style::new().reversed())
                        .highlight_symbol(">> "),
                    area,
                    &mut ls,
                );
            };

            let folder_items = d
                .folders
                .iter()
                .map(|f| ListItem::new(format!("{} ({})", f.name, f.template_ids.len())))
                .collect();
            pane(RoutinePane::Folders, folder_items, &self.state.folder, folders_area, frame);

            let template_items = templates
                .iter()
                .map(|t| ListItem::new(t.name.clone()))
                .collect();
            pane(RoutinePane::Templates, template_items, &self.state.template, templates_area, frame);

            let target = staged.map(|(_, block_id)| block_id);
            let block_items = blocks
                .iter()
                .map(|b| {
                    let mut lines = vec![Line::from(vec![
                        Span::styled(b.name.clone(), Style::new().bold()),
                        Span::styled(format!("  [{}]", b.id), Style::new().gray()),
                        if target == Some(b.id.as_str()) {
                            Span::styled("  ◀ target", Style::new().yellow())
                        } else {
                            Span::raw("")
                        },
                    ])];
                    lines.extend(b.entries.iter().map(|e| {
                        Line::from(format!(
                            "   {} {}x{} rest {}s",
                            e.exercise_name, e.sets, e.reps, e.rest_seconds
                        ))
                    }));
                    if b.entries.is_empty() {
                        lines.push(Line::from("   (empty)").gray());
                    }
                    ListItem::new(lines)
                })
                .collect();
            pane(RoutinePane::Blocks, block_items, &self.state.block, blocks_area, frame);

            if let Some((exercise, block_id)) = staged {
                let inputs = &d.exercise_inputs;
                let field = |f: InputField, value: &str| {
                    let style = if inputs.focused == f {
                        Style::new().black().on_yellow()
                    } else {
                        Style::new()
                    };
                    Span::styled(format!(" {}: {:>3} ", f.label(), value), style)
                };
                let lines = vec![
                    Line::from(vec![
                        Span::styled("Staged ", Style::new().yellow()),
                        Span::styled(exercise.name.clone(), Style::new().bold()),
                        Span::raw(format!(" → {}", block_id)),
                    ]),
                    Line::from(vec![
                        field(InputField::Sets, &inputs.sets),
                        field(InputField::Reps, &inputs.reps),
                        field(InputField::Rest, &inputs.rest_seconds),
                    ]),
                    Line::from("digits: edit  ←/→: field  Enter: commit  Esc: discard").gray(),
                ];
                frame.render_widget(
                    Paragraph::new(lines).block(pane_block("Commit exercise", true)),
                    commit_area,
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
    use crate::dashboard::DashboardProvider;
    use crate::routines::{Equipment, Exercise, MuscleGroup, RoutineFolder};
    use uuid::Uuid;

    fn provider() -> DashboardProvider {
        let template = RoutineTemplate {
            id: Uuid::new_v4(),
            name: "Full body".into(),
            folder_id: None,
            blocks: vec![
                RoutineBlock {
                    id: "fb-warmup".into(),
                    name: "Warm-up".into(),
                    entries: Vec::new(),
                },
                RoutineBlock {
                    id: "fb-main".into(),
                    name: "Main".into(),
                    entries: Vec::new(),
                },
            ],
        };
        DashboardProvider::mount(DashboardData {
            folders: vec![RoutineFolder {
                id: Uuid::new_v4(),
                name: "General".into(),
                template_ids: vec![template.id],
            }],
            templates: vec![template],
            ..Default::default()
        })
    }

    fn swing() -> Exercise {
        Exercise::new("Kettlebell Swing", MuscleGroup::FullBody, Equipment::Kettlebell)
    }

    #[test]
    fn test_drill_down_to_block() {
        let provider = provider();
        let mut page = RoutinesPage::new(provider.context());
        assert_eq!(page.selected_block_id().unwrap().as_deref(), Some("fb-warmup"));

        page.handle_action(KeyAction::NavigateRight).unwrap();
        page.handle_action(KeyAction::NavigateRight).unwrap();
        assert_eq!(page.state().pane, RoutinePane::Blocks);
        page.handle_action(KeyAction::NavigateDown).unwrap();
        assert_eq!(page.selected_block_id().unwrap().as_deref(), Some("fb-main"));
    }

    #[test]
    fn test_input_mode_switches_when_staged() {
        let provider = provider();
        let page = RoutinesPage::new(provider.context());
        assert_eq!(page.input_mode().unwrap(), InputMode::Navigate);
        provider
            .handle()
            .set_pending_exercise(PendingExercise::stage(swing(), "fb-main"));
        assert_eq!(page.input_mode().unwrap(), InputMode::Text);
    }

    #[test]
    fn test_commit_staged_exercise() {
        let provider = provider();
        let handle = provider.handle();
        let mut page = RoutinesPage::new(provider.context());
        handle.set_pending_exercise(PendingExercise::stage(swing(), "fb-main"));

        page.handle_action(KeyAction::NavigateRight).unwrap();
        page.handle_action(KeyAction::Backspace).unwrap();
        page.handle_action(KeyAction::Backspace).unwrap();
        page.handle_action(KeyAction::InputChar('1')).unwrap();
        page.handle_action(KeyAction::InputChar('5')).unwrap();
        assert_eq!(handle.exercise_inputs().reps, "15");

        let result = page.handle_action(KeyAction::Select).unwrap();
        assert_eq!(
            result.status_message.as_deref(),
            Some("✓ Added Kettlebell Swing to fb-main")
        );
        assert_eq!(handle.pending_exercise(), PendingExercise::Absent);
        assert_eq!(handle.exercise_inputs(), ExerciseInputsState::default());
        let main = &handle.templates()[0].blocks[1];
        assert_eq!(main.entries.len(), 1);
        assert_eq!(main.entries[0].reps, 15);
    }

    #[test]
    fn test_commit_with_invalid_inputs_keeps_pending() {
        let provider = provider();
        let handle = provider.handle();
        let mut page = RoutinesPage::new(provider.context());
        handle.set_pending_exercise(PendingExercise::stage(swing(), "fb-main"));
        page.handle_action(KeyAction::Backspace).unwrap();

        let result = page.handle_action(KeyAction::Select).unwrap();
        assert_eq!(result.status_message.as_deref(), Some("✗ invalid sets: ''"));
        assert!(handle.pending_exercise().is_present());
    }

    #[test]
    fn test_back_discards_pending() {
        let provider = provider();
        let handle = provider.handle();
        let mut page = RoutinesPage::new(provider.context());
        handle.set_pending_exercise(PendingExercise::stage(swing(), "fb-main"));

        page.handle_action(KeyAction::Back).unwrap();
        assert_eq!(handle.pending_exercise(), PendingExercise::Absent);
        assert!(handle.templates()[0].blocks[1].entries.is_empty());
    }

    #[test]
    fn test_commit_to_missing_block_reports_error() {
        let provider = provider();
        let handle = provider.handle();
        let mut page = RoutinesPage::new(provider.context());
        handle.set_pending_exercise(PendingExercise::stage(swing(), "gone"));

        let result = page.handle_action(KeyAction::Select).unwrap();
        assert_eq!(result.status_message.as_deref(), Some("✗ block 'gone' not found"));
        assert!(handle.pending_exercise().is_present());
    }
}
