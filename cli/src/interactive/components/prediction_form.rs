//! Prediction form component
//!
//! Owns the [`FormState`] of the session. Keys edit the focused field,
//! Enter starts a submission on a tokio task and the outcome comes back as
//! an [`AppMessage`] on the UI channel.

use crate::interactive::components::field_row::{FieldRow, GAUGE_WIDTH};
use crate::interactive::components::result_panel::ResultPanel;
use crate::interactive::components::status_line::{DynamicStatusLine, StatusLineContext};
use crate::interactive::message_handler::AppMessage;
use crate::interactive::slider::{range_caption, render_slider};
use crate::interactive::task_executor::spawn_prediction;
use crate::interactive::theme::Theme;
use diarisk_core::record::{FieldValue, InputRecord};
use diarisk_core::render::{ScrollWindow, FEATURE_PANEL_HEIGHT};
use diarisk_core::{Field, FormState, ResultView, ServiceConfig, Sex};
use iocraft::prelude::*;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

/// Terminal width from which the results panel sits beside the form
const WIDE_LAYOUT_MIN_WIDTH: u16 = 120;
/// Slider steps per Shift+Left/Right
const LARGE_STEP: i32 = 10;

/// Context for the prediction form
#[derive(Debug, Clone)]
pub struct FormContext {
    pub service: ServiceConfig,
    pub ui_sender: broadcast::Sender<AppMessage>,
    pub theme: Theme,
}

impl Default for FormContext {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            ui_sender: tokio::sync::broadcast::channel(1).0,
            theme: Theme::default(),
        }
    }
}

#[derive(Clone, Default, Props)]
pub struct PredictionFormProps {
    pub context: FormContext,
}

/// Focus target: a field row or the submit button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(Field),
    Submit,
}

impl Focus {
    pub fn next(self) -> Focus {
        match self {
            Focus::Field(field) if field.index() + 1 == Field::ALL.len() => Focus::Submit,
            Focus::Field(field) => Focus::Field(field.next()),
            Focus::Submit => Focus::Field(Field::ALL[0]),
        }
    }

    pub fn prev(self) -> Focus {
        match self {
            Focus::Field(field) if field.index() == 0 => Focus::Submit,
            Focus::Field(field) => Focus::Field(field.prev()),
            Focus::Submit => Focus::Field(Field::ALL[Field::ALL.len() - 1]),
        }
    }
}

/// What a key asks of the component beyond editing the record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
    Scroll(isize),
}

/// Focus and the text being typed into the focused box
#[derive(Debug, Clone, PartialEq)]
pub struct Editor {
    pub focus: Focus,
    /// Raw text of the focused numeric box while it is being typed into
    pub draft: Option<String>,
    /// The draft does not parse; the record keeps its previous value
    pub invalid: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self {
            focus: Focus::Field(Field::ALL[0]),
            draft: None,
            invalid: false,
        }
    }
}

impl Editor {
    /// Apply one key press to the editor and the form
    pub fn handle_key(
        &mut self,
        form: &mut FormState,
        code: KeyCode,
        modifiers: KeyModifiers,
    ) -> FormAction {
        if modifiers.contains(KeyModifiers::CONTROL) {
            return FormAction::None;
        }

        match code {
            KeyCode::Tab | KeyCode::Down => self.move_focus(self.focus.next()),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(self.focus.prev()),
            KeyCode::Left | KeyCode::Right => {
                if let Focus::Field(field) = self.focus {
                    let steps = if modifiers.contains(KeyModifiers::SHIFT) {
                        LARGE_STEP
                    } else {
                        1
                    };
                    let steps = if code == KeyCode::Left { -steps } else { steps };
                    form.nudge(field, steps);
                    self.clear_draft();
                }
            }
            KeyCode::Enter => {
                self.clear_draft();
                return FormAction::Submit;
            }
            KeyCode::PageUp => return FormAction::Scroll(-(FEATURE_PANEL_HEIGHT as isize)),
            KeyCode::PageDown => return FormAction::Scroll(FEATURE_PANEL_HEIGHT as isize),
            KeyCode::Backspace => self.edit(form, |text| {
                text.pop();
            }),
            KeyCode::Delete => self.edit(form, String::clear),
            KeyCode::Char(c) => match self.focus {
                Focus::Field(Field::Sex) => match c {
                    '0' | 'm' | 'M' => form.set_sex(Sex::Male),
                    '1' | 'f' | 'F' => form.set_sex(Sex::Female),
                    ' ' => form.nudge(Field::Sex, 1),
                    _ => {}
                },
                Focus::Field(_) if c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E') => {
                    self.edit(form, |text| text.push(c))
                }
                _ => {}
            },
            _ => {}
        }
        FormAction::None
    }

    fn move_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.clear_draft();
    }

    fn clear_draft(&mut self) {
        self.draft = None;
        self.invalid = false;
    }

    /// Change the draft of the focused numeric box and commit it
    fn edit(&mut self, form: &mut FormState, change: impl FnOnce(&mut String)) {
        let Focus::Field(field) = self.focus else {
            return;
        };
        if field == Field::Sex {
            return;
        }
        let mut text = self
            .draft
            .take()
            .unwrap_or_else(|| form.record().display_value(field));
        change(&mut text);
        self.invalid = match form.update_text(field, &text) {
            Ok(()) => false,
            Err(e) => {
                debug!("Keeping previous value: {}", e);
                true
            }
        };
        self.draft = Some(text);
    }

    /// Text of the numeric box for `field`
    pub fn box_text(&self, record: &InputRecord, field: Field) -> String {
        match (&self.draft, self.focus) {
            (Some(draft), Focus::Field(focused)) if focused == field => draft.clone(),
            _ => record.display_value(field),
        }
    }
}

/// Apply a submission outcome to the form
///
/// Only the outcome of the submission in flight counts; anything else is
/// dropped. Returns the new result view when a prediction arrived.
pub fn apply_outcome(form: &mut FormState, message: AppMessage) -> Option<ResultView> {
    if form.in_flight() != Some(message.submission_id()) {
        return None;
    }
    match message {
        AppMessage::PredictionCompleted { result, .. } => {
            let view = ResultView::new(&result);
            form.complete_submit(result);
            Some(view)
        }
        AppMessage::PredictionFailed { reason, .. } => {
            form.fail_submit(&reason);
            None
        }
        AppMessage::PredictionStarted { .. } => None,
    }
}

/// Slider gauge or radio buttons of one row, and the caption after it
fn row_control(record: &InputRecord, field: Field) -> (String, String) {
    match (record.get(field), field.range()) {
        (FieldValue::Number(value), Some(range)) => {
            let unit = field.unit();
            let caption = if unit.is_empty() {
                range_caption(range)
            } else {
                format!("{} {}", range_caption(range), unit)
            };
            (render_slider(range, value, GAUGE_WIDTH), caption)
        }
        (FieldValue::Sex(sex), _) => {
            let radio = |option: Sex| {
                let mark = if option == sex { "(•)" } else { "( )" };
                format!("{} {}", mark, option.label())
            };
            (
                format!("{}  {}", radio(Sex::Male), radio(Sex::Female)),
                "0 / 1".to_string(),
            )
        }
        _ => (String::new(), String::new()),
    }
}

/// Prediction Form Component
#[component]
pub fn PredictionForm(
    mut hooks: Hooks,
    props: &PredictionFormProps,
) -> impl Into<AnyElement<'static>> {
    let context = &props.context;
    let theme = context.theme;
    let (terminal_width, _height) = hooks.use_terminal_size();

    let form = hooks.use_state(FormState::new);
    let editor = hooks.use_state(Editor::default);
    let result_view = hooks.use_state(|| None::<ResultView>);
    let scroll = hooks.use_state(|| ScrollWindow::new(FEATURE_PANEL_HEIGHT));

    // Outcomes of our own submission
    hooks.use_future({
        let mut form = form;
        let mut result_view = result_view;
        let mut scroll = scroll;
        let ui_sender = context.ui_sender.clone();
        async move {
            let mut rx = ui_sender.subscribe();
            loop {
                let message = match rx.recv().await {
                    Ok(message) => message,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "UI event receiver lagged");
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };
                if !message.is_outcome() {
                    continue;
                }
                let view = apply_outcome(&mut form.write(), message);
                if let Some(view) = view {
                    result_view.set(Some(view));
                    scroll.set(ScrollWindow::new(FEATURE_PANEL_HEIGHT));
                }
            }
        }
    });

    hooks.use_terminal_events({
        let mut form = form;
        let mut editor = editor;
        let mut scroll = scroll;
        let result_view = result_view;
        let service = context.service.clone();
        let ui_sender = context.ui_sender.clone();
        move |event| match event {
            TerminalEvent::Key(KeyEvent {
                code,
                modifiers,
                kind,
                ..
            }) if kind != KeyEventKind::Release => {
                let action = {
                    let mut form_ref = form.write();
                    editor.write().handle_key(&mut form_ref, code, modifiers)
                };
                match action {
                    FormAction::Submit => {
                        let submission = form.write().begin_submit();
                        match submission {
                            Some(submission) => {
                                spawn_prediction(service.clone(), submission, ui_sender.clone())
                            }
                            None => debug!("Submission already in flight, ignoring submit"),
                        }
                    }
                    FormAction::Scroll(delta) => {
                        let len = result_view
                            .read()
                            .as_ref()
                            .map(|view| view.feature_lines.len())
                            .unwrap_or(0);
                        scroll.set(scroll.get().scrolled(delta, len));
                    }
                    FormAction::None => {}
                }
            }
            _ => {}
        }
    });

    let form_ref = form.read();
    let editor_ref = editor.read();
    let record = form_ref.record();
    let loading = form_ref.is_loading();

    let rows: Vec<_> = Field::ALL
        .iter()
        .map(|&field| {
            let (control, caption) = row_control(record, field);
            let focused = editor_ref.focus == Focus::Field(field);
            element! {
                FieldRow(
                    key: field.key(),
                    label: field.label(),
                    value: editor_ref.box_text(record, field),
                    control: control,
                    caption: caption,
                    focused: focused,
                    invalid: focused && editor_ref.invalid,
                    theme: theme,
                )
            }
        })
        .collect();

    let submit_focused = editor_ref.focus == Focus::Submit;
    let button_label = if loading {
        "Calculating…"
    } else {
        "Calculate Diabetes Risk"
    };
    let button_color = if loading {
        theme.muted
    } else if submit_focused {
        theme.secondary
    } else {
        theme.primary
    };

    let wide = terminal_width >= WIDE_LAYOUT_MIN_WIDTH;

    element! {
        View(
            flex_direction: if wide { FlexDirection::Row } else { FlexDirection::Column },
            width: 100pct,
        ) {
            View(
                flex_direction: FlexDirection::Column,
                border_style: theme.border_style(),
                border_color: Theme::color(theme.primary),
                padding_left: 1,
                padding_right: 1,
            ) {
                Text(content: "Diabetes Risk Prediction", color: Theme::color(theme.primary), weight: Weight::Bold)
                View(margin_bottom: 1) {
                    Text(
                        content: "Enter your lifestyle and nutritional details to calculate your diabetes risk",
                        color: Theme::color(theme.muted),
                    )
                }
                #(rows)
                View(flex_direction: FlexDirection::Row, margin_top: 1) {
                    View(
                        border_style: theme.border_style(),
                        border_color: Theme::color(button_color),
                        padding_left: 2,
                        padding_right: 2,
                    ) {
                        Text(content: button_label, color: Theme::color(button_color), weight: Weight::Bold)
                    }
                    DynamicStatusLine(
                        key: "dynamic-status-line",
                        context: StatusLineContext {
                            ui_sender: context.ui_sender.clone(),
                            theme: theme,
                        },
                    )
                }
            }
            View(
                flex_direction: FlexDirection::Column,
                flex_grow: 1.0,
                margin_left: if wide { 1 } else { 0 },
                margin_top: if wide { 0 } else { 1 },
            ) {
                ResultPanel(
                    view: result_view.read().clone(),
                    scroll: scroll.get(),
                    error: form_ref.error().map(str::to_string),
                    theme: theme,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diarisk_core::{PredictionResult, RiskFlag, SUBMISSION_FAILED_MESSAGE};
    use uuid::Uuid;

    fn press(editor: &mut Editor, form: &mut FormState, code: KeyCode) -> FormAction {
        editor.handle_key(form, code, KeyModifiers::NONE)
    }

    #[test]
    fn test_focus_cycles_through_submit() {
        let last = Field::ALL[Field::ALL.len() - 1];
        assert_eq!(Focus::Field(last).next(), Focus::Submit);
        assert_eq!(Focus::Submit.next(), Focus::Field(Field::Age));
        assert_eq!(Focus::Field(Field::Age).prev(), Focus::Submit);
        assert_eq!(Focus::Submit.prev(), Focus::Field(last));
        assert_eq!(Focus::Field(Field::Age).next(), Focus::Field(Field::Sex));
    }

    #[test]
    fn test_typing_commits_every_keystroke() {
        let mut editor = Editor::default();
        let mut form = FormState::new();

        press(&mut editor, &mut form, KeyCode::Delete);
        assert_eq!(form.record().number(Field::Age), Some(0.0));
        press(&mut editor, &mut form, KeyCode::Char('6'));
        assert_eq!(form.record().number(Field::Age), Some(6.0));
        press(&mut editor, &mut form, KeyCode::Char('1'));
        assert_eq!(form.record().number(Field::Age), Some(61.0));
        assert_eq!(editor.box_text(form.record(), Field::Age), "61");

        press(&mut editor, &mut form, KeyCode::Backspace);
        assert_eq!(form.record().number(Field::Age), Some(6.0));
    }

    #[test]
    fn test_unparsable_draft_keeps_value() {
        let mut editor = Editor::default();
        let mut form = FormState::new();

        press(&mut editor, &mut form, KeyCode::Delete);
        press(&mut editor, &mut form, KeyCode::Char('4'));
        press(&mut editor, &mut form, KeyCode::Char('-'));
        assert!(editor.invalid);
        assert_eq!(form.record().number(Field::Age), Some(4.0));
        assert_eq!(editor.box_text(form.record(), Field::Age), "4-");

        press(&mut editor, &mut form, KeyCode::Tab);
        assert!(!editor.invalid);
        assert_eq!(editor.box_text(form.record(), Field::Age), "4");
    }

    #[test]
    fn test_letters_are_ignored_in_numeric_box() {
        let mut editor = Editor::default();
        let mut form = FormState::new();
        press(&mut editor, &mut form, KeyCode::Char('x'));
        assert_eq!(form, FormState::new());
        assert!(editor.draft.is_none());
    }

    #[test]
    fn test_arrows_nudge_and_toggle_sex() {
        let mut editor = Editor::default();
        let mut form = FormState::new();
        let age = form.record().number(Field::Age).unwrap();

        press(&mut editor, &mut form, KeyCode::Right);
        assert_eq!(form.record().number(Field::Age), Some(age + 1.0));
        editor.handle_key(&mut form, KeyCode::Left, KeyModifiers::SHIFT);
        assert_eq!(form.record().number(Field::Age), Some(age - 9.0));

        press(&mut editor, &mut form, KeyCode::Down);
        assert_eq!(editor.focus, Focus::Field(Field::Sex));
        press(&mut editor, &mut form, KeyCode::Right);
        assert_eq!(form.record().sex, Sex::Female);
        press(&mut editor, &mut form, KeyCode::Char('m'));
        assert_eq!(form.record().sex, Sex::Male);
    }

    #[test]
    fn test_enter_submits_and_pages_scroll() {
        let mut editor = Editor::default();
        let mut form = FormState::new();
        assert_eq!(press(&mut editor, &mut form, KeyCode::Enter), FormAction::Submit);
        assert_eq!(
            press(&mut editor, &mut form, KeyCode::PageDown),
            FormAction::Scroll(FEATURE_PANEL_HEIGHT as isize)
        );
        assert_eq!(
            press(&mut editor, &mut form, KeyCode::PageUp),
            FormAction::Scroll(-(FEATURE_PANEL_HEIGHT as isize))
        );
    }

    #[test]
    fn test_control_keys_are_left_to_the_shell() {
        let mut editor = Editor::default();
        let mut form = FormState::new();
        let action = editor.handle_key(&mut form, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action, FormAction::None);
        assert_eq!(form, FormState::new());
    }

    fn sample_result(risk: RiskFlag) -> PredictionResult {
        PredictionResult {
            risk,
            probability: 0.87,
            raw_probabilities: vec![0.13, 0.87],
            scaled_features: vec![0.5],
            feature_names: vec!["Age".to_string()],
        }
    }

    #[test]
    fn test_matching_completion_sets_result() {
        let mut form = FormState::new();
        let submission = form.begin_submit().unwrap();
        form.fail_submit("refused");
        let submission_id = form.begin_submit().unwrap().id;
        assert_ne!(submission.id, submission_id);

        let view = apply_outcome(
            &mut form,
            AppMessage::PredictionCompleted {
                submission_id,
                result: sample_result(RiskFlag::High),
            },
        );
        assert_eq!(view.unwrap().feature_lines, vec!["Age: 0.5000".to_string()]);
        assert_eq!(form.result().unwrap().risk, RiskFlag::High);
        assert!(form.error().is_none());
        assert!(!form.is_loading());
    }

    #[test]
    fn test_matching_failure_keeps_old_result() {
        let mut form = FormState::new();
        form.begin_submit();
        form.complete_submit(sample_result(RiskFlag::Low));
        let submission_id = form.begin_submit().unwrap().id;

        let view = apply_outcome(
            &mut form,
            AppMessage::PredictionFailed {
                submission_id,
                reason: "HTTP 500".to_string(),
            },
        );
        assert!(view.is_none());
        assert_eq!(form.error(), Some(SUBMISSION_FAILED_MESSAGE));
        assert_eq!(form.result().unwrap().risk, RiskFlag::Low);
        assert!(!form.is_loading());
    }

    #[test]
    fn test_stale_outcome_is_ignored() {
        let mut form = FormState::new();
        let submission_id = form.begin_submit().unwrap().id;
        let before = form.clone();

        let view = apply_outcome(
            &mut form,
            AppMessage::PredictionCompleted {
                submission_id: Uuid::new_v4(),
                result: sample_result(RiskFlag::High),
            },
        );
        assert!(view.is_none());
        assert_eq!(form, before);
        assert_eq!(form.in_flight(), Some(submission_id));
        assert!(form.is_loading());
    }

    #[test]
    fn test_started_message_is_not_an_outcome() {
        let mut form = FormState::new();
        let submission_id = form.begin_submit().unwrap().id;
        let before = form.clone();

        let view = apply_outcome(
            &mut form,
            AppMessage::PredictionStarted {
                submission_id,
                endpoint: "http://127.0.0.1:8000/predict".to_string(),
            },
        );
        assert!(view.is_none());
        assert_eq!(form, before);
    }

    #[test]
    fn test_row_control() {
        let record = InputRecord::default();
        let (gauge, caption) = row_control(&record, Field::Age);
        assert_eq!(gauge.chars().count(), GAUGE_WIDTH);
        assert_eq!(caption, "18–100 years");

        let (radio, _) = row_control(&record, Field::Sex);
        assert_eq!(radio, "(•) Male  ( ) Female");
    }
}
