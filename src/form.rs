//! Task form validation and the TUI form editor.
//!
//! Validation runs on submit: title is required and capped at 100
//! characters, description at 500; priority defaults to Low and the due
//! date to today. The TUI editor is a small field list with inline errors;
//! submission is guarded while the artificial latency delay is pending.

use std::fmt;

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;
use uuid::Uuid;

use crate::task::{Priority, Task, TaskDraft};

pub const TITLE_MAX: usize = 100;
pub const DESCRIPTION_MAX: usize = 500;

/// Form field names, used in error messages and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
    Priority,
    DueDate,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Description => "Description",
            Field::Priority => "Priority",
            Field::DueDate => "Due date",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validation failures surfaced inline next to the offending field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(Field),

    #[error("{field} must be {max} characters or less")]
    TooLong { field: Field, max: usize },

    #[error("{0} must be a date in YYYY-MM-DD form")]
    InvalidDate(Field),

    #[error("{0} must be high, medium, or low")]
    InvalidPriority(Field),
}

/// Unvalidated form input. Optional fields fall back to their defaults.
#[derive(Debug, Clone, Default)]
pub struct DraftInput {
    pub title: String,
    pub description: String,
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
}

/// Validate a form payload into a [`TaskDraft`].
pub fn validate(input: DraftInput, today: NaiveDate) -> Result<TaskDraft, ValidationError> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(ValidationError::Required(Field::Title));
    }
    if title.chars().count() > TITLE_MAX {
        return Err(ValidationError::TooLong {
            field: Field::Title,
            max: TITLE_MAX,
        });
    }
    if input.description.chars().count() > DESCRIPTION_MAX {
        return Err(ValidationError::TooLong {
            field: Field::Description,
            max: DESCRIPTION_MAX,
        });
    }

    Ok(TaskDraft {
        title: title.to_string(),
        description: input.description,
        priority: input.priority.unwrap_or_default(),
        due_date: input.due_date.unwrap_or(today),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(Uuid),
}

#[derive(Debug, Clone)]
pub struct FormField {
    pub id: Field,
    pub value: String,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Cancel,
    Submit,
}

/// Field-based form editor driven by key events.
#[derive(Debug, Clone)]
pub struct FormState {
    mode: FormMode,
    fields: Vec<FormField>,
    active: usize,
    error: Option<String>,
    submitting: bool,
}

impl FormState {
    /// Fresh create-mode form with default field values.
    pub fn create(today: NaiveDate) -> Self {
        Self {
            mode: FormMode::Create,
            fields: default_fields(today),
            active: 0,
            error: None,
            submitting: false,
        }
    }

    /// Edit-mode form prefilled from an existing task.
    pub fn edit(task: &Task) -> Self {
        Self {
            mode: FormMode::Edit(task.id),
            fields: vec![
                FormField {
                    id: Field::Title,
                    value: task.title.clone(),
                    required: true,
                },
                FormField {
                    id: Field::Description,
                    value: task.description.clone(),
                    required: false,
                },
                FormField {
                    id: Field::Priority,
                    value: task.priority.to_string(),
                    required: false,
                },
                FormField {
                    id: Field::DueDate,
                    value: task.due_date.to_string(),
                    required: false,
                },
            ],
            active: 0,
            error: None,
            submitting: false,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while the submission delay is pending; input is ignored so a
    /// second submit cannot be queued.
    pub fn submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
        self.submitting = false;
    }

    /// Reset create-mode fields to their defaults after a submit.
    pub fn reset(&mut self, today: NaiveDate) {
        self.fields = default_fields(today);
        self.active = 0;
        self.error = None;
        self.submitting = false;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        if self.submitting {
            return FormAction::None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('u') {
            if let Some(field) = self.fields.get_mut(self.active) {
                field.value.clear();
            }
            self.error = None;
            return FormAction::None;
        }

        match key.code {
            KeyCode::Esc => return FormAction::Cancel,
            KeyCode::Tab | KeyCode::Down => self.move_active(1),
            KeyCode::BackTab | KeyCode::Up => self.move_active(-1),
            KeyCode::Enter => {
                if self.active + 1 >= self.fields.len() {
                    return self.attempt_submit();
                }
                self.move_active(1);
            }
            KeyCode::Backspace => {
                if let Some(field) = self.fields.get_mut(self.active) {
                    field.value.pop();
                }
            }
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return FormAction::None;
                }
                if !ch.is_control() {
                    if let Some(field) = self.fields.get_mut(self.active) {
                        field.value.push(ch);
                    }
                }
            }
            _ => {}
        }

        self.error = None;
        FormAction::None
    }

    /// Validate the current fields into a draft.
    pub fn build_draft(&self, today: NaiveDate) -> Result<TaskDraft, ValidationError> {
        let priority = match non_empty(self.field_value(Field::Priority)) {
            Some(value) => Some(
                value
                    .parse::<Priority>()
                    .map_err(|_| ValidationError::InvalidPriority(Field::Priority))?,
            ),
            None => None,
        };
        let due_date = match non_empty(self.field_value(Field::DueDate)) {
            Some(value) => Some(
                NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                    .map_err(|_| ValidationError::InvalidDate(Field::DueDate))?,
            ),
            None => None,
        };

        validate(
            DraftInput {
                title: self.field_value(Field::Title).to_string(),
                description: self.field_value(Field::Description).to_string(),
                priority,
                due_date,
            },
            today,
        )
    }

    fn attempt_submit(&mut self) -> FormAction {
        // Validation against today's date happens again in the app when the
        // draft is built; here it only gates the submit.
        let today = chrono::Local::now().date_naive();
        match self.build_draft(today) {
            Ok(_) => FormAction::Submit,
            Err(err) => {
                self.error = Some(err.to_string());
                FormAction::None
            }
        }
    }

    fn move_active(&mut self, delta: isize) {
        let len = self.fields.len() as isize;
        if len == 0 {
            self.active = 0;
            return;
        }
        let next = (self.active as isize + delta).rem_euclid(len);
        self.active = next as usize;
    }

    fn field_value(&self, id: Field) -> &str {
        self.fields
            .iter()
            .find(|field| field.id == id)
            .map(|field| field.value.as_str())
            .unwrap_or("")
    }
}

fn default_fields(today: NaiveDate) -> Vec<FormField> {
    vec![
        FormField {
            id: Field::Title,
            value: String::new(),
            required: true,
        },
        FormField {
            id: Field::Description,
            value: String::new(),
            required: false,
        },
        FormField {
            id: Field::Priority,
            value: Priority::Low.to_string(),
            required: false,
        },
        FormField {
            id: Field::DueDate,
            value: today.to_string(),
            required: false,
        },
    ]
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).expect("date")
    }

    #[test]
    fn empty_title_is_required() {
        let input = DraftInput {
            title: "   ".to_string(),
            ..DraftInput::default()
        };
        assert_eq!(
            validate(input, today()),
            Err(ValidationError::Required(Field::Title))
        );
    }

    #[test]
    fn title_boundary_at_100_characters() {
        let ok = DraftInput {
            title: "x".repeat(100),
            ..DraftInput::default()
        };
        assert!(validate(ok, today()).is_ok());

        let too_long = DraftInput {
            title: "x".repeat(101),
            ..DraftInput::default()
        };
        assert_eq!(
            validate(too_long, today()),
            Err(ValidationError::TooLong {
                field: Field::Title,
                max: TITLE_MAX
            })
        );
    }

    #[test]
    fn description_boundary_at_500_characters() {
        let too_long = DraftInput {
            title: "ok".to_string(),
            description: "d".repeat(501),
            ..DraftInput::default()
        };
        assert_eq!(
            validate(too_long, today()),
            Err(ValidationError::TooLong {
                field: Field::Description,
                max: DESCRIPTION_MAX
            })
        );
    }

    #[test]
    fn defaults_fill_priority_and_due_date() {
        let input = DraftInput {
            title: "Task".to_string(),
            ..DraftInput::default()
        };
        let draft = validate(input, today()).expect("valid");
        assert_eq!(draft.priority, Priority::Low);
        assert_eq!(draft.due_date, today());
    }

    #[test]
    fn form_submit_requires_title() {
        let mut form = FormState::create(today());
        for _ in 0..form.fields().len() {
            let action = form.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
            assert_eq!(action, FormAction::None);
        }
        assert_eq!(form.error(), Some("Title is required"));
    }

    #[test]
    fn form_ignores_input_while_submitting() {
        let mut form = FormState::create(today());
        form.set_submitting(true);
        let action = form.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE));
        assert_eq!(action, FormAction::None);
        assert!(form.fields()[0].value.is_empty());
    }

    #[test]
    fn form_rejects_bad_date() {
        let mut form = FormState::create(today());
        form.fields[0].value = "Task".to_string();
        form.fields[3].value = "tomorrow".to_string();
        assert_eq!(
            form.build_draft(today()),
            Err(ValidationError::InvalidDate(Field::DueDate))
        );
    }
}
