//! Headless task subcommands.

use chrono::{Local, NaiveDate};

use crate::error::{Error, Result};
use crate::form::{self, DraftInput};
use crate::output::{emit_success, OutputOptions};
use crate::search;
use crate::task::{Priority, Task, TaskStore};

pub fn run_add(
    store: &mut TaskStore,
    options: OutputOptions,
    title: String,
    description: String,
    priority: Option<String>,
    due: Option<String>,
) -> Result<()> {
    let input = DraftInput {
        title,
        description,
        priority: priority
            .as_deref()
            .map(|value| value.parse::<Priority>())
            .transpose()?,
        due_date: due.as_deref().map(parse_due).transpose()?,
    };
    let draft = form::validate(input, Local::now().date_naive())?;
    let task = store.create(draft);

    let human = vec![format!("Created {}", describe(&task))];
    emit_success(options, "add", &task, &human)
}

pub fn run_list(
    store: &TaskStore,
    options: OutputOptions,
    query: Option<String>,
    completed: bool,
    pending: bool,
) -> Result<()> {
    let query = query.unwrap_or_default();
    let tasks: Vec<&Task> = search::filter_indices(store.list(), &query)
        .into_iter()
        .map(|idx| &store.list()[idx])
        .filter(|task| {
            if completed {
                task.completed
            } else if pending {
                !task.completed
            } else {
                true
            }
        })
        .collect();

    let mut human = Vec::new();
    if tasks.is_empty() {
        human.push("No tasks found".to_string());
    } else {
        let today = Local::now().date_naive();
        for task in &tasks {
            human.push(list_line(task, today));
        }
        human.push(format!("{} tasks", tasks.len()));
    }

    emit_success(options, "list", &tasks, &human)
}

#[allow(clippy::too_many_arguments)]
pub fn run_edit(
    store: &mut TaskStore,
    options: OutputOptions,
    id: &str,
    title: Option<String>,
    description: Option<String>,
    priority: Option<String>,
    due: Option<String>,
) -> Result<()> {
    let id = store.resolve_id(id)?;
    let current = store
        .get(id)
        .cloned()
        .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;

    let input = DraftInput {
        title: title.unwrap_or(current.title),
        description: description.unwrap_or(current.description),
        priority: Some(match priority {
            Some(value) => value.parse::<Priority>()?,
            None => current.priority,
        }),
        due_date: Some(match due {
            Some(value) => parse_due(&value)?,
            None => current.due_date,
        }),
    };
    let draft = form::validate(input, Local::now().date_naive())?;
    let task = store.update(id, draft)?;

    let human = vec![format!("Updated {}", describe(&task))];
    emit_success(options, "edit", &task, &human)
}

pub fn run_done(store: &mut TaskStore, options: OutputOptions, id: &str) -> Result<()> {
    let id = store.resolve_id(id)?;
    let task = store.toggle_complete(id)?;

    let state = if task.completed {
        "completed"
    } else {
        "reopened"
    };
    let human = vec![format!("Marked {} {}", describe(&task), state)];
    emit_success(options, "done", &task, &human)
}

pub fn run_delete(store: &mut TaskStore, options: OutputOptions, id: &str) -> Result<()> {
    let id = store.resolve_id(id)?;
    let task = store
        .get(id)
        .cloned()
        .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
    store.delete(id);

    let human = vec![format!("Deleted {}", describe(&task))];
    emit_success(options, "delete", &task, &human)
}

fn parse_due(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| Error::InvalidArgument(format!("due date must be YYYY-MM-DD (got '{value}')")))
}

fn describe(task: &Task) -> String {
    format!("task {} '{}'", short_id(task), task.title)
}

fn short_id(task: &Task) -> String {
    task.id.to_string().chars().take(8).collect()
}

fn list_line(task: &Task, today: NaiveDate) -> String {
    let check = if task.completed { "x" } else { " " };
    let overdue = if task.is_overdue(today) {
        "  (overdue)"
    } else {
        ""
    };
    format!(
        "[{}] {}  {:<6}  {}  {}{}",
        check,
        short_id(task),
        task.priority.to_string(),
        task.due_date,
        task.title,
        overdue
    )
}
