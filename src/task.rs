//! Task model and store.
//!
//! The store is the single source of truth for task state. Every mutation
//! writes the full collection back to the repository as one snapshot; writes
//! are best-effort and never roll back in-memory state.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::storage::TaskRepository;

/// Task priority. Serialized capitalized to match the snapshot format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    #[default]
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(Error::InvalidArgument(format!(
                "priority must be high, medium, or low (got '{other}')"
            ))),
        }
    }
}

/// A persisted task record.
///
/// `id` and `created_at` are immutable after creation; everything else is
/// replaceable through [`TaskStore::update`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub completed: bool,
    pub due_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// A task is overdue once its due date has passed without completion.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date < today && !self.completed
    }
}

/// Validated payload for creating or updating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: NaiveDate,
}

/// In-memory ordered task collection synchronized to a repository.
pub struct TaskStore {
    tasks: Vec<Task>,
    repo: Box<dyn TaskRepository>,
}

impl TaskStore {
    pub fn new(repo: Box<dyn TaskRepository>) -> Self {
        Self {
            tasks: Vec::new(),
            repo,
        }
    }

    /// Load persisted tasks into memory.
    ///
    /// Absent, empty, or unreadable storage yields an empty collection; the
    /// condition is logged and never surfaced as an error.
    pub fn hydrate(&mut self) -> &[Task] {
        self.tasks = match self.repo.load() {
            Ok(tasks) => tasks,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load tasks; starting empty");
                Vec::new()
            }
        };
        &self.tasks
    }

    /// Current tasks in insertion order.
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Create a task from a draft and append it to the collection.
    pub fn create(&mut self, draft: TaskDraft) -> Task {
        let task = Task {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            completed: false,
            due_date: draft.due_date,
            created_at: Utc::now(),
        };
        self.tasks.push(task.clone());
        self.persist();
        task
    }

    /// Replace the mutable fields of the task matching `id`.
    ///
    /// `id` and `created_at` are preserved; `completed` is untouched.
    pub fn update(&mut self, id: Uuid, draft: TaskDraft) -> Result<Task> {
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
        task.title = draft.title;
        task.description = draft.description;
        task.priority = draft.priority;
        task.due_date = draft.due_date;
        let updated = task.clone();
        self.persist();
        Ok(updated)
    }

    /// Flip the completion flag of the task matching `id`.
    pub fn toggle_complete(&mut self, id: Uuid) -> Result<Task> {
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
        task.completed = !task.completed;
        let updated = task.clone();
        self.persist();
        Ok(updated)
    }

    /// Remove the task matching `id`. A missing id is a no-op, not an error.
    pub fn delete(&mut self, id: Uuid) {
        self.tasks.retain(|task| task.id != id);
        self.persist();
    }

    /// Drop every task. Used by the session reset.
    pub fn clear(&mut self) {
        self.tasks.clear();
        self.persist();
    }

    /// Resolve a full UUID or an unambiguous id prefix to a task id.
    pub fn resolve_id(&self, input: &str) -> Result<Uuid> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidArgument("task id cannot be empty".to_string()));
        }

        if let Ok(id) = Uuid::parse_str(trimmed) {
            return match self.get(id) {
                Some(task) => Ok(task.id),
                None => Err(Error::TaskNotFound(trimmed.to_string())),
            };
        }

        let needle = trimmed.to_ascii_lowercase();
        let mut matches: Vec<Uuid> = self
            .tasks
            .iter()
            .filter(|task| task.id.to_string().starts_with(&needle))
            .map(|task| task.id)
            .collect();

        match matches.len() {
            0 => Err(Error::TaskNotFound(trimmed.to_string())),
            1 => Ok(matches.remove(0)),
            _ => Err(Error::InvalidArgument(format!(
                "ambiguous task id '{}': {}",
                trimmed,
                matches
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }

    /// Best-effort snapshot write. A failure is logged, not propagated:
    /// in-memory state stays authoritative for the session.
    fn persist(&self) {
        if let Err(err) = self.repo.save(&self.tasks) {
            tracing::warn!(error = %err, "failed to persist tasks");
        }
    }
}

impl fmt::Debug for TaskStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskStore")
            .field("tasks", &self.tasks.len())
            .finish()
    }
}
