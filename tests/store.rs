use chrono::NaiveDate;
use tempfile::TempDir;

use taskdeck::storage::{JsonFileRepository, TaskRepository};
use taskdeck::task::{Priority, TaskDraft, TaskStore};

fn draft(title: &str) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        description: format!("{title} description"),
        priority: Priority::Medium,
        due_date: NaiveDate::from_ymd_opt(2026, 6, 1).expect("date"),
    }
}

fn file_store(dir: &TempDir) -> TaskStore {
    let repo = JsonFileRepository::new(dir.path().join("tasks.json"));
    let mut store = TaskStore::new(Box::new(repo));
    store.hydrate();
    store
}

#[test]
fn create_appends_with_draft_fields() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = file_store(&dir);

    store.create(draft("First"));
    let before = store.list().len();
    let task = store.create(draft("Second"));

    assert_eq!(store.list().len(), before + 1);
    assert_eq!(store.list().last().expect("task").id, task.id);
    assert_eq!(task.title, "Second");
    assert_eq!(task.description, "Second description");
    assert_eq!(task.priority, Priority::Medium);
    assert!(!task.completed);
}

#[test]
fn update_replaces_fields_and_preserves_identity() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = file_store(&dir);
    let original = store.create(draft("Before"));

    let updated = store
        .update(
            original.id,
            TaskDraft {
                title: "After".to_string(),
                description: String::new(),
                priority: Priority::High,
                due_date: NaiveDate::from_ymd_opt(2026, 7, 1).expect("date"),
            },
        )
        .expect("update");

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.created_at, original.created_at);
    assert_eq!(updated.title, "After");
    assert_eq!(updated.priority, Priority::High);
    assert!(!updated.completed);
}

#[test]
fn update_of_missing_id_leaves_collection_unchanged() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = file_store(&dir);
    store.create(draft("Only"));
    let snapshot: Vec<_> = store.list().to_vec();

    let missing = uuid::Uuid::new_v4();
    assert!(store.update(missing, draft("Ghost")).is_err());
    assert_eq!(store.list(), snapshot.as_slice());
}

#[test]
fn delete_is_idempotent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = file_store(&dir);
    let task = store.create(draft("Doomed"));

    store.delete(task.id);
    assert!(store.get(task.id).is_none());

    // Deleting again (or any unknown id) is a no-op, not an error.
    store.delete(task.id);
    store.delete(uuid::Uuid::new_v4());
    assert!(store.list().is_empty());
}

#[test]
fn double_toggle_restores_completed_flag() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = file_store(&dir);
    let task = store.create(draft("Flip"));

    let once = store.toggle_complete(task.id).expect("toggle");
    assert!(once.completed);
    let twice = store.toggle_complete(task.id).expect("toggle");
    assert!(!twice.completed);
}

#[test]
fn persist_then_hydrate_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");

    let created = {
        let mut store = file_store(&dir);
        let first = store.create(draft("One"));
        let second = store.create(draft("Two"));
        store.toggle_complete(second.id).expect("toggle");
        vec![first.id, second.id]
    };

    let mut reloaded = file_store(&dir);
    let tasks = reloaded.hydrate().to_vec();

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id, created[0]);
    assert_eq!(tasks[1].id, created[1]);
    assert_eq!(tasks[0].title, "One");
    assert_eq!(tasks[0].description, "One description");
    assert_eq!(tasks[0].priority, Priority::Medium);
    assert_eq!(
        tasks[0].due_date,
        NaiveDate::from_ymd_opt(2026, 6, 1).expect("date")
    );
    assert!(!tasks[0].completed);
    assert!(tasks[1].completed);
}

#[test]
fn malformed_snapshot_hydrates_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tasks.json");
    std::fs::write(&path, "[{\"id\": 42}]").expect("write");

    let repo = JsonFileRepository::new(path.clone());
    let mut store = TaskStore::new(Box::new(repo));
    assert!(store.hydrate().is_empty());

    // The store is still usable and the next write replaces the bad file.
    store.create(draft("Fresh"));
    let repo = JsonFileRepository::new(path);
    assert_eq!(repo.load().expect("load").len(), 1);
}
