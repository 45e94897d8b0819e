use std::time::{Duration, Instant};

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use taskdeck::search::{filter_indices, matches, Debounce};
use taskdeck::task::{Priority, Task};

fn task(title: &str, description: &str) -> Task {
    Task {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: description.to_string(),
        priority: Priority::Low,
        completed: false,
        due_date: NaiveDate::from_ymd_opt(2026, 6, 1).expect("date"),
        created_at: Utc::now(),
    }
}

#[test]
fn empty_query_matches_everything() {
    let tasks = vec![task("Write report", ""), task("Ship release", "v2")];
    assert_eq!(filter_indices(&tasks, ""), vec![0, 1]);
    assert_eq!(filter_indices(&tasks, "   "), vec![0, 1]);
}

#[test]
fn non_matching_query_returns_none() {
    let tasks = vec![task("Write report", "quarterly numbers")];
    assert!(filter_indices(&tasks, "zebra").is_empty());
}

#[test]
fn match_is_case_insensitive_on_title_and_description() {
    let tasks = vec![
        task("Write REPORT", ""),
        task("Ship release", "includes the RePoRt appendix"),
        task("Plan offsite", ""),
    ];
    assert_eq!(filter_indices(&tasks, "report"), vec![0, 1]);
    assert!(matches(&tasks[0], "wRiTe"));
    assert!(!matches(&tasks[2], "report"));
}

#[test]
fn order_is_preserved_in_filtered_view() {
    let tasks = vec![
        task("a report", ""),
        task("unrelated", ""),
        task("b report", ""),
    ];
    assert_eq!(filter_indices(&tasks, "report"), vec![0, 2]);
}

#[test]
fn five_rapid_updates_commit_exactly_once() {
    let window = Duration::from_millis(300);
    let mut debounce = Debounce::new(window);
    let start = Instant::now();

    let mut commits = 0;
    for (i, value) in ["t", "ta", "tas", "task", "tasks"].iter().enumerate() {
        let now = start + Duration::from_millis(40 * i as u64);
        debounce.input(*value, now);
        if debounce.poll(now) {
            commits += 1;
        }
    }
    assert_eq!(commits, 0);

    // One poll after the window since the last keystroke commits the final
    // raw value; later polls are quiet.
    let settled = start + Duration::from_millis(160) + window;
    if debounce.poll(settled) {
        commits += 1;
    }
    if debounce.poll(settled + window) {
        commits += 1;
    }

    assert_eq!(commits, 1);
    assert_eq!(debounce.committed(), "tasks");
}

#[test]
fn teardown_cancel_prevents_stale_commit() {
    let mut debounce = Debounce::new(Duration::from_millis(300));
    let start = Instant::now();

    debounce.input("stale", start);
    debounce.cancel();
    assert!(!debounce.poll(start + Duration::from_secs(5)));
    assert_eq!(debounce.committed(), "");
}
