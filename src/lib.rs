//! taskdeck - Terminal Task Manager Library
//!
//! This library provides the core functionality for the taskdeck CLI and
//! terminal UI: a task store persisted as a JSON snapshot, debounced search
//! filtering, form validation, and a session countdown timer.
//!
//! # Core Concepts
//!
//! - **Task Store**: ordered in-memory collection, the single source of
//!   truth, written back to storage as a full snapshot on every change
//! - **Search Filter**: case-insensitive substring match behind a debounce
//! - **Task Form**: validated create/edit payloads with an artificial
//!   submission delay
//! - **Timer**: fixed-duration countdown gating the assessment session
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `taskdeck.toml`
//! - `error`: Error types and result aliases
//! - `form`: Validation rules and the TUI form editor
//! - `output`: Human/JSON output for CLI commands
//! - `search`: Filtering and input debouncing
//! - `storage`: Snapshot repositories (JSON file, in-memory)
//! - `task`: Task model and store
//! - `timer`: Countdown state machine
//! - `ui`: Terminal UI shell

pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod output;
pub mod search;
pub mod storage;
pub mod task;
pub mod timer;
pub mod ui;

pub use error::{Error, Result};
