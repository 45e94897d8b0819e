//! Command-line interface for taskdeck
//!
//! This module defines the CLI structure using clap derive macros. The
//! headless subcommands drive the task store directly; running without a
//! subcommand (or with `ui`) starts the terminal UI.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::output::OutputOptions;
use crate::storage::{default_data_file, JsonFileRepository};
use crate::task::TaskStore;
use crate::ui;

mod task;

/// taskdeck - terminal task manager with a timed assessment mode
#[derive(Parser, Debug)]
#[command(name = "taskdeck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the task snapshot file (defaults to the platform data dir)
    #[arg(long, global = true, env = "TASKDECK_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a task
    Add {
        /// Task title (required, at most 100 characters)
        title: String,

        /// Task description (at most 500 characters)
        #[arg(short, long, default_value = "")]
        description: String,

        /// Priority: high, medium, or low
        #[arg(short, long)]
        priority: Option<String>,

        /// Due date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        due: Option<String>,
    },

    /// List tasks
    List {
        /// Only show tasks whose title or description contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Only show completed tasks
        #[arg(long, conflicts_with = "pending")]
        completed: bool,

        /// Only show pending tasks
        #[arg(long)]
        pending: bool,
    },

    /// Edit a task's fields
    Edit {
        /// Task id (full UUID or unambiguous prefix)
        id: String,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New priority: high, medium, or low
        #[arg(short, long)]
        priority: Option<String>,

        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },

    /// Toggle a task's completion flag
    Done {
        /// Task id (full UUID or unambiguous prefix)
        id: String,
    },

    /// Delete a task
    Delete {
        /// Task id (full UUID or unambiguous prefix)
        id: String,
    },

    /// Run the terminal UI (the default)
    Ui,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config = Config::discover()?;
        let data_file = self
            .data_file
            .or_else(|| config.data_file.clone())
            .unwrap_or_else(default_data_file);

        let repo = JsonFileRepository::new(data_file);
        let mut store = TaskStore::new(Box::new(repo));
        store.hydrate();

        let options = OutputOptions {
            json: self.json,
            quiet: self.quiet,
        };

        match self.command {
            None | Some(Commands::Ui) => ui::run(store, &config),
            Some(Commands::Add {
                title,
                description,
                priority,
                due,
            }) => task::run_add(&mut store, options, title, description, priority, due),
            Some(Commands::List {
                search,
                completed,
                pending,
            }) => task::run_list(&store, options, search, completed, pending),
            Some(Commands::Edit {
                id,
                title,
                description,
                priority,
                due,
            }) => task::run_edit(&mut store, options, &id, title, description, priority, due),
            Some(Commands::Done { id }) => task::run_done(&mut store, options, &id),
            Some(Commands::Delete { id }) => task::run_delete(&mut store, options, &id),
        }
    }
}
