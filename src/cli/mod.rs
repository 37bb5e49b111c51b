//! Command-line interface for taskly
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand group is implemented in its own submodule.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::locale::Translations;
use crate::session::{self, UserProfile};
use crate::storage::Storage;
use crate::store::DomainStore;

mod data;
mod project;
mod settings;
mod task;
mod user;
mod view;

/// taskly - tasks and projects with local per-user storage
#[derive(Parser, Debug)]
#[command(name = "taskly")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory (defaults to the platform data dir)
    #[arg(long, global = true, env = "TASKLY_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Act as this user id instead of the logged-in user
    #[arg(long, global = true, env = "TASKLY_USER")]
    pub user: Option<String>,

    /// Locale code for rendered output (overrides the config)
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Project management
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Render a view (dashboard, today, calendar, all-tasks, completed,
    /// project:<id>)
    Show {
        /// View selector
        view: String,
    },

    /// Derived statistics (counts and completion trend)
    Stats {
        /// Number of trend days
        #[arg(long, default_value_t = 7)]
        trend_days: usize,
    },

    /// Export tasks and projects to a backup file
    Export {
        /// Output path (defaults to taskly-backup-<name>-<date>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import tasks and projects from a backup file
    Import {
        /// Path to the backup file
        file: PathBuf,
    },

    /// Show or update settings
    Config {
        /// Locale code ("en", "tr")
        #[arg(long)]
        language: Option<String>,

        /// Date display format
        #[arg(long)]
        date_format: Option<String>,

        /// Clock format: 12 or 24
        #[arg(long)]
        time_format: Option<String>,

        /// Enable or disable notification lines
        #[arg(long)]
        notifications: Option<bool>,
    },

    /// Delete all tasks and projects for the current user
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Log in as a user
    Login {
        /// Display name
        #[arg(long)]
        name: String,

        /// Email address
        #[arg(long, default_value = "")]
        email: String,

        /// Explicit user id (generated when omitted)
        #[arg(long)]
        id: Option<String>,
    },

    /// Log out the current user
    Logout,

    /// Show the logged-in user
    Whoami,
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Create a task
    Add {
        /// Task title
        title: String,

        /// Longer description
        #[arg(short, long)]
        description: Option<String>,

        /// Priority: low, medium, high
        #[arg(short, long, default_value = "medium")]
        priority: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        /// Project id to assign the task to
        #[arg(long)]
        project: Option<u64>,

        /// Labels (repeatable)
        #[arg(short, long)]
        label: Vec<String>,
    },

    /// List tasks
    List {
        /// Only tasks in this project
        #[arg(long)]
        project: Option<u64>,

        /// Only completed tasks
        #[arg(long)]
        completed: bool,
    },

    /// Mark a task completed
    Done {
        /// Task id
        id: u64,
    },

    /// Mark every pending task completed
    DoneAll,

    /// Mark a task pending again
    Reopen {
        /// Task id
        id: u64,
    },

    /// Rename a task
    Rename {
        /// Task id
        id: u64,

        /// New title
        title: String,
    },

    /// Edit task fields
    Edit {
        /// Task id
        id: u64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description ("" clears it)
        #[arg(short, long)]
        description: Option<String>,

        /// New priority: low, medium, high
        #[arg(short, long)]
        priority: Option<String>,

        /// New due date (YYYY-MM-DD, "" clears it)
        #[arg(long)]
        due: Option<String>,

        /// New project id (0 unassigns)
        #[arg(long)]
        project: Option<u64>,

        /// Replace labels (repeatable)
        #[arg(short, long)]
        label: Option<Vec<String>>,
    },

    /// Delete a task
    Rm {
        /// Task id
        id: u64,
    },

    /// Delete several tasks at once; unknown ids are skipped
    RmMany {
        /// Task ids
        ids: Vec<u64>,
    },
}

/// Project subcommands
#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Create a project
    New {
        /// Project name
        name: String,

        /// Longer description
        #[arg(short, long)]
        description: Option<String>,

        /// Display color (any string, e.g. "#43e97b")
        #[arg(short, long)]
        color: Option<String>,
    },

    /// List projects with task counts
    List,

    /// Delete a project; its tasks are kept but unassigned
    Rm {
        /// Project id
        id: u64,
    },
}

/// Shared per-invocation context handed to command implementations.
pub struct Context {
    pub storage: Storage,
    pub user: Option<String>,
    pub locale: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

impl Context {
    pub fn output(&self) -> crate::output::OutputOptions {
        crate::output::OutputOptions {
            json: self.json,
            quiet: self.quiet,
        }
    }

    /// Resolve the active user and open their domain store.
    pub fn open_store(&self) -> Result<(DomainStore, UserProfile)> {
        let profile = session::resolve_user(&self.storage, self.user.as_deref())?;
        let store = DomainStore::open(self.storage.clone(), profile.id.clone())?;
        Ok((store, profile))
    }

    /// Translations for the configured (or overridden) locale.
    pub fn translations(&self) -> Result<Translations> {
        match &self.locale {
            Some(code) => Translations::builtin(code),
            None => {
                let config = Config::load(&self.storage.config_path());
                Translations::for_code_or_default(&config.language)
            }
        }
    }
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let storage = match self.data_dir {
            Some(dir) => Storage::new(dir),
            None => Storage::open_default()?,
        };
        let ctx = Context {
            storage,
            user: self.user,
            locale: self.locale,
            json: self.json,
            quiet: self.quiet,
        };

        match self.command {
            Commands::Task(command) => task::run(&ctx, command),
            Commands::Project(command) => project::run(&ctx, command),
            Commands::Show { view } => view::run(&ctx, &view),
            Commands::Stats { trend_days } => view::run_stats(&ctx, trend_days),
            Commands::Export { output } => data::run_export(&ctx, output),
            Commands::Import { file } => data::run_import(&ctx, &file),
            Commands::Config {
                language,
                date_format,
                time_format,
                notifications,
            } => settings::run(
                &ctx,
                settings::SetOptions {
                    language,
                    date_format,
                    time_format,
                    notifications,
                },
            ),
            Commands::Clear { yes } => data::run_clear(&ctx, yes),
            Commands::Login { name, email, id } => user::run_login(&ctx, id.as_deref(), &name, &email),
            Commands::Logout => user::run_logout(&ctx),
            Commands::Whoami => user::run_whoami(&ctx),
        }
    }
}
