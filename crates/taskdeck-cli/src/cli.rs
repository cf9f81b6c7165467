use std::ffi::OsString;
use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Args, Parser, Subcommand};
use taskdeck_core::view::ViewFilter;
use taskdeck_shared::{Priority, TaskStatus};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct PreprocessedArgs {
    pub cleaned_args: Vec<OsString>,
    pub rc_overrides: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct KeyVal {
    pub key: String,
    pub value: String,
}

impl std::str::FromStr for KeyVal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (k, v) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("expected KEY=VALUE, got: {s}"))?;
        Ok(Self {
            key: k.trim().to_string(),
            value: v.trim().to_string(),
        })
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "taskdeck",
    version,
    about = "Taskdeck: terminal client for the task backend",
    disable_help_subcommand = true
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[arg(
        long = "rc",
        value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<KeyVal>()),
        action = ArgAction::Append,
        global = true
    )]
    pub rc_overrides: Vec<KeyVal>,

    #[arg(long = "rc-file", global = true)]
    pub rc_file: Option<PathBuf>,

    /// Backend origin, e.g. http://127.0.0.1:8000
    #[arg(long = "url", global = true)]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Load the dashboard for a view: stats, categories, tags and tasks
    View {
        #[arg(value_parser = parse_view)]
        filter: Option<ViewFilter>,
    },
    #[command(subcommand)]
    Task(TaskCommand),
    #[command(subcommand)]
    Category(CategoryCommand),
    #[command(subcommand)]
    Tag(TagCommand),
    #[command(subcommand)]
    Reminder(ReminderCommand),
    #[command(subcommand)]
    Progress(ProgressCommand),
}

#[derive(Args, Debug, Clone, Default)]
pub struct TaskFields {
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, value_parser = parse_priority)]
    pub priority: Option<Priority>,
    #[arg(long, value_parser = parse_status)]
    pub status: Option<TaskStatus>,
    #[arg(long, allow_negative_numbers = true)]
    pub progress: Option<i64>,
    /// YYYY-MM-DD, YYYY-MM-DDTHH:MM, RFC 3339, today, tomorrow or +Nd
    #[arg(long)]
    pub due: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TaskCommand {
    List {
        #[arg(long, value_parser = parse_status)]
        status: Option<TaskStatus>,
        #[arg(long, value_parser = parse_priority)]
        priority: Option<Priority>,
        #[arg(long)]
        root_only: bool,
    },
    Show {
        id: u64,
    },
    Add {
        title: String,
        #[command(flatten)]
        fields: TaskFields,
        #[arg(long)]
        parent: Option<u64>,
    },
    Edit {
        id: u64,
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        fields: TaskFields,
    },
    Delete {
        id: u64,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Advance the status: pending, in progress, completed, pending
    Toggle {
        id: u64,
    },
    Subtasks {
        id: u64,
    },
    /// Show the priority, or set it when a value is given
    Priority {
        id: u64,
        #[arg(value_parser = parse_priority)]
        value: Option<Priority>,
    },
    Deadline {
        id: u64,
        #[arg(required_unless_present = "clear")]
        date: Option<String>,
        #[arg(long, conflicts_with = "date")]
        clear: bool,
    },
    Overdue,
    Upcoming {
        #[arg(long, default_value_t = taskdeck_core::api::DEFAULT_UPCOMING_DAYS)]
        days: u32,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum CategoryCommand {
    List,
    Show {
        id: u64,
    },
    Add {
        name: String,
        /// #RRGGBB
        #[arg(long)]
        color: Option<String>,
    },
    Edit {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    Delete {
        id: u64,
        #[arg(long, short = 'y')]
        yes: bool,
    },
    Assign {
        id: u64,
        task: u64,
    },
    Unassign {
        id: u64,
        task: u64,
    },
    Tasks {
        id: u64,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum TagCommand {
    List,
    Show {
        id: u64,
    },
    Add {
        name: String,
    },
    Rename {
        id: u64,
        name: String,
    },
    Delete {
        id: u64,
        #[arg(long, short = 'y')]
        yes: bool,
    },
    Assign {
        id: u64,
        task: u64,
    },
    Unassign {
        id: u64,
        task: u64,
    },
    Tasks {
        id: u64,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ReminderCommand {
    List,
    Show {
        id: u64,
    },
    Add {
        task: u64,
        at: String,
    },
    Edit {
        id: u64,
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        notified: Option<bool>,
    },
    Delete {
        id: u64,
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Reminders that are due and not yet notified
    Pending,
    Notify {
        id: u64,
    },
    ForTask {
        task: u64,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProgressCommand {
    Set {
        task: u64,
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    Get {
        task: u64,
    },
    Bump {
        task: u64,
        #[arg(long, allow_negative_numbers = true)]
        by: Option<i32>,
    },
    Range {
        #[arg(long, default_value_t = 0)]
        min: i64,
        #[arg(long, default_value_t = 100)]
        max: i64,
    },
    Stats {
        #[arg(long, value_parser = parse_status)]
        status: Option<TaskStatus>,
    },
}

fn parse_view(s: &str) -> Result<ViewFilter, String> {
    s.parse()
}

fn parse_status(s: &str) -> Result<TaskStatus, String> {
    s.parse().map_err(|err| format!("{err}"))
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    s.parse().map_err(|err| format!("{err}"))
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

/// Pulls positional `rc.key=value` and `rc.key:value` overrides out of the
/// argument list before clap sees it.
#[tracing::instrument(skip_all)]
pub fn preprocess_args(raw: &[OsString]) -> anyhow::Result<PreprocessedArgs> {
    let mut cleaned = Vec::with_capacity(raw.len());
    let mut overrides: Vec<(String, String)> = Vec::new();

    let mut iter = raw.iter().cloned();
    if let Some(bin) = iter.next() {
        cleaned.push(bin);
    }

    for arg in iter {
        let s = arg.to_string_lossy();
        if let Some(rest) = s.strip_prefix("rc.") {
            let parsed = rest.split_once('=').or_else(|| rest.split_once(':'));
            if let Some((k, v)) = parsed {
                debug!(key = %k, value = %v, "captured positional rc override");
                overrides.push((k.to_string(), v.to_string()));
                continue;
            }
        }

        cleaned.push(arg);
    }

    Ok(PreprocessedArgs {
        cleaned_args: cleaned,
        rc_overrides: overrides,
    })
}
