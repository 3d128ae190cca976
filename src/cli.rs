use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "taskday",
    about = "Personal task tracker with due-date reminders and a daily visit streak",
    version
)]
pub struct Cli {
    /// Path to the SQLite database [default: ~/.taskday/tasks.db]
    #[arg(long, env = "TASKDAY_DB", global = true)]
    pub db: Option<String>,

    /// Path to the streak record [default: ~/.taskday/streak.json]
    #[arg(long, env = "TASKDAY_STREAK_FILE", global = true)]
    pub streak_file: Option<String>,

    /// Append log output to this file instead of stderr
    #[arg(long, env = "TASKDAY_LOG", global = true)]
    pub log_file: Option<String>,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, env = "TASKDAY_TODAY", global = true, hide = true)]
    pub today: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add a task
    Add {
        /// Task name (at most 50 characters)
        name: String,
        /// Task description (at most 200 characters)
        #[arg(default_value = "")]
        desc: String,
        /// Due date, YYYY-MM-DD [default: today]
        #[arg(long)]
        due: Option<String>,
        /// Output the new task as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change a task's name, description or due date
    Edit {
        /// Task id
        id: i64,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New description
        #[arg(short, long)]
        desc: Option<String>,
        /// New due date, YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
    },

    /// Delete a task permanently
    Rm {
        /// Task id
        id: i64,
    },

    /// Mark a task as completed
    Done {
        /// Task id
        id: i64,
    },

    /// Mark a completed task as pending again
    Reopen {
        /// Task id
        id: i64,
    },

    /// Show one task
    Show {
        /// Task id
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all tasks in creation order
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show tasks due tomorrow and tasks that expired yesterday
    Due {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record today's visit and show the streak
    Streak {
        /// Show the stored streak without recording a visit
        #[arg(long)]
        peek: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record today's visit and open the interactive page
    Page {
        /// Poll interval in milliseconds
        #[arg(long, default_value = "1000")]
        poll_interval: u64,
    },
}
