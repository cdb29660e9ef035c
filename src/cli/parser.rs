use crate::core::history::HistoryFilter;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use clap::{ArgAction, Args, Parser, Subcommand};

/// Command-line interface definition for libattend
/// CLI application to track library attendance with SQLite
#[derive(Parser)]
#[command(
    name = "libattend",
    version = env!("CARGO_PKG_VERSION"),
    about = "Library attendance tracker: register members, scan member cards, browse and export attendance",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Increase diagnostic output (-v debug, -vv trace)
    #[arg(global = true, short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Only report errors in diagnostic output
    #[arg(global = true, short = 'q', long = "quiet")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Filters shared by `history` and `export`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(long, short, help = "Search by member name or member ID")]
    pub search: Option<String>,

    #[arg(long, help = "Event type: all, check-in or check-out")]
    pub kind: Option<String>,

    #[arg(long, help = "Only events of this local date (YYYY-MM-DD)")]
    pub date: Option<String>,

    #[arg(
        long,
        short,
        value_name = "RANGE",
        help = "Filter by year/month/day or a custom range (YYYY, YYYY-MM, YYYY-MM-DD, start:end)"
    )]
    pub range: Option<String>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> AppResult<HistoryFilter> {
        HistoryFilter::from_args(
            self.search.as_deref(),
            self.kind.as_deref(),
            self.date.as_deref(),
            self.range.as_deref(),
        )
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use (vim, nano, or custom path)")]
        editor: Option<String>,
    },

    /// Manage the database (schema, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending schema steps")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity and stored collections")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,

        #[arg(
            long = "reset",
            value_name = "KEY",
            help = "Delete one stored collection (e.g. a corrupt attendance_YYYY-MM-DD)"
        )]
        reset: Option<String>,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Register a new member
    Register {
        #[arg(long, help = "Full name")]
        name: Option<String>,

        #[arg(long, help = "Email address")]
        email: Option<String>,

        #[arg(
            long = "type",
            help = "Membership type: student, faculty, staff, visitor, premium"
        )]
        membership: Option<String>,
    },

    /// Scan a member ID (check-in / check-out). Reads one ID per line from stdin when omitted
    Scan {
        /// Member ID as decoded from the card
        code: Option<String>,
    },

    /// Show today's statistics and recent activity
    Today {
        #[arg(long, help = "Show another day instead of today (YYYY-MM-DD)")]
        date: Option<String>,
    },

    /// Browse and manage registered members
    Members {
        #[arg(long, short, help = "Search by name, email or member ID")]
        search: Option<String>,

        #[arg(long, value_name = "ID", help = "Show details and attendance summary")]
        show: Option<String>,

        #[arg(long, value_name = "ID", help = "Delete a member (attendance is kept)")]
        delete: Option<String>,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Browse attendance history
    History {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Export attendance history
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Output file (default: attendance_history_<date>.<ext>)")]
        file: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, short = 'f', help = "Overwrite an existing file")]
        force: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing file")]
        force: bool,
    },
}
