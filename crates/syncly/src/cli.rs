//! Clap derive structures for the `syncly` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Only clap, clap_complete and std are used here; `build.rs` includes this file.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// syncly -- command-line control for a Syncthing daemon
#[derive(Debug, Parser)]
#[command(
    name = "syncly",
    version,
    about = "Inspect and control Syncthing daemons from the command line",
    long_about = "Talks to a Syncthing daemon over its REST API.\n\n\
        Reads folder, device and system state, drives scans and pauses,\n\
        and follows the daemon's event feed.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Daemon profile to use
    #[arg(long, short = 'p', env = "SYNCLY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// REST root of the daemon (overrides profile)
    #[arg(long, short = 'u', env = "SYNCLY_URL", global = true)]
    pub url: Option<String>,

    /// API key (overrides profile and keyring)
    #[arg(long, env = "SYNCLY_API_KEY", global = true, hide_env = true)]
    pub api_key: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SYNCLY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "SYNCLY_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "SYNCLY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Daemon status: device ID, uptime, resource use
    #[command(alias = "st")]
    Status,

    /// Daemon version
    Version,

    /// Unauthenticated health check
    Health,

    /// Authenticated ping
    Ping,

    /// Manage shared folders
    #[command(alias = "f")]
    Folders(FoldersArgs),

    /// Manage remote devices
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Devices and folders offered to this daemon but not yet accepted
    Pending(PendingArgs),

    /// Daemon error messages
    Errors(ErrorsArgs),

    /// Recent daemon log
    Log(LogArgs),

    /// Restart the daemon
    Restart,

    /// Shut the daemon down
    Shutdown,

    /// Daemon upgrades
    Upgrade(UpgradeArgs),

    /// View and follow the event feed
    #[command(alias = "ev")]
    Events(EventsArgs),

    /// Run a local daemon as a child process
    Worker(WorkerArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Folders ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct FoldersArgs {
    #[command(subcommand)]
    pub command: FoldersCommand,
}

#[derive(Debug, Subcommand)]
pub enum FoldersCommand {
    /// List configured folders
    #[command(alias = "ls")]
    List,

    /// Show one folder's configuration
    Get {
        /// Folder ID
        id: String,
    },

    /// Pause a folder
    Pause {
        /// Folder ID
        id: String,
    },

    /// Resume a paused folder
    Resume {
        /// Folder ID
        id: String,
    },

    /// Request a rescan (all folders when no ID is given)
    Scan {
        /// Folder ID
        id: Option<String>,

        /// Only scan this subdirectory
        #[arg(long, requires = "id")]
        sub: Option<String>,

        /// Delay the next scheduled scan by this many seconds
        #[arg(long)]
        next: Option<u64>,
    },

    /// Sync state and byte counts of a folder
    Status {
        /// Folder ID
        id: String,
    },

    /// Items that failed to sync
    Errors {
        /// Folder ID
        id: String,

        /// Page number (1-based)
        #[arg(long)]
        page: Option<u32>,

        /// Items per page
        #[arg(long)]
        perpage: Option<u32>,
    },
}

// ── Devices ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List configured devices with connection state
    #[command(alias = "ls")]
    List,

    /// Show one device's configuration
    Get {
        /// Device ID
        id: String,
    },

    /// Pause a device (all devices when no ID is given)
    Pause {
        /// Device ID
        id: Option<String>,
    },

    /// Resume a device (all devices when no ID is given)
    Resume {
        /// Device ID
        id: Option<String>,
    },
}

// ── Pending ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PendingArgs {
    #[command(subcommand)]
    pub command: PendingCommand,
}

#[derive(Debug, Subcommand)]
pub enum PendingCommand {
    /// Devices that tried to connect
    Devices,

    /// Folders offered by connected devices
    Folders {
        /// Only folders offered by this device
        #[arg(long)]
        device: Option<String>,
    },
}

// ── Errors / Log ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ErrorsArgs {
    #[command(subcommand)]
    pub command: ErrorsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ErrorsCommand {
    /// List recent errors
    #[command(alias = "ls")]
    List,

    /// Clear the error list
    Clear,
}

#[derive(Debug, Args)]
pub struct LogArgs {
    /// Only entries after this timestamp (RFC 3339)
    #[arg(long)]
    pub since: Option<String>,

    /// Print the daemon's plain-text log instead of structured entries
    #[arg(long)]
    pub text: bool,
}

// ── Upgrade ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct UpgradeArgs {
    #[command(subcommand)]
    pub command: UpgradeCommand,
}

#[derive(Debug, Subcommand)]
pub enum UpgradeCommand {
    /// Check whether a newer release is available
    Check,
}

// ── Events ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct EventsArgs {
    #[command(subcommand)]
    pub command: EventsCommand,
}

#[derive(Debug, Subcommand)]
pub enum EventsCommand {
    /// Follow the event feed until interrupted
    Watch {
        /// Resume after this event ID
        #[arg(long, default_value = "0")]
        since: u64,

        /// Only these kinds (comma-separated, e.g. StateChanged,FolderSummary)
        #[arg(long, value_delimiter = ',')]
        types: Vec<String>,

        /// Max events per request
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Print buffered events once and exit
    #[command(alias = "ls")]
    List {
        /// Only events after this ID
        #[arg(long, default_value = "0")]
        since: u64,

        /// Only these kinds (comma-separated)
        #[arg(long, value_delimiter = ',')]
        types: Vec<String>,

        /// Max events returned
        #[arg(long, short = 'l')]
        limit: Option<u32>,

        /// Read the disk-event feed instead
        #[arg(long)]
        disk: bool,
    },
}

// ── Worker ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WorkerArgs {
    #[command(subcommand)]
    pub command: WorkerCommand,
}

#[derive(Debug, Subcommand)]
pub enum WorkerCommand {
    /// Start the daemon, print its status, and stop it on Ctrl-C
    Run {
        /// Also stream events while running
        #[arg(long)]
        events: bool,
    },

    /// Print the environment the daemon would be started with
    Env,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive configuration wizard
    Init,

    /// Show the effective configuration (secrets masked)
    Show,

    /// Print the config file path
    Path,

    /// Store a profile's API key in the system keyring
    SetKey {
        /// Profile to store the key for (default: active profile)
        #[arg(long)]
        for_profile: Option<String>,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
