//! Clap derive structures for the `exameets` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// exameets -- the Exameets opportunities portal from the command line
#[derive(Debug, Parser)]
#[command(
    name = "exameets",
    version,
    about = "Browse jobs, exams, and scholarships from the Exameets portal",
    long_about = "A CLI client for the Exameets opportunities portal.\n\n\
        Covers all seven content sections (jobs, government jobs, exams,\n\
        scholarships, admit cards, admissions, previous year papers),\n\
        account and profile management, and a cross-section what's-new feed.",
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
    /// Portal API base URL (overrides config)
    #[arg(long, short = 'u', env = "EXAMEETS_URL", global = true)]
    pub url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "EXAMEETS_OUTPUT",
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

    /// Request timeout in seconds
    #[arg(long, env = "EXAMEETS_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
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
    /// Tech job listings
    #[command(alias = "job", alias = "j")]
    Jobs(ResourceArgs),

    /// Government job listings
    #[command(name = "govt-jobs", alias = "govtjob", alias = "gj")]
    GovtJobs(ResourceArgs),

    /// Exam notifications
    #[command(alias = "exam", alias = "e")]
    Exams(ResourceArgs),

    /// Scholarship listings
    #[command(alias = "scholarship", alias = "sch")]
    Scholarships(ResourceArgs),

    /// Admit card releases
    #[command(name = "admit-cards", alias = "admitcard", alias = "ac")]
    AdmitCards(ResourceArgs),

    /// Admission notifications
    #[command(alias = "admission", alias = "adm")]
    Admissions(ResourceArgs),

    /// Previous year question papers
    #[command(name = "pyqs", alias = "pyq")]
    PreviousYearPapers(ResourceArgs),

    /// Latest postings across every section
    #[command(name = "whats-new", alias = "new")]
    WhatsNew(WhatsNewArgs),

    /// Account session management
    Auth(AuthArgs),

    /// Profile, password, and preference updates
    Profile(ProfileArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Resource commands (shared by all seven sections) ─────────────────

#[derive(Debug, Args)]
pub struct ResourceArgs {
    #[command(subcommand)]
    pub command: ResourceCommand,
}

#[derive(Debug, Subcommand)]
pub enum ResourceCommand {
    /// List one page of the section
    #[command(alias = "ls")]
    List(ListArgs),

    /// Get a single record by id
    Get {
        /// Record id
        id: String,
    },

    /// Create a record (admin accounts only)
    Create(PayloadArgs),

    /// Update a record in place (admin accounts only)
    Update {
        /// Record id
        id: String,

        #[command(flatten)]
        payload: PayloadArgs,
    },

    /// Delete a record (admin accounts only)
    Delete {
        /// Record id
        id: String,
    },

    /// Show the latest postings in this section
    Latest,
}

/// Shared pagination and search arguments for all list commands.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Page number (defaults to the last visited page)
    #[arg(long, short = 'p')]
    pub page: Option<u32>,

    /// Free-text search keyword
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Section-specific filter as key=value (repeatable)
    /// Examples: --filter location=Hyderabad --filter category=Engineering
    #[arg(long, short = 'f', value_name = "KEY=VALUE")]
    pub filter: Vec<String>,
}

/// Payload assembly for create/update commands.
#[derive(Debug, Args)]
pub struct PayloadArgs {
    /// Field as key=value (repeatable); comma-separated values for
    /// list fields like `skills` are split into arrays
    #[arg(long, short = 's', value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Load the full payload from a JSON file
    #[arg(long, short = 'F')]
    pub from_file: Option<PathBuf>,
}

// ── What's-new ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WhatsNewArgs {
    /// Max postings shown per section
    #[arg(long, short = 'l', default_value = "5")]
    pub limit: usize,
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Sign in and remember the account
    Login {
        /// Account email
        #[arg(long, short = 'e')]
        email: Option<String>,

        /// Store the password in the system keyring
        #[arg(long)]
        save_password: bool,
    },

    /// Create a new account
    Register {
        /// Full name
        #[arg(long, required = true)]
        name: String,

        /// Account email
        #[arg(long, short = 'e', required = true)]
        email: String,

        /// Phone number
        #[arg(long, required = true)]
        phone: String,
    },

    /// Sign out and forget the stored account
    Logout,

    /// Show the signed-in account
    Whoami,

    /// Permanently delete the account
    DeleteAccount,
}

// ── Profile ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Update profile fields
    Update(PayloadArgs),

    /// Change the account password
    Password,

    /// Update notification/content preferences
    Preferences(PayloadArgs),
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create the initial config file with guided setup
    Init,

    /// Display the current resolved configuration
    Show,

    /// Print the config file path
    Path,

    /// Store the account password in the system keyring
    SetPassword,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
