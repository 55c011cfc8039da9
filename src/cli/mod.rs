//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod args;
pub mod context;
pub mod permission;
pub mod pipeline;
pub mod repo;

pub use args::{GlobalOptions, GrantLevel, OutputFormat};
pub use context::CommandContext;

/// bbcli - Bitbucket repository reports and group permissions
///
/// Requires BB_ACCOUNT_ID, BB_OAUTH_ID and BB_OAUTH_SECRET in the environment.
#[derive(Parser, Debug)]
#[command(name = "bbcli")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format for printed results
    #[arg(
        long,
        global = true,
        env = "BBCLI_FORMAT",
        default_value = "table",
        hide_env = true
    )]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(long, global = true, env = "BBCLI_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all repositories of the account, most recently updated first
    #[command(name = "listrepos")]
    ListRepos {
        /// Write repos.csv instead of printing
        #[arg(long)]
        filereport: bool,
    },

    /// List the pipeline runs of a repository
    Pipelines {
        /// Repository slug
        #[arg(long)]
        repo: String,

        /// Write pipelines_<repo>.csv instead of printing
        #[arg(long)]
        filereport: bool,
    },

    /// Grant a group a permission on one repository or on all of its repositories
    Permissions {
        /// Group slug (lower-cased before use)
        #[arg(long)]
        group: String,

        /// Apply to a single repository instead of every repository of the group
        #[arg(long)]
        repo: Option<String>,

        /// Permission to grant
        #[arg(long, value_enum, default_value = "read", ignore_case = true)]
        grant: GrantLevel,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,

        /// Show what would change without calling the API
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the repositories a group has privileges on
    #[command(name = "groupinfo")]
    GroupInfo {
        /// Group slug (lower-cased before use)
        #[arg(long)]
        group: String,

        /// Write group_<group>_info.csv instead of printing
        #[arg(long)]
        filereport: bool,
    },

    /// Show the repositories visible for a user
    #[command(name = "userinfo")]
    UserInfo {
        /// User name or UUID
        #[arg(long)]
        user: String,

        /// Write user_<user>_info.csv instead of printing
        #[arg(long)]
        filereport: bool,
    },

    /// Re-apply the permissions recorded in a group report
    #[command(name = "restoregroupsgrant")]
    RestoreGroupsGrant {
        /// Group slug (lower-cased before use)
        #[arg(long)]
        group: Option<String>,

        /// CSV file with `repo` and `permission` columns
        #[arg(long)]
        backupfilepath: Option<String>,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,

        /// Show what would change without calling the API
        #[arg(long)]
        dry_run: bool,
    },
}
