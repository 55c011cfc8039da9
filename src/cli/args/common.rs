//! Common CLI types shared across commands

use crate::client::models::Permission;

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format - one row per entry (default)
    #[default]
    Table,
    /// JSON format - structured for scripts
    Json,
}

/// Permission level accepted by `--grant`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum GrantLevel {
    #[default]
    Read,
    Write,
    Admin,
}

impl From<GrantLevel> for Permission {
    fn from(level: GrantLevel) -> Self {
        match level {
            GrantLevel::Read => Permission::Read,
            GrantLevel::Write => Permission::Write,
            GrantLevel::Admin => Permission::Admin,
        }
    }
}
