//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
#[derive(Debug, Clone, Copy)]
pub struct GlobalOptions {
    /// Output format for printed results
    pub format: OutputFormat,

    /// Debug logging enabled
    pub debug: bool,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            debug: cli.debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_cli_defaults() {
        let cli = Cli::parse_from(["bbcli", "listrepos"]);
        let opts = GlobalOptions::from_cli(&cli);
        assert_eq!(opts.format, OutputFormat::Table);
        assert!(!opts.debug);
    }

    #[test]
    fn test_from_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["bbcli", "groupinfo", "--group", "devs", "--format", "json", "--debug"]);
        let opts = GlobalOptions::from_cli(&cli);
        assert_eq!(opts.format, OutputFormat::Json);
        assert!(opts.debug);
    }
}
