//! bbcli - Bitbucket repository reports and group permission management

use clap::Parser;
use log::LevelFilter;

mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;

use cli::{Cli, Commands, GlobalOptions};
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let opts = GlobalOptions::from_cli(&cli);
    init_logging(opts.debug);

    if let Err(err) = run(cli.command, &opts).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// `RUST_LOG` applies unless `--debug` is given. Defaults to warnings only.
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

async fn run(command: Commands, opts: &GlobalOptions) -> Result<()> {
    match command {
        Commands::ListRepos { filereport } => cli::repo::list(opts, filereport).await,
        Commands::Pipelines { repo, filereport } => {
            cli::pipeline::list(opts, &repo, filereport).await
        }
        Commands::Permissions {
            group,
            repo,
            grant,
            yes,
            dry_run,
        } => cli::permission::set(opts, &group, repo.as_deref(), grant, yes, dry_run).await,
        Commands::GroupInfo { group, filereport } => {
            cli::permission::group_info(opts, &group, filereport).await
        }
        Commands::UserInfo { user, filereport } => {
            cli::repo::user_info(opts, &user, filereport).await
        }
        Commands::RestoreGroupsGrant {
            group,
            backupfilepath,
            yes,
            dry_run,
        } => {
            cli::permission::restore(
                opts,
                group.as_deref(),
                backupfilepath.as_deref(),
                yes,
                dry_run,
            )
            .await
        }
    }
}
