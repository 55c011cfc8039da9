//! Repository listing commands

use std::path::Path;

use colored::Colorize;
use log::debug;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::client::ListingApi;
use crate::client::models::Repository;
use crate::error::Result;
use crate::models::RepoDisplay;
use crate::output::Formattable;
use crate::output::report::{self, REPOS_REPORT};

/// Run the listrepos command
///
/// Fetches every repository of the configured account.
pub async fn list(opts: &GlobalOptions, filereport: bool) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let account = ctx.account_id().to_string();

    debug!("Fetching repositories for account {}", account);
    let repos = repositories_by_date(ctx.client.as_ref(), &account).await?;
    debug!("Fetched {} repositories", repos.len());

    if filereport {
        save_remotes(Path::new(REPOS_REPORT), &account, &repos)
    } else {
        print_repos(repos, ctx.format)
    }
}

/// Run the userinfo command
///
/// Lists the repositories `user` can see. Report rows use the configured
/// account in the git remote, like `listrepos`.
pub async fn user_info(opts: &GlobalOptions, user: &str, filereport: bool) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let account = ctx.account_id().to_string();

    debug!("Fetching repositories for user {}", user);
    let repos = user_repositories_by_date(ctx.client.as_ref(), user).await?;
    debug!("Fetched {} repositories", repos.len());

    if filereport {
        let path = report::user_report_name(user);
        save_remotes(Path::new(&path), &account, &repos)
    } else {
        print_repos(repos, ctx.format)
    }
}

/// Repositories sorted by last update, newest first.
pub async fn repositories_by_date<C>(client: &C, account: &str) -> Result<Vec<Repository>>
where
    C: ListingApi + ?Sized,
{
    let mut repos = client.list_repositories(account).await?;
    sort_by_date(&mut repos);
    Ok(repos)
}

/// Repositories visible for `user`, newest first.
pub async fn user_repositories_by_date<C>(client: &C, user: &str) -> Result<Vec<Repository>>
where
    C: ListingApi + ?Sized,
{
    let mut repos = client.list_user_repositories(user).await?;
    sort_by_date(&mut repos);
    Ok(repos)
}

/// Sort newest first. Repositories without a readable date go last.
fn sort_by_date(repos: &mut [Repository]) {
    repos.sort_by(|a, b| b.updated_date().cmp(&a.updated_date()));
}

fn print_repos(repos: Vec<Repository>, format: OutputFormat) -> Result<()> {
    let display: Vec<RepoDisplay> = repos.into_iter().map(RepoDisplay::from).collect();
    display.print(format)
}

/// Write a `git_remote , updated_on` report to `path`.
pub fn save_remotes(path: &Path, account: &str, repos: &[Repository]) -> Result<()> {
    eprintln!("{} Saving repos report to file...", ">".green());
    let entries = report::remotes_by_date(account, repos);
    report::write_file(path, |out| report::write_remotes(out, &entries))?;
    eprintln!("{} Repo report saved. ({})", ">".green(), path.display());
    Ok(())
}
