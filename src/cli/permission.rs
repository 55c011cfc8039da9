//! Group permission commands

use std::path::Path;

use colored::Colorize;
use dialoguer::{Input, theme::ColorfulTheme};
use log::debug;

use crate::cli::{CommandContext, GlobalOptions, GrantLevel};
use crate::client::models::Permission;
use crate::client::{ListingApi, PermissionApi};
use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::models::PrivilegeDisplay;
use crate::output::Formattable;
use crate::output::report::{self, BackupEntry};

/// Run the groupinfo command
pub async fn group_info(opts: &GlobalOptions, group: &str, filereport: bool) -> Result<()> {
    let group = normalize_group(group);
    let ctx = CommandContext::new(opts).await?;
    let account = ctx.account_id().to_string();

    debug!("Fetching privileges of group {} in {}", group, account);
    let privileges = ctx.client.list_group_privileges(&account, &group).await?;
    debug!("Fetched {} privileges", privileges.len());

    if filereport {
        let path = report::group_report_name(&group);
        eprintln!("{} Saving group report to file...", ">".green());
        report::write_file(&path, |out| report::write_privileges(out, &privileges))?;
        eprintln!("{} Group report saved. ({})", ">".green(), path);
        return Ok(());
    }

    let display: Vec<PrivilegeDisplay> = privileges.into_iter().map(PrivilegeDisplay::from).collect();
    display.print(ctx.format)
}

/// Run the permissions command
///
/// Grants `grant` on `repo`, or on every repository the group already holds
/// a privilege on when no repository is given.
pub async fn set(
    opts: &GlobalOptions,
    group: &str,
    repo: Option<&str>,
    grant: GrantLevel,
    yes: bool,
    dry_run: bool,
) -> Result<()> {
    let group = normalize_group(group);
    let permission = Permission::from(grant);
    let config = Config::from_env()?;

    if dry_run {
        eprintln!("{}", "DRY RUN - no changes will be made".yellow());
    } else if !yes && !ask_confirmation(&grant_prompt(&group, permission, repo))? {
        println!("Cancelled.");
        return Ok(());
    }

    let ctx = CommandContext::with_config(config, opts).await?;
    let account = ctx.account_id().to_string();
    let repos = target_repos(ctx.client.as_ref(), &account, &group, repo).await?;

    if dry_run {
        let planned: Vec<PrivilegeDisplay> = repos
            .into_iter()
            .map(|repo| PrivilegeDisplay { repo, permission })
            .collect();
        return planned.print(ctx.format);
    }

    let applied = apply_grant(ctx.client.as_ref(), &account, &group, &repos, permission).await?;
    println!(
        "{} Set {} for group '{}' on {} repositories",
        "✓".green(),
        permission,
        group,
        applied
    );
    Ok(())
}

/// Run the restoregroupsgrant command
///
/// The group and the backup file are checked before anything else.
pub async fn restore(
    opts: &GlobalOptions,
    group: Option<&str>,
    backup_path: Option<&str>,
    yes: bool,
    dry_run: bool,
) -> Result<()> {
    let (group, entries) = restore_inputs(group, backup_path)?;
    let config = Config::from_env()?;
    debug!("Loaded {} backup rows for group {}", entries.len(), group);

    if dry_run {
        eprintln!("{}", "DRY RUN - no changes will be made".yellow());
        let planned: Vec<PrivilegeDisplay> = entries.into_iter().map(PrivilegeDisplay::from).collect();
        return planned.print(opts.format);
    }

    if !yes && !ask_confirmation(&restore_prompt(&group, entries.len()))? {
        println!("Cancelled.");
        return Ok(());
    }

    let ctx = CommandContext::with_config(config, opts).await?;
    let account = ctx.account_id().to_string();
    let applied = restore_grants(ctx.client.as_ref(), &account, &group, &entries).await?;
    println!(
        "{} Restored {} grants for group '{}'",
        "✓".green(),
        applied,
        group
    );
    Ok(())
}

/// Group slugs are matched lower-case.
pub fn normalize_group(group: &str) -> String {
    group.trim().to_lowercase()
}

/// Validate the restore options and load the backup rows.
pub fn restore_inputs(
    group: Option<&str>,
    backup_path: Option<&str>,
) -> Result<(String, Vec<BackupEntry>)> {
    let group = group
        .map(normalize_group)
        .filter(|g| !g.is_empty())
        .ok_or(ConfigError::MissingGroup)?;

    let path = backup_path
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or(ConfigError::MissingBackupPath)?;

    let entries = report::read_backup(Path::new(path))?;
    Ok((group, entries))
}

/// Repositories a grant applies to: `repo` alone, or every repository the
/// group currently holds a privilege on.
pub async fn target_repos<C>(
    client: &C,
    account: &str,
    group: &str,
    repo: Option<&str>,
) -> Result<Vec<String>>
where
    C: ListingApi + ?Sized,
{
    match repo {
        Some(repo) => Ok(vec![repo.to_string()]),
        None => Ok(client
            .list_group_privileges(account, group)
            .await?
            .into_iter()
            .map(|p| p.repo)
            .collect()),
    }
}

/// Set `permission` on each repository in order. Stops at the first failure.
pub async fn apply_grant<C>(
    client: &C,
    account: &str,
    group: &str,
    repos: &[String],
    permission: Permission,
) -> Result<usize>
where
    C: PermissionApi + ?Sized,
{
    for repo in repos {
        println!("run on repo {}", repo);
        client
            .set_group_privilege(account, repo, group, permission)
            .await?;
    }
    Ok(repos.len())
}

/// Re-apply every backup row in file order. Stops at the first failure.
pub async fn restore_grants<C>(
    client: &C,
    account: &str,
    group: &str,
    entries: &[BackupEntry],
) -> Result<usize>
where
    C: PermissionApi + ?Sized,
{
    for entry in entries {
        println!("set {} on repo {}", entry.permission, entry.repo);
        client
            .set_group_privilege(account, &entry.repo, group, entry.permission)
            .await?;
    }
    Ok(entries.len())
}

fn grant_prompt(group: &str, permission: Permission, repo: Option<&str>) -> String {
    match repo {
        Some(repo) => format!(
            "This command will change/create the group '{}' with permission '{}' for repo '{}', are you sure? yes/no",
            group, permission, repo
        ),
        None => format!(
            "This command will change/create the group '{}' with permission '{}', are you sure? yes/no",
            group, permission
        ),
    }
}

fn restore_prompt(group: &str, rows: usize) -> String {
    format!(
        "This command will restore {} grants for the group '{}', are you sure? yes/no",
        rows, group
    )
}

/// Only an explicit `yes` confirms.
pub fn is_confirmed(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

fn ask_confirmation(prompt: &str) -> Result<bool> {
    let answer: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(is_confirmed(&answer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockBitbucketClient;
    use crate::client::models::GroupPrivilege;
    use crate::error::{ApiError, Error};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn privilege(repo: &str, privilege: Permission) -> GroupPrivilege {
        GroupPrivilege {
            repo: repo.to_string(),
            privilege,
            group: Some("devs".to_string()),
        }
    }

    fn repos(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_normalize_group() {
        assert_eq!(normalize_group("  DevOps "), "devops");
    }

    #[test]
    fn test_is_confirmed() {
        assert!(is_confirmed("yes"));
        assert!(is_confirmed(" YES\n"));
        assert!(!is_confirmed("y"));
        assert!(!is_confirmed("no"));
        assert!(!is_confirmed(""));
    }

    #[test]
    fn test_grant_prompt_mentions_repo_only_when_given() {
        let single = grant_prompt("devs", Permission::Write, Some("web-app"));
        assert!(single.contains("group 'devs' with permission 'write' for repo 'web-app'"));

        let all = grant_prompt("devs", Permission::Read, None);
        assert!(all.contains("permission 'read', are you sure? yes/no"));
        assert!(!all.contains("for repo"));
    }

    #[tokio::test]
    async fn test_target_repos_single_repo_skips_listing() {
        let mock = MockBitbucketClient::new();
        let targets = target_repos(&mock, "acme", "devs", Some("web-app")).await.unwrap();
        assert_eq!(targets, repos(&["web-app"]));
        assert_eq!(mock.call_counts().await.total(), 0);
    }

    #[tokio::test]
    async fn test_target_repos_lists_group_privileges() {
        let mock = MockBitbucketClient::new()
            .with_privileges(vec![
                privilege("web-app", Permission::Read),
                privilege("api", Permission::Admin),
            ])
            .await;

        let targets = target_repos(&mock, "acme", "devs", None).await.unwrap();
        assert_eq!(targets, repos(&["web-app", "api"]));
    }

    #[tokio::test]
    async fn test_apply_grant_sets_each_repo_in_order() {
        let mock = MockBitbucketClient::new();

        let applied = apply_grant(&mock, "acme", "devs", &repos(&["a", "b"]), Permission::Write)
            .await
            .unwrap();

        assert_eq!(applied, 2);
        let grants = mock.grants().await;
        assert_eq!(grants.len(), 2);
        assert_eq!(grants[0].repo, "a");
        assert_eq!(grants[1].repo, "b");
        assert!(grants.iter().all(|g| g.permission == Permission::Write));
        assert!(grants.iter().all(|g| g.account == "acme" && g.group == "devs"));
    }

    #[tokio::test]
    async fn test_apply_grant_stops_at_first_failure() {
        let mock = MockBitbucketClient::new().with_failing_repo("b", 403).await;

        let err = apply_grant(&mock, "acme", "devs", &repos(&["a", "b", "c"]), Permission::Read)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::Endpoint { status: 403, .. })));
        let grants = mock.grants().await;
        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].repo, "a");
        assert_eq!(mock.call_counts().await.set_group_privilege, 2);
    }

    #[tokio::test]
    async fn test_restore_grants_uses_row_permissions() {
        let mock = MockBitbucketClient::new();
        let entries = vec![
            BackupEntry {
                repo: "web-app".to_string(),
                permission: Permission::Admin,
            },
            BackupEntry {
                repo: "api".to_string(),
                permission: Permission::Read,
            },
        ];

        let applied = restore_grants(&mock, "acme", "devs", &entries).await.unwrap();

        assert_eq!(applied, 2);
        let grants = mock.grants().await;
        assert_eq!(grants[0].permission, Permission::Admin);
        assert_eq!(grants[1].repo, "api");
        assert_eq!(grants[1].permission, Permission::Read);
    }

    #[test]
    fn test_restore_inputs_requires_group() {
        let err = restore_inputs(None, Some("backup.csv")).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::MissingGroup)));

        let err = restore_inputs(Some("  "), Some("backup.csv")).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::MissingGroup)));
    }

    #[test]
    fn test_restore_inputs_requires_existing_backup() {
        let err = restore_inputs(Some("devs"), None).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::MissingBackupPath)));

        let err = restore_inputs(Some("devs"), Some("/nonexistent/backup.csv")).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::BackupNotFound(_))));
    }

    #[test]
    fn test_restore_inputs_reads_backup() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "repo,permission").unwrap();
        writeln!(file, "web-app,write").unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let (group, entries) = restore_inputs(Some("DevS"), Some(&path)).unwrap();

        assert_eq!(group, "devs");
        assert_eq!(
            entries,
            vec![BackupEntry {
                repo: "web-app".to_string(),
                permission: Permission::Write,
            }]
        );
    }
}
