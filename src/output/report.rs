//! CSV report files
//!
//! Reports are plain comma-separated text. The group report doubles as the
//! backup format read back by `restoregroupsgrant`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;
use log::warn;

use crate::client::models::{GroupPrivilege, Permission, PipelineRun, Repository};
use crate::error::{ConfigError, Result};

/// Host prefix of generated git remotes
const GIT_REMOTE_HOST: &str = "git@bitbucket.org";

/// File name of the account repository report
pub const REPOS_REPORT: &str = "repos.csv";

pub fn pipelines_report_name(repo: &str) -> String {
    format!("pipelines_{}.csv", repo)
}

pub fn group_report_name(group: &str) -> String {
    format!("group_{}_info.csv", group)
}

pub fn user_report_name(user: &str) -> String {
    format!("user_{}_info.csv", user)
}

/// A repository reduced to its git remote and last update date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    pub remote: String,
    pub updated_on: NaiveDate,
}

/// Git remotes of `repos`, most recently updated first.
///
/// Repositories whose `updated_on` does not start with a `YYYY-MM-DD` date
/// are logged and left out.
pub fn remotes_by_date(account: &str, repos: &[Repository]) -> Vec<RemoteEntry> {
    let mut entries: Vec<RemoteEntry> = repos
        .iter()
        .filter_map(|repo| match repo.updated_date() {
            Some(updated_on) => Some(RemoteEntry {
                remote: format!("{}:{}/{}", GIT_REMOTE_HOST, account, repo.name),
                updated_on,
            }),
            None => {
                warn!(
                    "Skipping repository {} with unreadable update date '{}'",
                    repo.name, repo.updated_on
                );
                None
            }
        })
        .collect();

    entries.sort_by(|a, b| b.updated_on.cmp(&a.updated_on));
    entries
}

/// `git_remote , updated_on` report, newest first
pub fn write_remotes(output: &mut dyn Write, entries: &[RemoteEntry]) -> Result<()> {
    writeln!(output, "git_remote , updated_on")?;
    for entry in entries {
        writeln!(
            output,
            "{} , {}",
            entry.remote,
            entry.updated_on.format("%Y-%m-%d")
        )?;
    }
    Ok(())
}

/// One row per pipeline run, in fetch order
pub fn write_pipelines(output: &mut dyn Write, runs: &[PipelineRun]) -> Result<()> {
    writeln!(
        output,
        "uuid,repo,state,build_number,creator,target_type,target_name,trigger,duration,created_on,completed_on"
    )?;
    for run in runs {
        writeln!(
            output,
            "{},{},{},{},{},{},{},{},{},{},{}",
            field(&run.uuid),
            field(&run.repo),
            field(&run.state),
            run.build_number,
            field(&run.creator),
            field(&run.target_type),
            field(&run.target_name),
            field(&run.trigger),
            run.duration.map(|d| d.to_string()).unwrap_or_default(),
            field(&run.created_on),
            field(&run.completed_on),
        )?;
    }
    Ok(())
}

/// `repo,permission` report
pub fn write_privileges(output: &mut dyn Write, privileges: &[GroupPrivilege]) -> Result<()> {
    writeln!(output, "repo,permission")?;
    for privilege in privileges {
        writeln!(output, "{},{}", field(&privilege.repo), privilege.privilege)?;
    }
    Ok(())
}

/// Create (or truncate) `path` and hand a buffered writer to `write`.
pub fn write_file<P, F>(path: P, write: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let mut file = BufWriter::new(File::create(path)?);
    write(&mut file)?;
    file.flush()?;
    Ok(())
}

/// Quote a field when it contains a separator, quote or line break.
fn field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// One `(repo, permission)` row of a backup file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupEntry {
    pub repo: String,
    pub permission: Permission,
}

/// Read and parse a backup file. Fails if the file does not exist.
pub fn read_backup(path: &Path) -> Result<Vec<BackupEntry>> {
    if !path.is_file() {
        return Err(ConfigError::BackupNotFound(path.display().to_string()).into());
    }
    let content = std::fs::read_to_string(path)?;
    parse_backup(&content)
}

/// Parse backup CSV content.
///
/// The header must name `repo` and `permission` columns (any order, other
/// columns ignored). Values are trimmed and blank lines skipped.
pub fn parse_backup(content: &str) -> Result<Vec<BackupEntry>> {
    let invalid = |reason: String| ConfigError::InvalidBackup(reason);

    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header) = lines
        .next()
        .ok_or_else(|| invalid("file is empty".to_string()))?;
    let columns: Vec<String> = split_row(header)
        .into_iter()
        .map(|c| c.trim().to_ascii_lowercase())
        .collect();

    let position = |name: &str| {
        columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| invalid(format!("missing '{}' column", name)))
    };
    let repo_idx = position("repo")?;
    let permission_idx = position("permission")?;

    let mut entries = Vec::new();
    for (index, line) in lines {
        let line_no = index + 1;
        let fields = split_row(line);

        let value = |idx: usize| {
            fields
                .get(idx)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| invalid(format!("line {}: missing value", line_no)))
        };

        let repo = value(repo_idx)?;
        let permission = value(permission_idx)?
            .parse::<Permission>()
            .map_err(|e| invalid(format!("line {}: {}", line_no, e)))?;

        entries.push(BackupEntry { repo, permission });
    }

    Ok(entries)
}

/// Split one CSV line, honouring double-quoted fields.
fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if quoted && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => quoted = !quoted,
            ',' if !quoted => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}
