//! Pipeline commands

use std::path::Path;

use colored::Colorize;
use log::debug;

use crate::cli::{CommandContext, GlobalOptions};
use crate::client::models::PipelineRun;
use crate::error::Result;
use crate::models::PipelineDisplay;
use crate::output::Formattable;
use crate::output::report;

/// Run the pipelines command
pub async fn list(opts: &GlobalOptions, repo: &str, filereport: bool) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let account = ctx.account_id().to_string();

    debug!("Fetching pipelines for {}/{}", account, repo);
    let runs = ctx.client.list_pipelines(&account, repo).await?;
    debug!("Fetched {} pipeline runs", runs.len());

    if filereport {
        let path = report::pipelines_report_name(repo);
        save_pipelines(Path::new(&path), &runs)
    } else {
        let display: Vec<PipelineDisplay> = runs.into_iter().map(PipelineDisplay::from).collect();
        display.print(ctx.format)
    }
}

/// Write the pipeline runs report to `path`, in fetch order.
pub fn save_pipelines(path: &Path, runs: &[PipelineRun]) -> Result<()> {
    eprintln!("{} Saving pipelines report to file...", ">".green());
    report::write_file(path, |out| report::write_pipelines(out, runs))?;
    eprintln!("{} Pipelines report saved. ({})", ">".green(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ListingApi, MockBitbucketClient};
    use tempfile::tempdir;

    fn run(build_number: u64, state: &str) -> PipelineRun {
        PipelineRun {
            uuid: format!("{{run-{build_number}}}"),
            repo: "web-app".to_string(),
            state: state.to_string(),
            build_number,
            creator: "Jane Doe/jdoe".to_string(),
            target_type: "branch".to_string(),
            target_name: "main".to_string(),
            trigger: "PUSH".to_string(),
            duration: Some(60),
            created_on: "2024-03-01T10:00:00Z".to_string(),
            completed_on: "2024-03-01T10:01:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_pipelines_are_scoped_to_repo() {
        let mut other = run(9, "STOPPED");
        other.repo = "api".to_string();
        let mock = MockBitbucketClient::new()
            .with_pipelines(vec![run(1, "SUCCESSFUL"), other])
            .await;

        let runs = mock.list_pipelines("acme", "web-app").await.unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].build_number, 1);
    }

    #[test]
    fn test_save_pipelines_keeps_fetch_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(report::pipelines_report_name("web-app"));

        save_pipelines(&path, &[run(2, "FAILED"), run(1, "SUCCESSFUL")]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("uuid,repo,state,build_number"));
        assert!(lines[1].contains(",FAILED,2,"));
        assert!(lines[2].contains(",SUCCESSFUL,1,"));
        assert!(path.ends_with("pipelines_web-app.csv"));
    }
}
