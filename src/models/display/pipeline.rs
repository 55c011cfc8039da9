//! Pipeline run display model

use serde::Serialize;
use tabled::Tabled;

use super::common::{MISSING, format_duration, or_missing};
use crate::client::models::PipelineRun;

/// Pipeline run display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct PipelineDisplay {
    #[tabled(rename = "BUILD")]
    pub build_number: u64,

    /// Result name, or state name while running
    #[tabled(rename = "STATE")]
    pub state: String,

    #[tabled(rename = "TRIGGER")]
    pub trigger: String,

    /// `ref_type:ref_name`, e.g. `branch:main`
    #[tabled(rename = "TARGET")]
    pub target: String,

    #[tabled(rename = "CREATOR")]
    pub creator: String,

    #[tabled(rename = "DURATION")]
    pub duration: String,

    #[tabled(rename = "CREATED")]
    pub created_on: String,

    #[tabled(skip)]
    pub completed_on: String,

    #[tabled(skip)]
    pub uuid: String,
}

impl From<PipelineRun> for PipelineDisplay {
    fn from(run: PipelineRun) -> Self {
        let target = match (run.target_type.as_str(), run.target_name.as_str()) {
            ("", "") => MISSING.to_string(),
            ("", name) => name.to_string(),
            (kind, "") => kind.to_string(),
            (kind, name) => format!("{}:{}", kind, name),
        };

        Self {
            build_number: run.build_number,
            state: or_missing(&run.state),
            trigger: or_missing(&run.trigger),
            target,
            creator: or_missing(&run.creator),
            duration: format_duration(run.duration),
            created_on: run.created_on,
            completed_on: run.completed_on,
            uuid: run.uuid,
        }
    }
}
