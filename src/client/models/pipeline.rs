//! Pipeline run models

use serde::{Deserialize, Serialize};

/// Pipeline run as returned by `GET /2.0/repositories/{account}/{repo}/pipelines/`
#[derive(Debug, Clone, Deserialize)]
pub struct RawPipelineRun {
    #[serde(default)]
    pub uuid: String,

    #[serde(default)]
    pub repository: Option<NamedRef>,

    #[serde(default)]
    pub state: Option<PipelineState>,

    #[serde(default)]
    pub build_number: u64,

    #[serde(default)]
    pub creator: Option<Creator>,

    #[serde(default)]
    pub target: Option<PipelineTarget>,

    #[serde(default)]
    pub trigger: Option<NamedRef>,

    #[serde(default)]
    pub duration_in_seconds: Option<u64>,

    #[serde(default)]
    pub created_on: String,

    #[serde(default)]
    pub completed_on: Option<String>,
}

/// Any `{ "name": ... }` object (repository, trigger, result)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub name: String,
}

/// Pipeline state; `result` is only present once the run has finished
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineState {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub result: Option<NamedRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Creator {
    #[serde(default)]
    pub display_name: String,

    #[serde(default)]
    pub username: String,
}

/// What the run was built from (branch, tag, commit)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineTarget {
    #[serde(default)]
    pub ref_type: Option<String>,

    #[serde(default)]
    pub ref_name: Option<String>,
}

/// Flattened pipeline run record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineRun {
    pub uuid: String,
    pub repo: String,
    pub state: String,
    pub build_number: u64,
    pub creator: String,
    pub target_type: String,
    pub target_name: String,
    pub trigger: String,
    pub duration: Option<u64>,
    pub created_on: String,
    pub completed_on: String,
}

impl From<RawPipelineRun> for PipelineRun {
    fn from(raw: RawPipelineRun) -> Self {
        // Runs still in progress have no result yet; fall back to the state name.
        let state = raw
            .state
            .map(|s| s.result.map(|r| r.name).unwrap_or(s.name))
            .unwrap_or_default();

        let creator = raw
            .creator
            .map(|c| format!("{}/{}", c.display_name, c.username))
            .unwrap_or_default();

        let target = raw.target.unwrap_or_default();

        Self {
            uuid: raw.uuid,
            repo: raw.repository.map(|r| r.name).unwrap_or_default(),
            state,
            build_number: raw.build_number,
            creator,
            target_type: target.ref_type.unwrap_or_default(),
            target_name: target.ref_name.unwrap_or_default(),
            trigger: raw.trigger.map(|t| t.name).unwrap_or_default(),
            duration: raw.duration_in_seconds,
            created_on: raw.created_on,
            completed_on: raw.completed_on.unwrap_or_default(),
        }
    }
}
