//! Repository display model

use serde::Serialize;
use tabled::Tabled;

use super::common::{format_size, or_missing, short_date};
use crate::client::models::Repository;

/// Repository display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct RepoDisplay {
    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "SLUG")]
    pub slug: String,

    /// Primary language
    #[tabled(rename = "LANG")]
    pub lang: String,

    #[tabled(rename = "SIZE")]
    pub size: String,

    /// Last update date (YYYY-MM-DD)
    #[tabled(rename = "UPDATED")]
    pub updated_on: String,

    /// Pull requests API link
    #[tabled(skip)]
    pub pr_url: String,

    #[tabled(skip)]
    pub uuid: String,
}

impl From<Repository> for RepoDisplay {
    fn from(repo: Repository) -> Self {
        Self {
            updated_on: short_date(&repo.updated_on),
            size: format_size(repo.size),
            lang: or_missing(&repo.lang),
            name: repo.name,
            slug: repo.slug,
            pr_url: repo.pr_url,
            uuid: repo.uuid,
        }
    }
}
