//! Repository models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Repository record as returned by `GET /2.0/repositories/{account}`
#[derive(Debug, Clone, Deserialize)]
pub struct RawRepository {
    #[serde(default)]
    pub uuid: String,

    pub name: String,

    #[serde(default)]
    pub links: Option<RepositoryLinks>,

    /// Primary language, often empty or null
    #[serde(default)]
    pub language: Option<String>,

    /// ISO-8601 timestamp of the last update
    #[serde(default)]
    pub updated_on: String,

    /// Repository size in bytes
    #[serde(default)]
    pub size: Option<u64>,

    #[serde(default)]
    pub slug: String,
}

/// HATEOAS links attached to a repository
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepositoryLinks {
    #[serde(default)]
    pub pullrequests: Option<Link>,
}

/// A single `{ "href": ... }` link
#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    pub href: String,
}

/// Flattened repository record used by listings and reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repository {
    pub uuid: String,
    pub name: String,
    pub pr_url: String,
    pub lang: String,
    pub updated_on: String,
    pub size: u64,
    pub slug: String,
}

impl From<RawRepository> for Repository {
    fn from(raw: RawRepository) -> Self {
        let pr_url = raw
            .links
            .and_then(|links| links.pullrequests)
            .map(|link| link.href)
            .unwrap_or_default();

        Self {
            uuid: raw.uuid,
            name: raw.name,
            pr_url,
            lang: raw.language.unwrap_or_default(),
            updated_on: raw.updated_on,
            size: raw.size.unwrap_or_default(),
            slug: raw.slug,
        }
    }
}

impl Repository {
    /// Short date (`YYYY-MM-DD`) taken from the first ten characters of
    /// `updated_on`. `None` when the timestamp does not start with a date.
    pub fn updated_date(&self) -> Option<NaiveDate> {
        let short = self.updated_on.get(..10)?;
        NaiveDate::parse_from_str(short, "%Y-%m-%d").ok()
    }
}
