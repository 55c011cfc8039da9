//! Group privilege models (legacy 1.0 API)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Access level a group can hold on a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Read,
    Write,
    Admin,
}

impl Permission {
    /// Wire value, sent verbatim as the PUT body
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Read => "read",
            Permission::Write => "write",
            Permission::Admin => "admin",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "read" => Ok(Permission::Read),
            "write" => Ok(Permission::Write),
            "admin" => Ok(Permission::Admin),
            other => Err(format!(
                "unknown permission '{}' (expected read, write or admin)",
                other
            )),
        }
    }
}

/// Group privilege as returned by
/// `GET /1.0/group-privileges/{account}/{account}/{group}`
#[derive(Debug, Clone, Deserialize)]
pub struct RawGroupPrivilege {
    /// Full repository path, `account/slug`
    pub repo: String,

    pub privilege: Permission,

    #[serde(default)]
    pub group: Option<GroupRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupRef {
    #[serde(default)]
    pub slug: String,
}

/// Flattened privilege record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupPrivilege {
    /// Repository slug without the account prefix
    pub repo: String,
    pub privilege: Permission,
    pub group: Option<String>,
}

impl From<RawGroupPrivilege> for GroupPrivilege {
    fn from(raw: RawGroupPrivilege) -> Self {
        let repo = raw
            .repo
            .rsplit('/')
            .next()
            .unwrap_or(raw.repo.as_str())
            .to_string();

        Self {
            repo,
            privilege: raw.privilege,
            group: raw.group.map(|g| g.slug).filter(|s| !s.is_empty()),
        }
    }
}
