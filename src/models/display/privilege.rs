//! Group privilege display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::{GroupPrivilege, Permission};
use crate::output::report::BackupEntry;

/// Group privilege display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct PrivilegeDisplay {
    #[tabled(rename = "REPO")]
    pub repo: String,

    #[tabled(rename = "PERMISSION")]
    pub permission: Permission,
}

impl From<GroupPrivilege> for PrivilegeDisplay {
    fn from(privilege: GroupPrivilege) -> Self {
        Self {
            repo: privilege.repo,
            permission: privilege.privilege,
        }
    }
}

impl From<BackupEntry> for PrivilegeDisplay {
    fn from(entry: BackupEntry) -> Self {
        Self {
            repo: entry.repo,
            permission: entry.permission,
        }
    }
}
