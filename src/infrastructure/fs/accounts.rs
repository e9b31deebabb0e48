//! Owner and group lookup for `[permissions]` and the service config
//!
//! Numeric ids pass through unchanged. Names go to the system name
//! service, so LDAP and sssd accounts resolve like local ones, or to a
//! flat passwd/group file when one is given.

use std::fs;
use std::path::Path;

use crate::error::{StagehandError, StagehandResult};

/// Where owner and group names are looked up
#[derive(Debug, Clone, Copy)]
pub enum AccountDb<'a> {
    /// getpwnam/getgrnam through NSS
    System,
    /// `name:password:id:...` files in passwd/group format
    Files { passwd: &'a Path, group: &'a Path },
}

impl AccountDb<'_> {
    /// Resolve a user name or numeric uid
    pub fn owner(&self, name: &str) -> StagehandResult<u32> {
        if let Ok(id) = name.parse::<u32>() {
            return Ok(id);
        }
        match self {
            AccountDb::System => system_uid(name)
                .ok_or_else(|| unknown("owner", name, "the system user database")),
            AccountDb::Files { passwd, .. } => from_file("owner", name, passwd),
        }
    }

    /// Resolve a group name or numeric gid
    pub fn group(&self, name: &str) -> StagehandResult<u32> {
        if let Ok(id) = name.parse::<u32>() {
            return Ok(id);
        }
        match self {
            AccountDb::System => system_gid(name)
                .ok_or_else(|| unknown("group", name, "the system group database")),
            AccountDb::Files { group, .. } => from_file("group", name, group),
        }
    }
}

#[cfg(unix)]
fn system_uid(name: &str) -> Option<u32> {
    nix::unistd::User::from_name(name)
        .ok()
        .flatten()
        .map(|user| user.uid.as_raw())
}

#[cfg(unix)]
fn system_gid(name: &str) -> Option<u32> {
    nix::unistd::Group::from_name(name)
        .ok()
        .flatten()
        .map(|group| group.gid.as_raw())
}

#[cfg(not(unix))]
fn system_uid(_name: &str) -> Option<u32> {
    None
}

#[cfg(not(unix))]
fn system_gid(_name: &str) -> Option<u32> {
    None
}

fn unknown(kind: &'static str, name: &str, database: impl Into<String>) -> StagehandError {
    StagehandError::UnknownAccount {
        kind,
        name: name.to_string(),
        database: database.into(),
    }
}

/// Look `name` up in a colon-separated database: `name:password:id:...`
fn from_file(kind: &'static str, name: &str, database: &Path) -> StagehandResult<u32> {
    let missing = || unknown(kind, name, database.display().to_string());

    let content = fs::read_to_string(database).map_err(|_| missing())?;
    content
        .lines()
        .filter(|line| !line.starts_with('#'))
        .map(|line| line.split(':').collect::<Vec<_>>())
        .find(|fields| fields.first() == Some(&name))
        .and_then(|fields| fields.get(2)?.parse().ok())
        .ok_or_else(missing)
}
