//! Repository and tree-related DTOs.
//!
//! - `RepoRef`: Validated owner/name pair (every remote call takes one)
//! - `TreeEntry`: Single file/directory in a listing (sidebar + tree API)
//! - `EntryKind`: Closed Dir/File tag
//! - `FileMetadata`: What the contents API says about a single path

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepoRef {
    owner: String,
    name: String,
}

impl RepoRef {
    /// Build a reference from already-split parts (query parameters, parser
    /// captures). Strips a trailing slash and `.git` suffix from the name.
    pub fn new(owner: &str, name: &str) -> Result<Self> {
        let owner = owner.trim();
        let name = name.trim().trim_end_matches('/');
        let name = name.strip_suffix(".git").unwrap_or(name);

        if !is_valid_segment(owner) || !is_valid_segment(name) {
            return Err(AppError::InvalidReference(format!("{}/{}", owner, name)));
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Owner and repository names are restricted to the characters hosting
/// services allow, which also keeps them safe as URL path segments.
fn is_valid_segment(s: &str) -> bool {
    !s.is_empty()
        && s != "."
        && s != ".."
        && s.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TreeEntry {
    pub name: String,
    pub path: String,
    pub kind: EntryKind,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Dir,
    File,
}

impl EntryKind {
    /// Map the contents API `type` field. Anything that is not a directory
    /// (symlink, submodule) is browsed as a file.
    pub fn from_api_type(kind: &str) -> Self {
        if kind == "dir" { EntryKind::Dir } else { EntryKind::File }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub kind: EntryKind,
    pub download_url: Option<String>,
    pub size: Option<u64>,
}
