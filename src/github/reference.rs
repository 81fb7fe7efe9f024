//! Repository reference parsing.
//!
//! Accepts anything a user is likely to paste into the "repository" box:
//! - `https://github.com/owner/name` (with or without scheme, with `.git`)
//! - `git@github.com:owner/name.git` / `github.com:owner/name`
//! - deep links such as `github.com/owner/name/tree/main/src`
//!
//! Everything after the second path segment is ignored. Input without a
//! host-qualified `owner/name` pair is rejected; nothing is guessed.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AppError, Result};
use crate::models::RepoRef;

// Host is a dotted name ending in an alphabetic label, or a dotted-quad IPv4 address.
static REPO_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)(?:[a-z][a-z0-9+.\-]*://)?(?:[^@/\s]+@)?",
        r"((?:\d{1,3}\.){3}\d{1,3}|(?:[a-z0-9\-]+\.)+[a-z][a-z0-9\-]*[a-z])",
        r"(?::\d+)?[/:]([A-Za-z0-9._\-]+)/([A-Za-z0-9._\-]+)",
    ))
    .expect("repository pattern is valid")
});

pub fn parse(input: &str) -> Result<RepoRef> {
    let input = input.trim();
    if input.is_empty() {
        return Err(AppError::InvalidReference("empty repository reference".to_string()));
    }

    let caps = REPO_PATTERN
        .captures(input)
        .ok_or_else(|| AppError::InvalidReference(input.to_string()))?;

    RepoRef::new(&caps[2], &caps[3])
        .map_err(|_| AppError::InvalidReference(input.to_string()))
}
