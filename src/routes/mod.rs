//! Route handlers - maps HTTP endpoints to the browser core.
//!
//! Each submodule defines routes for a feature area:
//! - `repository`: Load a repository from a pasted URL (GET|POST /load-repo)
//! - `tree`: Lazy folder expansion (GET /list-dir) and JSON listing
//! - `file`: File viewer fragment (GET /load-file) and JSON render plan
//! - `templates`: maud fragments shared by the handlers

pub mod file;
pub mod repository;
pub mod templates;
pub mod tree;

use axum::Router;

use crate::error::{AppError, Result};
use crate::github::SharedBrowser;
use crate::models::RepoRef;

pub fn create_router(browser: SharedBrowser) -> Router {
    Router::new()
        .merge(repository::routes(browser.clone()))
        .merge(tree::routes(browser.clone()))
        .merge(file::routes(browser))
}

/// `user`/`repo` query parameters echoed back by the UI links.
pub(crate) fn repo_from_params(user: Option<&str>, repo: Option<&str>) -> Result<RepoRef> {
    match (user, repo) {
        (Some(user), Some(repo)) => RepoRef::new(user, repo),
        _ => Err(AppError::InvalidParams("user and repo are required".to_string())),
    }
}
