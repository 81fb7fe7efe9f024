//! Repository loading.
//!
//! - GET|POST /load-repo (repoUrl as query or form field)
//!   Parses the reference and returns the root folder listing as the sidebar
//!   fragment. Used by: the repository form on the index page.

use axum::{
    extract::{Form, Query, State},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::github::{reference, SharedBrowser};
use crate::routes::templates;

pub fn routes(browser: SharedBrowser) -> Router {
    Router::new()
        .route("/load-repo", get(load_repo_query).post(load_repo_form))
        .with_state(browser)
}

#[derive(Debug, Deserialize)]
struct LoadRepoParams {
    #[serde(rename = "repoUrl")]
    repo_url: Option<String>,
}

async fn load_repo_query(
    State(browser): State<SharedBrowser>,
    Query(params): Query<LoadRepoParams>,
) -> Response {
    load_repo(&browser, params).await
}

async fn load_repo_form(
    State(browser): State<SharedBrowser>,
    Form(params): Form<LoadRepoParams>,
) -> Response {
    load_repo(&browser, params).await
}

async fn load_repo(browser: &SharedBrowser, params: LoadRepoParams) -> Response {
    match render_root(browser, params).await {
        Ok(html) => html.into_response(),
        Err(e) => e.to_fragment(),
    }
}

async fn render_root(browser: &SharedBrowser, params: LoadRepoParams) -> Result<Html<String>> {
    let input = params
        .repo_url
        .ok_or_else(|| AppError::InvalidReference("a repository URL is required".to_string()))?;
    let repo = reference::parse(&input)?;
    tracing::info!(repo = %repo, "Loading repository");

    let entries = browser.list_directory(&repo, "").await?;
    Ok(Html(templates::sidebar(&repo, &entries, true).into_string()))
}
