use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::Result;
use crate::github::SharedBrowser;
use crate::models::{RepoRef, TreeEntry};
use crate::routes::{repo_from_params, templates};

pub fn routes(browser: SharedBrowser) -> Router {
    Router::new()
        .route("/list-dir", get(list_dir))
        .route("/api/v1/repository/tree", get(get_tree))
        .with_state(browser)
}

#[derive(Debug, Deserialize)]
struct TreeQuery {
    user: Option<String>,
    repo: Option<String>,
    path: Option<String>,
}

async fn listing(browser: &SharedBrowser, query: &TreeQuery) -> Result<(RepoRef, Vec<TreeEntry>)> {
    let repo = repo_from_params(query.user.as_deref(), query.repo.as_deref())?;
    let entries = browser
        .list_directory(&repo, query.path.as_deref().unwrap_or(""))
        .await?;
    Ok((repo, entries))
}

async fn list_dir(
    State(browser): State<SharedBrowser>,
    Query(query): Query<TreeQuery>,
) -> Response {
    match listing(&browser, &query).await {
        Ok((repo, entries)) => {
            Html(templates::sidebar(&repo, &entries, false).into_string()).into_response()
        }
        Err(e) => e.to_fragment(),
    }
}

async fn get_tree(
    State(browser): State<SharedBrowser>,
    Query(query): Query<TreeQuery>,
) -> Result<Json<Vec<TreeEntry>>> {
    let (_, entries) = listing(&browser, &query).await?;
    Ok(Json(entries))
}
