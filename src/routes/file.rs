//! File viewing endpoints.
//!
//! - GET /load-file?user=&repo=&path=&mode=
//!   Viewer fragment: mode toggles, sandboxed preview and/or code block.
//!   Used by: file entries in the sidebar and the toggle buttons
//!
//! - GET /api/v1/repository/file?user=&repo=&path=&mode=
//!   Same render plan as JSON (`FileView`), content already escaped.

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::github::SharedBrowser;
use crate::models::FileView;
use crate::routes::{repo_from_params, templates};

pub fn routes(browser: SharedBrowser) -> Router {
    Router::new()
        .route("/load-file", get(load_file))
        .route("/api/v1/repository/file", get(get_file))
        .with_state(browser)
}

#[derive(Debug, Deserialize)]
struct FileQuery {
    user: Option<String>,
    repo: Option<String>,
    path: Option<String>,
    mode: Option<String>,
}

async fn file_view(browser: &SharedBrowser, query: &FileQuery) -> Result<FileView> {
    let repo = repo_from_params(query.user.as_deref(), query.repo.as_deref())?;
    let path = query
        .path
        .as_deref()
        .ok_or_else(|| AppError::InvalidParams("path is required".to_string()))?;
    browser.load_file(&repo, path, query.mode.as_deref()).await
}

async fn load_file(
    State(browser): State<SharedBrowser>,
    Query(query): Query<FileQuery>,
) -> Response {
    match file_view(&browser, &query).await {
        Ok(view) => Html(templates::file_viewer(&view).into_string()).into_response(),
        Err(e) => {
            tracing::warn!(path = ?query.path, error = %e, "Could not load file");
            e.to_fragment()
        }
    }
}

async fn get_file(
    State(browser): State<SharedBrowser>,
    Query(query): Query<FileQuery>,
) -> Result<Json<FileView>> {
    let view = file_view(&browser, &query).await?;
    Ok(Json(view))
}
