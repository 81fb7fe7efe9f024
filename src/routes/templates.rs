//! HTML fragments for the htmx UI.
//!
//! Only these templates turn core values into page markup. Echo fields
//! (names, paths) go through maud's own escaping; the code and preview
//! fragments are already escaped by the render pipeline and are spliced in
//! as `PreEscaped`.

use maud::{html, Markup, PreEscaped};
use url::form_urlencoded;

use crate::models::{EntryKind, FileView, RenderMode, RepoRef, TreeEntry};
use crate::render::PREVIEW_SANDBOX;

fn link(route: &str, pairs: &[(&str, &str)]) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        query.append_pair(key, value);
    }
    format!("{}?{}", route, query.finish())
}

fn list_dir_link(owner: &str, repo: &str, path: &str) -> String {
    link("/list-dir", &[("user", owner), ("repo", repo), ("path", path)])
}

fn load_file_link(owner: &str, repo: &str, path: &str, mode: Option<RenderMode>) -> String {
    let mut pairs = vec![("user", owner), ("repo", repo), ("path", path)];
    if let Some(mode) = mode {
        pairs.push(("mode", mode.as_str()));
    }
    link("/load-file", &pairs)
}

/// Folder listing. Directories are shown before files; within each group the
/// upstream order is kept.
pub fn sidebar(repo: &RepoRef, entries: &[TreeEntry], root: bool) -> Markup {
    let dirs = entries.iter().filter(|e| e.kind == EntryKind::Dir);
    let files = entries.iter().filter(|e| e.kind == EntryKind::File);

    html! {
        @if root {
            div class="repo-title" { (repo.to_string()) }
        }
        @if entries.is_empty() {
            p class="empty" { "Empty folder" }
        }
        ul class=(if root { "tree root" } else { "tree" }) {
            @for entry in dirs {
                li class="dir" {
                    span class="entry"
                        hx-get=(list_dir_link(repo.owner(), repo.name(), &entry.path))
                        hx-target="next ul"
                        hx-trigger="click once"
                        hx-swap="innerHTML" { (entry.name) }
                    ul class="children" {}
                }
            }
            @for entry in files {
                li class="file" {
                    span class="entry"
                        hx-get=(load_file_link(repo.owner(), repo.name(), &entry.path, None))
                        hx-target="#viewer"
                        hx-swap="innerHTML" { (entry.name) }
                }
            }
        }
    }
}

fn toggle_link(view: &FileView, mode: RenderMode) -> String {
    load_file_link(&view.owner, &view.repo, &view.path, Some(mode))
}

pub fn file_viewer(view: &FileView) -> Markup {
    let show_preview = matches!(view.mode, RenderMode::Preview | RenderMode::Split);
    let show_code = matches!(view.mode, RenderMode::Code | RenderMode::Split);

    html! {
        div class="file-view" {
            header class="file-header" {
                span class="file-name" { (view.filename) }
                span class="file-path" { (view.owner) "/" (view.repo) "/" (view.path) }
                nav class="mode-toggles" {
                    @for toggle in &view.toggles {
                        button type="button"
                            class=(if toggle.active { "toggle active" } else { "toggle" })
                            disabled[toggle.disabled]
                            hx-get=(toggle_link(view, toggle.mode))
                            hx-target="#viewer"
                            hx-swap="innerHTML" { (toggle.mode.label()) }
                    }
                }
            }
            @if view.preview_unavailable {
                p class="notice" {
                    "Preview is only available for HTML files, showing the code instead."
                }
            }
            div class=(format!("panels {}", view.mode.as_str())) {
                @if show_preview {
                    div id="preview-panel" class="panel" {
                        @match &view.content.preview_html {
                            Some(document) => {
                                iframe class="preview-iframe"
                                    title=(format!("Preview of {}", view.filename))
                                    sandbox=(PREVIEW_SANDBOX)
                                    srcdoc=(PreEscaped(document.as_str())) {}
                            }
                            None => {
                                div class="no-preview" {
                                    "Preview is only available for HTML files."
                                }
                            }
                        }
                    }
                }
                @if show_code {
                    div id="code-panel" class="panel" {
                        pre {
                            code class=(format!("language-{}", view.language)) {
                                (PreEscaped(view.content.code_html.as_str()))
                            }
                        }
                    }
                }
            }
        }
    }
}
