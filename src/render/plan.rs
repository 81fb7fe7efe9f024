//! View-mode decision table.
//!
//! Given a classification and whatever mode the client asked for, decides:
//! - the effective mode (preview / code / split)
//! - the escaped code fragment (always) and preview document (HTML only)
//! - which mode toggles are active or disabled
//!
//! A preview request for a non-HTML file degrades to code and is flagged so
//! the UI can say why. Missing or unknown modes default to split when the UI
//! can show both panels, otherwise preview for HTML and code for the rest.

use crate::models::{FileClassification, ModeToggle, RenderMode, RenderedContent};
use crate::render::escape::{escape_for_attribute_embedding, escape_for_markup_body};
use crate::render::sanitize::sanitize;

/// `sandbox` attribute for the preview iframe. Scripts may run, but the
/// document stays in an opaque origin; `allow-same-origin` must never be added.
pub const PREVIEW_SANDBOX: &str = "allow-scripts";

#[derive(Debug, Clone)]
pub struct RenderPlan {
    pub effective_mode: RenderMode,
    pub content: RenderedContent,
    pub preview_available: bool,
    /// Preview was requested but the file has no preview.
    pub preview_unavailable: bool,
    pub toggles: Vec<ModeToggle>,
}

impl RenderPlan {
    pub fn build(
        classification: &FileClassification,
        requested: Option<&str>,
        source: &[u8],
        split_supported: bool,
    ) -> Self {
        let requested = requested.and_then(|m| m.parse::<RenderMode>().ok());
        let (effective_mode, preview_unavailable) =
            resolve_mode(classification, requested, split_supported);

        let content = if classification.is_binary {
            RenderedContent {
                code_html: escape_for_markup_body(&format!(
                    "Binary file ({} bytes) not shown",
                    source.len()
                )),
                preview_html: None,
            }
        } else {
            let text = String::from_utf8_lossy(source);
            RenderedContent {
                code_html: escape_for_markup_body(&text),
                preview_html: classification
                    .is_previewable
                    .then(|| escape_for_attribute_embedding(&sanitize(&text))),
            }
        };

        let toggles = RenderMode::ALL
            .iter()
            .map(|&mode| ModeToggle {
                mode,
                active: mode == effective_mode,
                disabled: match mode {
                    RenderMode::Preview => !classification.is_previewable,
                    RenderMode::Split => !split_supported,
                    RenderMode::Code => false,
                },
            })
            .collect();

        Self {
            effective_mode,
            preview_available: content.preview_html.is_some(),
            preview_unavailable,
            content,
            toggles,
        }
    }
}

/// Returns the effective mode and whether a preview request had to be refused.
pub fn resolve_mode(
    classification: &FileClassification,
    requested: Option<RenderMode>,
    split_supported: bool,
) -> (RenderMode, bool) {
    match requested {
        Some(RenderMode::Preview) if !classification.is_previewable => (RenderMode::Code, true),
        Some(RenderMode::Split) if !split_supported => (default_mode(classification, false), false),
        Some(mode) => (mode, false),
        None => (default_mode(classification, split_supported), false),
    }
}

fn default_mode(classification: &FileClassification, split_supported: bool) -> RenderMode {
    if split_supported {
        RenderMode::Split
    } else if classification.is_previewable {
        RenderMode::Preview
    } else {
        RenderMode::Code
    }
}
