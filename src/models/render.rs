//! Rendering DTOs.
//!
//! - `FileClassification`: What the file name says about a file
//! - `RenderMode`: preview / code / split
//! - `RenderedContent`: Escaped fragments ready for a template
//! - `ModeToggle`: One view toggle button state
//! - `FileView`: Render plan plus echo fields (file JSON API + viewer fragment)

use std::str::FromStr;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileClassification {
    pub extension: String,
    pub is_previewable: bool,
    pub highlight_language: &'static str,
    pub is_binary: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    Preview,
    Code,
    Split,
}

impl RenderMode {
    pub const ALL: [RenderMode; 3] = [RenderMode::Preview, RenderMode::Code, RenderMode::Split];

    pub fn as_str(self) -> &'static str {
        match self {
            RenderMode::Preview => "preview",
            RenderMode::Code => "code",
            RenderMode::Split => "split",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RenderMode::Preview => "Preview",
            RenderMode::Code => "Code",
            RenderMode::Split => "Split",
        }
    }
}

impl FromStr for RenderMode {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preview" => Ok(RenderMode::Preview),
            "code" => Ok(RenderMode::Code),
            "split" => Ok(RenderMode::Split),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedContent {
    pub code_html: String,
    pub preview_html: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModeToggle {
    pub mode: RenderMode,
    pub active: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileView {
    pub owner: String,
    pub repo: String,
    pub path: String,
    pub filename: String,
    pub mode: RenderMode,
    pub language: &'static str,
    pub preview_available: bool,
    pub preview_unavailable: bool,
    pub toggles: Vec<ModeToggle>,
    #[serde(flatten)]
    pub content: RenderedContent,
}
