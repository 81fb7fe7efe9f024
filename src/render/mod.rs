//! File rendering pipeline: classify → sanitize (preview only) → escape → plan.
//!
//! - `classify`: extension table (language, previewable, binary)
//! - `sanitize`: strips remote scripts/stylesheets from HTML previews
//! - `escape`: attribute-embedding vs. markup-body escaping
//! - `plan`: effective view mode and toggle states

pub mod classify;
pub mod escape;
pub mod plan;
pub mod sanitize;

pub use classify::classify;
pub use plan::{RenderPlan, PREVIEW_SANDBOX};
