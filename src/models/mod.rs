//! Data transfer objects shared by the fetcher, renderer and routes.
//!
//! - `tree`: RepoRef, TreeEntry, EntryKind, FileMetadata
//! - `render`: FileClassification, RenderMode, RenderedContent, FileView

pub mod render;
pub mod tree;

pub use render::*;
pub use tree::*;
