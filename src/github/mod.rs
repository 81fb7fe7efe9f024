pub mod browser;
pub mod cache;
pub mod client;
pub mod reference;

pub use browser::{RepoBrowser, SharedBrowser};
