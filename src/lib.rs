// Content-browser core: content tree, share-link resolution, and the pooled
// playback-handle cache with its carousel activation logic. UI rendering,
// navigation, and orientation policy live outside this crate.

pub mod config;
pub mod content;
pub mod events;
pub mod models;
pub mod player;
pub mod utils;
