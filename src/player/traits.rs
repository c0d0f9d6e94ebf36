use anyhow::Result;
use std::sync::Arc;
use tokio::sync::watch;

/// Readiness of an engine-owned playback resource.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackStatus {
    Loading,
    Ready,
    Error(String),
}

/// Opaque engine-level playback object, bound to exactly one resolved source
/// locator at creation time.
///
/// `play`/`pause` are fire-and-forget: the engine completes them
/// asynchronously and surfaces the outcome through `watch_status`. The pool is
/// the sole owner of handles; no other component calls `release` directly.
pub trait PlaybackHandle: Send + Sync {
    /// The resolved locator this handle was created for.
    fn locator(&self) -> &str;

    fn play(&self);

    fn pause(&self);

    fn set_looping(&self, looping: bool);

    fn set_muted(&self, muted: bool);

    fn status(&self) -> PlaybackStatus;

    /// Readiness notifications, e.g. to drive a loading indicator until the
    /// handle reports ready.
    fn watch_status(&self) -> watch::Receiver<PlaybackStatus>;

    /// Ask the engine to free the underlying resources. Releasing an
    /// already-released handle is an expected race and may fail.
    fn release(&self) -> Result<()>;
}

/// Capability contract for a platform media engine.
pub trait PlaybackEngine: Send + Sync {
    /// Allocate a new playback resource for `locator`. May begin opening a
    /// connection immediately. Failures propagate to the caller.
    fn create_handle(&self, locator: &str) -> Result<Arc<dyn PlaybackHandle>>;
}
