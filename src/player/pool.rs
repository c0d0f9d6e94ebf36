use anyhow::{Context, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, trace, warn};

use super::traits::{PlaybackEngine, PlaybackHandle};

/// Keyed pool of persistent playback handles.
///
/// Handles survive renderer unmounts, so the same handle can be reused across
/// inline ⇄ fullscreen transitions without re-opening the underlying resource.
/// One pool lives per screen instance; `release_all` tears every handle down
/// at once when the screen is dismissed.
///
/// Not an LRU cache: there is no capacity bound and no eviction. Slide counts
/// per screen are small.
pub struct PlayerPool {
    engine: Arc<dyn PlaybackEngine>,
    inner: Mutex<PoolInner>,
}

struct PoolInner {
    entries: HashMap<String, Arc<dyn PlaybackHandle>>,
    released: bool,
}

impl PlayerPool {
    pub fn new(engine: Arc<dyn PlaybackEngine>) -> Self {
        Self {
            engine,
            inner: Mutex::new(PoolInner {
                entries: HashMap::new(),
                released: false,
            }),
        }
    }

    /// Return the handle for `locator`, creating it on first request.
    ///
    /// The locator is treated as an opaque key; resolution and validation are
    /// the caller's responsibility. Engine creation failures propagate and
    /// leave the pool unchanged.
    pub fn get_or_create(&self, locator: &str) -> Result<Arc<dyn PlaybackHandle>> {
        self.get_or_create_with(locator, |_| {})
    }

    /// Like [`get_or_create`](Self::get_or_create), with a one-time setup
    /// function applied only when this call performs the creation. Setup is
    /// never reapplied on a hit, so a handle's configured state is not
    /// clobbered by a later caller with different defaults.
    pub fn get_or_create_with(
        &self,
        locator: &str,
        setup: impl FnOnce(&dyn PlaybackHandle),
    ) -> Result<Arc<dyn PlaybackHandle>> {
        let mut inner = self.inner.lock().unwrap();

        if let Some(existing) = inner.entries.get(locator) {
            trace!("Pool hit for {locator}");
            return Ok(existing.clone());
        }

        if inner.released {
            warn!("Pool was already released; creating a fresh handle for {locator}");
        }

        debug!("Creating playback handle for {locator}");
        let handle = self
            .engine
            .create_handle(locator)
            .with_context(|| format!("Failed to create playback handle for {locator}"))?;
        setup(handle.as_ref());
        inner.entries.insert(locator.to_string(), handle.clone());
        Ok(handle)
    }

    /// Pure lookup; never creates.
    pub fn get(&self, locator: &str) -> Option<Arc<dyn PlaybackHandle>> {
        self.inner.lock().unwrap().entries.get(locator).cloned()
    }

    pub fn has(&self, locator: &str) -> bool {
        self.inner.lock().unwrap().entries.contains_key(locator)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().entries.is_empty()
    }

    /// Release every handle and clear the pool.
    ///
    /// Release is best-effort: a handle that was already released externally
    /// (or otherwise fails) is logged and skipped, so one bad handle cannot
    /// block releasing the rest. Never panics, never propagates.
    pub fn release_all(&self) {
        let mut inner = self.inner.lock().unwrap();
        let count = inner.entries.len();
        for (locator, handle) in inner.entries.drain() {
            if let Err(err) = handle.release() {
                warn!("Failed to release handle for {locator}: {err:#}");
            }
        }
        inner.released = true;
        debug!("Released {count} playback handle(s)");
    }
}
