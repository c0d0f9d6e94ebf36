use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, trace};

use super::pool::PlayerPool;
use super::traits::PlaybackHandle;
use crate::models::Slide;
use crate::utils::share_links::{UrlMode, to_direct_url};

/// Playback settings applied to newly created handles.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaybackDefaults {
    pub start_muted: bool,
}

struct SlideEntry {
    slide: Slide,
    /// Resolved locator, present for video slides only. Resolved once at
    /// construction so every pool lookup for a slide uses the same key.
    locator: Option<String>,
}

/// Maps "current settled page index" to "which handle is active" and issues
/// play/pause into the shared pool.
///
/// Two controllers (inline and fullscreen) may borrow the same pool, but only
/// the `driving` one issues playback calls; the hidden renderer tracks the
/// index silently. Teardown belongs to the screen instance, never to a
/// controller.
pub struct CarouselController {
    entries: Vec<SlideEntry>,
    pool: Arc<PlayerPool>,
    active_index: Option<usize>,
    driving: bool,
    defaults: PlaybackDefaults,
}

impl CarouselController {
    pub fn new(slides: Vec<Slide>, pool: Arc<PlayerPool>, defaults: PlaybackDefaults) -> Self {
        Self {
            entries: Self::resolve_entries(slides),
            pool,
            active_index: None,
            driving: true,
            defaults,
        }
    }

    /// A renderer that tracks the active index but does not issue playback
    /// calls until it is handed the driver role.
    pub fn passive(slides: Vec<Slide>, pool: Arc<PlayerPool>, defaults: PlaybackDefaults) -> Self {
        Self {
            driving: false,
            ..Self::new(slides, pool, defaults)
        }
    }

    fn resolve_entries(slides: Vec<Slide>) -> Vec<SlideEntry> {
        slides
            .into_iter()
            .map(|slide| {
                let locator = match &slide {
                    Slide::Video { uri, .. } => Some(to_direct_url(uri, UrlMode::Stream)),
                    _ => None,
                };
                SlideEntry { slide, locator }
            })
            .collect()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn active_slide(&self) -> Option<&Slide> {
        self.active_index.map(|i| &self.entries[i].slide)
    }

    /// Handle of the active slide, if it is a video already in the pool.
    pub fn active_handle(&self) -> Option<Arc<dyn PlaybackHandle>> {
        let entry = &self.entries[self.active_index?];
        self.pool.get(entry.locator.as_deref()?)
    }

    pub fn slide_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_driving(&self) -> bool {
        self.driving
    }

    /// Paging motion settled. Computes the landed page from the scroll offset
    /// and activates it; intermediate scroll frames never reach this point.
    pub fn on_scroll_settled(&mut self, offset: f64, page_width: f64) -> Result<()> {
        if self.entries.is_empty() || page_width <= 0.0 {
            return Ok(());
        }
        let landed = (offset / page_width).round();
        let index = if landed.is_sign_negative() { 0 } else { landed as usize };
        self.activate(index)
    }

    /// Make `index` the active slide: pause the previously active video (if
    /// its handle exists in the pool) and start the new one through the pool.
    ///
    /// Out-of-bounds indices are clamped, never an error. The active index
    /// advances even if handle creation fails; the failure propagates so the
    /// caller can show an error state for that slide.
    pub fn activate(&mut self, index: usize) -> Result<()> {
        if self.entries.is_empty() {
            return Ok(());
        }
        let index = index.min(self.entries.len() - 1);
        if Some(index) == self.active_index {
            return Ok(());
        }

        let previous = self.active_index;
        self.active_index = Some(index);
        trace!("Active slide {previous:?} -> {index}");

        if !self.driving {
            return Ok(());
        }
        if let Some(prev) = previous {
            self.pause_if_pooled(prev);
        }
        self.play_active()
    }

    /// Hand the driver role over (or take it back). Becoming the driver
    /// restarts playback of the current slide through the pool, which reuses
    /// the existing handle; ceasing to drive issues no calls at all, so the
    /// handle keeps playing for the renderer taking over.
    pub fn set_driving(&mut self, driving: bool) -> Result<()> {
        if self.driving == driving {
            return Ok(());
        }
        debug!("Carousel driving: {driving}");
        self.driving = driving;
        if driving {
            return self.play_active();
        }
        Ok(())
    }

    /// Track the index without issuing playback calls, regardless of role.
    pub fn sync_active_index(&mut self, index: usize) {
        if self.entries.is_empty() {
            return;
        }
        self.active_index = Some(index.min(self.entries.len() - 1));
    }

    /// Replace the slide sequence after a content update. A now out-of-bounds
    /// active index is clamped into the new bounds.
    pub fn set_slides(&mut self, slides: Vec<Slide>) {
        self.entries = Self::resolve_entries(slides);
        self.active_index = match self.active_index {
            _ if self.entries.is_empty() => None,
            Some(i) => Some(i.min(self.entries.len() - 1)),
            None => None,
        };
    }

    fn pause_if_pooled(&self, index: usize) {
        let entry = &self.entries[index];
        if let Some(locator) = entry.locator.as_deref()
            && let Some(handle) = self.pool.get(locator)
        {
            trace!("Pausing slide {index}");
            handle.pause();
        }
    }

    fn play_active(&self) -> Result<()> {
        let Some(index) = self.active_index else {
            return Ok(());
        };
        let entry = &self.entries[index];
        let (Slide::Video { looping, .. }, Some(locator)) =
            (&entry.slide, entry.locator.as_deref())
        else {
            return Ok(());
        };

        let looping = *looping;
        let muted = self.defaults.start_muted;
        let handle = self.pool.get_or_create_with(locator, |h| {
            h.set_looping(looping);
            h.set_muted(muted);
        })?;
        trace!("Playing slide {index}");
        handle.play();
        Ok(())
    }
}
