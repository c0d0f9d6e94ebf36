use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, warn};

use super::carousel::{CarouselController, PlaybackDefaults};
use super::pool::PlayerPool;
use super::traits::{PlaybackEngine, PlaybackHandle};
use crate::events::{EventBus, SessionEvent};
use crate::models::Slide;

/// Screen-instance owner of one pool and its renderers.
///
/// Constructed when a detail screen mounts and torn down exactly once when it
/// is dismissed. The inline carousel drives playback by default; opening
/// fullscreen mounts a second renderer over the SAME pool and hands it the
/// driver role, so the active slide's handle is reused with no reload. The
/// hidden renderer stays mounted across toggles.
pub struct SubtopicSession {
    pool: Arc<PlayerPool>,
    inline: CarouselController,
    fullscreen: Option<CarouselController>,
    slides: Vec<Slide>,
    defaults: PlaybackDefaults,
    is_fullscreen: bool,
    events: EventBus,
    torn_down: bool,
}

impl SubtopicSession {
    pub fn new(
        slides: Vec<Slide>,
        engine: Arc<dyn PlaybackEngine>,
        defaults: PlaybackDefaults,
    ) -> Self {
        let pool = Arc::new(PlayerPool::new(engine));
        let inline = CarouselController::new(slides.clone(), pool.clone(), defaults);
        Self {
            pool,
            inline,
            fullscreen: None,
            slides,
            defaults,
            is_fullscreen: false,
            events: EventBus::new(),
            torn_down: false,
        }
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn pool(&self) -> &Arc<PlayerPool> {
        &self.pool
    }

    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    pub fn active_index(&self) -> Option<usize> {
        self.driver().active_index()
    }

    pub fn active_slide(&self) -> Option<&Slide> {
        self.driver().active_slide()
    }

    /// Handle of the active video slide, for readiness watching.
    pub fn active_handle(&self) -> Option<Arc<dyn PlaybackHandle>> {
        self.driver().active_handle()
    }

    /// Route a settle event to whichever renderer currently drives playback.
    pub fn on_scroll_settled(&mut self, offset: f64, page_width: f64) -> Result<()> {
        if self.torn_down {
            warn!("Settle event after teardown ignored");
            return Ok(());
        }
        let before = self.driver().active_index();
        let result = self.driver_mut().on_scroll_settled(offset, page_width);
        self.emit_if_moved(before);
        result
    }

    pub fn activate(&mut self, index: usize) -> Result<()> {
        if self.torn_down {
            warn!("Activation after teardown ignored");
            return Ok(());
        }
        let before = self.driver().active_index();
        let result = self.driver_mut().activate(index);
        self.emit_if_moved(before);
        result
    }

    /// Open the fullscreen renderer at `index` and hand it playback. The
    /// active slide's handle is looked up in the shared pool, so entering
    /// fullscreen at the current index creates nothing and re-buffers
    /// nothing. Idempotent while already fullscreen (only the index moves).
    pub fn enter_fullscreen_at(&mut self, index: usize) -> Result<()> {
        if self.torn_down {
            warn!("Fullscreen request after teardown ignored");
            return Ok(());
        }
        if self.is_fullscreen {
            return self.activate(index);
        }

        // Land the driving renderer on the target slide first so the handoff
        // starts from a single playing handle.
        self.inline.activate(index)?;
        self.inline.set_driving(false)?;

        let fullscreen = self.fullscreen.get_or_insert_with(|| {
            CarouselController::passive(self.slides.clone(), self.pool.clone(), self.defaults)
        });
        fullscreen.sync_active_index(index);
        fullscreen.set_driving(true)?;
        self.is_fullscreen = true;

        let index = self.driver().active_index().unwrap_or(0);
        debug!("Entered fullscreen at slide {index}");
        self.events.emit(SessionEvent::FullscreenChanged {
            active: true,
            index,
        });
        Ok(())
    }

    /// Open fullscreen at whatever slide the inline carousel is on.
    pub fn enter_fullscreen(&mut self) -> Result<()> {
        self.enter_fullscreen_at(self.inline.active_index().unwrap_or(0))
    }

    /// Return playback to the inline renderer, following wherever the user
    /// swiped while fullscreen. Idempotent when not fullscreen.
    pub fn exit_fullscreen(&mut self) -> Result<()> {
        if self.torn_down || !self.is_fullscreen {
            return Ok(());
        }

        let index = self
            .fullscreen
            .as_ref()
            .and_then(|c| c.active_index())
            .unwrap_or(0);
        if let Some(fullscreen) = self.fullscreen.as_mut() {
            fullscreen.set_driving(false)?;
        }
        self.inline.sync_active_index(index);
        self.inline.set_driving(true)?;
        self.is_fullscreen = false;

        debug!("Exited fullscreen at slide {index}");
        self.events.emit(SessionEvent::FullscreenChanged {
            active: false,
            index,
        });
        Ok(())
    }

    /// Content update; both renderers clamp their active index into the new
    /// bounds.
    pub fn set_slides(&mut self, slides: Vec<Slide>) {
        self.slides = slides;
        self.inline.set_slides(self.slides.clone());
        if let Some(fullscreen) = self.fullscreen.as_mut() {
            fullscreen.set_slides(self.slides.clone());
        }
    }

    /// Release every pooled handle. Runs at most once; also invoked from
    /// `Drop` so a dismissed screen can never leak engine resources.
    pub fn teardown(&mut self) {
        if self.torn_down {
            debug!("Teardown already ran for this session");
            return;
        }
        self.torn_down = true;
        self.pool.release_all();
        self.events.emit(SessionEvent::TornDown);
    }

    fn driver(&self) -> &CarouselController {
        match (&self.fullscreen, self.is_fullscreen) {
            (Some(fullscreen), true) => fullscreen,
            _ => &self.inline,
        }
    }

    fn driver_mut(&mut self) -> &mut CarouselController {
        match (&mut self.fullscreen, self.is_fullscreen) {
            (Some(fullscreen), true) => fullscreen,
            _ => &mut self.inline,
        }
    }

    fn emit_if_moved(&self, before: Option<usize>) {
        let after = self.driver().active_index();
        if after != before
            && let Some(index) = after
        {
            self.events.emit(SessionEvent::SlideActivated { index });
        }
    }
}

impl Drop for SubtopicSession {
    fn drop(&mut self) {
        self.teardown();
    }
}
