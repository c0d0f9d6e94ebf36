use anyhow::{Context, Result};
use gstreamer as gst;
use gstreamer::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;
use tracing::{debug, error, trace, warn};

use super::traits::{PlaybackEngine, PlaybackHandle, PlaybackStatus};

/// GStreamer-backed playback engine. Each handle owns one `playbin3`
/// pipeline bound to a single URI.
pub struct GStreamerEngine;

impl GStreamerEngine {
    pub fn new() -> Result<Self> {
        gst::init().context("Failed to initialize GStreamer")?;
        debug!("GStreamer initialized");
        Ok(Self)
    }
}

impl PlaybackEngine for GStreamerEngine {
    fn create_handle(&self, locator: &str) -> Result<Arc<dyn PlaybackHandle>> {
        Ok(Arc::new(GStreamerHandle::new(locator)?))
    }
}

pub struct GStreamerHandle {
    locator: String,
    playbin: gst::Element,
    looping: Arc<AtomicBool>,
    status_rx: watch::Receiver<PlaybackStatus>,
}

impl GStreamerHandle {
    fn new(locator: &str) -> Result<Self> {
        trace!("Creating playbin3 for {locator}");
        let playbin = gst::ElementFactory::make("playbin3")
            .property("uri", locator)
            .build()
            .context(
                "Failed to create playbin3 element - GStreamer plugins may not be properly installed",
            )?;

        let (status_tx, status_rx) = watch::channel(PlaybackStatus::Loading);
        let bus = playbin.bus().context("Failed to get playbin bus")?;
        bus.set_sync_handler(move |_, msg| {
            use gst::MessageView;
            match msg.view() {
                MessageView::Error(err) => {
                    error!("Pipeline error: {} ({:?})", err.error(), err.debug());
                    let _ = status_tx.send(PlaybackStatus::Error(err.error().to_string()));
                }
                MessageView::AsyncDone(_) => {
                    let _ = status_tx.send(PlaybackStatus::Ready);
                }
                MessageView::Buffering(buffering) => {
                    let status = if buffering.percent() < 100 {
                        PlaybackStatus::Loading
                    } else {
                        PlaybackStatus::Ready
                    };
                    let _ = status_tx.send(status);
                }
                _ => {}
            }
            gst::BusSyncReply::Drop
        });

        // Loop playback by requeueing the same URI near end of stream.
        let looping = Arc::new(AtomicBool::new(false));
        let loop_flag = looping.clone();
        let uri = locator.to_string();
        playbin.connect("about-to-finish", false, move |values| {
            if loop_flag.load(Ordering::Relaxed)
                && let Ok(playbin) = values[0].get::<gst::Element>()
            {
                trace!("Requeueing {uri} for loop playback");
                playbin.set_property("uri", uri.as_str());
            }
            None
        });

        // Preroll to Paused so resource allocation (connection open,
        // buffering) starts at creation; AsyncDone flips status to Ready.
        if let Err(err) = playbin.set_state(gst::State::Paused) {
            warn!("Failed to start preroll for {locator}: {err:?}");
        }

        Ok(Self {
            locator: locator.to_string(),
            playbin,
            looping,
            status_rx,
        })
    }
}

impl PlaybackHandle for GStreamerHandle {
    fn locator(&self) -> &str {
        &self.locator
    }

    fn play(&self) {
        trace!("Starting playback for {}", self.locator);
        if let Err(err) = self.playbin.set_state(gst::State::Playing) {
            warn!("Failed to start playback for {}: {err:?}", self.locator);
        }
    }

    fn pause(&self) {
        trace!("Pausing playback for {}", self.locator);
        if let Err(err) = self.playbin.set_state(gst::State::Paused) {
            warn!("Failed to pause playback for {}: {err:?}", self.locator);
        }
    }

    fn set_looping(&self, looping: bool) {
        self.looping.store(looping, Ordering::Relaxed);
    }

    fn set_muted(&self, muted: bool) {
        self.playbin.set_property("mute", muted);
    }

    fn status(&self) -> PlaybackStatus {
        self.status_rx.borrow().clone()
    }

    fn watch_status(&self) -> watch::Receiver<PlaybackStatus> {
        self.status_rx.clone()
    }

    fn release(&self) -> Result<()> {
        debug!("Releasing pipeline for {}", self.locator);
        self.playbin
            .set_state(gst::State::Null)
            .map(|_| ())
            .map_err(|err| anyhow::anyhow!("Failed to shut down pipeline: {err:?}"))
    }
}
