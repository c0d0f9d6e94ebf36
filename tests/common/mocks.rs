use anyhow::Result;
use atlas::player::{PlaybackEngine, PlaybackHandle, PlaybackStatus};
use atlas::utils::AppError;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

pub struct MockHandle {
    locator: String,
    fail_release: bool,
    playing: AtomicBool,
    released: AtomicBool,
    play_calls: AtomicUsize,
    pause_calls: AtomicUsize,
    release_calls: AtomicUsize,
    looping: Mutex<Option<bool>>,
    muted: Mutex<Option<bool>>,
    status_tx: watch::Sender<PlaybackStatus>,
    status_rx: watch::Receiver<PlaybackStatus>,
}

impl MockHandle {
    fn new(locator: &str, fail_release: bool) -> Self {
        let (status_tx, status_rx) = watch::channel(PlaybackStatus::Loading);
        Self {
            locator: locator.to_string(),
            fail_release,
            playing: AtomicBool::new(false),
            released: AtomicBool::new(false),
            play_calls: AtomicUsize::new(0),
            pause_calls: AtomicUsize::new(0),
            release_calls: AtomicUsize::new(0),
            looping: Mutex::new(None),
            muted: Mutex::new(None),
            status_tx,
            status_rx,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }

    pub fn play_calls(&self) -> usize {
        self.play_calls.load(Ordering::SeqCst)
    }

    pub fn pause_calls(&self) -> usize {
        self.pause_calls.load(Ordering::SeqCst)
    }

    pub fn release_calls(&self) -> usize {
        self.release_calls.load(Ordering::SeqCst)
    }

    pub fn looping(&self) -> Option<bool> {
        *self.looping.lock().unwrap()
    }

    pub fn muted(&self) -> Option<bool> {
        *self.muted.lock().unwrap()
    }

    pub fn set_status(&self, status: PlaybackStatus) {
        let _ = self.status_tx.send(status);
    }
}

impl PlaybackHandle for MockHandle {
    fn locator(&self) -> &str {
        &self.locator
    }

    fn play(&self) {
        self.play_calls.fetch_add(1, Ordering::SeqCst);
        self.playing.store(true, Ordering::SeqCst);
    }

    fn pause(&self) {
        self.pause_calls.fetch_add(1, Ordering::SeqCst);
        self.playing.store(false, Ordering::SeqCst);
    }

    fn set_looping(&self, looping: bool) {
        *self.looping.lock().unwrap() = Some(looping);
    }

    fn set_muted(&self, muted: bool) {
        *self.muted.lock().unwrap() = Some(muted);
    }

    fn status(&self) -> PlaybackStatus {
        self.status_rx.borrow().clone()
    }

    fn watch_status(&self) -> watch::Receiver<PlaybackStatus> {
        self.status_rx.clone()
    }

    fn release(&self) -> Result<()> {
        self.release_calls.fetch_add(1, Ordering::SeqCst);
        self.released.store(true, Ordering::SeqCst);
        self.playing.store(false, Ordering::SeqCst);
        if self.fail_release {
            return Err(AppError::Playback("handle was already released".to_string()).into());
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MockEngine {
    created: Mutex<Vec<String>>,
    handles: Mutex<Vec<Arc<MockHandle>>>,
    fail_creation: Mutex<HashSet<String>>,
    fail_release: Mutex<HashSet<String>>,
}

impl MockEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_creation_for(&self, locator: &str) {
        self.fail_creation.lock().unwrap().insert(locator.to_string());
    }

    pub fn fail_release_for(&self, locator: &str) {
        self.fail_release.lock().unwrap().insert(locator.to_string());
    }

    /// Locators passed to `create_handle`, in call order.
    pub fn created(&self) -> Vec<String> {
        self.created.lock().unwrap().clone()
    }

    pub fn total_created(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    pub fn created_for(&self, locator: &str) -> usize {
        self.created
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.as_str() == locator)
            .count()
    }

    /// Most recently created handle for `locator`.
    pub fn handle_for(&self, locator: &str) -> Option<Arc<MockHandle>> {
        self.handles
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|h| h.locator == locator)
            .cloned()
    }

    pub fn handles(&self) -> Vec<Arc<MockHandle>> {
        self.handles.lock().unwrap().clone()
    }

    /// Handles currently in the playing state.
    pub fn playing_count(&self) -> usize {
        self.handles
            .lock()
            .unwrap()
            .iter()
            .filter(|h| h.is_playing())
            .count()
    }
}

impl PlaybackEngine for MockEngine {
    fn create_handle(&self, locator: &str) -> Result<Arc<dyn PlaybackHandle>> {
        if self.fail_creation.lock().unwrap().contains(locator) {
            return Err(
                AppError::Playback(format!("injected creation failure for {locator}")).into(),
            );
        }
        let handle = Arc::new(MockHandle::new(
            locator,
            self.fail_release.lock().unwrap().contains(locator),
        ));
        self.created.lock().unwrap().push(locator.to_string());
        self.handles.lock().unwrap().push(handle.clone());
        Ok(handle)
    }
}
