use tokio::sync::broadcast;
use tracing::trace;

/// Notifications a screen session emits for UI layers (loading indicators,
/// page dots, analytics). Emission never blocks; lagging subscribers drop
/// the oldest events.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SlideActivated { index: usize },
    FullscreenChanged { active: bool, index: usize },
    TornDown,
}

pub struct EventBus {
    sender: broadcast::Sender<SessionEvent>,
}

impl EventBus {
    const CAPACITY: usize = 64;

    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(Self::CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    pub fn emit(&self, event: SessionEvent) {
        trace!("Session event: {event:?}");
        // No subscribers is fine; events are advisory.
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}
