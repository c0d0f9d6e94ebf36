pub mod carousel;
#[cfg(feature = "gstreamer")]
pub mod gstreamer_engine;
pub mod pool;
pub mod session;
pub mod traits;

pub use carousel::{CarouselController, PlaybackDefaults};
#[cfg(feature = "gstreamer")]
pub use gstreamer_engine::GStreamerEngine;
pub use pool::PlayerPool;
pub use session::SubtopicSession;
pub use traits::{PlaybackEngine, PlaybackHandle, PlaybackStatus};
