mod identifiers;

pub use identifiers::{CategoryId, SlideId, SubtopicId};

use serde::{Deserialize, Serialize};

/// One page of a subtopic's media carousel.
///
/// Sequence order is significant: it defines paging order. Slide ids are
/// expected to be unique within one sequence; the catalog loader warns on
/// duplicates but does not reject them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Slide {
    Image {
        id: SlideId,
        uri: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    Video {
        id: SlideId,
        uri: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
        #[serde(default = "default_looping")]
        looping: bool,
    },
    Text {
        id: SlideId,
        title: String,
        body: String,
    },
}

fn default_looping() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideKind {
    Image,
    Video,
    Text,
}

impl Slide {
    pub fn id(&self) -> &SlideId {
        match self {
            Slide::Image { id, .. } | Slide::Video { id, .. } | Slide::Text { id, .. } => id,
        }
    }

    pub fn kind(&self) -> SlideKind {
        match self {
            Slide::Image { .. } => SlideKind::Image,
            Slide::Video { .. } => SlideKind::Video,
            Slide::Text { .. } => SlideKind::Text,
        }
    }

    /// Raw source locator, present for image and video slides only.
    pub fn raw_uri(&self) -> Option<&str> {
        match self {
            Slide::Image { uri, .. } | Slide::Video { uri, .. } => Some(uri),
            Slide::Text { .. } => None,
        }
    }

    pub fn caption(&self) -> Option<&str> {
        match self {
            Slide::Image { caption, .. } | Slide::Video { caption, .. } => caption.as_deref(),
            Slide::Text { .. } => None,
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self, Slide::Video { .. })
    }
}

/// A leaf or container node under a category. Containers carry `children`
/// (one level of nesting); leaves carry `slides` and optional long-form text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subtopic {
    pub id: SubtopicId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slides: Vec<Slide>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Subtopic>,
}

impl Subtopic {
    /// Container nodes have no slides of their own and at least one child.
    pub fn is_container(&self) -> bool {
        self.slides.is_empty() && !self.children.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub subtopics: Vec<Subtopic>,
}
