use atlas::models::{Slide, SlideId};

pub fn image(id: &str, uri: &str) -> Slide {
    Slide::Image {
        id: SlideId::new(id),
        uri: uri.to_string(),
        caption: None,
    }
}

pub fn video(id: &str, uri: &str) -> Slide {
    Slide::Video {
        id: SlideId::new(id),
        uri: uri.to_string(),
        caption: None,
        looping: true,
    }
}

pub fn video_once(id: &str, uri: &str) -> Slide {
    Slide::Video {
        id: SlideId::new(id),
        uri: uri.to_string(),
        caption: None,
        looping: false,
    }
}

pub fn text(id: &str, title: &str) -> Slide {
    Slide::Text {
        id: SlideId::new(id),
        title: title.to_string(),
        body: format!("{title} body"),
    }
}
