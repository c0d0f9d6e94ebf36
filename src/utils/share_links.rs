use url::Url;

/// Which kind of direct URL to produce for a Google Drive file.
///
/// Video pipelines want `Stream` (an `export=download` URL yields a seekable
/// byte stream); image display works with the plain `View` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlMode {
    Stream,
    View,
}

const DRIVE_HOST: &str = "drive.google.com";
const MIN_FILE_ID_LEN: usize = 10;

/// Convert common Google Drive share links (`open?id=`, `file/d/<id>/view`,
/// `uc?id=`, `uc?export=download&id=`) into direct file URLs.
///
/// Anything that is not a recognizable Drive share link is returned unchanged;
/// callers treat the output as an opaque locator. The transform is pure and
/// deterministic, so repeated resolution of the same input always yields the
/// same pool key.
pub fn to_direct_url(raw: &str, mode: UrlMode) -> String {
    let Some(file_id) = extract_file_id(raw) else {
        return raw.to_string();
    };

    match mode {
        UrlMode::Stream => format!("https://{DRIVE_HOST}/uc?export=download&id={file_id}"),
        UrlMode::View => format!("https://{DRIVE_HOST}/uc?id={file_id}"),
    }
}

fn extract_file_id(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw).ok()?;
    if parsed.host_str() != Some(DRIVE_HOST) {
        return None;
    }

    // `open?id=`, `uc?id=`, `uc?export=download&id=` all carry the id in the query.
    if let Some((_, id)) = parsed.query_pairs().find(|(key, _)| key == "id")
        && is_file_id(&id)
    {
        return Some(id.into_owned());
    }

    // `file/d/<id>/view` carries it in the path.
    let segments: Vec<&str> = parsed.path_segments()?.collect();
    segments
        .windows(3)
        .find(|w| w[0] == "file" && w[1] == "d" && is_file_id(w[2]))
        .map(|w| w[2].to_string())
}

fn is_file_id(s: &str) -> bool {
    s.len() >= MIN_FILE_ID_LEN
        && s.bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}
