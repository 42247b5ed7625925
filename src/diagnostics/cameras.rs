use std::borrow::Cow;
use std::path::Path;

use snafu::ResultExt;

use crate::common::{Camera, ParseSnafu, ReadSnafu, Result};

use super::models::Objects;

const BOM: char = '\u{feff}';

/// Agent writes its object list as UTF-8 but declares it UTF-16. Drops that
/// declaration from the prolog and leaves everything else untouched.
pub fn strip_encoding_declaration(text: &str) -> Cow<'_, str> {
    let Some(end) = text.find("?>") else {
        return Cow::Borrowed(text);
    };
    let prolog = &text[..end];
    if !prolog.trim_start_matches(BOM).trim_start().starts_with("<?xml") {
        return Cow::Borrowed(text);
    }

    // ASCII lowercasing keeps byte offsets intact.
    let lower = prolog.to_ascii_lowercase();
    for quote in ['"', '\''] {
        let needle = format!(" encoding={quote}utf-16{quote}");
        if let Some(start) = lower.find(&needle) {
            let mut stripped = String::with_capacity(text.len());
            stripped.push_str(&text[..start]);
            stripped.push_str(&text[start + needle.len()..]);
            return Cow::Owned(stripped);
        }
    }
    Cow::Borrowed(text)
}

pub fn parse_cameras(xml: &str) -> std::result::Result<Vec<Camera>, quick_xml::DeError> {
    let xml = strip_encoding_declaration(xml.trim_start_matches(BOM));
    let objects: Objects = quick_xml::de::from_str(&xml)?;
    Ok(objects
        .cameras
        .camera
        .into_iter()
        .map(Camera::from)
        .collect())
}

pub fn read_cameras(path: &Path) -> Result<Vec<Camera>> {
    let bytes = std::fs::read(path).context(ReadSnafu {
        path: path.display().to_string(),
    })?;
    let cameras = parse_cameras(&String::from_utf8_lossy(&bytes)).context(ParseSnafu {
        path: path.display().to_string(),
    })?;

    tracing::debug!(path = %path.display(), cameras = cameras.len(), "Camera list read");
    Ok(cameras)
}
