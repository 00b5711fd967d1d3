use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Pdf,
    Png,
    Jpeg,
    Gif,
    Bmp,
    Webp,
}

/// (media type, accepted extensions, canonical mime)
const MEDIA_TABLE: &[(MediaType, &[&str], &str)] = &[
    (MediaType::Pdf, &["pdf"], "application/pdf"),
    (MediaType::Png, &["png"], "image/png"),
    (MediaType::Jpeg, &["jpg", "jpeg"], "image/jpeg"),
    (MediaType::Gif, &["gif"], "image/gif"),
    (MediaType::Bmp, &["bmp"], "image/bmp"),
    (MediaType::Webp, &["webp"], "image/webp"),
];

impl MediaType {
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim().trim_start_matches('.');
        MEDIA_TABLE
            .iter()
            .find(|(_, exts, _)| exts.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .map(|(m, _, _)| *m)
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim();
        if essence.eq_ignore_ascii_case("image/jpg") {
            return Some(Self::Jpeg);
        }
        MEDIA_TABLE
            .iter()
            .find(|(_, _, m)| m.eq_ignore_ascii_case(essence))
            .map(|(t, _, _)| *t)
    }

    pub fn mime(self) -> &'static str {
        MEDIA_TABLE
            .iter()
            .find(|(m, _, _)| *m == self)
            .map(|(_, _, mime)| *mime)
            .unwrap_or("application/octet-stream")
    }

    pub fn is_image(self) -> bool {
        self != Self::Pdf
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}
