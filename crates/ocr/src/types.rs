use serde::{Deserialize, Serialize};
use std::fmt;

/// A recognized word with the normalized top-left y of its bounding region.
#[derive(Debug, Clone, PartialEq)]
pub struct WordToken {
    pub text: String,
    /// 0.0 = top of the page, 1.0 = bottom.
    pub y: f64,
}

impl WordToken {
    pub fn new(text: impl Into<String>, y: f64) -> Self {
        Self { text: text.into(), y }
    }
}

/// One reconstructed visual row: token texts joined by single spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Line(String);

impl Line {
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Self {
        let text = words.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ");
        Line(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Line(s.to_string())
    }
}

impl From<String> for Line {
    fn from(s: String) -> Self {
        Line(s)
    }
}

impl AsRef<str> for Line {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── OCR document payload ──────────────────────────────────────────────────────
//
// Mirrors the document-understanding JSON the upload handler receives. Every
// field is optional at this layer so that contract violations surface as
// `ExtractionError::MalformedToken` rather than as opaque decode failures.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrDocument {
    #[serde(default)]
    pub pages: Vec<OcrPage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrPage {
    #[serde(default)]
    pub words: Vec<RawWord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWord {
    pub text: Option<String>,
    pub bounding_polygon: Option<BoundingPolygon>,
}

impl RawWord {
    pub fn new(text: &str, y: f64) -> Self {
        Self {
            text: Some(text.to_string()),
            bounding_polygon: Some(BoundingPolygon {
                normalized_vertices: vec![Vertex { x: Some(0.0), y: Some(y) }],
            }),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingPolygon {
    #[serde(default)]
    pub normalized_vertices: Vec<Vertex>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vertex {
    pub x: Option<f64>,
    pub y: Option<f64>,
}
