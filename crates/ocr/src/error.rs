use thiserror::Error;

/// What was wrong with a malformed input token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("missing text")]
    MissingText,
    #[error("missing bounding polygon")]
    MissingBoundingPolygon,
    #[error("bounding polygon has no normalized vertices")]
    NoVertices,
    #[error("missing y coordinate")]
    MissingY,
    #[error("y coordinate is not a finite number")]
    NonFiniteY,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractionError {
    /// The upstream OCR payload violated its contract; never silently skipped.
    #[error("Malformed token at index {index}: {reason}")]
    MalformedToken { index: usize, reason: MalformedReason },
}

impl ExtractionError {
    pub fn malformed(index: usize, reason: MalformedReason) -> Self {
        ExtractionError::MalformedToken { index, reason }
    }
}
