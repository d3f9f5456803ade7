use crate::error::{ExtractionError, MalformedReason};
use crate::types::{BoundingPolygon, RawWord, WordToken};

/// The y of the first normalized vertex, i.e. the region's top-left corner.
pub fn top_y(polygon: &BoundingPolygon) -> Result<f64, MalformedReason> {
    let vertex = polygon
        .normalized_vertices
        .first()
        .ok_or(MalformedReason::NoVertices)?;
    vertex.y.ok_or(MalformedReason::MissingY)
}

/// Convert a raw OCR word into a token, failing fast on missing fields.
pub fn to_word_token(index: usize, raw: &RawWord) -> Result<WordToken, ExtractionError> {
    let text = raw
        .text
        .as_ref()
        .ok_or_else(|| ExtractionError::malformed(index, MalformedReason::MissingText))?;
    let polygon = raw
        .bounding_polygon
        .as_ref()
        .ok_or_else(|| ExtractionError::malformed(index, MalformedReason::MissingBoundingPolygon))?;
    let y = top_y(polygon).map_err(|reason| ExtractionError::malformed(index, reason))?;

    let token = WordToken::new(text.clone(), y);
    check_position(index, &token)?;
    Ok(token)
}

pub fn to_word_tokens(raw: &[RawWord]) -> Result<Vec<WordToken>, ExtractionError> {
    raw.iter()
        .enumerate()
        .map(|(index, word)| to_word_token(index, word))
        .collect()
}

/// Line reconstruction needs a total order on y; NaN and infinities break it.
pub fn check_position(index: usize, token: &WordToken) -> Result<(), ExtractionError> {
    if token.y.is_finite() {
        Ok(())
    } else {
        Err(ExtractionError::malformed(index, MalformedReason::NonFiniteY))
    }
}
