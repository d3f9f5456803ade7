pub mod amount;
pub mod classify;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod lines;
pub mod normalize;
pub mod types;

pub use amount::extract_total;
pub use classify::{classify_currency, classify_purpose, PurposeCategory};
pub use error::{ExtractionError, MalformedReason};
pub use extract::Extractor;
pub use lines::{reconstruct, Layout};
pub use normalize::{normalize, normalize_fields, DocumentField, FieldMap, FieldPayload};
pub use types::{BoundingPolygon, Line, OcrDocument, OcrPage, RawWord, Vertex, WordToken};
