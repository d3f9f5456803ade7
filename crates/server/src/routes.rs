//! HTTP handlers. Each request carries its own payload; nothing is kept
//! between requests.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::{Json, Router};
use reimburse_core::ExpenseRecord;
use reimburse_ocr::{Extractor, FieldPayload, OcrDocument};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::error::ApiError;

pub fn router(config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/extract-expense-info", post(extract_expense_info))
        .route("/extract", post(extract_fields))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.body_limit_bytes))
        .layer(cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub version: &'static str,
}

/// Handler for `GET /health`
async fn health() -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Handler for `POST /extract-expense-info`: word-level OCR pages.
async fn extract_expense_info(
    Json(document): Json<OcrDocument>,
) -> Result<Json<ExpenseRecord>, ApiError> {
    let word_count = document.pages.first().map_or(0, |p| p.words.len());
    debug!(pages = document.pages.len(), word_count, "Extracting expense from OCR words");

    let record = Extractor::extract_document(&document)?;
    info!(
        currency = %record.currency,
        total = %record.total,
        purpose = %record.purpose,
        "Expense extracted"
    );
    Ok(Json(record))
}

/// Handler for `POST /extract`: labelled document fields or a flat field map.
async fn extract_fields(Json(payload): Json<FieldPayload>) -> Result<Json<ExpenseRecord>, ApiError> {
    let record = Extractor::extract_fields(payload)?;
    info!(
        currency = %record.currency,
        total = %record.total,
        submit = %record.submit,
        "Expense fields normalized"
    );
    Ok(Json(record))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {origin}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        router(&ServerConfig::default())
    }

    fn word(text: &str, y: f64) -> Value {
        json!({
            "text": text,
            "boundingPolygon": { "normalizedVertices": [{ "x": 0.1, "y": y }, { "x": 0.2, "y": y }] }
        })
    }

    async fn post_json(app: Router, uri: &str, body: String) -> (StatusCode, Vec<u8>) {
        let req = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::CONTENT_LENGTH, body.len())
            .body(Body::from(body))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn extracts_fuel_receipt() {
        let payload = json!({
            "pages": [{ "words": [word("TOTAL", 0.10), word("432.60", 0.10), word("HPCL", 0.20)] }]
        });
        let (status, bytes) = post_json(app(), "/extract-expense-info", payload.to_string()).await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({
                "ReimbursementCurrencyCode": "INR",
                "ExpenseReportTotal": "432.60",
                "Purpose": "Fuel Reimbursement",
                "SubmitReport": "Y",
            })
        );
    }

    #[tokio::test]
    async fn empty_page_returns_defaults() {
        let (status, bytes) = post_json(app(), "/extract-expense-info", json!({ "pages": [] }).to_string()).await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["ExpenseReportTotal"], "0.00");
        assert_eq!(body["Purpose"], "General Reimbursement");
    }

    #[tokio::test]
    async fn malformed_word_is_unprocessable() {
        let payload = json!({ "pages": [{ "words": [word("TOTAL", 0.1), { "text": "432.60" }] }] });
        let (status, bytes) = post_json(app(), "/extract-expense-info", payload.to_string()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].as_str().unwrap().contains("index 1"));
    }

    #[tokio::test]
    async fn invalid_json_is_rejected() {
        let (status, _) = post_json(app(), "/extract-expense-info", "not json".to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn document_fields_endpoint() {
        let payload = json!({
            "documentFields": [{ "text": "INR" }, { "text": "Total 1200.00" }, { "text": "Purpose: Travel" }]
        });
        let (status, bytes) = post_json(app(), "/extract", payload.to_string()).await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["ExpenseReportTotal"], "1200.00");
        assert_eq!(body["Purpose"], "Travel");
        assert_eq!(body["SubmitReport"], "N");
    }

    #[tokio::test]
    async fn flat_body_falls_back_to_defaults() {
        let (status, bytes) = post_json(app(), "/extract", json!({ "Currency": "USD" }).to_string()).await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({
                "ReimbursementCurrencyCode": "USD",
                "ExpenseReportTotal": "0.00",
                "Purpose": "Not Mentioned",
                "SubmitReport": "N",
            })
        );
    }

    #[tokio::test]
    async fn non_string_document_field_is_unprocessable() {
        let payload = json!({ "documentFields": [{ "text": "USD" }, { "text": 42 }] });
        let (status, _) = post_json(app(), "/extract", payload.to_string()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let payload = json!({ "documentFields": "junk" });
        let (status, _) = post_json(app(), "/extract", payload.to_string()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let config = ServerConfig { body_limit_bytes: 32, ..ServerConfig::default() };
        let payload = json!({ "pages": [{ "words": [word("TOTAL", 0.1)] }] });
        let (status, _) = post_json(router(&config), "/extract-expense-info", payload.to_string()).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn permissive_cors_by_default() {
        let req = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "https://apex.example.com")
            .body(Body::empty())
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn configured_origins_are_enforced() {
        let config = ServerConfig {
            allowed_origins: vec!["https://apex.example.com".to_string()],
            ..ServerConfig::default()
        };
        let allowed = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "https://apex.example.com")
            .body(Body::empty())
            .unwrap();
        let resp = router(&config).oneshot(allowed).await.unwrap();
        assert_eq!(
            resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://apex.example.com"
        );

        let other = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "https://evil.example.com")
            .body(Body::empty())
            .unwrap();
        let resp = router(&config).oneshot(other).await.unwrap();
        assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }
}
