//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Rejects unparseable or mistyped bodies with 400, a missing JSON content
/// type with 415, and invalid ones with 400 plus per-field details.
///
/// # Example
/// ```ignore
/// use axum_helpers::ValidatedJson;
///
/// async fn register(ValidatedJson(payload): ValidatedJson<RegisterUser>) -> String {
///     format!("Registering {}", payload.name)
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        data.validate()
            .map_err(|e| AppError::from(e).into_response())?;

        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, routing::post};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Payload {
        #[validate(length(min = 4, max = 100))]
        nome: String,
    }

    async fn echo(ValidatedJson(payload): ValidatedJson<Payload>) -> String {
        payload.nome
    }

    fn app() -> Router {
        Router::new().route("/", post(echo))
    }

    async fn send(body: &'static str) -> (StatusCode, Vec<u8>) {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_valid_body_passes_through() {
        let (status, body) = send(r#"{"nome":"Maria"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"Maria");
    }

    #[tokio::test]
    async fn test_invalid_body_reports_field() {
        let (status, body) = send(r#"{"nome":"Al"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "VALIDATION_ERROR");
        assert_eq!(json["details"]["nome"][0]["code"], "length");
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let (status, body) = send(r#"{"nome":"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "JSON_EXTRACTION");
    }

    #[tokio::test]
    async fn test_wrong_field_type_is_bad_request() {
        let (status, body) = send(r#"{"nome":100}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "JSON_EXTRACTION");
    }

    #[tokio::test]
    async fn test_missing_content_type_keeps_415() {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"nome":"Maria"}"#))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
