//! REST API module for HTTP endpoints
//!
//! Public reads and password-gated writes, mirroring what the site's pages
//! and admin panel call:
//! - `GET /api/events` - Tour dates, earliest first
//! - `POST /api/events` - `check` / `add` / `update` / `delete`
//! - `GET /api/music` - Both release categories in rank order
//! - `POST /api/music` - `check` / `add` / `delete` / `reorder`

pub mod events;
pub mod music;

use std::fmt;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::state::AppState;
use crate::store::StoreError;

/// API error response body
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

/// Every way a request can fail
#[derive(Debug)]
pub enum ApiFailure {
    /// Bad or missing admin password
    Unauthorized,
    NotFound(String),
    InvalidCategory(String),
    InvalidAction(String),
    /// Missing or malformed `event` / `release` object
    InvalidPayload(String),
    /// The backing document could not be written
    StorageFailure(String),
}

impl ApiFailure {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiFailure::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiFailure::NotFound(_) => StatusCode::NOT_FOUND,
            ApiFailure::InvalidCategory(_)
            | ApiFailure::InvalidAction(_)
            | ApiFailure::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            ApiFailure::StorageFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiFailure::Unauthorized => "UNAUTHORIZED",
            ApiFailure::NotFound(_) => "NOT_FOUND",
            ApiFailure::InvalidCategory(_) => "INVALID_CATEGORY",
            ApiFailure::InvalidAction(_) => "INVALID_ACTION",
            ApiFailure::InvalidPayload(_) => "INVALID_PAYLOAD",
            ApiFailure::StorageFailure(_) => "STORAGE_FAILURE",
        }
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailure::Unauthorized => write!(f, "Unauthorized"),
            ApiFailure::NotFound(id) => write!(f, "Record '{}' not found", id),
            ApiFailure::InvalidCategory(name) => write!(f, "Invalid category: {}", name),
            ApiFailure::InvalidAction(name) => write!(f, "Invalid action: {}", name),
            ApiFailure::InvalidPayload(msg) => write!(f, "Invalid payload: {}", msg),
            // Storage details stay in the server log
            ApiFailure::StorageFailure(_) => write!(f, "Failed to process request"),
        }
    }
}

impl std::error::Error for ApiFailure {}

impl From<StoreError> for ApiFailure {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => ApiFailure::NotFound(id),
            StoreError::Storage(msg) => ApiFailure::StorageFailure(msg),
            e @ StoreError::RankExhausted(_) => ApiFailure::StorageFailure(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiFailure {
    fn from(rejection: JsonRejection) -> Self {
        ApiFailure::InvalidPayload(rejection.body_text())
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        if let ApiFailure::StorageFailure(ref detail) = self {
            tracing::error!(error = %detail, "Request failed on storage");
        }
        let body = ApiError {
            error: self.to_string(),
            code: self.code().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Reject the request unless the credential checks out
pub(crate) fn authorize(state: &AppState, password: Option<&str>) -> Result<(), ApiFailure> {
    if state.is_authorized(password) {
        Ok(())
    } else {
        tracing::warn!("Rejected request with invalid admin credential");
        Err(ApiFailure::Unauthorized)
    }
}

/// Decode a required sub-object of the request body
pub(crate) fn payload<T: DeserializeOwned>(
    value: Option<Value>,
    field: &str,
) -> Result<T, ApiFailure> {
    let value = value.ok_or_else(|| ApiFailure::InvalidPayload(format!("missing '{}'", field)))?;
    serde_json::from_value(value)
        .map_err(|e| ApiFailure::InvalidPayload(format!("'{}': {}", field, e)))
}

/// Run a synchronous request body on the blocking pool.
///
/// Store calls take a mutex and touch the disk, so reads go through here
/// as well as writes.
pub(crate) async fn run_blocking<F, T>(work: F) -> Result<Json<T>, ApiFailure>
where
    F: FnOnce() -> Result<T, ApiFailure> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiFailure::StorageFailure(e.to_string()))?
        .map(Json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordRef;

    #[test]
    fn test_failure_statuses() {
        assert_eq!(ApiFailure::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiFailure::NotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiFailure::InvalidCategory("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiFailure::StorageFailure("disk full".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_storage_detail_is_not_exposed() {
        let failure = ApiFailure::StorageFailure("/secret/path: permission denied".into());
        assert!(!failure.to_string().contains("/secret/path"));
    }

    #[test]
    fn test_store_error_mapping() {
        assert!(matches!(
            ApiFailure::from(StoreError::NotFound("7".into())),
            ApiFailure::NotFound(id) if id == "7"
        ));
        assert!(matches!(
            ApiFailure::from(StoreError::Storage("io".into())),
            ApiFailure::StorageFailure(_)
        ));
        assert!(matches!(
            ApiFailure::from(StoreError::RankExhausted("fullSets".into())),
            ApiFailure::StorageFailure(_)
        ));
    }

    #[test]
    fn test_payload_missing_and_malformed() {
        assert!(matches!(
            payload::<RecordRef>(None, "event"),
            Err(ApiFailure::InvalidPayload(_))
        ));
        assert!(matches!(
            payload::<RecordRef>(Some(serde_json::json!({"title": "x"})), "release"),
            Err(ApiFailure::InvalidPayload(_))
        ));
        let found: RecordRef = payload(Some(serde_json::json!({"id": "9"})), "event").unwrap();
        assert_eq!(found.id, "9");
    }
}
