//! Request identification and input parsing.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) when the client sent none
//! - Define the `POST /api/get-routes` body and its validation

use axum::http::{HeaderName, HeaderValue, Request};
use serde::Deserialize;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::http::error::ApiError;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Request ID generator for `SetRequestIdLayer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Body of `POST /api/get-routes`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteQuery {
    #[serde(default)]
    pub from_loc: Option<String>,
    #[serde(default)]
    pub to_loc: Option<String>,
}

impl RouteQuery {
    /// Both place names, untouched, or `InvalidInput` if either is missing or blank.
    pub fn into_places(self) -> Result<(String, String), ApiError> {
        match (self.from_loc, self.to_loc) {
            (Some(from), Some(to)) if !from.trim().is_empty() && !to.trim().is_empty() => {
                Ok((from, to))
            }
            _ => Err(ApiError::InvalidInput),
        }
    }
}
