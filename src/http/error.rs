//! HTTP error responses.
//!
//! Every failure leaves the service as `{ "error": "<fixed message>" }`.
//! Underlying causes are logged where they happen and never sent to clients.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::providers::{GeocodeError, RoutingError};

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Both fromLoc and toLoc are required.")]
    InvalidInput,

    #[error("Request body too large.")]
    PayloadTooLarge,

    #[error("One or both locations could not be found on the map.")]
    LocationNotFound,

    #[error("Could not calculate a driving path.")]
    RouteUnavailable,

    #[error("Internal server error.")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::LocationNotFound => StatusCode::NOT_FOUND,
            ApiError::RouteUnavailable | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<GeocodeError> for ApiError {
    fn from(_: GeocodeError) -> Self {
        ApiError::LocationNotFound
    }
}

impl From<RoutingError> for ApiError {
    fn from(_: RoutingError) -> Self {
        ApiError::RouteUnavailable
    }
}

/// Response for a panic caught inside a handler.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "Handler panicked");
    ApiError::Internal.into_response()
}
