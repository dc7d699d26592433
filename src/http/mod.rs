//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, body parsing and validation)
//!     → handlers.rs (geocode → route → log → price)
//!     → error.rs (fixed JSON error bodies)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod request;
pub mod server;

pub use error::{ApiError, ErrorBody};
pub use request::{RouteQuery, UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
