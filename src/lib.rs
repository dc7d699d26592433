//! Commute options API library.

pub mod config;
pub mod history;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod pricing;
pub mod providers;

pub use config::schema::CommuteConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
