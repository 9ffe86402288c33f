//! HTTP API handlers for songbook-api

pub mod health;
pub mod library;

pub use health::health_routes;
pub use library::library_routes;
