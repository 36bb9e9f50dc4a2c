//! HTTP API handlers for lappi-dispatch

pub mod health;
pub mod request;

pub use health::health_routes;
pub use request::request_routes;
