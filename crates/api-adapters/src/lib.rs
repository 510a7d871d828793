//! HTTP transport for the message board.
//!
//! The axum adapter is behind the `web-axum` feature; metrics are always
//! available so other transports can reuse them.

pub mod metrics;
#[cfg(feature = "web-axum")]
pub mod web;

pub use metrics::Metrics;
