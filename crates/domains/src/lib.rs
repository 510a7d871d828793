//! The domain model and interface definitions for the message board.

pub mod errors;
pub mod models;
pub mod ports;
pub mod views;

// Re-exporting for easier access in other crates
pub use errors::*;
pub use models::*;
pub use ports::*;
pub use views::*;
