//! Store implementations of the `ThreadRepository` port.
//!
//! The in-memory store is always compiled; Postgres sits behind the
//! `db-postgres` feature.

pub mod memory;
#[cfg(feature = "db-postgres")]
pub mod postgres;

pub use memory::InMemoryThreadRepository;
#[cfg(feature = "db-postgres")]
pub use postgres::PgThreadRepository;
