//! # axura-store
//!
//! Storage for the Axura admin console.
//!
//! Two unrelated concerns live here:
//! - [`KeyValueStore`], the flat key/value storage the console persists its
//!   session flag and settings to, backed either by SQLite ([`Database`]) or
//!   by a plain in-memory map ([`MemoryStore`]).
//! - [`UserStore`], the authoritative in-memory user collection with its
//!   update-by-id and remove-by-id operations.

pub mod database;
pub mod kv;
pub mod migrations;
pub mod users;

mod error;

pub use database::Database;
pub use error::StoreError;
pub use kv::{KeyValueStore, MemoryStore};
pub use users::UserStore;
