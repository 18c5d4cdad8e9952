//! # axura-server
//!
//! Mock REST API for the Axura admin console.
//!
//! Serves the in-memory user dataset with artificial latency:
//! - `GET /users?paid={true|false}` lists users, optionally by subscription
//! - `GET /users/{id}` fetches one user
//! - `PUT /users/{id}` merges a partial update into the stored user
//! - `GET /stats` and `GET /analytics` summarise the dataset
//! - `GET /health` reports liveness

pub mod api;
pub mod config;
pub mod error;

pub use api::{build_router, serve, serve_listener, AppState};
pub use config::ServerConfig;
pub use error::ServerError;
