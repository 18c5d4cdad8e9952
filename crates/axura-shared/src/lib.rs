//! # axura-shared
//!
//! Types shared by the Axura mock API server and the admin console client:
//! the user record and its patch, the seed dataset, the dashboard and
//! analytics figures derived from it, and the common error taxonomy.

pub mod constants;
pub mod error;
pub mod seed;
pub mod stats;
pub mod types;

pub use error::AxuraError;
pub use types::{SubscriptionStatus, UserId, UserPatch, UserRecord};
