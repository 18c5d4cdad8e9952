use thiserror::Error;

use crate::types::UserId;

#[derive(Error, Debug)]
pub enum AxuraError {
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },
}
