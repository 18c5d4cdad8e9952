use thiserror::Error;

use axura_shared::AxuraError;
use axura_store::StoreError;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Axura(#[from] AxuraError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Not signed in, run `axura login` first")]
    Unauthenticated,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
