use crate::model::AddressId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AddressError {
    #[error("Address not found: {0}")]
    AddressNotFound(AddressId),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, AddressError>;
