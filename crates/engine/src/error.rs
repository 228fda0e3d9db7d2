//! The module contains the errors the engine can throw.
//!
//! - [`InvalidInput`] thrown when a request is missing data or carries a
//!   malformed value.
//! - [`ExistingKey`] thrown when a unique value (an email) is already taken.
//! - [`InvalidCredentials`] thrown when login data matches no user.
//! - [`Forbidden`] thrown when a user mutates an expense it did not pay.
//! - [`KeyNotFound`] thrown when an item is not found.
//!
//!  [`InvalidInput`]: EngineError::InvalidInput
//!  [`ExistingKey`]: EngineError::ExistingKey
//!  [`InvalidCredentials`]: EngineError::InvalidCredentials
//!  [`Forbidden`]: EngineError::Forbidden
//!  [`KeyNotFound`]: EngineError::KeyNotFound
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("User already exists: {0}")]
    ExistingKey(String),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    KeyNotFound(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::InvalidCredentials, Self::InvalidCredentials) => true,
            (Self::Forbidden(a), Self::Forbidden(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
