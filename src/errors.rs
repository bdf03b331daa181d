use thiserror::Error;
use uuid::Uuid;

/// Error type that captures the failures shared across the crate.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Subscription not found: {0}")]
    SubscriptionNotFound(Uuid),
    #[error("Reservation not found: {0}")]
    ReservationNotFound(Uuid),
    #[error("Authentication failed: {0}")]
    Auth(String),
    #[error("Prompt error: {0}")]
    Prompt(String),
}

impl From<dialoguer::Error> for TrackerError {
    fn from(err: dialoguer::Error) -> Self {
        TrackerError::Prompt(err.to_string())
    }
}
