use crate::domain::amount::ValidationError;
use crate::domain::outcome::StageFailure;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CheckoutError>;

#[derive(Error, Debug)]
pub enum CheckoutError {
    /// The entered amount is malformed or out of range. User-fixable and
    /// surfaced inline; never reaches the settlement orchestrator.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A payment-rail collaborator failed mid-attempt.
    #[error(transparent)]
    Stage(#[from] StageFailure),
    /// `pay` was invoked while an attempt was already in flight.
    #[error("a settlement attempt is already in flight")]
    Busy,
    #[error("catalog error: {0}")]
    Catalog(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
