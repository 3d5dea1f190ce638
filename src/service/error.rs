use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::error::HttpError;

/// Why a candidate listing was judged a duplicate of an existing one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DuplicateReason {
    Address,
    Coordinates,
    Image,
}

impl DuplicateReason {
    pub fn user_message(&self) -> &'static str {
        match self {
            DuplicateReason::Address => {
                "A listing with the same address and specifications already exists"
            }
            DuplicateReason::Coordinates => {
                "A listing at the same location coordinates already exists"
            }
            DuplicateReason::Image => {
                "One of the photos matches an image from an existing listing"
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("A listing must include its location coordinates")]
    MissingLocation,

    #[error("User {0} is not allowed to perform this action on {1}")]
    Unauthorized(Uuid, Uuid),

    #[error("Listing quota reached: {used} of {limit} listings used")]
    QuotaExceeded { used: i64, limit: i32 },

    #[error("Listing package expired on {0}")]
    PackageExpired(DateTime<Utc>),

    #[error("{}", .0.user_message())]
    DuplicateListing(DuplicateReason),

    #[error("You already have an active offer on this listing")]
    DuplicateActiveOffer,

    #[error("You cannot make an offer on your own listing")]
    SelfOffer,

    #[error("You cannot buy your own listing")]
    SelfTransaction,

    #[error("Listing {0} not found")]
    ListingNotFound(Uuid),

    #[error("Offer {0} not found")]
    OfferNotFound(Uuid),

    #[error("Order {0} not found")]
    OrderNotFound(Uuid),

    #[error("Package {0} not found")]
    PackageNotFound(Uuid),

    #[error("Transaction {0} not found")]
    TransactionNotFound(Uuid),

    #[error("Invalid state transition: {0}")]
    StateConflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Payment gateway error: {0}")]
    Gateway(String),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_)
            | ServiceError::MissingLocation
            | ServiceError::SelfOffer
            | ServiceError::SelfTransaction => StatusCode::BAD_REQUEST,

            ServiceError::Unauthorized(_, _)
            | ServiceError::QuotaExceeded { .. }
            | ServiceError::PackageExpired(_) => StatusCode::FORBIDDEN,

            ServiceError::DuplicateListing(_)
            | ServiceError::DuplicateActiveOffer
            | ServiceError::StateConflict(_) => StatusCode::CONFLICT,

            ServiceError::ListingNotFound(_)
            | ServiceError::OfferNotFound(_)
            | ServiceError::OrderNotFound(_)
            | ServiceError::PackageNotFound(_)
            | ServiceError::TransactionNotFound(_) => StatusCode::NOT_FOUND,

            ServiceError::Database(_) | ServiceError::Gateway(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        let status = error.status_code();
        HttpError::new(error.to_string(), status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_rule_statuses() {
        assert_eq!(
            ServiceError::DuplicateListing(DuplicateReason::Address).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::QuotaExceeded { used: 1, limit: 1 }.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ServiceError::MissingLocation.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::PackageExpired(Utc::now()).status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_duplicate_reason_messages_distinguish_cause() {
        let address = DuplicateReason::Address.user_message();
        let coords = DuplicateReason::Coordinates.user_message();
        let image = DuplicateReason::Image.user_message();
        assert_ne!(address, coords);
        assert_ne!(coords, image);
    }
}
