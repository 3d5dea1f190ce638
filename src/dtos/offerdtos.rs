use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::offermodel::{Offer, OfferHistory};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateOfferDto {
    #[validate(range(min = 1, message = "Offer amount must be positive"))]
    pub amount: i64,

    #[validate(length(max = 1000, message = "Message must be at most 1000 characters"))]
    pub message: Option<String>,
}

/// Action on an existing negotiation: accept, reject, or counter.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum OfferActionKind {
    Accept,
    Reject,
    Counter,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct OfferActionDto {
    pub action: OfferActionKind,

    /// Required for counter-offers, ignored otherwise.
    #[validate(range(min = 1, message = "Counter amount must be positive"))]
    pub amount: Option<i64>,

    #[validate(length(max = 1000, message = "Message must be at most 1000 characters"))]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OfferWithHistoryDto {
    pub offer: Offer,
    pub history: Vec<OfferHistory>,
}
