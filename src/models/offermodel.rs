use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "offer_status", rename_all = "snake_case")]
pub enum OfferStatus {
    Pending,
    Countered,
    Accepted,
    Rejected,
}

impl OfferStatus {
    /// An offer is active while it still awaits a final answer.
    pub fn is_active(&self) -> bool {
        matches!(self, OfferStatus::Pending | OfferStatus::Countered)
    }

    pub fn to_str(&self) -> &str {
        match self {
            OfferStatus::Pending => "pending",
            OfferStatus::Countered => "countered",
            OfferStatus::Accepted => "accepted",
            OfferStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "offer_action", rename_all = "snake_case")]
pub enum OfferAction {
    Create,
    Accept,
    Reject,
    Counter,
}

impl OfferAction {
    pub fn to_str(&self) -> &str {
        match self {
            OfferAction::Create => "create",
            OfferAction::Accept => "accept",
            OfferAction::Reject => "reject",
            OfferAction::Counter => "counter",
        }
    }
}

/// A negotiation thread between a buyer and a listing owner.
///
/// `status` and `amount` are projections of the latest history entry and are
/// updated in the same transaction that appends it.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Offer {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub buyer_id: Uuid,
    pub amount: i64,
    pub status: OfferStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Append-only audit trail of every offer transition.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct OfferHistory {
    pub id: Uuid,
    pub offer_id: Uuid,
    pub sender_id: Uuid,
    pub action: OfferAction,
    pub price: i64,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}
