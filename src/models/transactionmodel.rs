use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "transaction_status", rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    WaitingVerification,
    Success,
    Cancelled,
}

impl TransactionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransactionStatus::Success | TransactionStatus::Cancelled)
    }

    pub fn to_str(&self) -> &str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::WaitingVerification => "waiting_verification",
            TransactionStatus::Success => "success",
            TransactionStatus::Cancelled => "cancelled",
        }
    }
}

/// A purchase of a listing, either direct ("buy now") or derived from an
/// accepted offer.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Transaction {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub amount: i64,
    pub status: TransactionStatus,
    pub payment_proof: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
