use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "order_status", rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Paid,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
pub enum PaymentMethod {
    Gateway,
    BankTransfer,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "package_type", rename_all = "snake_case")]
pub enum PackageType {
    Subscription,
    Topup,
}

/// A purchasable bundle of listing quota. Subscription packages also carry a
/// validity window; top-ups only raise the ceiling.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct ListingPackage {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
    pub listing_limit: i32,
    pub duration_days: i32,
    pub package_type: PackageType,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub package_id: Uuid,
    pub amount: i64,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub reference: String,
    pub payment_proof: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
