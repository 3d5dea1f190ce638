use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Agent,
    User,
}

impl UserRole {
    pub fn to_str(&self) -> &str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Agent => "agent",
            UserRole::User => "user",
        }
    }
}

/// Seller profile kind, distinct from the authorization role.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "account_type", rename_all = "snake_case")]
pub enum AccountType {
    Individual,
    Agent,
    Agency,
}

impl AccountType {
    pub fn to_str(&self) -> &str {
        match self {
            AccountType::Individual => "individual",
            AccountType::Agent => "agent",
            AccountType::Agency => "agency",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub account_type: AccountType,

    // Listing quota: a ceiling on concurrently posted listings, not a
    // decremented counter. Credited only by order confirmation.
    pub listing_limit: i32,
    pub package_expiry: Option<DateTime<Utc>>,

    // Payout details shown to buyers once a transaction exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account_holder: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn has_bank_details(&self) -> bool {
        self.bank_name.is_some()
            && self.bank_account_number.is_some()
            && self.bank_account_holder.is_some()
    }
}
