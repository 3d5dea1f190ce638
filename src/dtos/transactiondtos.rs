use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::transactionmodel::Transaction;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TransactionProofDto {
    #[validate(length(min = 1, max = 500, message = "Payment proof reference is required"))]
    pub payment_proof: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SettleOutcome {
    Success,
    Cancelled,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SettleTransactionDto {
    pub outcome: SettleOutcome,
}

/// Seller payout details, surfaced to the buyer once a transaction exists.
#[derive(Debug, Serialize, Deserialize)]
pub struct SellerBankDetailsDto {
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub account_holder: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionDetailDto {
    pub transaction: Transaction,
    /// Only present when the requester is the buyer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_bank_details: Option<SellerBankDetailsDto>,
}
