use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::ordermodel::{PackageType, PaymentMethod};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CheckoutDto {
    pub package_id: Uuid,
    pub payment_method: PaymentMethod,
}

/// What the buyer needs to complete payment, depending on the method chosen.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PaymentInstructions {
    /// Redirect to the gateway's hosted checkout page.
    Gateway { payment_url: String, reference: String },
    /// Transfer manually and upload a proof of payment.
    BankTransfer {
        bank_name: String,
        account_number: String,
        account_holder: String,
        amount: i64,
        reference: String,
    },
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct OrderProofDto {
    #[validate(length(min = 1, max = 500, message = "Payment proof reference is required"))]
    pub payment_proof: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreatePackageDto {
    #[validate(length(min = 2, max = 100, message = "Package name is required"))]
    pub name: String,

    #[validate(range(min = 1, message = "Price must be positive"))]
    pub price: i64,

    #[validate(range(min = 1, message = "Listing limit must be positive"))]
    pub listing_limit: i32,

    #[validate(range(min = 0, message = "Duration cannot be negative"))]
    pub duration_days: i32,

    pub package_type: PackageType,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdatePackageDto {
    #[validate(length(min = 2, max = 100, message = "Package name is required"))]
    pub name: String,

    #[validate(range(min = 1, message = "Price must be positive"))]
    pub price: i64,

    #[validate(range(min = 1, message = "Listing limit must be positive"))]
    pub listing_limit: i32,

    #[validate(range(min = 0, message = "Duration cannot be negative"))]
    pub duration_days: i32,

    pub active: bool,
}

/// Gateway webhook payload (Paystack charge event shape).
#[derive(Debug, Serialize, Deserialize)]
pub struct GatewayWebhookEvent {
    pub event: String,
    pub data: GatewayWebhookData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GatewayWebhookData {
    pub reference: String,
    pub status: String,
    pub amount: i64,
}
