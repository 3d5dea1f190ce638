use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::usermodel::User;

#[derive(Serialize, Deserialize, Validate)]
pub struct RequestQueryDto {
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterUserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub account_type: String,
    pub listing_limit: i32,
    pub package_expiry: Option<DateTime<Utc>>,
    pub has_bank_details: bool,
    pub created_at: DateTime<Utc>,
}

impl FilterUserDto {
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.to_str().to_string(),
            account_type: user.account_type.to_str().to_string(),
            listing_limit: user.listing_limit,
            package_expiry: user.package_expiry,
            has_bank_details: user.has_bank_details(),
            created_at: user.created_at,
        }
    }
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateBankDetailsDto {
    #[validate(length(min = 2, max = 100, message = "Bank name must be between 2-100 characters"))]
    pub bank_name: String,

    #[validate(length(min = 6, max = 20, message = "Account number must be between 6-20 characters"))]
    pub bank_account_number: String,

    #[validate(length(min = 2, max = 100, message = "Account holder must be between 2-100 characters"))]
    pub bank_account_holder: String,
}
