use std::sync::Arc;
use axum::{
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::userdb::UserExt,
    dtos::userdtos::{FilterUserDto, UpdateBankDetailsDto},
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn users_handler() -> Router {
    Router::new()
        .route("/me", get(get_me))
        .route("/me/bank-details", put(update_bank_details))
}

pub async fn get_me(
    Extension(_app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let filtered_user = FilterUserDto::filter_user(&user.user);

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "user": filtered_user
        }
    })))
}

// Sellers must register payout details before settling bank-transfer deals
pub async fn update_bank_details(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<UpdateBankDetailsDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let updated = app_state
        .db_client
        .update_bank_details(
            user.user.id,
            body.bank_name,
            body.bank_account_number,
            body.bank_account_holder,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Bank details updated successfully",
        "data": {
            "user": FilterUserDto::filter_user(&updated)
        }
    })))
}
