use std::sync::Arc;
use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{transactiondb::TransactionExt, userdb::UserExt},
    dtos::transactiondtos::{
        SellerBankDetailsDto, SettleTransactionDto, TransactionDetailDto, TransactionProofDto,
    },
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn transactions_handler() -> Router {
    Router::new()
        .route("/my-transactions", get(get_my_transactions))
        .route("/:transaction_id", get(get_transaction))
        .route("/:transaction_id/proof", post(attach_transaction_proof))
        .route("/:transaction_id/settle", post(settle_transaction))
}

// Direct purchase at the listing price, no negotiation
pub async fn buy_listing(
    Path(listing_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let transaction = app_state
        .transaction_service
        .create_direct(user.user.id, listing_id)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Transaction opened, transfer the amount to the seller",
        "data": {
            "transaction": transaction
        }
    })))
}

pub async fn get_my_transactions(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let transactions = app_state
        .db_client
        .get_transactions_for_user(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "transactions": transactions
        }
    })))
}

/// Transaction detail for a party. Buyers additionally see the seller's
/// payout details so they know where to send the money.
pub async fn get_transaction(
    Path(transaction_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let transaction = app_state
        .db_client
        .get_transaction_by_id(transaction_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Transaction not found"))?;

    if user.user.id != transaction.buyer_id && user.user.id != transaction.seller_id {
        return Err(HttpError::forbidden("You are not a party to this transaction"));
    }

    let seller_bank_details = if user.user.id == transaction.buyer_id {
        let seller = app_state
            .db_client
            .get_user(Some(transaction.seller_id), None)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
            .ok_or_else(|| HttpError::server_error("Seller not found"))?;

        Some(SellerBankDetailsDto {
            bank_name: seller.bank_name,
            account_number: seller.bank_account_number,
            account_holder: seller.bank_account_holder,
        })
    } else {
        None
    };

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": TransactionDetailDto {
            transaction,
            seller_bank_details
        }
    })))
}

pub async fn attach_transaction_proof(
    Path(transaction_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<TransactionProofDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let transaction = app_state
        .transaction_service
        .attach_proof(user.user.id, transaction_id, body.payment_proof)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Payment proof attached, awaiting seller verification",
        "data": {
            "transaction": transaction
        }
    })))
}

pub async fn settle_transaction(
    Path(transaction_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<SettleTransactionDto>,
) -> Result<impl IntoResponse, HttpError> {
    let transaction = app_state
        .transaction_service
        .settle(user.user.id, transaction_id, body.outcome)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "transaction": transaction
        }
    })))
}
