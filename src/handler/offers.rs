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
    db::{listingdb::ListingExt, offerdb::OfferExt},
    dtos::offerdtos::{CreateOfferDto, OfferActionDto, OfferWithHistoryDto},
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn offers_handler() -> Router {
    Router::new()
        .route("/:offer_id", get(get_offer))
        .route("/:offer_id/action", post(apply_offer_action))
        .route("/sent", get(get_sent_offers))
        .route("/received", get(get_received_offers))
}

pub async fn create_offer(
    Path(listing_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateOfferDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let offer = app_state
        .offer_service
        .create_offer(user.user.id, listing_id, body)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Offer submitted to the listing owner",
        "data": {
            "offer": offer
        }
    })))
}

pub async fn apply_offer_action(
    Path(offer_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<OfferActionDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let offer = app_state
        .offer_service
        .apply_action(user.user.id, offer_id, body)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "offer": offer
        }
    })))
}

/// Offer plus its full negotiation trail, visible to both parties only.
pub async fn get_offer(
    Path(offer_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let offer = app_state
        .db_client
        .get_offer_by_id(offer_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Offer not found"))?;

    let listing = app_state
        .db_client
        .get_listing_by_id(offer.listing_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Listing not found"))?;

    if user.user.id != offer.buyer_id && user.user.id != listing.owner_id {
        return Err(HttpError::forbidden("You are not a party to this offer"));
    }

    let history = app_state
        .db_client
        .get_offer_history(offer_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": OfferWithHistoryDto { offer, history }
    })))
}

pub async fn get_sent_offers(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let offers = app_state
        .db_client
        .get_offers_by_buyer(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let total = offers.len();
    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "offers": offers,
            "total": total
        }
    })))
}

pub async fn get_received_offers(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let offers = app_state
        .db_client
        .get_offers_received(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let total = offers.len();
    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "offers": offers,
            "total": total
        }
    })))
}
