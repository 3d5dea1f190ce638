use std::sync::Arc;
use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{
        listingdb::{ListingExt, ListingSearchFilters},
        userdb::UserExt,
    },
    dtos::{
        listingdtos::{CreateListingDto, ListingFilterDto, ListingSearchQueryDto},
        userdtos::RequestQueryDto,
    },
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn listings_handler() -> Router {
    Router::new()
        .route("/create", post(create_listing))
        .route("/my-listings", get(get_my_listings))
        .route(
            "/:listing_id/offers",
            post(crate::handler::offers::create_offer),
        )
        .route(
            "/:listing_id/buy",
            post(crate::handler::transactions::buy_listing),
        )
}

pub fn public_listings_handler() -> Router {
    Router::new()
        .route("/active", get(search_active_listings))
        .route("/:listing_id", get(get_listing_by_id))
}

pub async fn create_listing(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateListingDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let listing = app_state
        .listing_service
        .create_listing(user.user.id, body)
        .await?;

    let filtered_listing = ListingFilterDto::from_listing(&listing, user.user.name.clone());

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Listing published successfully",
        "data": {
            "listing": filtered_listing
        }
    })))
}

pub async fn get_my_listings(
    Query(query_params): Query<RequestQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query_params.page.unwrap_or(1) as u32;
    let limit = query_params.limit.unwrap_or(10);

    let listings = app_state
        .db_client
        .get_listings_by_owner(user.user.id, page, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let total = app_state
        .db_client
        .count_listings_by_owner(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let owner_name = user.user.name.clone();
    let filtered_listings: Vec<ListingFilterDto> = listings
        .iter()
        .map(|l| ListingFilterDto::from_listing(l, owner_name.clone()))
        .collect();

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "listings": filtered_listings,
            "pagination": {
                "page": page,
                "limit": limit,
                "total": total
            }
        }
    })))
}

pub async fn search_active_listings(
    Query(query_params): Query<ListingSearchQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query_params.page.unwrap_or(1) as u32;
    let limit = query_params.limit.unwrap_or(10);

    let filters = ListingSearchFilters {
        property_type: query_params.property_type,
        status: query_params.status,
        city: query_params.city,
        min_price: query_params.min_price,
        max_price: query_params.max_price,
        min_area: query_params.min_area,
    };

    let total = app_state
        .db_client
        .count_search_listings(filters.clone())
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let listings = app_state
        .db_client
        .search_listings(filters, page, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let mut filtered_listings = Vec::new();
    for listing in &listings {
        let owner = app_state
            .db_client
            .get_user(Some(listing.owner_id), None)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
            .ok_or_else(|| HttpError::server_error("Listing owner not found"))?;

        filtered_listings.push(ListingFilterDto::from_listing(listing, owner.name));
    }

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "listings": filtered_listings,
            "pagination": {
                "page": page,
                "limit": limit,
                "total": total
            }
        }
    })))
}

pub async fn get_listing_by_id(
    Path(listing_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let listing = app_state
        .db_client
        .get_listing_by_id(listing_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Listing not found"))?;

    let owner = app_state
        .db_client
        .get_user(Some(listing.owner_id), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::server_error("Listing owner not found"))?;

    let filtered_listing = ListingFilterDto::from_listing(&listing, owner.name);

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "listing": filtered_listing
        }
    })))
}
