use std::sync::Arc;
use axum::{
    body::Bytes,
    extract::Path,
    http::HeaderMap,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::orderdb::OrderExt,
    dtos::orderdtos::{CheckoutDto, CreatePackageDto, OrderProofDto, UpdatePackageDto},
    error::HttpError,
    middleware::{role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    AppState,
};

pub fn orders_handler() -> Router {
    Router::new()
        .route("/checkout", post(checkout))
        .route("/my-orders", get(get_my_orders))
        .route("/:order_id/proof", post(attach_order_proof))
        .route(
            "/:order_id/confirm",
            post(confirm_order).layer(middleware::from_fn(|req, next| {
                role_check(req, next, vec![UserRole::Admin])
            })),
        )
}

pub fn packages_handler() -> Router {
    Router::new()
        .route(
            "/",
            post(create_package).layer(middleware::from_fn(|req, next| {
                role_check(req, next, vec![UserRole::Admin])
            })),
        )
        .route(
            "/:package_id",
            put(update_package).layer(middleware::from_fn(|req, next| {
                role_check(req, next, vec![UserRole::Admin])
            })),
        )
}

pub fn public_packages_handler() -> Router {
    Router::new().route("/", get(get_active_packages))
}

pub fn webhook_handler() -> Router {
    Router::new().route("/webhook/paystack", post(gateway_webhook))
}

pub async fn get_active_packages(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let packages = app_state
        .db_client
        .get_active_packages()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "packages": packages
        }
    })))
}

pub async fn create_package(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(_user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreatePackageDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let package = app_state
        .db_client
        .create_package(
            body.name,
            body.price,
            body.listing_limit,
            body.duration_days,
            body.package_type,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Package created successfully",
        "data": {
            "package": package
        }
    })))
}

pub async fn update_package(
    Path(package_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(_user): Extension<JWTAuthMiddeware>,
    Json(body): Json<UpdatePackageDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let package = app_state
        .db_client
        .update_package(
            package_id,
            body.name,
            body.price,
            body.listing_limit,
            body.duration_days,
            body.active,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Package not found"))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Package updated successfully",
        "data": {
            "package": package
        }
    })))
}

pub async fn checkout(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CheckoutDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let (order, instructions) = app_state
        .order_service
        .checkout(user.user.id, user.user.email.clone(), body)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "order": order,
            "payment": instructions
        }
    })))
}

pub async fn get_my_orders(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let orders = app_state
        .db_client
        .get_orders_by_user(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "orders": orders
        }
    })))
}

pub async fn attach_order_proof(
    Path(order_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<OrderProofDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let order = app_state
        .order_service
        .attach_proof(user.user.id, order_id, body.payment_proof)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Payment proof attached, awaiting confirmation",
        "data": {
            "order": order
        }
    })))
}

// Admin confirms a bank-transfer order after checking the proof
pub async fn confirm_order(
    Path(order_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(_user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let order = app_state.order_service.confirm_order(order_id).await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Order confirmed and package credited",
        "data": {
            "order": order
        }
    })))
}

/// Unauthenticated gateway callback. The signature header is the only
/// credential; a 200 tells the gateway to stop retrying.
pub async fn gateway_webhook(
    headers: HeaderMap,
    Extension(app_state): Extension<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, HttpError> {
    let signature = headers
        .get("x-paystack-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| HttpError::unauthorized("Missing webhook signature"))?;

    app_state
        .order_service
        .handle_gateway_webhook(&body, signature)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success"
    })))
}
