// routes.rs
use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        listings::{listings_handler, public_listings_handler},
        offers::offers_handler,
        orders::{orders_handler, packages_handler, public_packages_handler, webhook_handler},
        transactions::transactions_handler,
        users::users_handler,
    },
    middleware::auth,
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Browsing and the gateway callback stay public; everything else
    // goes through the auth middleware.
    let listing_routes = Router::new()
        .merge(listings_handler().layer(middleware::from_fn(auth)))
        .merge(public_listings_handler());

    let package_routes = Router::new()
        .merge(packages_handler().layer(middleware::from_fn(auth)))
        .merge(public_packages_handler());

    let order_routes = Router::new()
        .merge(orders_handler().layer(middleware::from_fn(auth)))
        .merge(webhook_handler());

    let api_route = Router::new()
        .nest("/users", users_handler().layer(middleware::from_fn(auth)))
        .nest("/listings", listing_routes)
        .nest("/offers", offers_handler().layer(middleware::from_fn(auth)))
        .nest("/packages", package_routes)
        .nest("/orders", order_routes)
        .nest(
            "/transactions",
            transactions_handler().layer(middleware::from_fn(auth)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
}
