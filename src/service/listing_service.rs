// service/listing_service.rs
use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    db::db::DBClient,
    dtos::listingdtos::CreateListingDto,
    models::listingmodel::Listing,
    service::{
        dedup,
        error::{DuplicateReason, ServiceError},
        quota,
    },
};

#[derive(Debug, sqlx::FromRow)]
struct QuotaGuardRow {
    listing_limit: i32,
    package_expiry: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, sqlx::FromRow)]
struct DuplicateRow {
    listing_hash: String,
    coordinates_hash: String,
}

#[derive(Debug, Clone)]
pub struct ListingService {
    db_client: Arc<DBClient>,
}

impl ListingService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    /// Create a listing for `owner_id`, enforcing the quota ceiling and the
    /// duplicate policy. The whole check-then-insert runs in one transaction
    /// with the owner's row locked, so concurrent submissions cannot race
    /// past the quota check; unique indexes on the fingerprints backstop the
    /// duplicate pre-check.
    pub async fn create_listing(
        &self,
        owner_id: Uuid,
        data: CreateListingDto,
    ) -> Result<Listing, ServiceError> {
        let (latitude, longitude) = match (data.latitude.clone(), data.longitude.clone()) {
            (Some(lat), Some(lng)) => (lat, lng),
            _ => return Err(ServiceError::MissingLocation),
        };

        let listing_hash = dedup::listing_fingerprint(
            &data.address,
            data.property_type,
            data.status,
            data.area_sqm,
            data.land_area_sqm,
        );
        let coordinates_hash =
            dedup::coordinates_fingerprint(&latitude, &longitude, data.property_type, data.status);

        let mut tx = self.db_client.pool.begin().await?;

        let guard = sqlx::query_as::<_, QuotaGuardRow>(
            "SELECT listing_limit, package_expiry FROM users WHERE id = $1 FOR UPDATE",
        )
        .bind(owner_id)
        .fetch_one(&mut *tx)
        .await?;

        let active_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM listings WHERE owner_id = $1")
                .bind(owner_id)
                .fetch_one(&mut *tx)
                .await?;

        quota::quota_decision(
            guard.listing_limit,
            guard.package_expiry,
            active_count,
            Utc::now(),
        )?;

        if let Some(existing) = sqlx::query_as::<_, DuplicateRow>(
            r#"
            SELECT listing_hash, coordinates_hash FROM listings
            WHERE listing_hash = $1
               OR coordinates_hash = $2
               OR ($3::text IS NOT NULL AND image_hash = $3)
            LIMIT 1
            "#,
        )
        .bind(&listing_hash)
        .bind(&coordinates_hash)
        .bind(&data.image_hash)
        .fetch_optional(&mut *tx)
        .await?
        {
            let reason = if existing.listing_hash == listing_hash {
                DuplicateReason::Address
            } else if existing.coordinates_hash == coordinates_hash {
                DuplicateReason::Coordinates
            } else {
                DuplicateReason::Image
            };
            return Err(ServiceError::DuplicateListing(reason));
        }

        let listing = sqlx::query_as::<_, Listing>(
            r#"
            INSERT INTO listings (
                owner_id, title, description, property_type, status,
                address, city, latitude, longitude,
                area_sqm, land_area_sqm, bedrooms, bathrooms, price,
                facilities, photos, image_hash, listing_hash, coordinates_hash
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9,
                $10, $11, $12, $13, $14, $15, $16, $17, $18, $19
            )
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.property_type)
        .bind(data.status)
        .bind(&data.address)
        .bind(&data.city)
        .bind(&latitude)
        .bind(&longitude)
        .bind(data.area_sqm)
        .bind(data.land_area_sqm)
        .bind(data.bedrooms)
        .bind(data.bathrooms)
        .bind(data.price)
        .bind(Json(json!(data.facilities.clone().unwrap_or_default())))
        .bind(Json(json!(data.photos.clone())))
        .bind(&data.image_hash)
        .bind(&listing_hash)
        .bind(&coordinates_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match &e {
            // A concurrent insert beat the pre-check
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                let reason = match db.constraint() {
                    Some("listings_coordinates_hash_key") => DuplicateReason::Coordinates,
                    Some("listings_image_hash_key") => DuplicateReason::Image,
                    _ => DuplicateReason::Address,
                };
                ServiceError::DuplicateListing(reason)
            }
            _ => ServiceError::Database(e),
        })?;

        tx.commit().await?;

        tracing::info!(listing_id = %listing.id, owner_id = %owner_id, "listing created");
        Ok(listing)
    }
}
