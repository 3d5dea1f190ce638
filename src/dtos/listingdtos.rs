use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::types::BigDecimal;
use uuid::Uuid;
use validator::Validate;

use crate::models::listingmodel::{Listing, ListingStatus, PropertyType};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateListingDto {
    #[validate(length(min = 10, max = 200, message = "Title must be between 10 and 200 characters"))]
    pub title: String,

    #[validate(length(min = 20, max = 2000, message = "Description must be between 20 and 2000 characters"))]
    pub description: String,

    pub property_type: PropertyType,
    pub status: ListingStatus,

    #[validate(length(min = 5, max = 500, message = "Address must be between 5 and 500 characters"))]
    pub address: String,

    #[validate(length(min = 2, max = 100, message = "City is required"))]
    pub city: String,

    // Mandatory, but optional in the payload so absence yields a structured
    // MissingLocation error rather than a deserialization failure.
    pub latitude: Option<BigDecimal>,
    pub longitude: Option<BigDecimal>,

    pub area_sqm: Option<i32>,
    pub land_area_sqm: Option<i32>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,

    #[validate(range(min = 1, message = "Price must be positive"))]
    pub price: i64,

    pub facilities: Option<Vec<String>>,

    #[validate(length(min = 1, message = "At least one photo is required"))]
    pub photos: Vec<String>,

    /// Content hash of the primary photo, when the upload pipeline supplies one.
    pub image_hash: Option<String>,
}

#[derive(Serialize, Deserialize, Validate)]
pub struct ListingSearchQueryDto {
    pub property_type: Option<PropertyType>,
    pub status: Option<ListingStatus>,
    pub city: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub min_area: Option<i32>,
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListingFilterDto {
    pub id: Uuid,
    pub title: String,
    pub property_type: String,
    pub status: String,
    pub address: String,
    pub city: String,
    pub latitude: BigDecimal,
    pub longitude: BigDecimal,
    pub price: i64,
    pub area_sqm: Option<i32>,
    pub land_area_sqm: Option<i32>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub facilities: JsonValue,
    pub photos: JsonValue,
    pub featured: bool,
    pub urgent: bool,
    pub owner_name: String,
    pub created_at: DateTime<Utc>,
}

impl ListingFilterDto {
    pub fn from_listing(listing: &Listing, owner_name: String) -> Self {
        Self {
            id: listing.id,
            title: listing.title.clone(),
            property_type: format!("{:?}", listing.property_type),
            status: listing.status.to_str().to_string(),
            address: listing.address.clone(),
            city: listing.city.clone(),
            latitude: listing.latitude.clone(),
            longitude: listing.longitude.clone(),
            price: listing.price,
            area_sqm: listing.area_sqm,
            land_area_sqm: listing.land_area_sqm,
            bedrooms: listing.bedrooms,
            bathrooms: listing.bathrooms,
            facilities: listing.facilities.clone(),
            photos: listing.photos.clone(),
            featured: listing.featured,
            urgent: listing.urgent,
            owner_name,
            created_at: listing.created_at,
        }
    }
}
