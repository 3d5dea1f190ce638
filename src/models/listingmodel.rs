use sqlx::types::chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::BigDecimal, FromRow};
use uuid::Uuid;
use serde_json::Value as JsonValue;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "property_type", rename_all = "lowercase")]
pub enum PropertyType {
    House,
    Apartment,
    Shop,
    Land,
    Warehouse,
}

/// Whether the listing is offered for sale or for rent.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "listing_status", rename_all = "lowercase")]
pub enum ListingStatus {
    Sale,
    Rent,
}

impl ListingStatus {
    pub fn to_str(&self) -> &str {
        match self {
            ListingStatus::Sale => "sale",
            ListingStatus::Rent => "rent",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Listing {
    pub id: Uuid,
    pub owner_id: Uuid,

    pub title: String,
    pub description: String,
    pub property_type: PropertyType,
    pub status: ListingStatus,

    // Location. Coordinates are mandatory at submission time.
    pub address: String,
    pub city: String,
    pub latitude: BigDecimal,
    pub longitude: BigDecimal,

    // Specifications
    pub area_sqm: Option<i32>,
    pub land_area_sqm: Option<i32>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,

    pub price: i64,

    // Features and media
    pub facilities: JsonValue,
    pub photos: JsonValue,
    pub image_hash: Option<String>,

    // Dedup fingerprints (see service::dedup)
    pub listing_hash: String,
    pub coordinates_hash: String,

    pub featured: bool,
    pub priority: bool,
    pub urgent: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
