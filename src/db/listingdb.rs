use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::db::DBClient,
    models::listingmodel::{Listing, ListingStatus, PropertyType},
};

#[derive(Debug, Default, Clone)]
pub struct ListingSearchFilters {
    pub property_type: Option<PropertyType>,
    pub status: Option<ListingStatus>,
    pub city: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub min_area: Option<i32>,
}

/// Page/limit to an OFFSET without overflowing on hostile page numbers.
pub fn page_offset(page: u32, limit: usize) -> i64 {
    (page as i64 - 1).max(0) * limit as i64
}

#[async_trait]
pub trait ListingExt {
    async fn get_listing_by_id(
        &self,
        listing_id: Uuid,
    ) -> Result<Option<Listing>, sqlx::Error>;

    async fn get_listings_by_owner(
        &self,
        owner_id: Uuid,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Listing>, sqlx::Error>;

    async fn count_listings_by_owner(&self, owner_id: Uuid) -> Result<i64, sqlx::Error>;

    async fn search_listings(
        &self,
        filters: ListingSearchFilters,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Listing>, sqlx::Error>;

    async fn count_search_listings(
        &self,
        filters: ListingSearchFilters,
    ) -> Result<i64, sqlx::Error>;
}

#[async_trait]
impl ListingExt for DBClient {
    async fn get_listing_by_id(
        &self,
        listing_id: Uuid,
    ) -> Result<Option<Listing>, sqlx::Error> {
        sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE id = $1")
            .bind(listing_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_listings_by_owner(
        &self,
        owner_id: Uuid,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Listing>, sqlx::Error> {
        let offset = page_offset(page, limit);

        sqlx::query_as::<_, Listing>(
            r#"
            SELECT * FROM listings
            WHERE owner_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(owner_id)
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn count_listings_by_owner(&self, owner_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM listings WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn search_listings(
        &self,
        filters: ListingSearchFilters,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Listing>, sqlx::Error> {
        let offset = page_offset(page, limit);

        sqlx::query_as::<_, Listing>(
            r#"
            SELECT * FROM listings
            WHERE ($1::property_type IS NULL OR property_type = $1)
              AND ($2::listing_status IS NULL OR status = $2)
              AND ($3::text IS NULL OR city ILIKE $3)
              AND ($4::bigint IS NULL OR price >= $4)
              AND ($5::bigint IS NULL OR price <= $5)
              AND ($6::int IS NULL OR area_sqm >= $6)
            ORDER BY featured DESC, priority DESC, created_at DESC
            LIMIT $7 OFFSET $8
            "#,
        )
        .bind(filters.property_type)
        .bind(filters.status)
        .bind(filters.city.as_ref().map(|c| format!("%{}%", c)))
        .bind(filters.min_price)
        .bind(filters.max_price)
        .bind(filters.min_area)
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn count_search_listings(
        &self,
        filters: ListingSearchFilters,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM listings
            WHERE ($1::property_type IS NULL OR property_type = $1)
              AND ($2::listing_status IS NULL OR status = $2)
              AND ($3::text IS NULL OR city ILIKE $3)
              AND ($4::bigint IS NULL OR price >= $4)
              AND ($5::bigint IS NULL OR price <= $5)
              AND ($6::int IS NULL OR area_sqm >= $6)
            "#,
        )
        .bind(filters.property_type)
        .bind(filters.status)
        .bind(filters.city.as_ref().map(|c| format!("%{}%", c)))
        .bind(filters.min_price)
        .bind(filters.max_price)
        .bind(filters.min_area)
        .fetch_one(&self.pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_offset_starts_at_zero() {
        assert_eq!(page_offset(1, 20), 0);
        assert_eq!(page_offset(2, 20), 20);
        // page 0 is treated as the first page
        assert_eq!(page_offset(0, 20), 0);
    }

    #[test]
    fn test_page_offset_survives_huge_pages() {
        assert_eq!(page_offset(u32::MAX, 50), (u32::MAX as i64 - 1) * 50);
    }
}
