use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::db::DBClient,
    models::offermodel::{Offer, OfferHistory},
};

#[async_trait]
pub trait OfferExt {
    async fn get_offer_by_id(&self, offer_id: Uuid) -> Result<Option<Offer>, sqlx::Error>;

    /// The buyer's PENDING or COUNTERED offer on a listing, if any.
    async fn get_active_offer(
        &self,
        listing_id: Uuid,
        buyer_id: Uuid,
    ) -> Result<Option<Offer>, sqlx::Error>;

    async fn get_offer_history(
        &self,
        offer_id: Uuid,
    ) -> Result<Vec<OfferHistory>, sqlx::Error>;

    async fn get_offers_by_buyer(&self, buyer_id: Uuid) -> Result<Vec<Offer>, sqlx::Error>;

    /// Offers on any listing owned by the given user.
    async fn get_offers_received(&self, owner_id: Uuid) -> Result<Vec<Offer>, sqlx::Error>;
}

#[async_trait]
impl OfferExt for DBClient {
    async fn get_offer_by_id(&self, offer_id: Uuid) -> Result<Option<Offer>, sqlx::Error> {
        sqlx::query_as::<_, Offer>("SELECT * FROM offers WHERE id = $1")
            .bind(offer_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_active_offer(
        &self,
        listing_id: Uuid,
        buyer_id: Uuid,
    ) -> Result<Option<Offer>, sqlx::Error> {
        sqlx::query_as::<_, Offer>(
            r#"
            SELECT * FROM offers
            WHERE listing_id = $1 AND buyer_id = $2
              AND status IN ('pending', 'countered')
            LIMIT 1
            "#,
        )
        .bind(listing_id)
        .bind(buyer_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_offer_history(
        &self,
        offer_id: Uuid,
    ) -> Result<Vec<OfferHistory>, sqlx::Error> {
        sqlx::query_as::<_, OfferHistory>(
            r#"
            SELECT * FROM offer_history
            WHERE offer_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(offer_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_offers_by_buyer(&self, buyer_id: Uuid) -> Result<Vec<Offer>, sqlx::Error> {
        sqlx::query_as::<_, Offer>(
            r#"
            SELECT * FROM offers
            WHERE buyer_id = $1
            ORDER BY updated_at DESC
            "#,
        )
        .bind(buyer_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_offers_received(&self, owner_id: Uuid) -> Result<Vec<Offer>, sqlx::Error> {
        sqlx::query_as::<_, Offer>(
            r#"
            SELECT o.* FROM offers o
            JOIN listings l ON l.id = o.listing_id
            WHERE l.owner_id = $1
            ORDER BY o.updated_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
    }
}
