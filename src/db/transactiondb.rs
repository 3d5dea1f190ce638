use async_trait::async_trait;
use uuid::Uuid;

use crate::{db::db::DBClient, models::transactionmodel::Transaction};

#[async_trait]
pub trait TransactionExt {
    async fn get_transaction_by_id(
        &self,
        transaction_id: Uuid,
    ) -> Result<Option<Transaction>, sqlx::Error>;

    /// A buyer's non-terminal transaction on a listing, if any.
    async fn get_open_transaction(
        &self,
        listing_id: Uuid,
        buyer_id: Uuid,
    ) -> Result<Option<Transaction>, sqlx::Error>;

    /// All transactions where the user is buyer or seller.
    async fn get_transactions_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Transaction>, sqlx::Error>;
}

#[async_trait]
impl TransactionExt for DBClient {
    async fn get_transaction_by_id(
        &self,
        transaction_id: Uuid,
    ) -> Result<Option<Transaction>, sqlx::Error> {
        sqlx::query_as::<_, Transaction>("SELECT * FROM transactions WHERE id = $1")
            .bind(transaction_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_open_transaction(
        &self,
        listing_id: Uuid,
        buyer_id: Uuid,
    ) -> Result<Option<Transaction>, sqlx::Error> {
        sqlx::query_as::<_, Transaction>(
            r#"
            SELECT * FROM transactions
            WHERE listing_id = $1 AND buyer_id = $2
              AND status IN ('pending', 'waiting_verification')
            LIMIT 1
            "#,
        )
        .bind(listing_id)
        .bind(buyer_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_transactions_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        sqlx::query_as::<_, Transaction>(
            r#"
            SELECT * FROM transactions
            WHERE buyer_id = $1 OR seller_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }
}
