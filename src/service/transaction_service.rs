// service/transaction_service.rs
use std::sync::Arc;

use sqlx::{Postgres, Transaction as SqlxTx};
use uuid::Uuid;

use crate::{
    db::{db::DBClient, listingdb::ListingExt, transactiondb::TransactionExt},
    dtos::transactiondtos::SettleOutcome,
    models::{
        offermodel::Offer,
        transactionmodel::{Transaction, TransactionStatus},
    },
    service::error::ServiceError,
};

/// A concurrent insert that slipped past the open-transaction pre-check
/// lands on the partial unique index; surface it as the same conflict.
fn open_transaction_conflict(e: sqlx::Error) -> ServiceError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => ServiceError::StateConflict(
            "an open transaction already exists for this listing and buyer".to_string(),
        ),
        _ => ServiceError::Database(e),
    }
}

/// Open a transaction from an accepted offer, inside the caller's
/// transaction scope so the acceptance and the deal commit together.
/// The price is the offer's projected amount, i.e. the latest counter.
pub async fn finalize_from_offer(
    tx: &mut SqlxTx<'_, Postgres>,
    offer: &Offer,
    seller_id: Uuid,
) -> Result<Transaction, ServiceError> {
    let existing = sqlx::query_as::<_, Transaction>(
        r#"
        SELECT * FROM transactions
        WHERE listing_id = $1 AND buyer_id = $2
          AND status IN ('pending', 'waiting_verification')
        "#,
    )
    .bind(offer.listing_id)
    .bind(offer.buyer_id)
    .fetch_optional(&mut **tx)
    .await?;

    if existing.is_some() {
        return Err(ServiceError::StateConflict(
            "an open transaction already exists for this listing and buyer".to_string(),
        ));
    }

    let transaction = sqlx::query_as::<_, Transaction>(
        r#"
        INSERT INTO transactions (listing_id, buyer_id, seller_id, amount, status)
        VALUES ($1, $2, $3, $4, 'pending')
        RETURNING *
        "#,
    )
    .bind(offer.listing_id)
    .bind(offer.buyer_id)
    .bind(seller_id)
    .bind(offer.amount)
    .fetch_one(&mut **tx)
    .await
    .map_err(open_transaction_conflict)?;

    Ok(transaction)
}

#[derive(Debug, Clone)]
pub struct TransactionService {
    db_client: Arc<DBClient>,
}

impl TransactionService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    /// A direct purchase at the listing price, skipping negotiation.
    pub async fn create_direct(
        &self,
        buyer_id: Uuid,
        listing_id: Uuid,
    ) -> Result<Transaction, ServiceError> {
        let listing = self
            .db_client
            .get_listing_by_id(listing_id)
            .await?
            .ok_or(ServiceError::ListingNotFound(listing_id))?;

        if listing.owner_id == buyer_id {
            return Err(ServiceError::SelfTransaction);
        }

        if self
            .db_client
            .get_open_transaction(listing_id, buyer_id)
            .await?
            .is_some()
        {
            return Err(ServiceError::StateConflict(
                "an open transaction already exists for this listing and buyer".to_string(),
            ));
        }

        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (listing_id, buyer_id, seller_id, amount, status)
            VALUES ($1, $2, $3, $4, 'pending')
            RETURNING *
            "#,
        )
        .bind(listing_id)
        .bind(buyer_id)
        .bind(listing.owner_id)
        .bind(listing.price)
        .fetch_one(&self.db_client.pool)
        .await
        .map_err(open_transaction_conflict)?;

        tracing::info!(transaction_id = %transaction.id, listing_id = %listing_id, "direct transaction opened");
        Ok(transaction)
    }

    /// Buyer attaches payment evidence; the transaction moves to
    /// waiting_verification for the seller to settle.
    pub async fn attach_proof(
        &self,
        buyer_id: Uuid,
        transaction_id: Uuid,
        payment_proof: String,
    ) -> Result<Transaction, ServiceError> {
        let transaction = self
            .db_client
            .get_transaction_by_id(transaction_id)
            .await?
            .ok_or(ServiceError::TransactionNotFound(transaction_id))?;

        if transaction.buyer_id != buyer_id {
            return Err(ServiceError::Unauthorized(buyer_id, transaction_id));
        }

        if transaction.status != TransactionStatus::Pending {
            return Err(ServiceError::StateConflict(format!(
                "cannot attach proof to a {} transaction",
                transaction.status.to_str()
            )));
        }

        let updated = sqlx::query_as::<_, Transaction>(
            r#"
            UPDATE transactions
            SET status = 'waiting_verification', payment_proof = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(transaction_id)
        .bind(payment_proof)
        .fetch_one(&self.db_client.pool)
        .await?;

        Ok(updated)
    }

    /// Seller's verdict on a non-terminal transaction.
    pub async fn settle(
        &self,
        seller_id: Uuid,
        transaction_id: Uuid,
        outcome: SettleOutcome,
    ) -> Result<Transaction, ServiceError> {
        let transaction = self
            .db_client
            .get_transaction_by_id(transaction_id)
            .await?
            .ok_or(ServiceError::TransactionNotFound(transaction_id))?;

        if transaction.seller_id != seller_id {
            return Err(ServiceError::Unauthorized(seller_id, transaction_id));
        }

        if transaction.status.is_terminal() {
            return Err(ServiceError::StateConflict(format!(
                "transaction is already {}",
                transaction.status.to_str()
            )));
        }

        let status = match outcome {
            SettleOutcome::Success => TransactionStatus::Success,
            SettleOutcome::Cancelled => TransactionStatus::Cancelled,
        };

        let updated = sqlx::query_as::<_, Transaction>(
            r#"
            UPDATE transactions SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(transaction_id)
        .bind(status)
        .fetch_one(&self.db_client.pool)
        .await?;

        tracing::info!(
            transaction_id = %transaction_id,
            status = updated.status.to_str(),
            "transaction settled"
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_transaction_conflict_reports_409() {
        // Only unique violations become conflicts; a mapped error must
        // carry the conflict status, anything else stays a database error.
        let mapped = open_transaction_conflict(sqlx::Error::RowNotFound);
        assert!(matches!(mapped, ServiceError::Database(_)));

        let conflict = ServiceError::StateConflict(
            "an open transaction already exists for this listing and buyer".to_string(),
        );
        assert_eq!(conflict.status_code(), axum::http::StatusCode::CONFLICT);
    }
}
