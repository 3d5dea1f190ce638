// service/offer_service.rs
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{db::DBClient, listingdb::ListingExt, offerdb::OfferExt},
    dtos::offerdtos::{CreateOfferDto, OfferActionDto, OfferActionKind},
    models::offermodel::{Offer, OfferAction, OfferStatus},
    service::{error::ServiceError, transaction_service},
};

/// Transition table for the negotiation state machine. Terminal states
/// accept nothing; active states accept any of the three answers.
pub fn validate_transition(
    current: OfferStatus,
    action: OfferActionKind,
) -> Result<OfferStatus, ServiceError> {
    if !current.is_active() {
        return Err(ServiceError::StateConflict(format!(
            "offer is already {}",
            current.to_str()
        )));
    }

    let next = match action {
        OfferActionKind::Accept => OfferStatus::Accepted,
        OfferActionKind::Reject => OfferStatus::Rejected,
        OfferActionKind::Counter => OfferStatus::Countered,
    };
    Ok(next)
}

/// Guards for opening a negotiation thread: owners cannot bid on their own
/// listings, and a buyer holds at most one active offer per listing.
pub fn validate_new_offer(
    owner_id: Uuid,
    buyer_id: Uuid,
    has_active_offer: bool,
) -> Result<(), ServiceError> {
    if owner_id == buyer_id {
        return Err(ServiceError::SelfOffer);
    }
    if has_active_offer {
        return Err(ServiceError::DuplicateActiveOffer);
    }
    Ok(())
}

/// Resolve an action against the offer's current state into the next
/// status, the history action, and the price the offer settles on. The
/// price is the current projected amount except for counters, which carry
/// a new positive amount.
pub fn resolve_action(
    current: OfferStatus,
    current_amount: i64,
    action: OfferActionKind,
    counter_amount: Option<i64>,
) -> Result<(OfferStatus, OfferAction, i64), ServiceError> {
    let next_status = validate_transition(current, action)?;

    let (history_action, price) = match action {
        OfferActionKind::Accept => (OfferAction::Accept, current_amount),
        OfferActionKind::Reject => (OfferAction::Reject, current_amount),
        OfferActionKind::Counter => {
            let amount = counter_amount
                .ok_or_else(|| ServiceError::Validation("Counter requires an amount".into()))?;
            if amount <= 0 {
                return Err(ServiceError::Validation("Counter amount must be positive".into()));
            }
            (OfferAction::Counter, amount)
        }
    };

    Ok((next_status, history_action, price))
}

#[derive(Debug, Clone)]
pub struct OfferService {
    db_client: Arc<DBClient>,
}

impl OfferService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    /// Open a negotiation thread on a listing. One active thread per
    /// (listing, buyer) pair; owners cannot bid on their own listings.
    pub async fn create_offer(
        &self,
        buyer_id: Uuid,
        listing_id: Uuid,
        data: CreateOfferDto,
    ) -> Result<Offer, ServiceError> {
        let listing = self
            .db_client
            .get_listing_by_id(listing_id)
            .await?
            .ok_or(ServiceError::ListingNotFound(listing_id))?;

        let has_active_offer = self
            .db_client
            .get_active_offer(listing_id, buyer_id)
            .await?
            .is_some();

        validate_new_offer(listing.owner_id, buyer_id, has_active_offer)?;

        let mut tx = self.db_client.pool.begin().await?;

        let offer = sqlx::query_as::<_, Offer>(
            r#"
            INSERT INTO offers (listing_id, buyer_id, amount, status)
            VALUES ($1, $2, $3, 'pending')
            RETURNING *
            "#,
        )
        .bind(listing_id)
        .bind(buyer_id)
        .bind(data.amount)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ServiceError::DuplicateActiveOffer
            }
            _ => ServiceError::Database(e),
        })?;

        sqlx::query(
            r#"
            INSERT INTO offer_history (offer_id, sender_id, action, price, message)
            VALUES ($1, $2, 'create', $3, $4)
            "#,
        )
        .bind(offer.id)
        .bind(buyer_id)
        .bind(data.amount)
        .bind(&data.message)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(offer_id = %offer.id, listing_id = %listing_id, "offer opened");
        Ok(offer)
    }

    /// Answer an active offer. The history append, the projection update
    /// and, on accept, the transaction creation all commit atomically.
    pub async fn apply_action(
        &self,
        sender_id: Uuid,
        offer_id: Uuid,
        data: OfferActionDto,
    ) -> Result<Offer, ServiceError> {
        let mut tx = self.db_client.pool.begin().await?;

        let offer = sqlx::query_as::<_, Offer>("SELECT * FROM offers WHERE id = $1 FOR UPDATE")
            .bind(offer_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(ServiceError::OfferNotFound(offer_id))?;

        let listing = self
            .db_client
            .get_listing_by_id(offer.listing_id)
            .await?
            .ok_or(ServiceError::ListingNotFound(offer.listing_id))?;

        if sender_id != offer.buyer_id && sender_id != listing.owner_id {
            return Err(ServiceError::Unauthorized(sender_id, offer_id));
        }

        let (next_status, action, price) =
            resolve_action(offer.status, offer.amount, data.action, data.amount)?;

        sqlx::query(
            r#"
            INSERT INTO offer_history (offer_id, sender_id, action, price, message)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(offer_id)
        .bind(sender_id)
        .bind(action)
        .bind(price)
        .bind(&data.message)
        .execute(&mut *tx)
        .await?;

        let updated = sqlx::query_as::<_, Offer>(
            r#"
            UPDATE offers SET status = $2, amount = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(offer_id)
        .bind(next_status)
        .bind(price)
        .fetch_one(&mut *tx)
        .await?;

        if next_status == OfferStatus::Accepted {
            transaction_service::finalize_from_offer(&mut tx, &updated, listing.owner_id).await?;
        }

        tx.commit().await?;

        tracing::info!(
            offer_id = %offer_id,
            action = action.to_str(),
            status = updated.status.to_str(),
            "offer updated"
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_offers_accept_all_answers() {
        for current in [OfferStatus::Pending, OfferStatus::Countered] {
            assert_eq!(
                validate_transition(current, OfferActionKind::Accept).unwrap(),
                OfferStatus::Accepted
            );
            assert_eq!(
                validate_transition(current, OfferActionKind::Reject).unwrap(),
                OfferStatus::Rejected
            );
            assert_eq!(
                validate_transition(current, OfferActionKind::Counter).unwrap(),
                OfferStatus::Countered
            );
        }
    }

    #[test]
    fn test_terminal_offers_refuse_everything() {
        for current in [OfferStatus::Accepted, OfferStatus::Rejected] {
            for action in [
                OfferActionKind::Accept,
                OfferActionKind::Reject,
                OfferActionKind::Counter,
            ] {
                assert!(matches!(
                    validate_transition(current, action),
                    Err(ServiceError::StateConflict(_))
                ));
            }
        }
    }

    #[test]
    fn test_rejection_frees_the_listing_buyer_pair() {
        // The active-offer guard only counts pending/countered offers, so
        // a buyer can open a fresh negotiation after a rejection.
        assert!(OfferStatus::Pending.is_active());
        assert!(OfferStatus::Countered.is_active());
        assert!(!OfferStatus::Rejected.is_active());
        assert!(!OfferStatus::Accepted.is_active());
    }

    #[test]
    fn test_counter_then_accept_settles_at_countered_price() {
        // Buyer opens at 400m, seller counters at 450m, buyer accepts:
        // the accepted price is the counter, not the opening bid.
        let (status, action, price) =
            resolve_action(OfferStatus::Pending, 400_000_000, OfferActionKind::Counter, Some(450_000_000))
                .unwrap();
        assert_eq!(status, OfferStatus::Countered);
        assert_eq!(action, OfferAction::Counter);
        assert_eq!(price, 450_000_000);

        let (status, action, price) =
            resolve_action(status, price, OfferActionKind::Accept, None).unwrap();
        assert_eq!(status, OfferStatus::Accepted);
        assert_eq!(action, OfferAction::Accept);
        assert_eq!(price, 450_000_000);
    }

    #[test]
    fn test_counter_requires_a_positive_amount() {
        assert!(matches!(
            resolve_action(OfferStatus::Pending, 100, OfferActionKind::Counter, None),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            resolve_action(OfferStatus::Pending, 100, OfferActionKind::Counter, Some(0)),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn test_accept_and_reject_keep_the_projected_amount() {
        let (_, _, price) =
            resolve_action(OfferStatus::Countered, 90, OfferActionKind::Accept, Some(55)).unwrap();
        assert_eq!(price, 90);

        let (_, _, price) =
            resolve_action(OfferStatus::Pending, 90, OfferActionKind::Reject, None).unwrap();
        assert_eq!(price, 90);
    }

    #[test]
    fn test_owner_cannot_bid_on_own_listing() {
        let owner = Uuid::new_v4();
        assert!(matches!(
            validate_new_offer(owner, owner, false),
            Err(ServiceError::SelfOffer)
        ));
    }

    #[test]
    fn test_one_active_offer_per_listing_buyer_pair() {
        let owner = Uuid::new_v4();
        let buyer = Uuid::new_v4();
        assert!(matches!(
            validate_new_offer(owner, buyer, true),
            Err(ServiceError::DuplicateActiveOffer)
        ));
        assert!(validate_new_offer(owner, buyer, false).is_ok());
    }
}
