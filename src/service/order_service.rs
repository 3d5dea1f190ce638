// service/order_service.rs
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    config::Config,
    db::{db::DBClient, orderdb::OrderExt},
    dtos::orderdtos::{CheckoutDto, GatewayWebhookEvent, PaymentInstructions},
    models::ordermodel::{ListingPackage, Order, OrderStatus, PaymentMethod},
    service::{
        error::ServiceError,
        payment_provider::PaymentProviderService,
        quota,
    },
    utils::{currency::format_amount, reference::generate_order_reference},
};

#[derive(Debug, sqlx::FromRow)]
struct QuotaRow {
    listing_limit: i32,
    package_expiry: Option<chrono::DateTime<chrono::Utc>>,
}

/// The quota credit a confirmation applies, or `None` when the order is
/// already paid. Replayed confirmations (duplicate webhooks, a double
/// admin click) take the `None` path and credit nothing.
pub fn confirmation_credit(
    order_status: OrderStatus,
    listing_limit: i32,
    package_expiry: Option<chrono::DateTime<chrono::Utc>>,
    package: &ListingPackage,
    now: chrono::DateTime<chrono::Utc>,
) -> Option<(i32, Option<chrono::DateTime<chrono::Utc>>)> {
    if order_status == OrderStatus::Paid {
        return None;
    }
    Some(quota::credit_package(listing_limit, package_expiry, package, now))
}

pub struct OrderService {
    db_client: Arc<DBClient>,
    payment_provider: PaymentProviderService,
    config: Config,
}

impl OrderService {
    pub fn new(db_client: Arc<DBClient>, config: Config) -> Self {
        Self {
            db_client,
            payment_provider: PaymentProviderService::new(&config),
            config,
        }
    }

    /// Open a pending order for a package and hand back payment
    /// instructions. The order stays pending until the gateway webhook or
    /// an admin confirmation flips it.
    pub async fn checkout(
        &self,
        user_id: Uuid,
        email: String,
        data: CheckoutDto,
    ) -> Result<(Order, PaymentInstructions), ServiceError> {
        let package = self
            .db_client
            .get_package_by_id(data.package_id)
            .await?
            .ok_or(ServiceError::PackageNotFound(data.package_id))?;

        if !package.active {
            return Err(ServiceError::PackageNotFound(data.package_id));
        }

        let reference = generate_order_reference();
        let order = self
            .db_client
            .create_order(
                user_id,
                package.id,
                package.price,
                data.payment_method,
                reference.clone(),
            )
            .await?;

        let instructions = match data.payment_method {
            PaymentMethod::Gateway => {
                let init = self
                    .payment_provider
                    .initialize_payment(email, package.price, reference.clone())
                    .await?;
                PaymentInstructions::Gateway {
                    payment_url: init.payment_url,
                    reference,
                }
            }
            PaymentMethod::BankTransfer => PaymentInstructions::BankTransfer {
                bank_name: self.config.platform_bank_name.clone(),
                account_number: self.config.platform_bank_account.clone(),
                account_holder: self.config.platform_bank_holder.clone(),
                amount: package.price,
                reference,
            },
        };

        tracing::info!(order_id = %order.id, package = %package.name, "order opened");
        Ok((order, instructions))
    }

    /// Buyer attaches a bank-transfer proof to their own pending order.
    pub async fn attach_proof(
        &self,
        user_id: Uuid,
        order_id: Uuid,
        payment_proof: String,
    ) -> Result<Order, ServiceError> {
        let order = self
            .db_client
            .get_order_by_id(order_id)
            .await?
            .ok_or(ServiceError::OrderNotFound(order_id))?;

        if order.user_id != user_id {
            return Err(ServiceError::Unauthorized(user_id, order_id));
        }

        if order.status == OrderStatus::Paid {
            return Err(ServiceError::StateConflict("order is already paid".to_string()));
        }

        if order.payment_method != PaymentMethod::BankTransfer {
            return Err(ServiceError::StateConflict(
                "payment proof only applies to bank transfer orders".to_string(),
            ));
        }

        Ok(self.db_client.attach_order_proof(order_id, payment_proof).await?)
    }

    /// Mark an order paid and credit the package onto the buyer's account.
    ///
    /// Idempotent: confirming an already-paid order is a no-op, so a
    /// replayed webhook or a double admin click cannot credit twice. The
    /// user row is locked while the credit is applied.
    pub async fn confirm_order(&self, order_id: Uuid) -> Result<Order, ServiceError> {
        let mut tx = self.db_client.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1 FOR UPDATE")
            .bind(order_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(ServiceError::OrderNotFound(order_id))?;

        let package = sqlx::query_as::<_, ListingPackage>(
            "SELECT * FROM listing_packages WHERE id = $1",
        )
        .bind(order.package_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ServiceError::PackageNotFound(order.package_id))?;

        let current = sqlx::query_as::<_, QuotaRow>(
            "SELECT listing_limit, package_expiry FROM users WHERE id = $1 FOR UPDATE",
        )
        .bind(order.user_id)
        .fetch_one(&mut *tx)
        .await?;

        let Some((new_limit, new_expiry)) = confirmation_credit(
            order.status,
            current.listing_limit,
            current.package_expiry,
            &package,
            Utc::now(),
        ) else {
            tx.commit().await?;
            return Ok(order);
        };

        sqlx::query("UPDATE users SET listing_limit = $2, package_expiry = $3, updated_at = NOW() WHERE id = $1")
            .bind(order.user_id)
            .bind(new_limit)
            .bind(new_expiry)
            .execute(&mut *tx)
            .await?;

        let updated = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders SET status = 'paid', updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(order_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            order_id = %order_id,
            user_id = %order.user_id,
            new_limit,
            "order confirmed, package credited"
        );
        Ok(updated)
    }

    /// Process a gateway webhook delivery. The raw body is authenticated
    /// against the signature header before anything is parsed or trusted;
    /// the charge is then re-verified with the gateway rather than taking
    /// the payload's word for it.
    pub async fn handle_gateway_webhook(
        &self,
        body: &[u8],
        signature: &str,
    ) -> Result<(), ServiceError> {
        if !self.payment_provider.verify_webhook_signature(body, signature) {
            return Err(ServiceError::Validation("invalid webhook signature".to_string()));
        }

        let event: GatewayWebhookEvent = serde_json::from_slice(body)
            .map_err(|e| ServiceError::Validation(format!("malformed webhook payload: {}", e)))?;

        if event.event != "charge.success" {
            tracing::debug!(event = %event.event, "ignoring gateway event");
            return Ok(());
        }

        let order = self
            .db_client
            .get_order_by_reference(&event.data.reference)
            .await?
            .ok_or_else(|| {
                ServiceError::Validation(format!("unknown order reference {}", event.data.reference))
            })?;

        let verification = self.payment_provider.verify_payment(&order.reference).await?;
        if verification.amount < order.amount {
            return Err(ServiceError::Gateway(format!(
                "gateway reports {} paid for a {} order",
                format_amount(verification.amount),
                format_amount(order.amount)
            )));
        }

        self.confirm_order(order.id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use crate::models::ordermodel::PackageType;

    fn package(package_type: PackageType, listing_limit: i32, duration_days: i32) -> ListingPackage {
        ListingPackage {
            id: Uuid::new_v4(),
            name: "Growth".to_string(),
            price: 2_500_000,
            listing_limit,
            duration_days,
            package_type,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_duplicate_confirmation_credits_once() {
        // A replayed webhook confirms the same order again; the second
        // pass sees PAID and must leave the quota untouched.
        let now = Utc::now();
        let pkg = package(PackageType::Topup, 5, 0);

        let mut status = OrderStatus::Pending;
        let mut limit = 1;
        let mut expiry = None;

        for _ in 0..2 {
            if let Some((new_limit, new_expiry)) =
                confirmation_credit(status, limit, expiry, &pkg, now)
            {
                limit = new_limit;
                expiry = new_expiry;
                status = OrderStatus::Paid;
            }
        }

        assert_eq!(status, OrderStatus::Paid);
        assert_eq!(limit, 6);
        assert_eq!(expiry, None);
    }

    #[test]
    fn test_paid_order_yields_no_credit() {
        let now = Utc::now();
        let pkg = package(PackageType::Subscription, 5, 30);
        assert!(confirmation_credit(OrderStatus::Paid, 1, None, &pkg, now).is_none());
    }

    #[test]
    fn test_pending_order_credits_per_package() {
        let now = Utc::now();
        let pkg = package(PackageType::Subscription, 5, 30);

        let (limit, expiry) = confirmation_credit(OrderStatus::Pending, 1, None, &pkg, now).unwrap();
        assert_eq!(limit, 6);
        assert_eq!(expiry, Some(now + Duration::days(30)));
    }
}
