use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::db::DBClient,
    models::ordermodel::{ListingPackage, Order, PackageType, PaymentMethod},
};

#[async_trait]
pub trait OrderExt {
    async fn create_order(
        &self,
        user_id: Uuid,
        package_id: Uuid,
        amount: i64,
        payment_method: PaymentMethod,
        reference: String,
    ) -> Result<Order, sqlx::Error>;

    async fn get_order_by_id(&self, order_id: Uuid) -> Result<Option<Order>, sqlx::Error>;

    async fn get_order_by_reference(
        &self,
        reference: &str,
    ) -> Result<Option<Order>, sqlx::Error>;

    async fn get_orders_by_user(&self, user_id: Uuid) -> Result<Vec<Order>, sqlx::Error>;

    async fn attach_order_proof(
        &self,
        order_id: Uuid,
        proof: String,
    ) -> Result<Order, sqlx::Error>;

    async fn get_active_packages(&self) -> Result<Vec<ListingPackage>, sqlx::Error>;

    async fn get_package_by_id(
        &self,
        package_id: Uuid,
    ) -> Result<Option<ListingPackage>, sqlx::Error>;

    async fn create_package(
        &self,
        name: String,
        price: i64,
        listing_limit: i32,
        duration_days: i32,
        package_type: PackageType,
    ) -> Result<ListingPackage, sqlx::Error>;

    async fn update_package(
        &self,
        package_id: Uuid,
        name: String,
        price: i64,
        listing_limit: i32,
        duration_days: i32,
        active: bool,
    ) -> Result<Option<ListingPackage>, sqlx::Error>;
}

#[async_trait]
impl OrderExt for DBClient {
    async fn create_order(
        &self,
        user_id: Uuid,
        package_id: Uuid,
        amount: i64,
        payment_method: PaymentMethod,
        reference: String,
    ) -> Result<Order, sqlx::Error> {
        sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (user_id, package_id, amount, status, payment_method, reference)
            VALUES ($1, $2, $3, 'pending', $4, $5)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(package_id)
        .bind(amount)
        .bind(payment_method)
        .bind(reference)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_order_by_id(&self, order_id: Uuid) -> Result<Option<Order>, sqlx::Error> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_order_by_reference(
        &self,
        reference: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE reference = $1")
            .bind(reference)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_orders_by_user(&self, user_id: Uuid) -> Result<Vec<Order>, sqlx::Error> {
        sqlx::query_as::<_, Order>(
            r#"
            SELECT * FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn attach_order_proof(
        &self,
        order_id: Uuid,
        proof: String,
    ) -> Result<Order, sqlx::Error> {
        sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET payment_proof = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(proof)
        .bind(order_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_active_packages(&self) -> Result<Vec<ListingPackage>, sqlx::Error> {
        sqlx::query_as::<_, ListingPackage>(
            r#"
            SELECT * FROM listing_packages
            WHERE active = TRUE
            ORDER BY price ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_package_by_id(
        &self,
        package_id: Uuid,
    ) -> Result<Option<ListingPackage>, sqlx::Error> {
        sqlx::query_as::<_, ListingPackage>("SELECT * FROM listing_packages WHERE id = $1")
            .bind(package_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn create_package(
        &self,
        name: String,
        price: i64,
        listing_limit: i32,
        duration_days: i32,
        package_type: PackageType,
    ) -> Result<ListingPackage, sqlx::Error> {
        sqlx::query_as::<_, ListingPackage>(
            r#"
            INSERT INTO listing_packages (name, price, listing_limit, duration_days, package_type, active)
            VALUES ($1, $2, $3, $4, $5, TRUE)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(price)
        .bind(listing_limit)
        .bind(duration_days)
        .bind(package_type)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_package(
        &self,
        package_id: Uuid,
        name: String,
        price: i64,
        listing_limit: i32,
        duration_days: i32,
        active: bool,
    ) -> Result<Option<ListingPackage>, sqlx::Error> {
        sqlx::query_as::<_, ListingPackage>(
            r#"
            UPDATE listing_packages
            SET name = $1, price = $2, listing_limit = $3, duration_days = $4,
                active = $5, updated_at = NOW()
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(price)
        .bind(listing_limit)
        .bind(duration_days)
        .bind(active)
        .bind(package_id)
        .fetch_optional(&self.pool)
        .await
    }
}
