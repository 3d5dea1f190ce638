use async_trait::async_trait;
use uuid::Uuid;

use crate::{db::db::DBClient, models::usermodel::User};

#[async_trait]
pub trait UserExt {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn update_bank_details(
        &self,
        user_id: Uuid,
        bank_name: String,
        bank_account_number: String,
        bank_account_holder: String,
    ) -> Result<User, sqlx::Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE ($1::uuid IS NULL OR id = $1)
              AND ($2::text IS NULL OR email = $2)
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update_bank_details(
        &self,
        user_id: Uuid,
        bank_name: String,
        bank_account_number: String,
        bank_account_holder: String,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET bank_name = $1,
                bank_account_number = $2,
                bank_account_holder = $3,
                updated_at = NOW()
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(bank_name)
        .bind(bank_account_number)
        .bind(bank_account_holder)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }
}
