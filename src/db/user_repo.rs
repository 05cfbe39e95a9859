// src/db/user_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::auth::{UpdateUserPayload, User};

const USER_COLUMNS: &str = "id, full_name, mobile_number, password_hash, role_id, is_active, \
                            login_attempts, created_at, updated_at";

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_user<'e, E>(
        &self,
        executor: E,
        full_name: &str,
        mobile_number: &str,
        password_hash: &str,
        role_id: Option<Uuid>,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO users (full_name, mobile_number, password_hash, role_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(full_name)
            .bind(mobile_number)
            .bind(password_hash)
            .bind(role_id)
            .fetch_one(executor)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::Conflict(
                            "Este número de celular já está cadastrado.".into(),
                        );
                    }
                }
                e.into()
            })?;

        Ok(user)
    }

    pub async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_by_mobile(&self, mobile_number: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE mobile_number = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(mobile_number)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at");
        let users = sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?;

        Ok(users)
    }

    pub async fn record_failed_login(&self, user_id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET login_attempts = login_attempts + 1 WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn reset_login_attempts(&self, user_id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET login_attempts = 0 WHERE id = $1 AND login_attempts <> 0")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn update_user<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        payload: &UpdateUserPayload,
    ) -> Result<Option<User>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            UPDATE users SET
                full_name = COALESCE($2, full_name),
                role_id   = COALESCE($3, role_id),
                is_active = COALESCE($4, is_active),
                updated_at = now()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .bind(payload.full_name.as_deref())
            .bind(payload.role_id)
            .bind(payload.is_active)
            .fetch_optional(executor)
            .await?;

        Ok(user)
    }
}
