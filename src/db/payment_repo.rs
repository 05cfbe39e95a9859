// src/db/payment_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::payment::{Payment, UpdatePaymentPayload};

const PAYMENT_COLUMNS: &str = "id, order_id, user_id, payment_date, refer_code, value, status, \
                               status_explain, created_at, updated_at";

#[derive(Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_payment<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        user_id: Uuid,
        refer_code: Option<&str>,
        value: Decimal,
    ) -> Result<Payment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO payments (order_id, user_id, refer_code, value)
            VALUES ($1, $2, $3, $4)
            RETURNING {PAYMENT_COLUMNS}
            "#
        );
        let payment = sqlx::query_as::<_, Payment>(&sql)
            .bind(order_id)
            .bind(user_id)
            .bind(refer_code)
            .bind(value)
            .fetch_one(executor)
            .await?;

        Ok(payment)
    }

    pub async fn find_by_id(&self, payment_id: Uuid) -> Result<Option<Payment>, AppError> {
        let sql = format!("SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = $1");
        let payment = sqlx::query_as::<_, Payment>(&sql)
            .bind(payment_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(payment)
    }

    pub async fn payments_for_order(&self, order_id: Uuid) -> Result<Vec<Payment>, AppError> {
        let sql = format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE order_id = $1 ORDER BY payment_date"
        );
        let payments = sqlx::query_as::<_, Payment>(&sql)
            .bind(order_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(payments)
    }

    pub async fn update_payment<'e, E>(
        &self,
        executor: E,
        payment_id: Uuid,
        payload: &UpdatePaymentPayload,
    ) -> Result<Option<Payment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            UPDATE payments SET
                status         = COALESCE($2, status),
                status_explain = COALESCE($3, status_explain),
                updated_at     = now()
            WHERE id = $1
            RETURNING {PAYMENT_COLUMNS}
            "#
        );
        let payment = sqlx::query_as::<_, Payment>(&sql)
            .bind(payment_id)
            .bind(payload.status)
            .bind(payload.status_explain.as_deref())
            .fetch_optional(executor)
            .await?;

        Ok(payment)
    }
}
