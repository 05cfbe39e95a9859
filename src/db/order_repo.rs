// src/db/order_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::order::{Order, OrderItem, OrderStatus};

const ORDER_COLUMNS: &str =
    "id, patient_id, user_id, status, version, order_date, created_at, updated_at";
const ITEM_COLUMNS: &str = "id, order_id, drug_id, qty, price, created_at, updated_at";

/// Item pronto para persistir: medicamento resolvido e preço já congelado.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub drug_id: Uuid,
    pub qty: i32,
    pub price: Decimal,
}

#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert_order<'e, E>(
        &self,
        executor: E,
        patient_id: Uuid,
        user_id: Uuid,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO orders (patient_id, user_id)
            VALUES ($1, $2)
            RETURNING {ORDER_COLUMNS}
            "#
        );
        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(patient_id)
            .bind(user_id)
            .fetch_one(executor)
            .await?;

        Ok(order)
    }

    pub async fn find_by_id(&self, order_id: Uuid) -> Result<Option<Order>, AppError> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1");
        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, AppError> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY order_date DESC");
        let orders = sqlx::query_as::<_, Order>(&sql).fetch_all(&self.pool).await?;

        Ok(orders)
    }

    pub async fn items_for_order(&self, order_id: Uuid) -> Result<Vec<OrderItem>, AppError> {
        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = $1 ORDER BY created_at"
        );
        let items = sqlx::query_as::<_, OrderItem>(&sql)
            .bind(order_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    /// Inserção em massa usando UNNEST para performance.
    pub async fn insert_items<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        items: &[NewOrderItem],
    ) -> Result<Vec<OrderItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let drug_ids: Vec<Uuid> = items.iter().map(|i| i.drug_id).collect();
        let qtys: Vec<i32> = items.iter().map(|i| i.qty).collect();
        let prices: Vec<Decimal> = items.iter().map(|i| i.price).collect();

        let sql = format!(
            r#"
            INSERT INTO order_items (order_id, drug_id, qty, price)
            SELECT $1, d, q, p
            FROM UNNEST($2::uuid[], $3::int4[], $4::numeric[]) AS t(d, q, p)
            RETURNING {ITEM_COLUMNS}
            "#
        );
        let created = sqlx::query_as::<_, OrderItem>(&sql)
            .bind(order_id)
            .bind(drug_ids)
            .bind(qtys)
            .bind(prices)
            .fetch_all(executor)
            .await?;

        Ok(created)
    }

    pub async fn delete_items<'e, E>(&self, executor: E, order_id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM order_items WHERE order_id = $1")
            .bind(order_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    /// Aplica o update de cabeçalho guardado pela versão lida.
    /// Retorna None se nenhuma linha casou, ou seja, o pedido mudou de versão
    /// entre a leitura e a escrita (ou sumiu).
    pub async fn update_header<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        status: Option<OrderStatus>,
        expected_version: i32,
    ) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            UPDATE orders SET
                status     = COALESCE($2, status),
                version    = version + 1,
                updated_at = now()
            WHERE id = $1 AND version = $3
            RETURNING {ORDER_COLUMNS}
            "#
        );
        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(order_id)
            .bind(status)
            .bind(expected_version)
            .fetch_optional(executor)
            .await?;

        Ok(order)
    }

    // Apaga o pedido; itens e pagamentos caem junto por cascata.
    pub async fn delete_order<'e, E>(&self, executor: E, order_id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(order_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
