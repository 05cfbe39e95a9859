// src/db/drug_repo.rs

use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::drug::{CreateDrugPayload, Drug, UpdateDrugPayload};

const DRUG_COLUMNS: &str =
    "id, name, latin_name, description, how_to_use, unit, price, created_at, updated_at";

#[derive(Clone)]
pub struct DrugRepository {
    pool: PgPool,
}

impl DrugRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_drug<'e, E>(
        &self,
        executor: E,
        payload: &CreateDrugPayload,
    ) -> Result<Drug, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO drugs (name, latin_name, description, how_to_use, unit, price)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {DRUG_COLUMNS}
            "#
        );
        let drug = sqlx::query_as::<_, Drug>(&sql)
            .bind(&payload.name)
            .bind(payload.latin_name.as_deref())
            .bind(payload.description.as_deref())
            .bind(payload.how_to_use.as_deref())
            .bind(&payload.unit)
            .bind(payload.price)
            .fetch_one(executor)
            .await?;

        Ok(drug)
    }

    pub async fn find_by_id(&self, drug_id: Uuid) -> Result<Option<Drug>, AppError> {
        let sql = format!("SELECT {DRUG_COLUMNS} FROM drugs WHERE id = $1");
        let drug = sqlx::query_as::<_, Drug>(&sql)
            .bind(drug_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(drug)
    }

    pub async fn list_drugs(&self) -> Result<Vec<Drug>, AppError> {
        let sql = format!("SELECT {DRUG_COLUMNS} FROM drugs ORDER BY name");
        let drugs = sqlx::query_as::<_, Drug>(&sql).fetch_all(&self.pool).await?;

        Ok(drugs)
    }

    /// Resolve um lote de IDs para o preço unitário corrente do catálogo.
    /// IDs inexistentes simplesmente não aparecem no mapa; quem decide se
    /// isso é erro ou não é o chamador.
    pub async fn prices_by_ids<'e, E>(
        &self,
        executor: E,
        drug_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Decimal>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if drug_ids.is_empty() {
            return Ok(HashMap::new());
        }

        // O SQLx lida bem com arrays usando ANY
        let rows: Vec<(Uuid, Decimal)> =
            sqlx::query_as("SELECT id, price FROM drugs WHERE id = ANY($1)")
                .bind(drug_ids)
                .fetch_all(executor)
                .await?;

        Ok(rows.into_iter().collect())
    }

    pub async fn update_drug<'e, E>(
        &self,
        executor: E,
        drug_id: Uuid,
        payload: &UpdateDrugPayload,
    ) -> Result<Option<Drug>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            UPDATE drugs SET
                name        = COALESCE($2, name),
                latin_name  = COALESCE($3, latin_name),
                description = COALESCE($4, description),
                how_to_use  = COALESCE($5, how_to_use),
                unit        = COALESCE($6, unit),
                price       = COALESCE($7, price),
                updated_at  = now()
            WHERE id = $1
            RETURNING {DRUG_COLUMNS}
            "#
        );
        let drug = sqlx::query_as::<_, Drug>(&sql)
            .bind(drug_id)
            .bind(payload.name.as_deref())
            .bind(payload.latin_name.as_deref())
            .bind(payload.description.as_deref())
            .bind(payload.how_to_use.as_deref())
            .bind(payload.unit.as_deref())
            .bind(payload.price)
            .fetch_optional(executor)
            .await?;

        Ok(drug)
    }

    pub async fn delete_drug<'e, E>(&self, executor: E, drug_id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM drugs WHERE id = $1")
            .bind(drug_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
