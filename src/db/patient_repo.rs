// src/db/patient_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::patient::{CreatePatientPayload, Patient, UpdatePatientPayload};

const PATIENT_COLUMNS: &str = "id, first_name, last_name, gender, birth_date, mobile_number, \
                               status, created_at, updated_at";

#[derive(Clone)]
pub struct PatientRepository {
    pool: PgPool,
}

impl PatientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_patient<'e, E>(
        &self,
        executor: E,
        payload: &CreatePatientPayload,
    ) -> Result<Patient, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO patients (first_name, last_name, gender, birth_date, mobile_number)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PATIENT_COLUMNS}
            "#
        );
        let patient = sqlx::query_as::<_, Patient>(&sql)
            .bind(&payload.first_name)
            .bind(&payload.last_name)
            .bind(payload.gender)
            .bind(payload.birth_date)
            .bind(payload.mobile_number.as_deref())
            .fetch_one(executor)
            .await?;

        Ok(patient)
    }

    pub async fn find_by_id(&self, patient_id: Uuid) -> Result<Option<Patient>, AppError> {
        let sql = format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE id = $1");
        let patient = sqlx::query_as::<_, Patient>(&sql)
            .bind(patient_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(patient)
    }

    pub async fn list_patients(&self) -> Result<Vec<Patient>, AppError> {
        let sql = format!("SELECT {PATIENT_COLUMNS} FROM patients ORDER BY created_at");
        let patients = sqlx::query_as::<_, Patient>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(patients)
    }

    // O status aceita qualquer salto: o fluxo de consulta que dirige as
    // transições vive fora do banco.
    pub async fn update_patient<'e, E>(
        &self,
        executor: E,
        patient_id: Uuid,
        payload: &UpdatePatientPayload,
    ) -> Result<Option<Patient>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            UPDATE patients SET
                first_name    = COALESCE($2, first_name),
                last_name     = COALESCE($3, last_name),
                gender        = COALESCE($4, gender),
                birth_date    = COALESCE($5, birth_date),
                mobile_number = COALESCE($6, mobile_number),
                status        = COALESCE($7, status),
                updated_at    = now()
            WHERE id = $1
            RETURNING {PATIENT_COLUMNS}
            "#
        );
        let patient = sqlx::query_as::<_, Patient>(&sql)
            .bind(patient_id)
            .bind(payload.first_name.as_deref())
            .bind(payload.last_name.as_deref())
            .bind(payload.gender)
            .bind(payload.birth_date)
            .bind(payload.mobile_number.as_deref())
            .bind(payload.status)
            .fetch_optional(executor)
            .await?;

        Ok(patient)
    }

    pub async fn delete_patient<'e, E>(
        &self,
        executor: E,
        patient_id: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM patients WHERE id = $1")
            .bind(patient_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
