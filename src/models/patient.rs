// src/models/patient.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "gender", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Unknown,
}

/// Etapas do ciclo de vida do paciente no fluxo de consulta.
/// O banco não valida transições: qualquer salto de status é aceito.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "patient_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PatientStatus {
    AwaitingProfileCompletion,
    ProfileCompleted,
    AwaitingConsultation,
    AwaitingInvoiceApproval,
    AwaitingPayment,
    PaymentCompleted,
    PaymentConfirmed,
    AwaitingShipment,
    Shipped,
    Completed,
    // Alcançável a partir de qualquer etapa
    Cancelled,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: Uuid,

    #[schema(example = "Sara")]
    pub first_name: String,

    #[schema(example = "Ahmadi")]
    pub last_name: String,

    pub gender: Gender,

    pub birth_date: Option<NaiveDate>,

    pub mobile_number: Option<String>,

    pub status: PatientStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatientPayload {
    #[validate(length(min = 1, message = "O primeiro nome é obrigatório."))]
    pub first_name: String,

    #[validate(length(min = 1, message = "O sobrenome é obrigatório."))]
    pub last_name: String,

    #[serde(default = "default_gender")]
    pub gender: Gender,

    pub birth_date: Option<NaiveDate>,

    pub mobile_number: Option<String>,
}

fn default_gender() -> Gender {
    Gender::Unknown
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePatientPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub mobile_number: Option<String>,
    pub status: Option<PatientStatus>,
}
