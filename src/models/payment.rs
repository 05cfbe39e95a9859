// src/models/payment.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status")]
pub enum PaymentStatus {
    NotSeen,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,

    pub order_id: Uuid,

    /// Usuário que registrou o pagamento
    pub user_id: Uuid,

    pub payment_date: DateTime<Utc>,

    #[schema(example = "REF-2025-000123")]
    pub refer_code: Option<String>,

    /// Valor em Rials
    pub value: Decimal,

    pub status: PaymentStatus,

    pub status_explain: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentPayload {
    pub order_id: Uuid,

    pub refer_code: Option<String>,

    pub value: Decimal,
}

// O caixa só mexe no status e na justificativa.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentPayload {
    pub status: Option<PaymentStatus>,
    pub status_explain: Option<String>,
}
