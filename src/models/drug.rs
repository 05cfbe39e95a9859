// src/models/drug.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Drug {
    pub id: Uuid,

    #[schema(example = "Amoxicilina 500mg")]
    pub name: String,

    #[schema(example = "Amoxicillin")]
    pub latin_name: Option<String>,

    pub description: Option<String>,

    pub how_to_use: Option<String>,

    #[schema(example = "caixa")]
    pub unit: String,

    /// Preço unitário corrente do catálogo. Mutável a qualquer momento;
    /// pedidos existentes nunca releem este valor.
    pub price: Decimal,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("O preço não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDrugPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    pub latin_name: Option<String>,

    pub description: Option<String>,

    pub how_to_use: Option<String>,

    #[validate(length(min = 1, message = "A unidade é obrigatória."))]
    pub unit: String,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub price: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDrugPayload {
    pub name: Option<String>,
    pub latin_name: Option<String>,
    pub description: Option<String>,
    pub how_to_use: Option<String>,
    pub unit: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    pub price: Option<Decimal>,
}
