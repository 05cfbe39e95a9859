// src/models/order.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::payment::Payment;

/// Situação do pedido. Os valores são um conjunto livre: nenhum grafo de
/// transição é imposto (Delivered -> Created é aceito pelo banco).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_status")]
pub enum OrderStatus {
    Created,
    Confirm,
    Rejected,
    Paid,
    Sent,
    Delivered,
}

// O que sai do banco (tabela orders)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,

    pub patient_id: Uuid,

    /// Usuário que criou o pedido
    pub user_id: Uuid,

    pub status: OrderStatus,

    /// Contador de concorrência otimista; incrementa a cada update abrangente.
    #[schema(example = 0)]
    pub version: i32,

    pub order_date: DateTime<Utc>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// O que sai do banco (tabela order_items)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: Uuid,

    pub order_id: Uuid,

    pub drug_id: Uuid,

    #[schema(example = 2)]
    pub qty: i32,

    /// Preço unitário congelado no momento em que o item entrou no pedido.
    /// Nunca muda depois, mesmo que o preço do medicamento mude no catálogo.
    pub price: Decimal,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// PAYLOADS
// ---

/// Um item solicitado: medicamento + quantidade. O preço nunca vem do
/// cliente; é resolvido contra o catálogo no momento da operação.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub drug_id: Uuid,

    // Se ausente na criação, assume 1.
    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub qty: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    pub patient_id: Uuid,

    pub user_id: Uuid,

    #[validate(nested)]
    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
}

/// Update abrangente: status e/ou substituição completa da lista de itens,
/// tudo em uma única operação atômica. Ambos os campos são opcionais;
/// sem nenhum deles a chamada é um no-op.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderPayload {
    pub status: Option<OrderStatus>,

    #[validate(nested)]
    pub items: Option<Vec<OrderItemRequest>>,
}

// Resposta completa (pedido + itens + pagamentos)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithDetails {
    #[serde(flatten)]
    pub order: Order,

    pub items: Vec<OrderItem>,

    pub payments: Vec<Payment>,
}
