// src/handlers/orders.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{Delete, Insert, OrderForm, RequirePermission, Update, View},
    models::order::{CreateOrderPayload, UpdateOrderPayload},
};

// POST /api/orders
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    request_body = CreateOrderPayload,
    responses(
        (status = 201, description = "Pedido criado com os itens que resolveram no catálogo", body = crate::models::order::OrderWithDetails),
        (status = 404, description = "Paciente ou usuário inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    _guard: RequirePermission<OrderForm, Insert>,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let order = app_state
        .order_service
        .create_order(payload.patient_id, payload.user_id, payload.items)
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

// GET /api/orders
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Orders",
    responses((status = 200, description = "Lista de pedidos", body = Vec<crate::models::order::Order>)),
    security(("api_jwt" = []))
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    _guard: RequirePermission<OrderForm, View>,
) -> Result<impl IntoResponse, AppError> {
    let orders = app_state.order_service.list_orders().await?;

    Ok(Json(orders))
}

// GET /api/orders/{order_id}
#[utoipa::path(
    get,
    path = "/api/orders/{order_id}",
    tag = "Orders",
    params(("order_id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido com itens e pagamentos", body = crate::models::order::OrderWithDetails),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    _guard: RequirePermission<OrderForm, View>,
    Path(order_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state.order_service.get_order_details(order_id).await?;

    Ok(Json(order))
}

// PATCH /api/orders/{order_id}
#[utoipa::path(
    patch,
    path = "/api/orders/{order_id}",
    tag = "Orders",
    params(("order_id" = Uuid, Path, description = "ID do pedido")),
    request_body = UpdateOrderPayload,
    responses(
        (status = 200, description = "Pedido atualizado (ou intacto, se nada foi enviado)", body = crate::models::order::OrderWithDetails),
        (status = 404, description = "Pedido não encontrado"),
        (status = 409, description = "Pedido modificado por outra operação"),
        (status = 422, description = "Lista de itens referencia medicamentos inexistentes")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_order(
    State(app_state): State<AppState>,
    _guard: RequirePermission<OrderForm, Update>,
    Path(order_id): Path<Uuid>,
    Json(payload): Json<UpdateOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let order = app_state.order_service.update_order(order_id, payload).await?;

    Ok(Json(order))
}

// DELETE /api/orders/{order_id}
#[utoipa::path(
    delete,
    path = "/api/orders/{order_id}",
    tag = "Orders",
    params(("order_id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido removido (itens e pagamentos em cascata)"),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_order(
    State(app_state): State<AppState>,
    _guard: RequirePermission<OrderForm, Delete>,
    Path(order_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.order_service.delete_order(order_id).await?;

    Ok(Json(json!({
        "ok": true,
        "message": "Pedido e seus itens e pagamentos foram removidos com sucesso."
    })))
}
