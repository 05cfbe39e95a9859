// src/handlers/payments.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{Insert, PaymentListForm, RequirePermission, Update, View},
    },
    models::payment::{CreatePaymentPayload, UpdatePaymentPayload},
};

// POST /api/payments
#[utoipa::path(
    post,
    path = "/api/payments",
    tag = "Payments",
    request_body = CreatePaymentPayload,
    responses(
        (status = 201, description = "Pagamento registrado", body = crate::models::payment::Payment),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_payment(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequirePermission<PaymentListForm, Insert>,
    Json(payload): Json<CreatePaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // O pedido precisa existir; o pagamento nasce como NotSeen
    app_state
        .order_service
        .get_order_details(payload.order_id)
        .await?;

    let payment = app_state
        .payment_repo
        .create_payment(
            &app_state.db_pool,
            payload.order_id,
            user.0.id,
            payload.refer_code.as_deref(),
            payload.value,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(payment)))
}

// GET /api/payments/order/{order_id}
#[utoipa::path(
    get,
    path = "/api/payments/order/{order_id}",
    tag = "Payments",
    params(("order_id" = Uuid, Path, description = "ID do pedido")),
    responses((status = 200, description = "Pagamentos do pedido", body = Vec<crate::models::payment::Payment>)),
    security(("api_jwt" = []))
)]
pub async fn list_payments_for_order(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PaymentListForm, View>,
    Path(order_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let payments = app_state.payment_repo.payments_for_order(order_id).await?;

    Ok(Json(payments))
}

// GET /api/payments/{payment_id}
#[utoipa::path(
    get,
    path = "/api/payments/{payment_id}",
    tag = "Payments",
    params(("payment_id" = Uuid, Path, description = "ID do pagamento")),
    responses(
        (status = 200, description = "Pagamento", body = crate::models::payment::Payment),
        (status = 404, description = "Pagamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_payment(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PaymentListForm, View>,
    Path(payment_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let payment = app_state
        .payment_repo
        .find_by_id(payment_id)
        .await?
        .ok_or(AppError::NotFound {
            entity: "Pagamento",
            id: payment_id,
        })?;

    Ok(Json(payment))
}

// PATCH /api/payments/{payment_id}
// O caixa marca Accepted/Rejected e justifica.
#[utoipa::path(
    patch,
    path = "/api/payments/{payment_id}",
    tag = "Payments",
    params(("payment_id" = Uuid, Path, description = "ID do pagamento")),
    request_body = UpdatePaymentPayload,
    responses(
        (status = 200, description = "Pagamento atualizado", body = crate::models::payment::Payment),
        (status = 404, description = "Pagamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_payment(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PaymentListForm, Update>,
    Path(payment_id): Path<Uuid>,
    Json(payload): Json<UpdatePaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    let payment = app_state
        .payment_repo
        .update_payment(&app_state.db_pool, payment_id, &payload)
        .await?
        .ok_or(AppError::NotFound {
            entity: "Pagamento",
            id: payment_id,
        })?;

    Ok(Json(payment))
}
