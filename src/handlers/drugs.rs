// src/handlers/drugs.rs

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
    middleware::rbac::{Delete, DrugForm, Insert, RequirePermission, Update, View},
    models::drug::{CreateDrugPayload, UpdateDrugPayload},
};

// POST /api/drugs
#[utoipa::path(
    post,
    path = "/api/drugs",
    tag = "Drugs",
    request_body = CreateDrugPayload,
    responses((status = 201, description = "Medicamento criado", body = crate::models::drug::Drug)),
    security(("api_jwt" = []))
)]
pub async fn create_drug(
    State(app_state): State<AppState>,
    _guard: RequirePermission<DrugForm, Insert>,
    Json(payload): Json<CreateDrugPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let drug = app_state
        .drug_repo
        .create_drug(&app_state.db_pool, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(drug)))
}

// GET /api/drugs
#[utoipa::path(
    get,
    path = "/api/drugs",
    tag = "Drugs",
    responses((status = 200, description = "Catálogo de medicamentos", body = Vec<crate::models::drug::Drug>)),
    security(("api_jwt" = []))
)]
pub async fn list_drugs(
    State(app_state): State<AppState>,
    _guard: RequirePermission<DrugForm, View>,
) -> Result<impl IntoResponse, AppError> {
    let drugs = app_state.drug_repo.list_drugs().await?;

    Ok(Json(drugs))
}

// GET /api/drugs/{drug_id}
#[utoipa::path(
    get,
    path = "/api/drugs/{drug_id}",
    tag = "Drugs",
    params(("drug_id" = Uuid, Path, description = "ID do medicamento")),
    responses(
        (status = 200, description = "Medicamento", body = crate::models::drug::Drug),
        (status = 404, description = "Medicamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_drug(
    State(app_state): State<AppState>,
    _guard: RequirePermission<DrugForm, View>,
    Path(drug_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let drug = app_state
        .drug_repo
        .find_by_id(drug_id)
        .await?
        .ok_or(AppError::NotFound {
            entity: "Medicamento",
            id: drug_id,
        })?;

    Ok(Json(drug))
}

// PATCH /api/drugs/{drug_id}
// Mudar o preço aqui NÃO mexe em nenhum pedido existente: os itens já
// gravados mantêm o preço congelado na época.
#[utoipa::path(
    patch,
    path = "/api/drugs/{drug_id}",
    tag = "Drugs",
    params(("drug_id" = Uuid, Path, description = "ID do medicamento")),
    request_body = UpdateDrugPayload,
    responses(
        (status = 200, description = "Medicamento atualizado", body = crate::models::drug::Drug),
        (status = 404, description = "Medicamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_drug(
    State(app_state): State<AppState>,
    _guard: RequirePermission<DrugForm, Update>,
    Path(drug_id): Path<Uuid>,
    Json(payload): Json<UpdateDrugPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let drug = app_state
        .drug_repo
        .update_drug(&app_state.db_pool, drug_id, &payload)
        .await?
        .ok_or(AppError::NotFound {
            entity: "Medicamento",
            id: drug_id,
        })?;

    Ok(Json(drug))
}

// DELETE /api/drugs/{drug_id}
#[utoipa::path(
    delete,
    path = "/api/drugs/{drug_id}",
    tag = "Drugs",
    params(("drug_id" = Uuid, Path, description = "ID do medicamento")),
    responses(
        (status = 200, description = "Medicamento removido"),
        (status = 404, description = "Medicamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_drug(
    State(app_state): State<AppState>,
    _guard: RequirePermission<DrugForm, Delete>,
    Path(drug_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = app_state
        .drug_repo
        .delete_drug(&app_state.db_pool, drug_id)
        .await?;

    if !deleted {
        return Err(AppError::NotFound {
            entity: "Medicamento",
            id: drug_id,
        });
    }

    Ok(Json(json!({ "ok": true, "message": "Medicamento removido com sucesso." })))
}
