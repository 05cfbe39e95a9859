// src/handlers/rbac.rs

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
    middleware::rbac::{
        Delete, Insert, RequirePermission, Update, UserRolePermissionsForm, UserRolesForm, View,
    },
    models::rbac::{CreatePermissionPayload, CreateRolePayload, UpdatePermissionPayload},
};

// ---
// CARGOS
// ---

// POST /api/roles
#[utoipa::path(
    post,
    path = "/api/roles",
    tag = "RBAC",
    request_body = CreateRolePayload,
    responses((status = 201, description = "Cargo criado", body = crate::models::rbac::Role)),
    security(("api_jwt" = []))
)]
pub async fn create_role(
    State(app_state): State<AppState>,
    _guard: RequirePermission<UserRolesForm, Insert>,
    Json(payload): Json<CreateRolePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let role = app_state
        .rbac_repo
        .create_role(&app_state.db_pool, &payload.name, payload.role_type)
        .await?;

    Ok((StatusCode::CREATED, Json(role)))
}

// GET /api/roles
#[utoipa::path(
    get,
    path = "/api/roles",
    tag = "RBAC",
    responses((status = 200, description = "Lista de cargos", body = Vec<crate::models::rbac::Role>)),
    security(("api_jwt" = []))
)]
pub async fn list_roles(
    State(app_state): State<AppState>,
    _guard: RequirePermission<UserRolesForm, View>,
) -> Result<impl IntoResponse, AppError> {
    let roles = app_state.rbac_repo.list_roles().await?;

    Ok(Json(roles))
}

// DELETE /api/roles/{role_id}
#[utoipa::path(
    delete,
    path = "/api/roles/{role_id}",
    tag = "RBAC",
    params(("role_id" = Uuid, Path, description = "ID do cargo")),
    responses(
        (status = 200, description = "Cargo removido"),
        (status = 404, description = "Cargo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_role(
    State(app_state): State<AppState>,
    _guard: RequirePermission<UserRolesForm, Delete>,
    Path(role_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = app_state
        .rbac_repo
        .delete_role(&app_state.db_pool, role_id)
        .await?;

    if !deleted {
        return Err(AppError::NotFound {
            entity: "Cargo",
            id: role_id,
        });
    }

    Ok(Json(json!({ "ok": true, "message": "Cargo removido com sucesso." })))
}

// ---
// PERMISSÕES (a matriz por formulário)
// ---

// POST /api/permissions
#[utoipa::path(
    post,
    path = "/api/permissions",
    tag = "RBAC",
    request_body = CreatePermissionPayload,
    responses(
        (status = 201, description = "Permissão criada", body = crate::models::rbac::Permission),
        (status = 409, description = "Já existe permissão para este cargo e formulário")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_permission(
    State(app_state): State<AppState>,
    _guard: RequirePermission<UserRolePermissionsForm, Insert>,
    Json(payload): Json<CreatePermissionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state
        .rbac_repo
        .find_role(payload.role_id)
        .await?
        .ok_or(AppError::NotFound {
            entity: "Cargo",
            id: payload.role_id,
        })?;

    let permission = app_state
        .rbac_repo
        .create_permission(&app_state.db_pool, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(permission)))
}

// GET /api/permissions
#[utoipa::path(
    get,
    path = "/api/permissions",
    tag = "RBAC",
    responses((status = 200, description = "Lista de permissões", body = Vec<crate::models::rbac::Permission>)),
    security(("api_jwt" = []))
)]
pub async fn list_permissions(
    State(app_state): State<AppState>,
    _guard: RequirePermission<UserRolePermissionsForm, View>,
) -> Result<impl IntoResponse, AppError> {
    let permissions = app_state.rbac_repo.list_permissions().await?;

    Ok(Json(permissions))
}

// GET /api/permissions/{permission_id}
#[utoipa::path(
    get,
    path = "/api/permissions/{permission_id}",
    tag = "RBAC",
    params(("permission_id" = Uuid, Path, description = "ID da permissão")),
    responses(
        (status = 200, description = "Permissão", body = crate::models::rbac::Permission),
        (status = 404, description = "Permissão não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_permission(
    State(app_state): State<AppState>,
    _guard: RequirePermission<UserRolePermissionsForm, View>,
    Path(permission_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let permission = app_state
        .rbac_repo
        .find_permission(permission_id)
        .await?
        .ok_or(AppError::NotFound {
            entity: "Permissão",
            id: permission_id,
        })?;

    Ok(Json(permission))
}

// PATCH /api/permissions/{permission_id}
#[utoipa::path(
    patch,
    path = "/api/permissions/{permission_id}",
    tag = "RBAC",
    params(("permission_id" = Uuid, Path, description = "ID da permissão")),
    request_body = UpdatePermissionPayload,
    responses(
        (status = 200, description = "Permissão atualizada", body = crate::models::rbac::Permission),
        (status = 404, description = "Permissão não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_permission(
    State(app_state): State<AppState>,
    _guard: RequirePermission<UserRolePermissionsForm, Update>,
    Path(permission_id): Path<Uuid>,
    Json(payload): Json<UpdatePermissionPayload>,
) -> Result<impl IntoResponse, AppError> {
    let permission = app_state
        .rbac_repo
        .update_permission(&app_state.db_pool, permission_id, &payload)
        .await?
        .ok_or(AppError::NotFound {
            entity: "Permissão",
            id: permission_id,
        })?;

    Ok(Json(permission))
}

// DELETE /api/permissions/{permission_id}
#[utoipa::path(
    delete,
    path = "/api/permissions/{permission_id}",
    tag = "RBAC",
    params(("permission_id" = Uuid, Path, description = "ID da permissão")),
    responses(
        (status = 200, description = "Permissão removida"),
        (status = 404, description = "Permissão não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_permission(
    State(app_state): State<AppState>,
    _guard: RequirePermission<UserRolePermissionsForm, Delete>,
    Path(permission_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = app_state
        .rbac_repo
        .delete_permission(&app_state.db_pool, permission_id)
        .await?;

    if !deleted {
        return Err(AppError::NotFound {
            entity: "Permissão",
            id: permission_id,
        });
    }

    Ok(Json(json!({ "ok": true, "message": "Permissão removida com sucesso." })))
}
