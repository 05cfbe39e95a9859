// src/handlers/users.rs

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
    middleware::rbac::{Insert, RequirePermission, Update, UserForm, View},
    models::auth::{CreateUserPayload, UpdateUserPayload},
};

// POST /api/users
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "Usuário criado", body = crate::models::auth::User),
        (status = 409, description = "Celular já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    _guard: RequirePermission<UserForm, Insert>,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // Cargo informado precisa existir
    if let Some(role_id) = payload.role_id {
        app_state
            .rbac_repo
            .find_role(role_id)
            .await?
            .ok_or(AppError::NotFound {
                entity: "Cargo",
                id: role_id,
            })?;
    }

    let password_hash = app_state.auth_service.hash_password(&payload.password).await?;

    let user = app_state
        .user_repo
        .create_user(
            &app_state.db_pool,
            &payload.full_name,
            &payload.mobile_number,
            &password_hash,
            payload.role_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

// GET /api/users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses((status = 200, description = "Lista de usuários", body = Vec<crate::models::auth::User>)),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    _guard: RequirePermission<UserForm, View>,
) -> Result<impl IntoResponse, AppError> {
    let users = app_state.user_repo.list_users().await?;

    Ok(Json(users))
}

// GET /api/users/{user_id}
#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    tag = "Users",
    params(("user_id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Usuário", body = crate::models::auth::User),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_user(
    State(app_state): State<AppState>,
    _guard: RequirePermission<UserForm, View>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state
        .user_repo
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::NotFound {
            entity: "Usuário",
            id: user_id,
        })?;

    Ok(Json(user))
}

// PATCH /api/users/{user_id}
#[utoipa::path(
    patch,
    path = "/api/users/{user_id}",
    tag = "Users",
    params(("user_id" = Uuid, Path, description = "ID do usuário")),
    request_body = UpdateUserPayload,
    responses(
        (status = 200, description = "Usuário atualizado", body = crate::models::auth::User),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_user(
    State(app_state): State<AppState>,
    _guard: RequirePermission<UserForm, Update>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(role_id) = payload.role_id {
        app_state
            .rbac_repo
            .find_role(role_id)
            .await?
            .ok_or(AppError::NotFound {
                entity: "Cargo",
                id: role_id,
            })?;
    }

    let user = app_state
        .user_repo
        .update_user(&app_state.db_pool, user_id, &payload)
        .await?
        .ok_or(AppError::NotFound {
            entity: "Usuário",
            id: user_id,
        })?;

    Ok(Json(user))
}
