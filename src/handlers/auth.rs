// src/handlers/auth.rs

use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{AuthResponse, LoginPayload},
};

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login efetuado", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let token = app_state
        .auth_service
        .login_user(&payload.mobile_number, &payload.password)
        .await?;

    Ok(Json(AuthResponse { token }))
}

// GET /api/auth/me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Usuário autenticado", body = crate::models::auth::User)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(user: AuthenticatedUser) -> impl IntoResponse {
    Json(user.0)
}
