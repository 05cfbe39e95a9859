// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::models::rbac::{FormName, PermissionAction};

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Cada categoria mapeia para um status HTTP estável, então os clientes
// podem ramificar programaticamente.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("{entity} com ID {id} não encontrado")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Permissão negada: '{action}' em '{form}'")]
    Forbidden {
        form: FormName,
        action: PermissionAction,
    },

    // IDs de medicamentos que não existem no catálogo (caminho de update)
    #[error("Referências inválidas")]
    InvalidReference { drug_ids: Vec<Uuid> },

    #[error("Limite de requisições excedido")]
    RateLimited { limit: usize },

    #[error("Conflito: {0}")]
    Conflict(String),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário inativo")]
    InactiveUser,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::NotFound { entity, id } => {
                let body = Json(json!({
                    "error": format!("{} com ID {} não encontrado.", entity, id)
                }));
                return (StatusCode::NOT_FOUND, body).into_response();
            }

            // Mensagem única, qualquer que seja o motivo interno da negação.
            AppError::Forbidden { form, action } => {
                let body = Json(json!({
                    "error": format!(
                        "Você não tem permissão para executar '{}' em '{}'.",
                        action, form
                    )
                }));
                return (StatusCode::FORBIDDEN, body).into_response();
            }

            AppError::InvalidReference { drug_ids } => {
                let body = Json(json!({
                    "error": "Um ou mais medicamentos informados não existem.",
                    "invalidDrugIds": drug_ids,
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }

            AppError::RateLimited { limit } => {
                let body = Json(json!({
                    "error": format!("Muitas requisições. O limite é {} por minuto.", limit)
                }));
                return (StatusCode::TOO_MANY_REQUESTS, body).into_response();
            }

            AppError::Conflict(message) => {
                let body = Json(json!({ "error": message }));
                return (StatusCode::CONFLICT, body).into_response();
            }

            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Número de celular ou senha inválidos.")
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.",
            ),
            AppError::InactiveUser => (StatusCode::BAD_REQUEST, "Usuário inativo."),

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada; o cliente recebe algo genérico.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
