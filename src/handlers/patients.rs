// src/handlers/patients.rs

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
    middleware::rbac::{Delete, Insert, PatientForm, RequirePermission, Update, View},
    models::patient::{CreatePatientPayload, UpdatePatientPayload},
};

// POST /api/patients
#[utoipa::path(
    post,
    path = "/api/patients",
    tag = "Patients",
    request_body = CreatePatientPayload,
    responses((status = 201, description = "Paciente criado", body = crate::models::patient::Patient)),
    security(("api_jwt" = []))
)]
pub async fn create_patient(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PatientForm, Insert>,
    Json(payload): Json<CreatePatientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let patient = app_state
        .patient_repo
        .create_patient(&app_state.db_pool, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(patient)))
}

// GET /api/patients
#[utoipa::path(
    get,
    path = "/api/patients",
    tag = "Patients",
    responses((status = 200, description = "Lista de pacientes", body = Vec<crate::models::patient::Patient>)),
    security(("api_jwt" = []))
)]
pub async fn list_patients(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PatientForm, View>,
) -> Result<impl IntoResponse, AppError> {
    let patients = app_state.patient_repo.list_patients().await?;

    Ok(Json(patients))
}

// GET /api/patients/{patient_id}
#[utoipa::path(
    get,
    path = "/api/patients/{patient_id}",
    tag = "Patients",
    params(("patient_id" = Uuid, Path, description = "ID do paciente")),
    responses(
        (status = 200, description = "Paciente", body = crate::models::patient::Patient),
        (status = 404, description = "Paciente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_patient(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PatientForm, View>,
    Path(patient_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let patient = app_state
        .patient_repo
        .find_by_id(patient_id)
        .await?
        .ok_or(AppError::NotFound {
            entity: "Paciente",
            id: patient_id,
        })?;

    Ok(Json(patient))
}

// PATCH /api/patients/{patient_id}
// O status aceita qualquer valor do enum, em qualquer ordem: o fluxo de
// consulta é quem dirige as transições.
#[utoipa::path(
    patch,
    path = "/api/patients/{patient_id}",
    tag = "Patients",
    params(("patient_id" = Uuid, Path, description = "ID do paciente")),
    request_body = UpdatePatientPayload,
    responses(
        (status = 200, description = "Paciente atualizado", body = crate::models::patient::Patient),
        (status = 404, description = "Paciente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_patient(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PatientForm, Update>,
    Path(patient_id): Path<Uuid>,
    Json(payload): Json<UpdatePatientPayload>,
) -> Result<impl IntoResponse, AppError> {
    let patient = app_state
        .patient_repo
        .update_patient(&app_state.db_pool, patient_id, &payload)
        .await?
        .ok_or(AppError::NotFound {
            entity: "Paciente",
            id: patient_id,
        })?;

    Ok(Json(patient))
}

// DELETE /api/patients/{patient_id}
#[utoipa::path(
    delete,
    path = "/api/patients/{patient_id}",
    tag = "Patients",
    params(("patient_id" = Uuid, Path, description = "ID do paciente")),
    responses(
        (status = 200, description = "Paciente removido"),
        (status = 404, description = "Paciente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_patient(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PatientForm, Delete>,
    Path(patient_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = app_state
        .patient_repo
        .delete_patient(&app_state.db_pool, patient_id)
        .await?;

    if !deleted {
        return Err(AppError::NotFound {
            entity: "Paciente",
            id: patient_id,
        });
    }

    Ok(Json(json!({ "ok": true, "message": "Paciente removido com sucesso." })))
}
