// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        auth::User,
        rbac::{FormName, PermissionAction},
    },
};

/// 1. Os traits que tipam a permissão exigida
pub trait FormDef: Send + Sync + 'static {
    fn form() -> FormName;
}

pub trait ActionDef: Send + Sync + 'static {
    fn action() -> PermissionAction;
}

/// 2. O Extractor (Guardião): declarar
///    `RequirePermission<OrderForm, Insert>` num handler é o que protege a
///    rota — sem a permissão, a requisição morre aqui com 403.
pub struct RequirePermission<F: FormDef, A: ActionDef>(pub PhantomData<(F, A)>);

// 3. Implementação do FromRequestParts

impl<F, A, S> FromRequestParts<S> for RequirePermission<F, A>
where
    F: FormDef,
    A: ActionDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // A. Extrai o usuário colocado pelo auth_guard
        let user = parts
            .extensions
            .get::<User>()
            .cloned()
            .ok_or(AppError::InvalidToken)?;

        // B. Verifica a matriz de permissões
        app_state
            .authorization_service
            .check(&user, F::form(), A::action())
            .await?;

        Ok(RequirePermission(PhantomData))
    }
}

// ---
// AÇÕES
// ---

pub struct View;
impl ActionDef for View {
    fn action() -> PermissionAction {
        PermissionAction::View
    }
}

pub struct Insert;
impl ActionDef for Insert {
    fn action() -> PermissionAction {
        PermissionAction::Insert
    }
}

pub struct Update;
impl ActionDef for Update {
    fn action() -> PermissionAction {
        PermissionAction::Update
    }
}

pub struct Delete;
impl ActionDef for Delete {
    fn action() -> PermissionAction {
        PermissionAction::Delete
    }
}

// ---
// FORMULÁRIOS
// ---

pub struct UserForm;
impl FormDef for UserForm {
    fn form() -> FormName {
        FormName::User
    }
}

pub struct UserRolesForm;
impl FormDef for UserRolesForm {
    fn form() -> FormName {
        FormName::UserRoles
    }
}

pub struct UserRolePermissionsForm;
impl FormDef for UserRolePermissionsForm {
    fn form() -> FormName {
        FormName::UserRolePermissions
    }
}

pub struct PatientForm;
impl FormDef for PatientForm {
    fn form() -> FormName {
        FormName::Patient
    }
}

pub struct OrderForm;
impl FormDef for OrderForm {
    fn form() -> FormName {
        FormName::Order
    }
}

pub struct PaymentListForm;
impl FormDef for PaymentListForm {
    fn form() -> FormName {
        FormName::PaymentList
    }
}

pub struct DrugForm;
impl FormDef for DrugForm {
    fn form() -> FormName {
        FormName::Drug
    }
}
