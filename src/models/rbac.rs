// src/models/rbac.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// ---
// AÇÕES E FORMULÁRIOS (a chave da matriz de permissões)
// ---

/// As quatro ações que um cargo pode (ou não) executar sobre um formulário.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PermissionAction {
    View,
    Insert,
    Update,
    Delete,
}

impl std::fmt::Display for PermissionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PermissionAction::View => "view",
            PermissionAction::Insert => "insert",
            PermissionAction::Update => "update",
            PermissionAction::Delete => "delete",
        };
        write!(f, "{s}")
    }
}

/// Nomes de todos os formulários/módulos protegidos da aplicação.
/// Esta é a fonte única de verdade: o admin configura a matriz de
/// permissões exatamente por estes nomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum FormName {
    User,
    UserRoles,
    UserRolePermissions,
    Patient,
    Order,
    OrderList,
    PaymentList,
    Drug,
}

impl FormName {
    /// A forma armazenada no banco. A comparação do motor de autorização é
    /// igualdade exata de strings com este valor (sem hierarquia, sem
    /// wildcard, sem normalização de caixa).
    pub fn as_str(&self) -> &'static str {
        match self {
            FormName::User => "User",
            FormName::UserRoles => "UserRoles",
            FormName::UserRolePermissions => "UserRolePermissions",
            FormName::Patient => "Patient",
            FormName::Order => "Order",
            FormName::OrderList => "OrderList",
            FormName::PaymentList => "PaymentList",
            FormName::Drug => "Drug",
        }
    }
}

impl std::fmt::Display for FormName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---
// CARGOS
// ---

/// Nível do cargo: 0 = consultor, 1 = caixa, 2 = admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[repr(i32)]
pub enum RoleType {
    Consultant = 0,
    Cashier = 1,
    Admin = 2,
}

// O que sai do banco (tabela roles)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[schema(example = "Consultor Farmacêutico")]
    pub name: String,

    pub role_type: RoleType,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// O que sai do banco (tabela permissions)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub id: Uuid,

    pub role_id: Uuid,

    #[schema(example = "Order")]
    pub form_name: String,

    pub view: bool,
    pub insert: bool,
    pub update: bool,
    pub delete: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// PAYLOADS
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRolePayload {
    #[validate(length(min = 2, max = 50, message = "O nome deve ter entre 2 e 50 caracteres."))]
    #[schema(example = "Caixa")]
    pub name: String,

    pub role_type: RoleType,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePermissionPayload {
    pub role_id: Uuid,

    pub form_name: FormName,

    #[serde(default)]
    pub view: bool,
    #[serde(default)]
    pub insert: bool,
    #[serde(default)]
    pub update: bool,
    #[serde(default)]
    pub delete: bool,
}

// Só os quatro flags podem mudar; o par (cargo, formulário) é imutável.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePermissionPayload {
    pub view: Option<bool>,
    pub insert: Option<bool>,
    pub update: Option<bool>,
    pub delete: Option<bool>,
}
