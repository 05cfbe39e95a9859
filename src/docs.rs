// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Users ---
        handlers::users::create_user,
        handlers::users::list_users,
        handlers::users::get_user,
        handlers::users::update_user,

        // --- RBAC ---
        handlers::rbac::create_role,
        handlers::rbac::list_roles,
        handlers::rbac::delete_role,
        handlers::rbac::create_permission,
        handlers::rbac::list_permissions,
        handlers::rbac::get_permission,
        handlers::rbac::update_permission,
        handlers::rbac::delete_permission,

        // --- Patients ---
        handlers::patients::create_patient,
        handlers::patients::list_patients,
        handlers::patients::get_patient,
        handlers::patients::update_patient,
        handlers::patients::delete_patient,

        // --- Drugs ---
        handlers::drugs::create_drug,
        handlers::drugs::list_drugs,
        handlers::drugs::get_drug,
        handlers::drugs::update_drug,
        handlers::drugs::delete_drug,

        // --- Orders ---
        handlers::orders::create_order,
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::update_order,
        handlers::orders::delete_order,

        // --- Payments ---
        handlers::payments::create_payment,
        handlers::payments::list_payments_for_order,
        handlers::payments::get_payment,
        handlers::payments::update_payment,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::LoginPayload,
            models::auth::CreateUserPayload,
            models::auth::UpdateUserPayload,
            models::auth::AuthResponse,

            // --- RBAC ---
            models::rbac::Role,
            models::rbac::RoleType,
            models::rbac::Permission,
            models::rbac::PermissionAction,
            models::rbac::FormName,
            models::rbac::CreateRolePayload,
            models::rbac::CreatePermissionPayload,
            models::rbac::UpdatePermissionPayload,

            // --- Patients ---
            models::patient::Patient,
            models::patient::Gender,
            models::patient::PatientStatus,
            models::patient::CreatePatientPayload,
            models::patient::UpdatePatientPayload,

            // --- Drugs ---
            models::drug::Drug,
            models::drug::CreateDrugPayload,
            models::drug::UpdateDrugPayload,

            // --- Orders ---
            models::order::Order,
            models::order::OrderItem,
            models::order::OrderStatus,
            models::order::OrderItemRequest,
            models::order::CreateOrderPayload,
            models::order::UpdateOrderPayload,
            models::order::OrderWithDetails,

            // --- Payments ---
            models::payment::Payment,
            models::payment::PaymentStatus,
            models::payment::CreatePaymentPayload,
            models::payment::UpdatePaymentPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação"),
        (name = "Users", description = "Usuários do sistema"),
        (name = "RBAC", description = "Controle de Acesso (Cargos e Permissões por formulário)"),
        (name = "Patients", description = "Pacientes e seu fluxo de consulta"),
        (name = "Drugs", description = "Catálogo de medicamentos"),
        (name = "Orders", description = "Pedidos e seus itens"),
        (name = "Payments", description = "Pagamentos dos pedidos")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
