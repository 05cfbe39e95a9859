// src/main.rs

use std::net::SocketAddr;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;
use crate::middleware::rate_limit::rate_limit_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Varredura periódica do rate limit: remove clientes ociosos para o
    // mapa em memória não crescer sem limite.
    let limiter = app_state.rate_limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(limiter.window());
        loop {
            interval.tick().await;
            limiter.sweep_idle();
        }
    });

    // Rotas de autenticação: login é público; /me exige token.
    // Nas demais rotas o auth_guard valida o token e injeta o usuário, e
    // cada handler declara a permissão que exige via RequirePermission.
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .merge(
            Router::new()
                .route("/me", get(handlers::auth::get_me))
                .layer(axum_middleware::from_fn_with_state(
                    app_state.clone(),
                    auth_guard,
                )),
        );

    let user_routes = Router::new()
        .route(
            "/",
            post(handlers::users::create_user).get(handlers::users::list_users),
        )
        .route(
            "/{user_id}",
            get(handlers::users::get_user).patch(handlers::users::update_user),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let rbac_routes = Router::new()
        .route(
            "/roles",
            post(handlers::rbac::create_role).get(handlers::rbac::list_roles),
        )
        .route("/roles/{role_id}", delete(handlers::rbac::delete_role))
        .route(
            "/permissions",
            post(handlers::rbac::create_permission).get(handlers::rbac::list_permissions),
        )
        .route(
            "/permissions/{permission_id}",
            get(handlers::rbac::get_permission)
                .patch(handlers::rbac::update_permission)
                .delete(handlers::rbac::delete_permission),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let patient_routes = Router::new()
        .route(
            "/",
            post(handlers::patients::create_patient).get(handlers::patients::list_patients),
        )
        .route(
            "/{patient_id}",
            get(handlers::patients::get_patient)
                .patch(handlers::patients::update_patient)
                .delete(handlers::patients::delete_patient),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let drug_routes = Router::new()
        .route(
            "/",
            post(handlers::drugs::create_drug).get(handlers::drugs::list_drugs),
        )
        .route(
            "/{drug_id}",
            get(handlers::drugs::get_drug)
                .patch(handlers::drugs::update_drug)
                .delete(handlers::drugs::delete_drug),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let order_routes = Router::new()
        .route(
            "/",
            post(handlers::orders::create_order).get(handlers::orders::list_orders),
        )
        .route(
            "/{order_id}",
            get(handlers::orders::get_order)
                .patch(handlers::orders::update_order)
                .delete(handlers::orders::delete_order),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let payment_routes = Router::new()
        .route("/", post(handlers::payments::create_payment))
        .route(
            "/order/{order_id}",
            get(handlers::payments::list_payments_for_order),
        )
        .route(
            "/{payment_id}",
            get(handlers::payments::get_payment).patch(handlers::payments::update_payment),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal.
    // O rate_limit_guard é a camada mais externa: rejeita ANTES de
    // autenticação, autorização e banco de dados.
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api", rbac_routes)
        .nest("/api/patients", patient_routes)
        .nest("/api/drugs", drug_routes)
        .nest("/api/orders", order_routes)
        .nest("/api/payments", payment_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            rate_limit_guard,
        ))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());

    // ConnectInfo é o que permite ao rate limit identificar o IP de origem
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Erro no servidor Axum");
}
