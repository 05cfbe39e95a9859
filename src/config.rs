// src/config.rs

use std::sync::Arc;
use std::{env, time::Duration};

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        DrugRepository, OrderRepository, PatientRepository, PaymentRepository, RbacRepository,
        UserRepository,
    },
    middleware::rate_limit::RateLimiter,
    services::{AuthService, AuthorizationService, OrderService},
};

// Valores de referência do limite de requisições: 500 por 60 segundos.
const DEFAULT_RATE_LIMIT_MAX_REQUESTS: usize = 500;
const DEFAULT_RATE_LIMIT_WINDOW_SECONDS: u64 = 60;

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,

    pub rate_limiter: Arc<RateLimiter>,

    pub user_repo: UserRepository,
    pub patient_repo: PatientRepository,
    pub drug_repo: DrugRepository,
    pub rbac_repo: RbacRepository,
    pub payment_repo: PaymentRepository,

    pub auth_service: AuthService,
    pub authorization_service: AuthorizationService,
    pub order_service: OrderService,
}

impl AppState {
    // Carrega as configurações e monta o gráfico de dependências
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        let rate_limit_max = env_or("RATE_LIMIT_MAX_REQUESTS", DEFAULT_RATE_LIMIT_MAX_REQUESTS);
        let rate_limit_window =
            env_or("RATE_LIMIT_WINDOW_SECONDS", DEFAULT_RATE_LIMIT_WINDOW_SECONDS);

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let patient_repo = PatientRepository::new(db_pool.clone());
        let drug_repo = DrugRepository::new(db_pool.clone());
        let order_repo = OrderRepository::new(db_pool.clone());
        let payment_repo = PaymentRepository::new(db_pool.clone());
        let rbac_repo = RbacRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret.clone());
        let authorization_service = AuthorizationService::new(rbac_repo.clone());
        let order_service = OrderService::new(
            order_repo.clone(),
            drug_repo.clone(),
            patient_repo.clone(),
            user_repo.clone(),
            payment_repo.clone(),
            db_pool.clone(),
        );

        // O limiter é construído uma única vez aqui e injetado via estado —
        // nada de mapa global.
        let rate_limiter = Arc::new(RateLimiter::new(
            rate_limit_max,
            Duration::from_secs(rate_limit_window),
        ));

        Ok(Self {
            db_pool,
            jwt_secret,
            rate_limiter,
            user_repo,
            patient_repo,
            drug_repo,
            rbac_repo,
            payment_repo,
            auth_service,
            authorization_service,
            order_service,
        })
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}
