// src/middleware/rate_limit.rs

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use dashmap::DashMap;

use crate::{common::error::AppError, config::AppState};

/// Limite de requisições por cliente em janela deslizante.
///
/// A contagem é recalculada a cada requisição filtrando a lista de carimbos
/// de tempo do cliente — simples, e a memória por cliente fica limitada pela
/// própria capacidade. O acesso por chave é serializado pelo shard do
/// DashMap, então duas requisições paralelas do mesmo IP não se perdem.
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    history: DashMap<String, Vec<Instant>>,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            history: DashMap::new(),
        }
    }

    /// Admite ou rejeita uma requisição deste cliente, agora.
    pub fn check(&self, client: &str) -> Result<(), AppError> {
        self.check_at(client, Instant::now())
    }

    fn check_at(&self, client: &str, now: Instant) -> Result<(), AppError> {
        let mut history = self.history.entry(client.to_string()).or_default();

        // 1. Descarta carimbos fora da janela
        history.retain(|t| now.duration_since(*t) < self.window);

        // 2. Cheio? Rejeita SEM registrar carimbo: a tentativa barrada não
        //    consome vaga da janela.
        if history.len() >= self.max_requests {
            return Err(AppError::RateLimited {
                limit: self.max_requests,
            });
        }

        // 3. Registra e deixa passar
        history.push(now);
        Ok(())
    }

    /// Remove clientes sem nenhum carimbo vivo, para o mapa não crescer
    /// indefinidamente com identidades ociosas.
    pub fn sweep_idle(&self) {
        self.sweep_idle_at(Instant::now());
    }

    fn sweep_idle_at(&self, now: Instant) {
        self.history
            .retain(|_, stamps| stamps.iter().any(|t| now.duration_since(*t) < self.window));
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

/// Middleware de admissão: roda antes de autenticação, autorização e de
/// qualquer acesso ao banco.
pub async fn rate_limit_guard(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Identifica o cliente pelo endereço de origem. Sem endereço conhecido,
    // todos dividem o balde "unknown" — limitação conhecida.
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    app_state.rate_limiter.check(&client)?;

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(60);

    #[test]
    fn allows_up_to_capacity_and_rejects_the_next() {
        let limiter = RateLimiter::new(2, WINDOW);
        let base = Instant::now();

        assert!(limiter.check_at("10.0.0.1", base).is_ok());
        assert!(limiter.check_at("10.0.0.1", base + Duration::from_secs(1)).is_ok());
        assert!(limiter.check_at("10.0.0.1", base + Duration::from_secs(2)).is_err());
    }

    #[test]
    fn allows_again_after_the_window_slides() {
        let limiter = RateLimiter::new(2, WINDOW);
        let base = Instant::now();

        assert!(limiter.check_at("10.0.0.1", base).is_ok());
        assert!(limiter.check_at("10.0.0.1", base + Duration::from_secs(1)).is_ok());
        assert!(limiter.check_at("10.0.0.1", base + Duration::from_secs(2)).is_err());

        // 61s depois do primeiro carimbo, a janela já deslizou
        assert!(limiter.check_at("10.0.0.1", base + Duration::from_secs(61)).is_ok());
    }

    #[test]
    fn rejected_attempts_do_not_consume_a_slot() {
        let limiter = RateLimiter::new(1, WINDOW);
        let base = Instant::now();

        assert!(limiter.check_at("10.0.0.1", base).is_ok());
        // Barrada no meio da janela: não pode registrar carimbo novo
        assert!(limiter.check_at("10.0.0.1", base + Duration::from_secs(30)).is_err());

        // Se a rejeição tivesse registrado, este ainda estaria bloqueado
        assert!(limiter.check_at("10.0.0.1", base + Duration::from_secs(61)).is_ok());
    }

    #[test]
    fn clients_are_counted_independently() {
        let limiter = RateLimiter::new(1, WINDOW);
        let base = Instant::now();

        assert!(limiter.check_at("10.0.0.1", base).is_ok());
        assert!(limiter.check_at("10.0.0.2", base).is_ok());
        assert!(limiter.check_at("10.0.0.1", base + Duration::from_secs(1)).is_err());
    }

    #[test]
    fn sweep_drops_idle_clients_only() {
        let limiter = RateLimiter::new(5, WINDOW);
        let base = Instant::now();

        limiter.check_at("idle", base).unwrap();
        limiter.check_at("active", base + Duration::from_secs(59)).unwrap();

        limiter.sweep_idle_at(base + Duration::from_secs(70));

        assert!(!limiter.history.contains_key("idle"));
        assert!(limiter.history.contains_key("active"));
    }
}
