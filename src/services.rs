pub mod auth;
pub use auth::AuthService;
pub mod authorization;
pub use authorization::AuthorizationService;
pub mod order_service;
pub use order_service::OrderService;
