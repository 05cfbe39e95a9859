pub mod auth;
pub mod drug;
pub mod order;
pub mod patient;
pub mod payment;
pub mod rbac;
