pub mod drug_repo;
pub use drug_repo::DrugRepository;
pub mod order_repo;
pub use order_repo::{NewOrderItem, OrderRepository};
pub mod patient_repo;
pub use patient_repo::PatientRepository;
pub mod payment_repo;
pub use payment_repo::PaymentRepository;
pub mod rbac_repo;
pub use rbac_repo::RbacRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
