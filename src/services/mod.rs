//! Business logic services layer

pub mod auth_service;
pub mod dashboard_service;

pub use auth_service::AuthService;
pub use dashboard_service::DashboardService;
