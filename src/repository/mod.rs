//! Database repository layer

pub mod dashboard_repo;
pub mod property_fee_repo;
pub mod resident_repo;
pub mod user_repo;

pub use dashboard_repo::*;
pub use property_fee_repo::*;
pub use resident_repo::*;
pub use user_repo::*;
