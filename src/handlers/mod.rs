//! HTTP 处理器模块

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod property_fee;
pub mod resident;
