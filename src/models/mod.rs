//! 数据模型模块

pub mod auth;
pub mod common;
pub mod dashboard;
pub mod property_fee;
pub mod resident;
pub mod user;
