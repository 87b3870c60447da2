//! 社区物业管理后台
//! 登录认证、仪表盘统计、住户管理与缴费记录查询

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod telemetry;
