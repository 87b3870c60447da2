//! 仪表盘处理器

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    middleware::AppState,
    models::{common::ApiResponse, dashboard::DashboardData},
};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct IncomeQuery {
    pub year: Option<String>,
}

/// 解析年份参数
///
/// 只有参数缺失时才取当前年份；`year=` 这样的空值和其他非数字一样返回 400。
pub fn parse_year(value: Option<&str>) -> Result<i32, AppError> {
    match value {
        None => Ok(Utc::now().year()),
        Some(raw) => raw
            .trim()
            .parse::<i32>()
            .map_err(|_| AppError::bad_request("无效的年份参数")),
    }
}

/// 仪表盘概览
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let stats = state.dashboard_service.get_stats().await?;

    Ok(Json(ApiResponse::ok(DashboardData {
        message: "欢迎访问仪表盘".to_string(),
        username: auth.username,
        stats,
    })))
}

/// 月度收入趋势
pub async fn get_income_data(
    State(state): State<Arc<AppState>>,
    query: Result<Query<IncomeQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(query) = query.map_err(|_| AppError::bad_request("无效的年份参数"))?;
    let year = parse_year(query.year.as_deref())?;

    let income = state.dashboard_service.income_trend(year).await;

    Ok(Json(ApiResponse::ok(income)))
}
