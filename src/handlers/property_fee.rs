//! 缴费记录处理器

use crate::{
    error::AppError,
    middleware::AppState,
    models::{common::{ApiResponse, PageData}, property_fee::PropertyFeeListQuery},
    repository::PropertyFeeRepository,
};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

/// 缴费记录列表
pub async fn list_property_fees(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PropertyFeeListQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(query) = query.map_err(|_| AppError::bad_request("无效的请求参数"))?;

    let repo = PropertyFeeRepository::new(state.db.clone());
    let (list, total) = repo
        .list(&query.filter(), query.sort(), query.pagination())
        .await
        .map_err(|e| e.context("获取缴费记录失败"))?;

    Ok(Json(ApiResponse::ok(PageData { list, total })))
}
