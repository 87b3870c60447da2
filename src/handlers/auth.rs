//! 登录处理器

use crate::{error::AppError, middleware::AppState, models::auth::LoginRequest};
use axum::{extract::rejection::JsonRejection, extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

/// 登录
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = body.map_err(|e| {
        tracing::debug!(error = %e, "Rejected login body");
        AppError::from_json_rejection(&e)
    })?;

    req.validate()
        .map_err(|_| AppError::bad_request("无效的请求参数"))?;

    let response = state.auth_service.login(&req).await?;

    Ok(Json(response))
}
