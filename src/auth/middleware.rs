//! Bearer 令牌认证中间件

use crate::{auth::jwt::JwtService, error::AppError};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// 认证上下文（附加到请求扩展，由 handler 以参数形式取出）
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: i64,
    pub username: String,
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("未提供认证信息"))
    }
}

/// 从 Authorization 头提取令牌
pub fn extract_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::unauthorized("未提供认证信息"))?;

    let value = value
        .to_str()
        .map_err(|_| AppError::unauthorized("认证格式错误"))?;

    if value.is_empty() {
        return Err(AppError::unauthorized("未提供认证信息"));
    }

    match value.strip_prefix("Bearer ") {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(AppError::unauthorized("认证格式错误")),
    }
}

/// 认证中间件：令牌有效时附加 `AuthContext`，否则直接返回 401
pub async fn jwt_auth_middleware(
    State(jwt_service): State<Arc<JwtService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = {
        let token = extract_token(req.headers())?;
        jwt_service.validate_token(token)?
    };

    tracing::debug!(user_id = claims.user_id, username = %claims.username, "Request authenticated");

    req.extensions_mut().insert(AuthContext {
        user_id: claims.user_id,
        username: claims.username,
    });

    Ok(next.run(req).await)
}
