//! 认证服务：校验凭据并签发令牌

use crate::{
    auth::{jwt::JwtService, password::verify_password},
    error::AppError,
    models::auth::{LoginRequest, LoginResponse},
    repository::UserRepository,
};
use sqlx::PgPool;
use std::sync::Arc;

pub struct AuthService {
    db: PgPool,
    jwt_service: Arc<JwtService>,
}

impl AuthService {
    pub fn new(db: PgPool, jwt_service: Arc<JwtService>) -> Self {
        Self { db, jwt_service }
    }

    /// 用户登录
    ///
    /// 用户不存在和密码错误返回同一条消息，不区分原因。
    pub async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, AppError> {
        let user_repo = UserRepository::new(self.db.clone());

        let user = user_repo
            .find_by_username(&req.username)
            .await
            .map_err(|e| {
                tracing::error!(username = %req.username, error = %e, "Failed to load user");
                AppError::internal_error("服务器错误")
            })?;

        let user = match user {
            Some(user) if verify_password(&req.password, &user.password) => user,
            _ => {
                tracing::warn!(username = %req.username, "Login failed: bad credentials");
                return Err(AppError::unauthorized("账号或密码错误"));
            }
        };

        let token = self
            .jwt_service
            .generate_token(user.id, &user.username, req.remember)?;

        tracing::info!(
            user_id = user.id,
            username = %user.username,
            remember = req.remember,
            "User logged in"
        );

        Ok(LoginResponse::new(token))
    }
}
