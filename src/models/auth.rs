//! Authentication-related models

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "用户名不能为空"))]
    pub username: String,
    #[validate(length(min = 1, message = "密码不能为空"))]
    pub password: String,
    /// 记住登录状态，令牌有效期延长为 7 天
    #[serde(default)]
    pub remember: bool,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub message: String,
}

impl LoginResponse {
    pub fn new(token: String) -> Self {
        Self {
            success: true,
            token,
            message: "登录成功".to_string(),
        }
    }
}
