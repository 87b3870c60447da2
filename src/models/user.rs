//! User domain models

use chrono::{DateTime, Utc};
use serde::Serialize;

/// 管理员账号（由数据库管理员维护，系统内只读）
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// 32 位十六进制 MD5 摘要
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
