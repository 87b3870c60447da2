//! 会话令牌的签发与校验
//! HS256 签名，载荷只有用户 ID、用户名和过期时间

use crate::{config::AppConfig, error::AppError};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// 令牌载荷
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// 用户 ID
    pub user_id: i64,

    /// 用户名
    pub username: String,

    /// 过期时间（Unix 秒）
    pub exp: i64,
}

/// 令牌服务
///
/// 没有吊销列表：令牌在过期前始终有效，修改密码也不会使已签发的令牌失效。
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
    remember_ttl: Duration,
}

impl JwtService {
    /// 从配置创建令牌服务
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let secret = config.security.jwt_secret.expose_secret();

        if secret.len() < 32 {
            return Err(AppError::Config("JWT secret too short (min 32 chars)".to_string()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // 过期即失效，不留时钟容差
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            token_ttl: Duration::hours(config.security.token_exp_hours as i64),
            remember_ttl: Duration::hours(config.security.remember_token_exp_hours as i64),
        })
    }

    /// 令牌有效期
    pub fn token_ttl(&self, remember: bool) -> Duration {
        if remember {
            self.remember_ttl
        } else {
            self.token_ttl
        }
    }

    /// 签发令牌
    pub fn generate_token(
        &self,
        user_id: i64,
        username: &str,
        remember: bool,
    ) -> Result<String, AppError> {
        self.generate_token_at(user_id, username, remember, Utc::now())
    }

    /// 以指定时间为签发时刻签发令牌
    pub fn generate_token_at(
        &self,
        user_id: i64,
        username: &str,
        remember: bool,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let claims = Claims {
            user_id,
            username: username.to_string(),
            exp: (issued_at + self.token_ttl(remember)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode token: {:?}", e);
            AppError::internal_error("生成token失败")
        })
    }

    /// 校验令牌并返回载荷
    ///
    /// 格式错误、签名不符、已过期或载荷结构不对都返回 `Unauthorized`。
    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {:?}", e);
                AppError::unauthorized("无效的认证信息")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DatabaseConfig, LoggingConfig, SecurityConfig, ServerConfig};
    use secrecy::Secret;

    const SECRET: &str = "test_secret_key_32_characters_long!";

    fn test_config() -> AppConfig {
        AppConfig {
            server: ServerConfig {
                addr: "127.0.0.1:3000".to_string(),
                graceful_shutdown_timeout_secs: 30,
                body_limit_bytes: 1024 * 1024,
            },
            database: DatabaseConfig {
                url: Secret::new("postgresql://localhost/test".to_string()),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_secs: 30,
                idle_timeout_secs: 600,
                max_lifetime_secs: 1800,
                run_migrations: false,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "json".to_string(),
            },
            security: SecurityConfig {
                jwt_secret: Secret::new(SECRET.to_string()),
                token_exp_hours: 24,
                remember_token_exp_hours: 168,
            },
        }
    }

    #[test]
    fn test_generate_and_validate_token() {
        let service = JwtService::from_config(&test_config()).unwrap();

        let token = service.generate_token(7, "admin", false).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.username, "admin");
    }

    #[test]
    fn test_expiry_is_exact() {
        let service = JwtService::from_config(&test_config()).unwrap();
        let now = Utc::now();

        let token = service.generate_token_at(1, "admin", false, now).unwrap();
        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.exp - now.timestamp(), 24 * 3600);

        let token = service.generate_token_at(1, "admin", true, now).unwrap();
        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.exp - now.timestamp(), 168 * 3600);
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = JwtService::from_config(&test_config()).unwrap();
        let issued = Utc::now() - Duration::hours(25);

        let token = service.generate_token_at(1, "admin", false, issued).unwrap();
        assert!(service.validate_token(&token).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = JwtService::from_config(&test_config()).unwrap();

        let mut other = test_config();
        other.security.jwt_secret = Secret::new("another_secret_key_32_characters!!".to_string());
        let other = JwtService::from_config(&other).unwrap();

        let token = other.generate_token(1, "admin", false).unwrap();
        assert!(service.validate_token(&token).is_err());
    }

    #[test]
    fn test_wrong_claim_shape_rejected() {
        let service = JwtService::from_config(&test_config()).unwrap();

        let claims = serde_json::json!({
            "sub": "1",
            "username": "admin",
            "exp": (Utc::now() + Duration::hours(1)).timestamp(),
        });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(service.validate_token(&token).is_err());
    }

    #[test]
    fn test_invalid_token_fails() {
        let service = JwtService::from_config(&test_config()).unwrap();
        assert!(service.validate_token("garbage").is_err());
        assert!(service.validate_token("").is_err());
        assert!(service.validate_token("a.b.c").is_err());
    }

    #[test]
    fn test_short_secret_rejected() {
        let mut config = test_config();
        config.security.jwt_secret = Secret::new("your_jwt_secret_key".to_string());
        assert!(JwtService::from_config(&config).is_err());
    }
}
