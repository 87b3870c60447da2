//! 认证模块：密码摘要、会话令牌、Bearer 认证中间件

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, JwtService};
pub use middleware::{extract_token, jwt_auth_middleware, AuthContext};
pub use password::{hash_password, verify_password};
