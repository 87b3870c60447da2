//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
};

use crate::{handlers, middleware::AppState};

/// 预检结果缓存 12 小时
const CORS_MAX_AGE: Duration = Duration::from_secs(12 * 60 * 60);

/// 跨域配置：允许任意来源，不携带凭据
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ])
        .expose_headers([header::CONTENT_LENGTH])
        .max_age(CORS_MAX_AGE)
}

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    // 公开端点
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/api/auth/login", post(handlers::auth::login));

    // 需要认证的路由
    let authenticated_routes = Router::new()
        .route("/api/dashboard", get(handlers::dashboard::get_dashboard))
        .route("/api/dashboard/income", get(handlers::dashboard::get_income_data))
        .route(
            "/api/residents",
            get(handlers::resident::list_residents).post(handlers::resident::create_resident),
        )
        .route(
            "/api/residents/{id}",
            get(handlers::resident::get_resident)
                .put(handlers::resident::update_resident)
                .delete(handlers::resident::delete_resident),
        )
        .route("/api/property-fees", get(handlers::property_fee::list_property_fees))
        .layer(axum::middleware::from_fn_with_state(
            state.jwt_service.clone(),
            crate::auth::middleware::jwt_auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .layer(RequestBodyLimitLayer::new(state.config.server.body_limit_bytes))
        .layer(axum::middleware::map_response(
            crate::middleware::json_payload_too_large,
        ))
        .layer(axum::middleware::from_fn(
            crate::middleware::request_tracking_middleware,
        ))
        .layer(cors_layer())
        .with_state(state)
}
