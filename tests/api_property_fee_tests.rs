//! 缴费记录 API 集成测试

use axum::http::StatusCode;
use serial_test::serial;
use sqlx::PgPool;
use tower::ServiceExt;

mod common;
use common::{
    authed_request, body_json, create_test_app_state, create_test_user, offline_app,
    test_token,
};

async fn seed(pool: &PgPool) -> (i64, i64) {
    let wang: i64 = sqlx::query_scalar(
        "INSERT INTO residents (name, block_number, unit_number, house_number, house_area) VALUES ('王五', '1栋', '1单元', '101', 80) RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap();
    let zhao: i64 = sqlx::query_scalar(
        "INSERT INTO residents (name, block_number, unit_number, house_number, house_area) VALUES ('赵六', '2栋', '1单元', '301', 95) RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap();

    for (resident_id, amount, date, status) in [
        (wang, 300.0, "2024-01-15", 1i16),
        (wang, 300.0, "2024-02-15", 0),
        (zhao, 450.0, "2024-03-01", 1),
    ] {
        sqlx::query(
            "INSERT INTO property_fees (resident_id, amount, payment_date, payment_method, payment_status) VALUES ($1, $2, $3::DATE, '微信', $4)",
        )
        .bind(resident_id)
        .bind(amount)
        .bind(date)
        .bind(status)
        .execute(pool)
        .await
        .unwrap();
    }

    (wang, zhao)
}

#[tokio::test]
async fn test_list_database_unavailable() {
    let token = test_token(1, "admin");
    let response = offline_app()
        .oneshot(authed_request("GET", "/api/property-fees", &token, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert!(json["message"].as_str().unwrap().starts_with("获取缴费记录失败"));
}

#[tokio::test]
#[serial]
async fn test_list_filters() {
    let Some(pool) = common::live_test_db().await else {
        return;
    };
    let token = test_token(create_test_user(&pool, "admin", "admin123").await, "admin");
    let (wang, _) = seed(&pool).await;
    let state = create_test_app_state(pool);

    // 默认按缴费日期倒序
    let app = community_admin::routes::create_router(state.clone());
    let json = body_json(
        app.oneshot(authed_request("GET", "/api/property-fees", &token, None))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(json["data"]["total"], 3);
    assert_eq!(json["data"]["list"][0]["resident_name"], "赵六");
    assert_eq!(json["data"]["list"][0]["payment_date"], "2024-03-01");

    let app = community_admin::routes::create_router(state.clone());
    let json = body_json(
        app.oneshot(authed_request(
            "GET",
            &format!("/api/property-fees?residentId={}&status=0", wang),
            &token,
            None,
        ))
        .await
        .unwrap(),
    )
    .await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["list"][0]["payment_status"], 0);

    let app = community_admin::routes::create_router(state);
    let json = body_json(
        app.oneshot(authed_request(
            "GET",
            "/api/property-fees?startDate=2024-02-01&endDate=2024-02-28",
            &token,
            None,
        ))
        .await
        .unwrap(),
    )
    .await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["list"][0]["resident_name"], "王五");
}

#[tokio::test]
#[serial]
async fn test_deleted_resident_fees_hidden() {
    let Some(pool) = common::live_test_db().await else {
        return;
    };
    let token = test_token(create_test_user(&pool, "admin", "admin123").await, "admin");
    let (wang, _) = seed(&pool).await;
    let state = create_test_app_state(pool.clone());

    let app = community_admin::routes::create_router(state.clone());
    let response = app
        .oneshot(authed_request("DELETE", &format!("/api/residents/{}", wang), &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // 缴费记录仍在表中，但列表只返回住户仍存在的记录
    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM property_fees")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 3);

    let app = community_admin::routes::create_router(state);
    let json = body_json(
        app.oneshot(authed_request("GET", "/api/property-fees", &token, None))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(json["data"]["total"], 1);
}
