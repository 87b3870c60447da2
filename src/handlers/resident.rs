//! 住户管理的 HTTP 处理器

use crate::{
    error::AppError,
    middleware::AppState,
    models::{
        common::{ApiResponse, PageData},
        resident::{Resident, ResidentListQuery, ResidentRequest},
    },
    repository::ResidentRepository,
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use validator::Validate;

/// 解析路径中的住户 ID
pub fn parse_resident_id(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::bad_request("无效的住户ID"))
}

/// 解析并校验请求体
fn resident_body(
    body: Result<Json<ResidentRequest>, JsonRejection>,
) -> Result<ResidentRequest, AppError> {
    let Json(req) = body.map_err(|e| {
        tracing::debug!(error = %e, "Rejected resident body");
        AppError::from_json_rejection(&e)
    })?;

    req.validate().map_err(|e| {
        tracing::debug!(error = %e, "Resident validation failed");
        AppError::bad_request("无效的请求参数")
    })?;

    Ok(req)
}

async fn find_resident(repo: &ResidentRepository, id: i64, action: &str) -> Result<Resident, AppError> {
    repo.get(id)
        .await
        .map_err(|e| e.context(action))?
        .ok_or_else(|| AppError::not_found("住户不存在"))
}

/// 住户列表
pub async fn list_residents(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ResidentListQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(query) = query.map_err(|_| AppError::bad_request("无效的请求参数"))?;

    let repo = ResidentRepository::new(state.db.clone());
    let (list, total) = repo
        .list(&query.filter(), query.sort(), query.pagination())
        .await
        .map_err(|e| e.context("获取住户列表失败"))?;

    Ok(Json(ApiResponse::ok(PageData { list, total })))
}

/// 住户详情
pub async fn get_resident(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_resident_id(&id)?;

    let repo = ResidentRepository::new(state.db.clone());
    let resident = find_resident(&repo, id, "获取住户详情失败").await?;

    Ok(Json(ApiResponse::ok(resident)))
}

/// 创建住户
pub async fn create_resident(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ResidentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let req = resident_body(body)?;

    let repo = ResidentRepository::new(state.db.clone());
    let id = repo.create(&req).await.map_err(|e| e.context("创建住户失败"))?;
    let resident = find_resident(&repo, id, "创建住户失败").await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message("住户创建成功", resident)),
    ))
}

/// 更新住户：先确认存在，再更新，最后返回最新记录
pub async fn update_resident(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<ResidentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_resident_id(&id)?;

    let repo = ResidentRepository::new(state.db.clone());
    find_resident(&repo, id, "更新住户失败").await?;

    let req = resident_body(body)?;

    let updated = repo
        .update(id, &req)
        .await
        .map_err(|e| e.context("更新住户失败"))?;
    if !updated {
        // 存在性检查之后被并发删除，下面的查询会返回 404
        tracing::warn!(resident_id = id, "Resident removed before update");
    }
    let resident = find_resident(&repo, id, "更新住户失败").await?;

    Ok(Json(ApiResponse::ok_with_message("住户更新成功", resident)))
}

/// 删除住户
pub async fn delete_resident(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_resident_id(&id)?;

    let repo = ResidentRepository::new(state.db.clone());
    find_resident(&repo, id, "删除住户失败").await?;

    let deleted = repo
        .delete(id)
        .await
        .map_err(|e| e.context("删除住户失败"))?;
    if !deleted {
        tracing::warn!(resident_id = id, "Resident already removed before delete");
    }

    Ok(Json(ApiResponse::message("住户删除成功")))
}
