//! Resident repository (住户数据访问)

use crate::{
    error::AppError,
    models::{
        common::Pagination,
        resident::{canonical_building, canonical_unit, Resident, ResidentFilter, ResidentRequest, ResidentSort},
    },
};
use sqlx::{PgPool, Postgres, QueryBuilder};

const RESIDENT_COLUMNS: &str = "id, name, block_number, unit_number, house_number, house_area, \
                                fare_sum, status, created_at, updated_at";

pub struct ResidentRepository {
    db: PgPool,
}

impl ResidentRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 分页查询住户，返回当前页记录和筛选后的总数
    pub async fn list(
        &self,
        filter: &ResidentFilter,
        sort: ResidentSort,
        pagination: Pagination,
    ) -> Result<(Vec<Resident>, i64), AppError> {
        let mut count = count_query(filter);
        let total: i64 = count.build_query_scalar().fetch_one(&self.db).await?;

        let mut list = list_query(filter, sort, pagination);
        tracing::debug!(sql = list.sql(), total, "Listing residents");

        let residents = list
            .build_query_as::<Resident>()
            .fetch_all(&self.db)
            .await?
            .into_iter()
            .map(Resident::with_status_text)
            .collect();

        Ok((residents, total))
    }

    /// 获取住户，不存在时返回 None
    pub async fn get(&self, id: i64) -> Result<Option<Resident>, AppError> {
        let resident = sqlx::query_as::<_, Resident>(&format!(
            "SELECT {} FROM residents WHERE id = $1",
            RESIDENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(resident.map(Resident::with_status_text))
    }

    /// 创建住户，返回新记录的 ID
    pub async fn create(&self, req: &ResidentRequest) -> Result<i64, AppError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO residents (name, block_number, unit_number, house_number, house_area, fare_sum, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&req.name)
        .bind(canonical_building(&req.building))
        .bind(canonical_unit(&req.unit))
        .bind(&req.room)
        .bind(req.area)
        .bind(req.fee)
        .bind(req.status)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(resident_id = id, name = %req.name, "Resident created");
        Ok(id)
    }

    /// 更新住户
    ///
    /// 调用方负责先确认记录存在；返回是否有记录被更新。
    pub async fn update(&self, id: i64, req: &ResidentRequest) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE residents
            SET
                name = $2,
                block_number = $3,
                unit_number = $4,
                house_number = $5,
                house_area = $6,
                fare_sum = $7,
                status = $8,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&req.name)
        .bind(canonical_building(&req.building))
        .bind(canonical_unit(&req.unit))
        .bind(&req.room)
        .bind(req.area)
        .bind(req.fee)
        .bind(req.status)
        .execute(&self.db)
        .await?;

        tracing::info!(resident_id = id, "Resident updated");
        Ok(result.rows_affected() > 0)
    }

    /// 删除住户（不级联删除缴费记录）
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM residents WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        tracing::info!(resident_id = id, "Resident deleted");
        Ok(result.rows_affected() > 0)
    }
}

/// 追加过滤条件；计数查询和列表查询共用，保证两者条件一致
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &ResidentFilter) {
    if let Some(name) = &filter.name {
        qb.push(" AND name LIKE ").push_bind(format!("%{}%", name));
    }
    if let Some(building) = &filter.building {
        qb.push(" AND block_number = ").push_bind(building.clone());
    }
    if let Some(unit) = &filter.unit {
        qb.push(" AND unit_number = ").push_bind(unit.clone());
    }
    if let Some(area_min) = filter.area_min {
        qb.push(" AND house_area >= ").push_bind(area_min);
    }
    if let Some(area_max) = filter.area_max {
        qb.push(" AND house_area <= ").push_bind(area_max);
    }
}

fn count_query(filter: &ResidentFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM residents WHERE 1=1");
    push_filter(&mut qb, filter);
    qb
}

fn list_query(
    filter: &ResidentFilter,
    sort: ResidentSort,
    pagination: Pagination,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM residents WHERE 1=1", RESIDENT_COLUMNS));
    push_filter(&mut qb, filter);
    // 排序列只来自白名单枚举
    qb.push(sort.order_by());
    qb.push(" LIMIT ").push_bind(pagination.limit());
    qb.push(" OFFSET ").push_bind(pagination.offset());
    qb
}
