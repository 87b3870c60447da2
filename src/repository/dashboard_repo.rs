//! Dashboard repository (仪表盘聚合查询)

use crate::{db, error::AppError, models::property_fee::PropertyFeeMonthlyStats};
use sqlx::PgPool;

/// 已缴费
const PAYMENT_STATUS_PAID: i16 = 1;

pub struct DashboardRepository {
    db: PgPool,
}

impl DashboardRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 住户总数
    pub async fn count_residents(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM residents")
            .fetch_one(&self.db)
            .await?;

        Ok(count)
    }

    pub async fn table_exists(&self, table: &str) -> Result<bool, AppError> {
        Ok(db::table_exists(&self.db, table).await?)
    }

    /// 某一年已缴费金额合计
    pub async fn yearly_income(&self, year: i32) -> Result<f64, AppError> {
        let income: f64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(amount), 0)::DOUBLE PRECISION
            FROM property_fees
            WHERE EXTRACT(YEAR FROM payment_date) = $1 AND payment_status = $2
            "#,
        )
        .bind(year)
        .bind(PAYMENT_STATUS_PAID)
        .fetch_one(&self.db)
        .await?;

        Ok(income)
    }

    /// 某一年的月度统计，按月份排序
    pub async fn monthly_stats(&self, year: i32) -> Result<Vec<PropertyFeeMonthlyStats>, AppError> {
        let rows = sqlx::query_as::<_, PropertyFeeMonthlyStats>(
            r#"
            SELECT id, year, month, actual_income, planned_income, created_at, updated_at
            FROM property_fee_monthly_stats
            WHERE year = $1
            ORDER BY month
            "#,
        )
        .bind(year)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }
}
