//! 仪表盘服务
//!
//! 聚合查询失败时降级为默认数据，不向调用方返回错误（住户总数除外）。

use crate::{
    error::AppError,
    models::dashboard::{
        DashboardStats, IncomeData, FALLBACK_YEARLY_INCOME, PLACEHOLDER_PARKING_RATE,
        PLACEHOLDER_PENDING_TICKETS,
    },
    repository::DashboardRepository,
};
use chrono::{Datelike, Utc};
use sqlx::PgPool;

const FEES_TABLE: &str = "property_fees";
const MONTHLY_STATS_TABLE: &str = "property_fee_monthly_stats";

pub struct DashboardService {
    db: PgPool,
}

impl DashboardService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    fn repo(&self) -> DashboardRepository {
        DashboardRepository::new(self.db.clone())
    }

    /// 仪表盘统计
    ///
    /// 住户总数查询失败时返回错误；年度收入查询失败或缴费表不存在时使用默认值。
    pub async fn get_stats(&self) -> Result<DashboardStats, AppError> {
        let repo = self.repo();

        let resident_count = repo
            .count_residents()
            .await
            .map_err(|e| e.context("获取住户统计失败"))?;

        let yearly_income = self.current_year_income(&repo).await;

        Ok(DashboardStats {
            resident_count,
            yearly_income,
            pending_tickets: PLACEHOLDER_PENDING_TICKETS,
            parking_rate: PLACEHOLDER_PARKING_RATE.to_string(),
        })
    }

    async fn current_year_income(&self, repo: &DashboardRepository) -> f64 {
        let year = Utc::now().year();

        match repo.table_exists(FEES_TABLE).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(table = FEES_TABLE, "Table missing, using fallback income");
                return FALLBACK_YEARLY_INCOME;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Table check failed, using fallback income");
                return FALLBACK_YEARLY_INCOME;
            }
        }

        match repo.yearly_income(year).await {
            Ok(income) => income,
            Err(e) => {
                tracing::warn!(year, error = %e, "Yearly income query failed, using fallback");
                FALLBACK_YEARLY_INCOME
            }
        }
    }

    /// 月度收入趋势
    ///
    /// 该年没有统计数据、统计表不存在或查询失败时，整体替换为默认数据，不做逐月合并。
    pub async fn income_trend(&self, year: i32) -> IncomeData {
        let repo = self.repo();

        match repo.table_exists(MONTHLY_STATS_TABLE).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(table = MONTHLY_STATS_TABLE, "Table missing, using fallback income trend");
                return IncomeData::fallback();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Table check failed, using fallback income trend");
                return IncomeData::fallback();
            }
        }

        match repo.monthly_stats(year).await {
            Ok(rows) => IncomeData::from_monthly_stats(&rows).unwrap_or_else(|| {
                tracing::debug!(year, "No monthly stats for year, using fallback");
                IncomeData::fallback()
            }),
            Err(e) => {
                tracing::warn!(year, error = %e, "Monthly stats query failed, using fallback");
                IncomeData::fallback()
            }
        }
    }
}
