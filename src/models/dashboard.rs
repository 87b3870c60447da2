//! Dashboard models

use serde::Serialize;

use super::property_fee::PropertyFeeMonthlyStats;

/// 物业费表不可用时使用的年度收入
pub const FALLBACK_YEARLY_INCOME: f64 = 89540.00;

/// 待处理工单数（尚未接入工单系统，固定值）
pub const PLACEHOLDER_PENDING_TICKETS: i64 = 15;

/// 车位使用率（尚未接入停车系统，固定值）
pub const PLACEHOLDER_PARKING_RATE: &str = "--";

/// 默认的月度实际收入
pub const FALLBACK_ACTUAL: [f64; 12] = [
    82000.0, 78500.0, 85300.0, 90100.0, 92500.0, 88700.0, 91200.0, 89500.0, 93800.0, 96200.0,
    92300.0, 98500.0,
];

/// 默认的月度计划收入
pub const FALLBACK_PLANNED: [f64; 12] = [
    85000.0, 82000.0, 85000.0, 88000.0, 90000.0, 92000.0, 93000.0, 94000.0, 95000.0, 96000.0,
    97000.0, 98000.0,
];

/// 仪表盘统计
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub resident_count: i64,
    pub yearly_income: f64,
    pub pending_tickets: i64,
    pub parking_rate: String,
}

/// 仪表盘响应数据
#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub message: String,
    pub username: String,
    pub stats: DashboardStats,
}

/// 月度收入趋势：实际与计划各 12 个月
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IncomeData {
    pub actual: Vec<f64>,
    pub planned: Vec<f64>,
}

impl IncomeData {
    /// 默认数据
    pub fn fallback() -> Self {
        Self {
            actual: FALLBACK_ACTUAL.to_vec(),
            planned: FALLBACK_PLANNED.to_vec(),
        }
    }

    /// 由某一年的月度统计构造，没有任何记录时返回 None
    ///
    /// 缺失的月份记为 0，月份超出 1..=12 的记录忽略。
    pub fn from_monthly_stats(rows: &[PropertyFeeMonthlyStats]) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }

        let mut actual = vec![0.0; 12];
        let mut planned = vec![0.0; 12];

        for row in rows {
            if (1..=12).contains(&row.month) {
                let index = (row.month - 1) as usize;
                actual[index] = row.actual_income;
                planned[index] = row.planned_income;
            }
        }

        Some(Self { actual, planned })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn stats(month: i32, actual: f64, planned: f64) -> PropertyFeeMonthlyStats {
        PropertyFeeMonthlyStats {
            id: month as i64,
            year: 2024,
            month,
            actual_income: actual,
            planned_income: planned,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_fallback_has_twelve_months() {
        let data = IncomeData::fallback();
        assert_eq!(data.actual.len(), 12);
        assert_eq!(data.planned.len(), 12);
        assert_eq!(data.actual[0], 82000.0);
        assert_eq!(data.planned[11], 98000.0);
    }

    #[test]
    fn test_empty_rows_yield_none() {
        assert_eq!(IncomeData::from_monthly_stats(&[]), None);
    }

    #[test]
    fn test_partial_year_is_not_merged_with_fallback() {
        let data = IncomeData::from_monthly_stats(&[stats(1, 100.0, 200.0), stats(3, 300.0, 400.0)])
            .unwrap();

        assert_eq!(data.actual, vec![100.0, 0.0, 300.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(data.planned[2], 400.0);
        assert_eq!(data.planned[1], 0.0);
    }

    #[test]
    fn test_out_of_range_months_ignored() {
        let data = IncomeData::from_monthly_stats(&[stats(0, 1.0, 1.0), stats(13, 1.0, 1.0)]).unwrap();
        assert!(data.actual.iter().all(|v| *v == 0.0));
        assert_eq!(data.actual.len(), 12);
    }

    #[test]
    fn test_stats_serialization() {
        let stats = DashboardStats {
            resident_count: 3,
            yearly_income: FALLBACK_YEARLY_INCOME,
            pending_tickets: PLACEHOLDER_PENDING_TICKETS,
            parking_rate: PLACEHOLDER_PARKING_RATE.to_string(),
        };

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["residentCount"], 3);
        assert_eq!(json["yearlyIncome"], 89540.0);
        assert_eq!(json["pendingTickets"], 15);
        assert_eq!(json["parkingRate"], "--");
    }
}
