//! Property fee domain models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::common::{non_empty, Pagination, SortOrder};

/// 缴费记录（列表查询时带出住户姓名）
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PropertyFee {
    pub id: i64,
    pub resident_id: i64,
    pub resident_name: String,
    pub amount: f64,
    pub payment_date: Option<NaiveDate>,
    pub payment_method: String,
    pub payment_status: i16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 月度收入统计（预计算）
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PropertyFeeMonthlyStats {
    pub id: i64,
    pub year: i32,
    pub month: i32,
    pub actual_income: f64,
    pub planned_income: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 缴费记录列表查询参数
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFeeListQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub resident_id: Option<String>,
    pub resident_name: Option<String>,
    /// YYYY-MM-DD
    pub start_date: Option<String>,
    /// YYYY-MM-DD
    pub end_date: Option<String>,
    pub status: Option<String>,
    pub sort_field: Option<String>,
    pub sort_order: Option<String>,
}

impl PropertyFeeListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::from_params(self.page.as_deref(), self.page_size.as_deref())
    }

    pub fn filter(&self) -> PropertyFeeFilter {
        let date = |value: &Option<String>| {
            value
                .as_deref()
                .and_then(|v| NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").ok())
        };

        PropertyFeeFilter {
            resident_id: self
                .resident_id
                .as_deref()
                .and_then(|v| v.trim().parse::<i64>().ok())
                .filter(|id| *id > 0),
            resident_name: non_empty(self.resident_name.as_deref()),
            start_date: date(&self.start_date),
            end_date: date(&self.end_date),
            status: self
                .status
                .as_deref()
                .and_then(|v| v.trim().parse::<i16>().ok()),
        }
    }

    pub fn sort(&self) -> PropertyFeeSort {
        PropertyFeeSort::from_params(self.sort_field.as_deref(), self.sort_order.as_deref())
    }
}

/// 缴费记录过滤条件
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PropertyFeeFilter {
    pub resident_id: Option<i64>,
    /// 住户姓名子串匹配
    pub resident_name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// 0 也是有效的过滤值
    pub status: Option<i16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyFeeSortField {
    Id,
    Amount,
    PaymentDate,
}

impl PropertyFeeSortField {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "id" => Some(Self::Id),
            "amount" => Some(Self::Amount),
            "paymentDate" => Some(Self::PaymentDate),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Self::Id => "pf.id",
            Self::Amount => "pf.amount",
            Self::PaymentDate => "pf.payment_date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyFeeSort {
    pub field: PropertyFeeSortField,
    pub order: SortOrder,
}

impl Default for PropertyFeeSort {
    /// 未指定排序时最近的缴费在前
    fn default() -> Self {
        Self {
            field: PropertyFeeSortField::PaymentDate,
            order: SortOrder::Desc,
        }
    }
}

impl PropertyFeeSort {
    pub fn from_params(field: Option<&str>, order: Option<&str>) -> Self {
        match field.filter(|f| !f.is_empty()) {
            None => Self::default(),
            Some(raw) => match PropertyFeeSortField::parse(raw) {
                Some(field) => Self {
                    field,
                    order: SortOrder::parse(order),
                },
                None => Self {
                    field: PropertyFeeSortField::Id,
                    order: SortOrder::Asc,
                },
            },
        }
    }

    pub fn order_by(&self) -> String {
        format!(" ORDER BY {} {}", self.field.column(), self.order.as_sql())
    }
}
