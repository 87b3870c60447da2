//! Resident domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::common::{non_empty, positive_f64, Pagination, SortOrder};

/// 楼栋号后缀
pub const BUILDING_SUFFIX: &str = "栋";
/// 单元号后缀
pub const UNIT_SUFFIX: &str = "单元";

/// 欠费
pub const STATUS_DELINQUENT: i16 = 0;
/// 正常
pub const STATUS_CURRENT: i16 = 1;

/// 缺少后缀时补上，已有后缀时原样返回
pub fn with_suffix(value: &str, suffix: &str) -> String {
    if value.ends_with(suffix) {
        value.to_string()
    } else {
        format!("{}{}", value, suffix)
    }
}

/// 规范化楼栋号，例如 "3" -> "3栋"
pub fn canonical_building(value: &str) -> String {
    with_suffix(value, BUILDING_SUFFIX)
}

/// 规范化单元号，例如 "2" -> "2单元"
pub fn canonical_unit(value: &str) -> String {
    with_suffix(value, UNIT_SUFFIX)
}

/// 状态显示文本
pub fn status_label(status: i16) -> &'static str {
    if status == STATUS_DELINQUENT {
        "欠费"
    } else {
        "正常"
    }
}

/// 住户
///
/// 数据库列名和前端字段名不同，例如 `block_number` 对外是 `building`。
/// 存储的状态值不直接输出，`status` 字段输出显示文本。
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Resident {
    pub id: i64,
    pub name: String,
    #[sqlx(rename = "block_number")]
    pub building: String,
    #[sqlx(rename = "unit_number")]
    pub unit: String,
    #[sqlx(rename = "house_number")]
    pub room: String,
    #[sqlx(rename = "house_area")]
    pub area: f64,
    #[sqlx(rename = "fare_sum")]
    pub fee: f64,
    #[serde(skip)]
    pub status: i16,
    #[sqlx(skip)]
    #[serde(rename = "status")]
    pub status_text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resident {
    /// 根据存储的状态值填充显示文本
    pub fn with_status_text(mut self) -> Self {
        self.status_text = status_label(self.status).to_string();
        self
    }
}

/// 创建/更新住户请求
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResidentRequest {
    #[validate(length(min = 1, message = "姓名不能为空"))]
    pub name: String,
    #[validate(length(min = 1, message = "楼栋不能为空"))]
    pub building: String,
    #[validate(length(min = 1, message = "单元不能为空"))]
    pub unit: String,
    #[validate(length(min = 1, message = "门牌号不能为空"))]
    pub room: String,
    #[validate(range(exclusive_min = 0.0, message = "面积必须大于0"))]
    pub area: f64,
    #[serde(default)]
    pub fee: f64,
    /// 0 表示欠费，1 表示正常
    #[serde(default)]
    #[validate(range(min = 0, max = 1, message = "状态只能是0或1"))]
    pub status: i16,
}

/// 住户列表查询参数（原始字符串，未校验）
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidentListQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub name: Option<String>,
    pub building: Option<String>,
    pub unit: Option<String>,
    pub area: Option<String>,
    pub area_max: Option<String>,
    pub sort_field: Option<String>,
    pub sort_order: Option<String>,
}

impl ResidentListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::from_params(self.page.as_deref(), self.page_size.as_deref())
    }

    pub fn filter(&self) -> ResidentFilter {
        ResidentFilter {
            name: non_empty(self.name.as_deref()),
            building: non_empty(self.building.as_deref()).map(|b| canonical_building(&b)),
            unit: non_empty(self.unit.as_deref()).map(|u| canonical_unit(&u)),
            area_min: positive_f64(self.area.as_deref()),
            area_max: positive_f64(self.area_max.as_deref()),
        }
    }

    pub fn sort(&self) -> ResidentSort {
        ResidentSort::from_params(self.sort_field.as_deref(), self.sort_order.as_deref())
    }
}

/// 住户列表过滤条件，每项只在有值时生效
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ResidentFilter {
    /// 姓名子串匹配
    pub name: Option<String>,
    /// 已规范化的楼栋号
    pub building: Option<String>,
    /// 已规范化的单元号
    pub unit: Option<String>,
    pub area_min: Option<f64>,
    pub area_max: Option<f64>,
}

/// 允许排序的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResidentSortField {
    #[default]
    Id,
    Area,
    Fee,
}

impl ResidentSortField {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "id" => Some(Self::Id),
            "area" => Some(Self::Area),
            "fee" => Some(Self::Fee),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Area => "house_area",
            Self::Fee => "fare_sum",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResidentSort {
    pub field: ResidentSortField,
    pub order: SortOrder,
}

impl ResidentSort {
    /// 未识别的字段回落到按 id 升序
    pub fn from_params(field: Option<&str>, order: Option<&str>) -> Self {
        match field.and_then(ResidentSortField::parse) {
            Some(field) => Self {
                field,
                order: SortOrder::parse(order),
            },
            None => Self::default(),
        }
    }

    pub fn order_by(&self) -> String {
        format!(" ORDER BY {} {}", self.field.column(), self.order.as_sql())
    }
}
