//! 通用响应结构、分页与排序参数

use serde::Serialize;

/// 默认页码
pub const DEFAULT_PAGE: i64 = 1;
/// 默认每页条数
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// 统一响应结构：`{success, message?, data?}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn ok_with_message(message: &str, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.to_string()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// 只有消息、没有数据的成功响应
    pub fn message(message: &str) -> Self {
        Self {
            success: true,
            message: Some(message.to_string()),
            data: None,
        }
    }
}

/// 分页列表数据：当前页记录 + 筛选后的总数
#[derive(Debug, Serialize)]
pub struct PageData<T: Serialize> {
    pub list: Vec<T>,
    pub total: i64,
}

/// 分页参数，page 和 page_size 始终 >= 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: i64,
    page_size: i64,
}

impl Pagination {
    /// 非法值回落到默认值
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: if page < 1 { DEFAULT_PAGE } else { page },
            page_size: if page_size < 1 { DEFAULT_PAGE_SIZE } else { page_size },
        }
    }

    /// 从查询字符串解析，缺失或无法解析时使用默认值
    pub fn from_params(page: Option<&str>, page_size: Option<&str>) -> Self {
        let parse = |value: Option<&str>, default: i64| {
            value
                .and_then(|v| v.trim().parse::<i64>().ok())
                .unwrap_or(default)
        };

        Self::new(parse(page, DEFAULT_PAGE), parse(page_size, DEFAULT_PAGE_SIZE))
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_PAGE_SIZE)
    }
}

/// 排序方向，只有显式请求 desc 时才降序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// 过滤掉空字符串
pub fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// 解析正数，缺失、无法解析或 <= 0 时返回 None
pub fn positive_f64(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let p = Pagination::from_params(None, None);
        assert_eq!((p.page(), p.page_size()), (1, 10));
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_pagination_clamps_invalid_values() {
        for (page, size) in [("0", "0"), ("-3", "-1"), ("abc", "x"), ("", "")] {
            let p = Pagination::from_params(Some(page), Some(size));
            assert_eq!((p.page(), p.page_size()), (1, 10));
        }
    }

    #[test]
    fn test_pagination_offset() {
        let p = Pagination::from_params(Some("3"), Some("20"));
        assert_eq!(p.limit(), 20);
        assert_eq!(p.offset(), 40);
    }

    #[test]
    fn test_sort_order() {
        assert_eq!(SortOrder::parse(None), SortOrder::Asc);
        assert_eq!(SortOrder::parse(Some("asc")), SortOrder::Asc);
        assert_eq!(SortOrder::parse(Some("desc")), SortOrder::Desc);
        assert_eq!(SortOrder::parse(Some("DESC")), SortOrder::Desc);
        assert_eq!(SortOrder::parse(Some("descending; DROP TABLE")), SortOrder::Asc);
    }

    #[test]
    fn test_positive_f64() {
        assert_eq!(positive_f64(Some("85.5")), Some(85.5));
        assert_eq!(positive_f64(Some("0")), None);
        assert_eq!(positive_f64(Some("-1")), None);
        assert_eq!(positive_f64(Some("big")), None);
        assert_eq!(positive_f64(Some("NaN")), None);
        assert_eq!(positive_f64(None), None);
    }

    #[test]
    fn test_response_shapes() {
        let json = serde_json::to_value(ApiResponse::message("住户删除成功")).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "message": "住户删除成功"}));

        let json = serde_json::to_value(ApiResponse::ok(PageData { list: vec![1, 2], total: 7 }))
            .unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "data": {"list": [1, 2], "total": 7}}));
    }
}
