//! Property fee repository (缴费记录数据访问)

use crate::{
    error::AppError,
    models::{
        common::Pagination,
        property_fee::{PropertyFee, PropertyFeeFilter, PropertyFeeSort},
    },
};
use sqlx::{PgPool, Postgres, QueryBuilder};

const FROM_JOIN: &str = "FROM property_fees pf JOIN residents r ON pf.resident_id = r.id WHERE 1=1";

pub struct PropertyFeeRepository {
    db: PgPool,
}

impl PropertyFeeRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 分页查询缴费记录，只包含住户仍存在的记录
    pub async fn list(
        &self,
        filter: &PropertyFeeFilter,
        sort: PropertyFeeSort,
        pagination: Pagination,
    ) -> Result<(Vec<PropertyFee>, i64), AppError> {
        let mut count = count_query(filter);
        let total: i64 = count.build_query_scalar().fetch_one(&self.db).await?;

        let fees = list_query(filter, sort, pagination)
            .build_query_as::<PropertyFee>()
            .fetch_all(&self.db)
            .await?;

        Ok((fees, total))
    }
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &PropertyFeeFilter) {
    if let Some(resident_id) = filter.resident_id {
        qb.push(" AND pf.resident_id = ").push_bind(resident_id);
    }
    if let Some(name) = &filter.resident_name {
        qb.push(" AND r.name LIKE ").push_bind(format!("%{}%", name));
    }
    if let Some(start) = filter.start_date {
        qb.push(" AND pf.payment_date >= ").push_bind(start);
    }
    if let Some(end) = filter.end_date {
        qb.push(" AND pf.payment_date <= ").push_bind(end);
    }
    if let Some(status) = filter.status {
        qb.push(" AND pf.payment_status = ").push_bind(status);
    }
}

fn count_query(filter: &PropertyFeeFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) {}", FROM_JOIN));
    push_filter(&mut qb, filter);
    qb
}

fn list_query(
    filter: &PropertyFeeFilter,
    sort: PropertyFeeSort,
    pagination: Pagination,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT pf.id, pf.resident_id, r.name AS resident_name, pf.amount, pf.payment_date, \
         pf.payment_method, pf.payment_status, pf.remark, pf.created_at, pf.updated_at {}",
        FROM_JOIN
    ));
    push_filter(&mut qb, filter);
    qb.push(sort.order_by());
    qb.push(" LIMIT ").push_bind(pagination.limit());
    qb.push(" OFFSET ").push_bind(pagination.offset());
    qb
}
