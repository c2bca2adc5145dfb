//! Order Repository

use std::collections::HashSet;
use std::str::FromStr;

use rust_decimal::Decimal;
use shared::models::{Order, OrderItem, OrderStatus};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::{RepoError, RepoResult};

const SELECT_ORDER: &str =
    "SELECT id, table_number, items, total_price, status, created_at, updated_at FROM orders";

/// Raw `orders` row: items as JSON text, money as decimal text
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    table_number: i64,
    items: String,
    total_price: String,
    status: String,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepoError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let items: Vec<OrderItem> = serde_json::from_str(&row.items)
            .map_err(|e| RepoError::Corrupt(format!("order {} items: {e}", row.id)))?;
        let total_price = Decimal::from_str(&row.total_price)
            .map_err(|e| RepoError::Corrupt(format!("order {} total_price: {e}", row.id)))?;
        let status = OrderStatus::from_str(&row.status)
            .map_err(|e| RepoError::Corrupt(format!("order {}: {e}", row.id)))?;

        Ok(Order {
            id: row.id,
            table_number: row.table_number,
            items,
            total_price,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Column-level values written on insert and update
#[derive(Debug, Clone)]
pub struct OrderWrite {
    pub table_number: i64,
    pub items: Vec<OrderItem>,
    pub total_price: Decimal,
    pub status: OrderStatus,
}

impl OrderWrite {
    fn items_json(&self) -> RepoResult<String> {
        serde_json::to_string(&self.items).map_err(|e| RepoError::Database(e.to_string()))
    }
}

/// Sortable columns for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSortField {
    Id,
    TableNumber,
    TotalPrice,
    Status,
    CreatedAt,
}

impl OrderSortField {
    fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::TableNumber => "table_number",
            Self::TotalPrice => "CAST(total_price AS REAL)",
            Self::Status => "status",
            Self::CreatedAt => "created_at",
        }
    }
}

/// Resolved list filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    /// Matches `table_number` OR `id`
    pub number: Option<i64>,
    pub status: Option<OrderStatus>,
    pub table_number: Option<i64>,
    /// Short-circuit: the query can match no rows
    pub match_nothing: bool,
    /// `(field, descending)`; `None` keeps insertion order
    pub sort: Option<(OrderSortField, bool)>,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let row = sqlx::query_as::<_, OrderRow>(&format!("{SELECT_ORDER} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(Order::try_from).transpose()
}

pub async fn find_all(pool: &SqlitePool, filter: &OrderFilter) -> RepoResult<Vec<Order>> {
    if filter.match_nothing {
        return Ok(Vec::new());
    }

    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_ORDER);
    qb.push(" WHERE 1 = 1");
    if let Some(n) = filter.number {
        qb.push(" AND (table_number = ")
            .push_bind(n)
            .push(" OR id = ")
            .push_bind(n)
            .push(")");
    }
    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status.as_str());
    }
    if let Some(table) = filter.table_number {
        qb.push(" AND table_number = ").push_bind(table);
    }
    match filter.sort {
        Some((field, desc)) => {
            qb.push(" ORDER BY ")
                .push(field.column())
                .push(if desc { " DESC" } else { " ASC" })
                .push(", id ASC");
        }
        None => {
            qb.push(" ORDER BY id ASC");
        }
    }

    let rows = qb.build_query_as::<OrderRow>().fetch_all(pool).await?;
    rows.into_iter().map(Order::try_from).collect()
}

/// Distinct table numbers held by orders in any of `statuses`
pub async fn occupied_tables(
    pool: &SqlitePool,
    statuses: &[OrderStatus],
) -> RepoResult<HashSet<i64>> {
    if statuses.is_empty() {
        return Ok(HashSet::new());
    }

    let mut qb: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT DISTINCT table_number FROM orders WHERE status IN (");
    let mut separated = qb.separated(", ");
    for status in statuses {
        separated.push_bind(status.as_str());
    }
    separated.push_unseparated(")");

    let tables = qb.build_query_scalar::<i64>().fetch_all(pool).await?;
    Ok(tables.into_iter().collect())
}

pub async fn create(pool: &SqlitePool, data: &OrderWrite) -> RepoResult<Order> {
    let now = shared::util::now_millis();
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO orders (table_number, items, total_price, status, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?5) RETURNING id",
    )
    .bind(data.table_number)
    .bind(data.items_json()?)
    .bind(data.total_price.to_string())
    .bind(data.status.as_str())
    .bind(now)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create order".into()))
}

/// Overwrite every mutable column of an order (last writer wins)
pub async fn update(pool: &SqlitePool, id: i64, data: &OrderWrite) -> RepoResult<Order> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE orders SET table_number = ?1, items = ?2, total_price = ?3, status = ?4, \
         updated_at = ?5 WHERE id = ?6",
    )
    .bind(data.table_number)
    .bind(data.items_json()?)
    .bind(data.total_price.to_string())
    .bind(data.status.as_str())
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
}

/// Hard delete; returns false when no row matched
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM orders WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Totals of every paid order, parsed back into exact decimals
pub async fn paid_totals(pool: &SqlitePool) -> RepoResult<Vec<Decimal>> {
    let totals: Vec<String> =
        sqlx::query_scalar("SELECT total_price FROM orders WHERE status = 'paid'")
            .fetch_all(pool)
            .await?;
    totals
        .iter()
        .map(|t| {
            Decimal::from_str(t).map_err(|e| RepoError::Corrupt(format!("total_price {t}: {e}")))
        })
        .collect()
}
