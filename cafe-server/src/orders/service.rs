//! Order lifecycle operations
//!
//! `OrderService` composes the item, validation and search modules on top
//! of the order repository. Each call touches a single order row; there is
//! no cross-request locking, so concurrent updates are last-writer-wins and
//! two concurrent creates on the same table may both pass the occupancy
//! check.

use rust_decimal::Decimal;
use shared::models::{
    Order, OrderCreate, OrderItem, OrderQuery, OrderStatus, OrderUpdate, RevenueSummary, StaffOrderUpdate,
};
use sqlx::SqlitePool;

use super::error::OrderError;
use super::{items, money, search, validation};
use crate::auth::WorkerSession;
use crate::db::repository::order::{self as order_repo, OrderWrite};
use crate::db::repository::RepoError;

/// Statuses that keep a table occupied for new orders
pub const OCCUPYING_STATUSES: [OrderStatus; 3] = OrderStatus::ALL;

pub type OrderResult<T> = Result<T, OrderError>;

#[derive(Debug, Clone)]
pub struct OrderService {
    pool: SqlitePool,
}

impl OrderService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, id: i64) -> OrderResult<Order> {
        order_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or(OrderError::NotFound(id))
    }

    pub async fn list(&self, query: &OrderQuery) -> OrderResult<Vec<Order>> {
        let filter = search::build_filter(query)?;
        Ok(order_repo::find_all(&self.pool, &filter).await?)
    }

    /// Create an order; the table must not be held by any existing order
    pub async fn create(&self, candidate: &OrderCreate) -> OrderResult<Order> {
        let occupied = order_repo::occupied_tables(&self.pool, &OCCUPYING_STATUSES).await?;
        let valid = validation::validate(candidate, &occupied)?;

        let write = OrderWrite {
            table_number: valid.table_number,
            total_price: valid.total_price,
            items: valid.items,
            status: valid.status,
        };
        let order = order_repo::create(&self.pool, &write).await?;

        tracing::info!(
            order_id = order.id,
            table_number = order.table_number,
            total = %order.total_price,
            "Order created"
        );
        Ok(order)
    }

    /// Customer update: merge new items, optionally move table
    ///
    /// Status cannot change here. A new table number is checked for
    /// positivity only and is NOT checked for occupancy, unlike create.
    pub async fn update_as_customer(&self, id: i64, update: &OrderUpdate) -> OrderResult<Order> {
        let current = self.get(id).await?;
        let valid = validation::validate_update(&update.items, None, update.table_number.as_ref())?;
        let table_number = valid.table_number.unwrap_or(current.table_number);

        let merged = items::merge_items(&current.items, valid.items);
        let order = self.save(id, table_number, merged, current.status).await?;

        tracing::info!(order_id = id, items = order.items.len(), "Order updated by customer");
        Ok(order)
    }

    /// Staff update: remove by index, then merge, optionally set status/table
    pub async fn update_as_staff(
        &self,
        session: &WorkerSession,
        id: i64,
        update: &StaffOrderUpdate,
    ) -> OrderResult<Order> {
        let current = self.get(id).await?;
        let valid = validation::validate_update(
            &update.items,
            update.status.as_ref(),
            update.table_number.as_ref(),
        )?;
        let status = valid.status.unwrap_or(current.status);
        let table_number = valid.table_number.unwrap_or(current.table_number);

        let kept = items::remove_indices(&current.items, &update.remove_indices);
        let merged = items::merge_items(&kept, valid.items);
        let order = self.save(id, table_number, merged, status).await?;

        tracing::info!(
            order_id = id,
            worker = %session.identifier,
            status = %order.status,
            removed = update.remove_indices.len(),
            items = order.items.len(),
            "Order updated by staff"
        );
        Ok(order)
    }

    pub async fn delete(&self, id: i64) -> OrderResult<()> {
        if !order_repo::delete(&self.pool, id).await? {
            return Err(OrderError::NotFound(id));
        }
        tracing::info!(order_id = id, "Order deleted");
        Ok(())
    }

    /// Exact sum of `total_price` over paid orders
    pub async fn revenue(&self) -> OrderResult<RevenueSummary> {
        let totals = order_repo::paid_totals(&self.pool).await?;
        let total_revenue = totals
            .iter()
            .try_fold(money::zero(), |acc: Decimal, t| acc.checked_add(*t))
            .ok_or(OrderError::RevenueOverflow)?;
        Ok(RevenueSummary {
            total_revenue: money::round_money(total_revenue),
            paid_orders: totals.len() as i64,
        })
    }

    async fn save(
        &self,
        id: i64,
        table_number: i64,
        line_items: Vec<OrderItem>,
        status: OrderStatus,
    ) -> OrderResult<Order> {
        if line_items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        let write = OrderWrite {
            table_number,
            total_price: validation::validate_total(&line_items)?,
            items: line_items,
            status,
        };
        order_repo::update(&self.pool, id, &write)
            .await
            .map_err(|e| match e {
                RepoError::NotFound(_) => OrderError::NotFound(id),
                other => other.into(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_in_memory;
    use crate::orders::validation::ValidationKind;
    use shared::models::RawOrderItem;

    async fn service() -> OrderService {
        OrderService::new(connect_in_memory().await.unwrap())
    }

    fn session() -> WorkerSession {
        WorkerSession {
            worker_id: 1,
            identifier: "anna".into(),
            issued_at: 0,
            expires_at: i64::MAX,
        }
    }

    fn create_req(table: i64, items: &[(&str, f64)]) -> OrderCreate {
        OrderCreate {
            table_number: table.into(),
            items: items.iter().map(|(n, p)| RawOrderItem::new(*n, *p)).collect(),
            status: None,
        }
    }

    fn raw(items: &[(&str, f64)]) -> Vec<RawOrderItem> {
        items.iter().map(|(n, p)| RawOrderItem::new(*n, *p)).collect()
    }

    fn validation_kinds(err: OrderError) -> Vec<ValidationKind> {
        match err {
            OrderError::Validation(errors) => errors.errors().iter().map(|e| e.kind).collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_computes_total_and_defaults_status() {
        let svc = service().await;
        let order = svc.create(&create_req(2, &[("Tea", 3.00)])).await.unwrap();
        assert_eq!(order.total_price.to_string(), "3.00");
        assert_eq!(order.status, OrderStatus::Waiting);
        assert_eq!(order.table_number, 2);
    }

    #[tokio::test]
    async fn test_create_on_occupied_table_fails_for_every_status() {
        let svc = service().await;
        for (table, status) in [(1, "waiting"), (2, "ready"), (3, "paid")] {
            let mut req = create_req(table, &[("Tea", 3.00)]);
            req.status = Some(status.into());
            svc.create(&req).await.unwrap();

            let err = svc.create(&create_req(table, &[("Soup", 5.00)])).await.unwrap_err();
            assert_eq!(validation_kinds(err), vec![ValidationKind::TableOccupied]);
        }
    }

    #[tokio::test]
    async fn test_create_without_items_fails() {
        let svc = service().await;
        let err = svc.create(&create_req(1, &[])).await.unwrap_err();
        assert_eq!(validation_kinds(err), vec![ValidationKind::EmptyItems]);
    }

    #[tokio::test]
    async fn test_customer_update_merges_and_recomputes() {
        let svc = service().await;
        let order = svc.create(&create_req(2, &[("Tea", 3.00)])).await.unwrap();

        let update = OrderUpdate {
            items: raw(&[("Coffee", 5.00)]),
            table_number: None,
        };
        let updated = svc.update_as_customer(order.id, &update).await.unwrap();
        let names: Vec<&str> = updated.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Tea", "Coffee"]);
        assert_eq!(updated.total_price.to_string(), "8.00");
        assert_eq!(updated.table_number, 2);
    }

    #[tokio::test]
    async fn test_customer_update_same_item_twice_appends_once() {
        let svc = service().await;
        let order = svc.create(&create_req(2, &[("Cake", 4.50)])).await.unwrap();
        let update = OrderUpdate {
            items: raw(&[("Tea", 3.00)]),
            table_number: None,
        };
        svc.update_as_customer(order.id, &update).await.unwrap();
        let updated = svc.update_as_customer(order.id, &update).await.unwrap();
        assert_eq!(updated.items.len(), 2);
        assert_eq!(updated.total_price.to_string(), "7.50");
    }

    #[tokio::test]
    async fn test_customer_update_moves_table_without_occupancy_check() {
        let svc = service().await;
        svc.create(&create_req(1, &[("Tea", 3.00)])).await.unwrap();
        let order = svc.create(&create_req(2, &[("Tea", 3.00)])).await.unwrap();

        // Table 1 is occupied, the move is still accepted
        let update = OrderUpdate {
            items: vec![],
            table_number: Some(1.into()),
        };
        let moved = svc.update_as_customer(order.id, &update).await.unwrap();
        assert_eq!(moved.table_number, 1);

        let bad = OrderUpdate {
            items: vec![],
            table_number: Some(0.into()),
        };
        let err = svc.update_as_customer(order.id, &bad).await.unwrap_err();
        assert_eq!(validation_kinds(err), vec![ValidationKind::InvalidTableNumber]);
    }

    #[tokio::test]
    async fn test_customer_update_unknown_order() {
        let svc = service().await;
        let err = svc
            .update_as_customer(404, &OrderUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::NotFound(404)));
    }

    #[tokio::test]
    async fn test_staff_update_removes_then_adds() {
        let svc = service().await;
        let order = svc
            .create(&create_req(3, &[("Tea", 3.00), ("Soup", 6.00)]))
            .await
            .unwrap();

        let update = StaffOrderUpdate {
            remove_indices: vec![0],
            items: raw(&[("Bread", 1.25)]),
            status: Some("ready".into()),
            table_number: None,
        };
        let updated = svc.update_as_staff(&session(), order.id, &update).await.unwrap();
        let names: Vec<&str> = updated.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Soup", "Bread"]);
        assert_eq!(updated.total_price.to_string(), "7.25");
        assert_eq!(updated.status, OrderStatus::Ready);
    }

    #[tokio::test]
    async fn test_staff_update_can_re_add_removed_item() {
        let svc = service().await;
        let order = svc.create(&create_req(3, &[("Tea", 3.00)])).await.unwrap();

        // The removed item is no longer existing, so the merge accepts it
        let update = StaffOrderUpdate {
            remove_indices: vec![0],
            items: raw(&[("Tea", 3.00)]),
            ..Default::default()
        };
        let updated = svc.update_as_staff(&session(), order.id, &update).await.unwrap();
        assert_eq!(updated.items.len(), 1);
        assert_eq!(updated.total_price.to_string(), "3.00");
    }

    #[tokio::test]
    async fn test_staff_update_ignores_out_of_range_indices() {
        let svc = service().await;
        let order = svc.create(&create_req(3, &[("Tea", 3.00)])).await.unwrap();
        let update = StaffOrderUpdate {
            remove_indices: vec![5, 9],
            ..Default::default()
        };
        let updated = svc.update_as_staff(&session(), order.id, &update).await.unwrap();
        assert_eq!(updated.items.len(), 1);
        assert_eq!(updated.status, OrderStatus::Waiting);
    }

    #[tokio::test]
    async fn test_staff_update_removing_everything_is_empty_order() {
        let svc = service().await;
        let order = svc.create(&create_req(3, &[("Tea", 3.00)])).await.unwrap();
        let update = StaffOrderUpdate {
            remove_indices: vec![0],
            ..Default::default()
        };
        let err = svc.update_as_staff(&session(), order.id, &update).await.unwrap_err();
        assert!(matches!(err, OrderError::EmptyOrder));

        // Nothing was written
        assert_eq!(svc.get(order.id).await.unwrap().items.len(), 1);
    }

    #[tokio::test]
    async fn test_staff_can_move_status_backwards() {
        let svc = service().await;
        let mut req = create_req(3, &[("Tea", 3.00)]);
        req.status = Some("paid".into());
        let order = svc.create(&req).await.unwrap();

        let update = StaffOrderUpdate {
            status: Some("waiting".into()),
            ..Default::default()
        };
        let updated = svc.update_as_staff(&session(), order.id, &update).await.unwrap();
        assert_eq!(updated.status, OrderStatus::Waiting);

        let bad = StaffOrderUpdate {
            status: Some("served".into()),
            ..Default::default()
        };
        let err = svc.update_as_staff(&session(), order.id, &bad).await.unwrap_err();
        assert_eq!(validation_kinds(err), vec![ValidationKind::InvalidStatus]);
    }

    #[tokio::test]
    async fn test_delete() {
        let svc = service().await;
        let order = svc.create(&create_req(1, &[("Tea", 3.00)])).await.unwrap();
        svc.delete(order.id).await.unwrap();
        assert!(matches!(svc.get(order.id).await, Err(OrderError::NotFound(_))));
        assert!(matches!(svc.delete(order.id).await, Err(OrderError::NotFound(_))));

        // The table is free again
        svc.create(&create_req(1, &[("Tea", 3.00)])).await.unwrap();
    }

    #[tokio::test]
    async fn test_revenue_sums_paid_orders_only() {
        let svc = service().await;
        for (table, price, status) in [(1, 5.00, "paid"), (2, 3.00, "paid"), (3, 10.00, "waiting")] {
            let mut req = create_req(table, &[("Dish", price)]);
            req.status = Some(status.into());
            svc.create(&req).await.unwrap();
        }
        let revenue = svc.revenue().await.unwrap();
        assert_eq!(revenue.total_revenue.to_string(), "8.00");
        assert_eq!(revenue.paid_orders, 2);
    }

    #[tokio::test]
    async fn test_update_pushing_total_over_limit_is_rejected() {
        let svc = service().await;
        let order = svc
            .create(&create_req(4, &[("Banquet", 60_000_000.0)]))
            .await
            .unwrap();
        let update = OrderUpdate {
            items: raw(&[("Encore", 50_000_000.0)]),
            ..Default::default()
        };
        let err = svc.update_as_customer(order.id, &update).await.unwrap_err();
        assert_eq!(validation_kinds(err), vec![ValidationKind::TotalTooLarge]);
        assert_eq!(svc.get(order.id).await.unwrap().items.len(), 1);
    }

    #[tokio::test]
    async fn test_revenue_overflow_is_an_error() {
        let svc = service().await;
        for table in [1, 2] {
            let write = OrderWrite {
                table_number: table,
                items: vec![OrderItem::new("Ledger", Decimal::MAX)],
                total_price: Decimal::MAX,
                status: OrderStatus::Paid,
            };
            order_repo::create(&svc.pool, &write).await.unwrap();
        }
        let err = svc.revenue().await.unwrap_err();
        assert!(matches!(err, OrderError::RevenueOverflow));
    }

    #[tokio::test]
    async fn test_revenue_empty_is_zero() {
        let svc = service().await;
        let revenue = svc.revenue().await.unwrap();
        assert_eq!(revenue.total_revenue.to_string(), "0.00");
        assert_eq!(revenue.paid_orders, 0);
    }

    #[tokio::test]
    async fn test_list_search_by_number_and_status_word() {
        let svc = service().await;
        let a = svc.create(&create_req(7, &[("Tea", 3.00)])).await.unwrap();
        let mut req = create_req(8, &[("Soup", 6.00)]);
        req.status = Some("ready".into());
        let b = svc.create(&req).await.unwrap();

        let by_table = svc
            .list(&OrderQuery {
                q: Some("7".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_table.iter().map(|o| o.id).collect::<Vec<_>>(), vec![a.id]);

        let ready = svc
            .list(&OrderQuery {
                q: Some("Готов".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(ready.iter().map(|o| o.id).collect::<Vec<_>>(), vec![b.id]);

        let none = svc
            .list(&OrderQuery {
                q: Some("pizza".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(none.is_empty());

        let all = svc
            .list(&OrderQuery {
                ordering: Some("-table_number".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(all.iter().map(|o| o.id).collect::<Vec<_>>(), vec![b.id, a.id]);
    }
}
