use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::menu::MenuItem;
use crate::domain::order::{OrderAggregate, OrderError, OrderStatus, PaymentMethod};
use crate::ports::{CatalogRepository, OrderRepository};

// ============================================================================
// In-Memory Adapters
// ============================================================================
// Reference implementations of the repository ports, backed by a tokio
// RwLock. They exercise the same guarded aggregate mutations a database
// adapter would issue as statements, which keeps the engine's behavior
// identical across backends.

pub struct InMemoryCatalog {
    items: Vec<MenuItem>,
}

impl InMemoryCatalog {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn list_items(&self) -> Result<Vec<MenuItem>, OrderError> {
        Ok(self.items.clone())
    }
}

#[derive(Default)]
pub struct InMemoryOrders {
    orders: RwLock<HashMap<Uuid, OrderAggregate>>,
}

impl InMemoryOrders {
    pub fn new() -> Self {
        Self::default()
    }

    async fn with_order<T>(
        &self,
        order_id: Uuid,
        mutate: impl FnOnce(&mut OrderAggregate) -> Result<T, OrderError>,
    ) -> Result<T, OrderError> {
        let mut orders = self.orders.write().await;
        let order = orders
            .get_mut(&order_id)
            .ok_or(OrderError::NotInitialized)?;
        mutate(order)
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrders {
    async fn find_active_for_user(
        &self,
        user_id: &str,
    ) -> Result<Option<OrderAggregate>, OrderError> {
        let orders = self.orders.read().await;
        Ok(orders
            .values()
            .find(|order| order.user_id == user_id && order.status == OrderStatus::Pending)
            .cloned())
    }

    async fn create_order(&self, user_id: &str) -> Result<OrderAggregate, OrderError> {
        let order = OrderAggregate::new(user_id);
        let mut orders = self.orders.write().await;
        orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn get_order(&self, order_id: Uuid) -> Result<OrderAggregate, OrderError> {
        let orders = self.orders.read().await;
        orders
            .get(&order_id)
            .cloned()
            .ok_or(OrderError::NotInitialized)
    }

    async fn upsert_line(
        &self,
        order_id: Uuid,
        item: &MenuItem,
        quantity: u32,
    ) -> Result<(), OrderError> {
        self.with_order(order_id, |order| order.set_line(item, quantity))
            .await
    }

    async fn delete_line(&self, order_id: Uuid, item_id: &str) -> Result<bool, OrderError> {
        self.with_order(order_id, |order| order.remove_line(item_id))
            .await
    }

    async fn clear_lines(&self, order_id: Uuid) -> Result<(), OrderError> {
        self.with_order(order_id, |order| order.clear_lines()).await
    }

    async fn set_payment_method(
        &self,
        order_id: Uuid,
        method: PaymentMethod,
    ) -> Result<(), OrderError> {
        self.with_order(order_id, |order| order.set_payment_method(method))
            .await
    }

    async fn confirm(&self, order_id: Uuid, method: PaymentMethod) -> Result<(), OrderError> {
        self.with_order(order_id, |order| {
            order.set_payment_method(method)?;
            order.confirm()
        })
        .await
    }

    async fn cancel_order(&self, order_id: Uuid) -> Result<(), OrderError> {
        self.with_order(order_id, |order| order.cancel()).await
    }

    async fn recompute_total(&self, order_id: Uuid) -> Result<Decimal, OrderError> {
        self.with_order(order_id, |order| Ok(order.recompute_total()))
            .await
    }

    async fn get_status(&self, order_id: Uuid) -> Result<OrderStatus, OrderError> {
        let orders = self.orders.read().await;
        orders
            .get(&order_id)
            .map(|order| order.status)
            .ok_or(OrderError::NotInitialized)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
