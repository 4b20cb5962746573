use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::menu::MenuItem;
use crate::domain::order::{OrderAggregate, OrderError, OrderStatus, PaymentMethod};

// ============================================================================
// Order Repository Port
// ============================================================================
// Persistence surface for order aggregates. Mutations are fine grained so a
// backing store can map each one to a single statement. Every operation on
// an unknown order id returns `OrderError::NotInitialized`; callers prevent
// that by always creating or loading an order before mutating.

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// The user's current PENDING order, if one exists. Completed and
    /// cancelled orders are never returned here.
    async fn find_active_for_user(&self, user_id: &str)
        -> Result<Option<OrderAggregate>, OrderError>;

    /// Create a fresh empty order for the user.
    async fn create_order(&self, user_id: &str) -> Result<OrderAggregate, OrderError>;

    /// Fresh read of one order by id, whatever its status.
    async fn get_order(&self, order_id: Uuid) -> Result<OrderAggregate, OrderError>;

    /// Set a line to an absolute quantity at the item's catalog price.
    async fn upsert_line(
        &self,
        order_id: Uuid,
        item: &MenuItem,
        quantity: u32,
    ) -> Result<(), OrderError>;

    /// Delete a line. Returns whether the item was present.
    async fn delete_line(&self, order_id: Uuid, item_id: &str) -> Result<bool, OrderError>;

    async fn clear_lines(&self, order_id: Uuid) -> Result<(), OrderError>;

    async fn set_payment_method(
        &self,
        order_id: Uuid,
        method: PaymentMethod,
    ) -> Result<(), OrderError>;

    /// Mark the order COMPLETED with the given payment method.
    async fn confirm(&self, order_id: Uuid, method: PaymentMethod) -> Result<(), OrderError>;

    /// Mark the order CANCELLED and drop its lines.
    async fn cancel_order(&self, order_id: Uuid) -> Result<(), OrderError>;

    /// Recompute and persist the total from the stored lines, returning it.
    async fn recompute_total(&self, order_id: Uuid) -> Result<Decimal, OrderError>;

    /// The persisted status, read fresh. This is the authoritative value
    /// for any confirmation decision.
    async fn get_status(&self, order_id: Uuid) -> Result<OrderStatus, OrderError>;
}
