use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::OrderError;
use super::value_objects::{OrderLine, OrderStatus, PaymentMethod};
use crate::domain::menu::MenuItem;

// ============================================================================
// Order Aggregate - Domain Logic
// ============================================================================
// The in-flight order for one conversation. All mutations are guarded: only
// a Pending order accepts changes, and every write path recomputes the total
// from the lines so the stored figure can never drift.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderAggregate {
    // Identity
    pub id: Uuid,
    pub user_id: String,

    // Current state
    // BTreeMap keyed by item id keeps listings in a stable order.
    pub lines: BTreeMap<String, OrderLine>,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub total: Decimal,

    // Audit trail
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderAggregate {
    pub fn new(user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            lines: BTreeMap::new(),
            payment_method: PaymentMethod::Indefinido,
            status: OrderStatus::Pending,
            total: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == OrderStatus::Completed
    }

    fn ensure_pending(&self) -> Result<(), OrderError> {
        match self.status {
            OrderStatus::Pending => Ok(()),
            _ => Err(OrderError::InvalidRequest),
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Set an item to an absolute quantity. Quantity zero deletes the line;
    /// a new item is inserted at the catalog price.
    pub fn set_line(&mut self, item: &MenuItem, quantity: u32) -> Result<(), OrderError> {
        self.ensure_pending()?;

        if quantity == 0 {
            self.lines.remove(&item.id);
        } else {
            self.lines.insert(
                item.id.clone(),
                OrderLine {
                    item_id: item.id.clone(),
                    name: item.name.clone(),
                    unit_price: item.unit_price,
                    quantity,
                },
            );
        }

        self.recompute_total();
        self.touch();
        Ok(())
    }

    /// Delete a line outright. Returns whether the item was present.
    pub fn remove_line(&mut self, item_id: &str) -> Result<bool, OrderError> {
        self.ensure_pending()?;

        let removed = self.lines.remove(item_id).is_some();
        self.recompute_total();
        self.touch();
        Ok(removed)
    }

    pub fn clear_lines(&mut self) -> Result<(), OrderError> {
        self.ensure_pending()?;

        self.lines.clear();
        self.recompute_total();
        self.touch();
        Ok(())
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) -> Result<(), OrderError> {
        self.ensure_pending()?;

        self.payment_method = method;
        self.touch();
        Ok(())
    }

    /// Cancel the order, dropping all its lines. Cancelling an order that
    /// has nothing in it is rejected rather than silently succeeding, so
    /// the caller can tell the customer.
    pub fn cancel(&mut self) -> Result<(), OrderError> {
        self.ensure_pending()?;

        if self.lines.is_empty() {
            return Err(OrderError::InvalidRequest);
        }

        self.lines.clear();
        self.recompute_total();
        self.status = OrderStatus::Cancelled;
        self.touch();
        Ok(())
    }

    /// Completing requires items in the order and a chosen payment method.
    pub fn confirm(&mut self) -> Result<(), OrderError> {
        self.ensure_pending()?;

        if self.lines.is_empty() || !self.payment_method.is_valid() {
            return Err(OrderError::InvalidRequest);
        }

        self.status = OrderStatus::Completed;
        self.touch();
        Ok(())
    }

    /// Recompute the order total from the lines, from scratch.
    pub fn recompute_total(&mut self) -> Decimal {
        self.total = self
            .lines
            .values()
            .fold(Decimal::ZERO, |acc, line| acc + line.line_total());
        self.total
    }

    /// Canonical listing of the order, one `- Name (N unidades)` line per
    /// item. This is the same shape the assistant is told to produce.
    pub fn summary_text(&self) -> String {
        self.lines
            .values()
            .map(|line| {
                let unit = if line.quantity == 1 {
                    "unidade"
                } else {
                    "unidades"
                };
                format!("- {} ({} {})", line.name, line.quantity, unit)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pastel() -> MenuItem {
        MenuItem::new("pastel", "Pastel", Decimal::new(850, 2), 40)
    }

    fn suco() -> MenuItem {
        MenuItem::new("suco-de-laranja", "Suco de Laranja", Decimal::new(900, 2), 30)
    }

    #[test]
    fn test_set_line_is_absolute() {
        let mut order = OrderAggregate::new("user-1");
        order.set_line(&pastel(), 2).unwrap();
        order.set_line(&pastel(), 5).unwrap();

        assert_eq!(order.lines["pastel"].quantity, 5);
        assert_eq!(order.total, Decimal::new(4250, 2));
    }

    #[test]
    fn test_zero_quantity_deletes_line() {
        let mut order = OrderAggregate::new("user-1");
        order.set_line(&pastel(), 3).unwrap();
        order.set_line(&pastel(), 0).unwrap();

        assert!(order.is_empty());
        assert_eq!(order.total, Decimal::ZERO);
    }

    #[test]
    fn test_total_sums_all_lines() {
        let mut order = OrderAggregate::new("user-1");
        order.set_line(&pastel(), 2).unwrap();
        order.set_line(&suco(), 1).unwrap();

        // 2 * 8.50 + 1 * 9.00
        assert_eq!(order.total, Decimal::new(2600, 2));
    }

    #[test]
    fn test_confirm_requires_items_and_payment() {
        let mut order = OrderAggregate::new("user-1");
        assert_eq!(order.confirm(), Err(OrderError::InvalidRequest));

        order.set_line(&pastel(), 1).unwrap();
        assert_eq!(order.confirm(), Err(OrderError::InvalidRequest));

        order.set_payment_method(PaymentMethod::Pix).unwrap();
        assert!(order.confirm().is_ok());
        assert_eq!(order.status, OrderStatus::Completed);
    }

    #[test]
    fn test_cancel_empty_order_rejected() {
        let mut order = OrderAggregate::new("user-1");
        assert_eq!(order.cancel(), Err(OrderError::InvalidRequest));
    }

    #[test]
    fn test_cancel_drops_lines() {
        let mut order = OrderAggregate::new("user-1");
        order.set_line(&pastel(), 1).unwrap();
        order.cancel().unwrap();

        assert_eq!(order.status, OrderStatus::Cancelled);
        assert!(order.lines.is_empty());
        assert_eq!(order.total, Decimal::ZERO);
    }

    #[test]
    fn test_no_mutations_after_cancel() {
        let mut order = OrderAggregate::new("user-1");
        order.set_line(&pastel(), 1).unwrap();
        order.cancel().unwrap();

        assert_eq!(order.set_line(&suco(), 2), Err(OrderError::InvalidRequest));
        assert_eq!(order.clear_lines(), Err(OrderError::InvalidRequest));
    }

    #[test]
    fn test_summary_text_format() {
        let mut order = OrderAggregate::new("user-1");
        order.set_line(&pastel(), 2).unwrap();
        order.set_line(&suco(), 1).unwrap();

        let summary = order.summary_text();
        assert!(summary.contains("- Pastel (2 unidades)"));
        assert!(summary.contains("- Suco de Laranja (1 unidade)"));
    }

    #[test]
    fn test_remove_line_reports_presence() {
        let mut order = OrderAggregate::new("user-1");
        order.set_line(&pastel(), 2).unwrap();

        assert!(order.remove_line("pastel").unwrap());
        assert!(!order.remove_line("pastel").unwrap());
    }
}
