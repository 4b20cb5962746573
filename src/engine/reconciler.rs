use tracing::{debug, warn};

use crate::domain::menu::MenuItem;
use crate::domain::order::{ItemQuantity, OrderAggregate, OrderCommand, OrderError};

// ============================================================================
// Order Reconciler - Apply Parsed Commands to the Aggregate
// ============================================================================
// Pure and synchronous: commands go in, the aggregate mutates, a report
// comes out. Persistence mirroring happens in the turn engine so this logic
// stays testable without any async machinery.

/// What happened while applying one batch of commands.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReconcileReport {
    /// Commands that actually mutated the aggregate, in application order.
    /// Edit commands are narrowed to the items that passed validation.
    pub applied: Vec<OrderCommand>,
    /// Per-item and per-command failures. These never corrupt the rest of
    /// the batch.
    pub errors: Vec<OrderError>,
    /// The batch cancelled the order.
    pub cancelled: bool,
    /// Processing stopped before the end of the batch (cancel, not-found,
    /// or cancel-on-empty rejection).
    pub halted: bool,
}

/// Apply `commands` in order against `order`, validating each edit item
/// against the catalog and its declared stock.
///
/// Items are validated independently: one rejected item never blocks the
/// others in the same batch. The aggregate recomputes its total on every
/// mutation, so the report never carries a stale figure.
pub fn apply_commands(
    order: &mut OrderAggregate,
    catalog: &[MenuItem],
    commands: &[OrderCommand],
) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    for command in commands {
        match command {
            OrderCommand::Edit { items } => {
                let applied = apply_edit(order, catalog, items, &mut report.errors);
                if !applied.is_empty() {
                    report.applied.push(OrderCommand::Edit { items: applied });
                }
            }

            OrderCommand::Remove { item_ids } => {
                let mut removed = Vec::new();
                for item_id in item_ids {
                    // Absent ids are a no-op, not an error.
                    match order.remove_line(item_id) {
                        Ok(true) => removed.push(item_id.clone()),
                        Ok(false) => {
                            debug!(item_id = %item_id, "remove for item not in order, skipping")
                        }
                        Err(err) => report.errors.push(err),
                    }
                }
                if !removed.is_empty() {
                    report.applied.push(OrderCommand::Remove { item_ids: removed });
                }
            }

            OrderCommand::Cancel => {
                match order.cancel() {
                    Ok(()) => {
                        report.applied.push(OrderCommand::Cancel);
                        report.cancelled = true;
                    }
                    Err(err) => {
                        warn!(order_id = %order.id, "cancel rejected: {}", err);
                        report.errors.push(err);
                    }
                }
                // Terminal either way; nothing after a cancel is applied.
                report.halted = true;
                break;
            }

            OrderCommand::NotFound => {
                report.errors.push(OrderError::ItemNotRecognized);
                report.halted = true;
                break;
            }
        }
    }

    report
}

/// Validate and apply one edit batch. Returns the entries that were
/// actually written, zero-quantity deletions included.
fn apply_edit(
    order: &mut OrderAggregate,
    catalog: &[MenuItem],
    items: &[ItemQuantity],
    errors: &mut Vec<OrderError>,
) -> Vec<ItemQuantity> {
    let mut applied = Vec::new();

    for entry in items {
        let Some(item) = catalog.iter().find(|item| item.id == entry.item_id) else {
            warn!(item_id = %entry.item_id, "edit references unknown catalog item");
            errors.push(OrderError::ItemNotRecognized);
            continue;
        };

        // Quantity zero is a deletion and needs no stock.
        if entry.quantity > item.stock {
            warn!(
                item_id = %item.id,
                requested = entry.quantity,
                available = item.stock,
                "edit exceeds available stock"
            );
            errors.push(OrderError::InsufficientInventory {
                item_id: item.id.clone(),
                item_name: item.name.clone(),
                requested: entry.quantity,
                available: item.stock,
            });
            continue;
        }

        match order.set_line(item, entry.quantity) {
            Ok(()) => applied.push(entry.clone()),
            Err(err) => errors.push(err),
        }
    }

    applied
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn catalog() -> Vec<MenuItem> {
        vec![
            MenuItem::new("pastel", "Pastel", Decimal::new(850, 2), 40),
            MenuItem::new("x-burger", "X-Burger", Decimal::new(1800, 2), 25),
            MenuItem::new("suco", "Suco", Decimal::new(900, 2), 30),
            MenuItem::new("acai", "Açaí", Decimal::new(2200, 2), 10),
        ]
    }

    fn edit(item_id: &str, quantity: u32) -> OrderCommand {
        OrderCommand::Edit {
            items: vec![ItemQuantity {
                item_id: item_id.to_string(),
                quantity,
            }],
        }
    }

    #[test]
    fn test_edit_creates_line_at_catalog_price() {
        let mut order = OrderAggregate::new("user-1");
        let report = apply_commands(&mut order, &catalog(), &[edit("pastel", 2)]);

        assert!(report.errors.is_empty());
        assert_eq!(order.lines["pastel"].quantity, 2);
        assert_eq!(order.lines["pastel"].unit_price, Decimal::new(850, 2));
        assert_eq!(order.total, Decimal::new(1700, 2));
    }

    #[test]
    fn test_absolute_edit_is_idempotent() {
        let mut order = OrderAggregate::new("user-1");
        let catalog = catalog();

        apply_commands(&mut order, &catalog, &[edit("pastel", 3)]);
        apply_commands(&mut order, &catalog, &[edit("pastel", 3)]);

        assert_eq!(order.lines["pastel"].quantity, 3);
        assert_eq!(order.total, Decimal::new(2550, 2));
    }

    #[test]
    fn test_edit_to_zero_deletes_line() {
        let mut order = OrderAggregate::new("user-1");
        let catalog = catalog();

        apply_commands(&mut order, &catalog, &[edit("pastel", 2)]);
        let report = apply_commands(&mut order, &catalog, &[edit("pastel", 0)]);

        assert!(report.errors.is_empty());
        assert!(order.is_empty());
        assert_eq!(order.total, Decimal::ZERO);
    }

    #[test]
    fn test_remove_absent_item_is_noop() {
        let mut order = OrderAggregate::new("user-1");
        let report = apply_commands(
            &mut order,
            &catalog(),
            &[OrderCommand::Remove {
                item_ids: vec!["suco".to_string()],
            }],
        );

        assert!(report.errors.is_empty());
        assert!(report.applied.is_empty());
    }

    #[test]
    fn test_cancel_on_empty_is_invalid_request() {
        let mut order = OrderAggregate::new("user-1");
        let report = apply_commands(&mut order, &catalog(), &[OrderCommand::Cancel]);

        assert_eq!(report.errors, vec![OrderError::InvalidRequest]);
        assert!(!report.cancelled);
        assert!(report.halted);
    }

    #[test]
    fn test_cancel_halts_rest_of_batch() {
        let mut order = OrderAggregate::new("user-1");
        let catalog = catalog();
        apply_commands(&mut order, &catalog, &[edit("pastel", 1)]);

        let report = apply_commands(
            &mut order,
            &catalog,
            &[OrderCommand::Cancel, edit("suco", 2)],
        );

        assert!(report.cancelled);
        assert!(report.halted);
        // The edit after the cancel was never applied.
        assert!(order.lines.is_empty());
        assert_eq!(report.applied, vec![OrderCommand::Cancel]);
    }

    #[test]
    fn test_not_found_halts_and_reports() {
        let mut order = OrderAggregate::new("user-1");
        let report = apply_commands(
            &mut order,
            &catalog(),
            &[OrderCommand::NotFound, edit("pastel", 1)],
        );

        assert_eq!(report.errors, vec![OrderError::ItemNotRecognized]);
        assert!(report.halted);
        assert!(order.is_empty());
    }

    #[test]
    fn test_inventory_violation_rejects_only_that_item() {
        let mut order = OrderAggregate::new("user-1");
        let command = OrderCommand::Edit {
            items: vec![
                ItemQuantity {
                    item_id: "acai".to_string(),
                    quantity: 12,
                },
                ItemQuantity {
                    item_id: "pastel".to_string(),
                    quantity: 2,
                },
            ],
        };
        let report = apply_commands(&mut order, &catalog(), &[command]);

        assert_eq!(
            report.errors,
            vec![OrderError::InsufficientInventory {
                item_id: "acai".to_string(),
                item_name: "Açaí".to_string(),
                requested: 12,
                available: 10,
            }]
        );
        // The in-stock item in the same batch still landed.
        assert_eq!(order.lines["pastel"].quantity, 2);
        assert!(!order.lines.contains_key("acai"));
        assert_eq!(
            report.applied,
            vec![OrderCommand::Edit {
                items: vec![ItemQuantity {
                    item_id: "pastel".to_string(),
                    quantity: 2,
                }]
            }]
        );
    }

    #[test]
    fn test_unknown_item_reports_not_recognized() {
        let mut order = OrderAggregate::new("user-1");
        let report = apply_commands(&mut order, &catalog(), &[edit("pizza", 1)]);

        assert_eq!(report.errors, vec![OrderError::ItemNotRecognized]);
        assert!(order.is_empty());
    }

    #[test]
    fn test_total_recomputed_across_mixed_batch() {
        let mut order = OrderAggregate::new("user-1");
        let catalog = catalog();
        apply_commands(&mut order, &catalog, &[edit("pastel", 2), edit("suco", 3)]);

        let batch = vec![
            edit("suco", 1),
            OrderCommand::Remove {
                item_ids: vec!["pastel".to_string()],
            },
        ];
        apply_commands(&mut order, &catalog, &batch);

        // Only one line left: 1 * 9.00.
        assert_eq!(order.total, Decimal::new(900, 2));
    }
}
