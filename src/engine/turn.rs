use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use super::reconciler::apply_commands;
use crate::domain::menu::MenuItem;
use crate::domain::order::{
    OrderAggregate, OrderCommand, OrderError, OrderStatus, PaymentMethod,
};
use crate::parsing::{detect_payment, parse_reply, starts_new_order, wants_confirmation};
use crate::ports::{AssistantClient, CatalogRepository, ChatTurn, OrderRepository, Role};

// ============================================================================
// Chat Turn Engine
// ============================================================================
// Orchestrates one full conversation turn: load the active order, get the
// assistant's annotated reply, parse it into commands, reconcile them into
// the aggregate, mirror the result to the repository and decide on payment
// and confirmation. Per-user serialization of turns is the caller's job.

/// What the calling layer gets back for one handled turn.
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    /// The assistant's reply text, to be shown to the customer.
    pub reply: String,
    /// Commands that actually mutated the order this turn.
    pub commands_applied: Vec<OrderCommand>,
    /// The order as persisted after the turn, read back fresh.
    pub order: OrderAggregate,
    pub confirmed: bool,
    /// The chosen payment method, if one is set.
    pub payment_method: Option<PaymentMethod>,
    /// Recoverable failures surfaced to the customer alongside the reply.
    pub errors: Vec<OrderError>,
}

pub struct ChatEngine {
    catalog: Arc<dyn CatalogRepository>,
    orders: Arc<dyn OrderRepository>,
    assistant: Arc<dyn AssistantClient>,
}

impl ChatEngine {
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        orders: Arc<dyn OrderRepository>,
        assistant: Arc<dyn AssistantClient>,
    ) -> Self {
        Self {
            catalog,
            orders,
            assistant,
        }
    }

    /// Handle one chat turn for a user.
    ///
    /// `turns` is the conversation so far, newest last; the newest user
    /// message is the one whose intent signals (payment, confirmation) are
    /// honored. Recoverable item-level failures land in the outcome;
    /// assistant unavailability and invalid operations abort the turn.
    pub async fn handle_turn(
        &self,
        user_id: &str,
        turns: &[ChatTurn],
    ) -> Result<TurnOutcome, OrderError> {
        let user_text = turns
            .iter()
            .rev()
            .find(|turn| turn.role == Role::User)
            .map(|turn| turn.content.as_str())
            .ok_or(OrderError::InvalidRequest)?;

        debug!(user_id = %user_id, turns = turns.len(), "handling chat turn");

        // Intent signals come from the customer's own words only. The
        // assistant echoes payment options back when prompting, so its
        // replies would trigger false positives.
        let fresh_payment = detect_payment(user_text);
        let confirm_requested = wants_confirmation(user_text);

        let catalog = self.catalog.list_items().await?;
        let mut order = self.ensure_active_order(user_id, user_text).await?;

        let reply = self
            .assistant
            .generate_reply(turns, &catalog, &order.summary_text())
            .await
            .map_err(|err| OrderError::AiService(err.to_string()))?;

        let commands = parse_reply(&reply, &catalog);
        debug!(
            order_id = %order.id,
            commands = commands.len(),
            "parsed commands from reply"
        );

        let report = apply_commands(&mut order, &catalog, &commands);
        self.persist_applied(order.id, &catalog, &report.applied)
            .await?;

        if report.cancelled {
            info!(order_id = %order.id, user_id = %user_id, "order cancelled");
        }
        if report.errors.iter().any(|err| !err.is_recoverable()) {
            return Err(OrderError::InvalidRequest);
        }

        // A halted batch (not-found, cancel) ends the turn's processing:
        // the payment and confirmation steps run only on a batch that was
        // processed to the end. Otherwise a reply flagging an unrecognized
        // item could still auto-confirm off a payment keyword in the same
        // message.
        if !report.halted {
            if let Some(method) = fresh_payment {
                if order.status == OrderStatus::Pending {
                    self.orders.set_payment_method(order.id, method).await?;
                    order.set_payment_method(method)?;
                    info!(order_id = %order.id, method = %method, "payment method set");
                }
            }

            self.maybe_confirm(&order, confirm_requested || fresh_payment.is_some())
                .await?;
        }

        // The persisted aggregate is authoritative for everything the
        // caller sees, so read it back fresh after all mutations.
        let final_order = self.orders.get_order(order.id).await?;
        let confirmed = final_order.is_confirmed();
        let payment_method = final_order
            .payment_method
            .is_valid()
            .then_some(final_order.payment_method);

        Ok(TurnOutcome {
            reply,
            commands_applied: report.applied,
            order: final_order,
            confirmed,
            payment_method,
            errors: report.errors,
        })
    }

    /// Find the user's pending order or open a fresh one. A completed or
    /// cancelled order is never reopened; new items go into a new aggregate.
    async fn ensure_active_order(
        &self,
        user_id: &str,
        user_text: &str,
    ) -> Result<OrderAggregate, OrderError> {
        if let Some(order) = self.orders.find_active_for_user(user_id).await? {
            return Ok(order);
        }

        let order = self.orders.create_order(user_id).await?;
        info!(
            user_id = %user_id,
            order_id = %order.id,
            explicit_request = starts_new_order(user_text),
            "🛒 started new order"
        );
        Ok(order)
    }

    /// Mirror the applied commands to the repository, then recompute the
    /// persisted total from scratch.
    async fn persist_applied(
        &self,
        order_id: Uuid,
        catalog: &[MenuItem],
        applied: &[OrderCommand],
    ) -> Result<(), OrderError> {
        for command in applied {
            match command {
                OrderCommand::Edit { items } => {
                    for entry in items {
                        if entry.quantity == 0 {
                            self.orders.delete_line(order_id, &entry.item_id).await?;
                        } else if let Some(item) =
                            catalog.iter().find(|item| item.id == entry.item_id)
                        {
                            self.orders
                                .upsert_line(order_id, item, entry.quantity)
                                .await?;
                        }
                    }
                }
                OrderCommand::Remove { item_ids } => {
                    for item_id in item_ids {
                        self.orders.delete_line(order_id, item_id).await?;
                    }
                }
                OrderCommand::Cancel => {
                    self.orders.cancel_order(order_id).await?;
                }
                OrderCommand::NotFound => {}
            }
        }

        if !applied.is_empty() {
            let total = self.orders.recompute_total(order_id).await?;
            debug!(order_id = %order_id, total = %total, "persisted total recomputed");
        }

        Ok(())
    }

    /// Confirm the order when every condition holds: it has lines, a valid
    /// payment method, and the customer either asked for it or just picked
    /// the payment method this turn.
    ///
    /// The persisted status is re-read immediately before confirming; a
    /// concurrent turn that already closed the order wins.
    async fn maybe_confirm(
        &self,
        order: &OrderAggregate,
        confirm_intent: bool,
    ) -> Result<(), OrderError> {
        let eligible = confirm_intent
            && order.status == OrderStatus::Pending
            && !order.is_empty()
            && order.payment_method.is_valid();

        if !eligible {
            if confirm_intent && !order.payment_method.is_valid() && !order.is_empty() {
                debug!(
                    order_id = %order.id,
                    "confirmation requested without payment method, staying pending"
                );
            }
            return Ok(());
        }

        let persisted = self.orders.get_status(order.id).await?;
        if persisted != OrderStatus::Pending {
            debug!(
                order_id = %order.id,
                status = ?persisted,
                "order already closed, skipping confirmation"
            );
            return Ok(());
        }

        self.orders.confirm(order.id, order.payment_method).await?;
        info!(
            order_id = %order.id,
            method = %order.payment_method,
            total = %order.total,
            "✅ order confirmed"
        );
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
