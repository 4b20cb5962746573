// ============================================================================
// PedidoBot - Conversational Order Intent Engine
// ============================================================================
//
// Turns free-form Portuguese chat turns, plus the annotated reply of a
// prompt-constrained language model, into deterministic order mutations:
//
//   chat turns -> assistant reply -> Command Parser -> Order Reconciler
//             -> order aggregate -> confirmation decision -> TurnOutcome
//
// Layers:
// - domain:  menu items and the order aggregate with its state machine
// - parsing: catalog matching, quantity extraction, marker tokenization,
//            reply parsing, user intent signals
// - engine:  the reconciler and the per-turn orchestrator
// - ports:   traits for catalog, order storage and the assistant
// - infra:   in-memory adapters, scripted assistant, retry decorator
//
// ============================================================================

pub mod domain;
pub mod engine;
pub mod infra;
pub mod parsing;
pub mod ports;
pub mod utils;

pub use domain::menu::MenuItem;
pub use domain::order::{
    ItemQuantity, OrderAggregate, OrderCommand, OrderError, OrderLine, OrderStatus, PaymentMethod,
};
pub use engine::{ChatEngine, TurnOutcome};
pub use ports::{AssistantClient, CatalogRepository, ChatTurn, OrderRepository, Role};
