// ============================================================================
// Engine - Command Application and Turn Orchestration
// ============================================================================
//
// - reconciler: pure application of parsed commands to an order aggregate
// - turn: the async ChatEngine orchestrating one conversation turn end to
//   end against the ports
//
// ============================================================================

pub mod reconciler;
pub mod turn;

pub use reconciler::{apply_commands, ReconcileReport};
pub use turn::{ChatEngine, TurnOutcome};
