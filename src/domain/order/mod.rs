// ============================================================================
// Order Domain - Business Logic for the Order Aggregate
// ============================================================================
//
// This module contains ALL Order-specific code:
// - Value objects (OrderLine, PaymentMethod, OrderStatus)
// - Commands (Edit, Remove, Cancel, NotFound)
// - Errors (OrderError enum)
// - Aggregate (OrderAggregate with guarded state transitions)
//
// Parsing of assistant replies into commands lives in `crate::parsing`; the
// application of commands lives in `crate::engine`.
//
// ============================================================================

pub mod aggregate;
pub mod commands;
pub mod errors;
pub mod value_objects;

// Re-export for convenience
pub use aggregate::*;
pub use commands::*;
pub use errors::*;
pub use value_objects::*;
