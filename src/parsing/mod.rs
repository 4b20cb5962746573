// ============================================================================
// Parsing Layer - Text to Structured Intent
// ============================================================================
//
// Everything that turns natural-language text into typed values lives here:
// - catalog: fuzzy item-name resolution against the menu
// - quantity: the prioritized pattern cascade for integer quantities
// - markers: tokenizer for bracketed control tokens in assistant replies
// - command_parser: annotated reply -> OrderCommand list
// - intent: payment / confirmation / new-order signals in the user's text
//
// This layer is pure and synchronous. It never touches storage or the
// assistant client.
//
// ============================================================================

pub mod catalog;
pub mod command_parser;
pub mod intent;
pub mod markers;
pub mod quantity;

pub use catalog::match_item;
pub use command_parser::parse_reply;
pub use intent::{detect_payment, starts_new_order, wants_confirmation};
pub use markers::{has_markers, tokenize, Marker, Token};
pub use quantity::find_quantity;
