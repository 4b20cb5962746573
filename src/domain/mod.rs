// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// This module contains the domain types the rest of the crate operates on:
// - Menu catalog entries (MenuItem)
// - The order aggregate with its value objects, commands and errors
//
// This layer knows nothing about parsing, storage or the assistant.
//
// ============================================================================

pub mod menu;
pub mod order;
