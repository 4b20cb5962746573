// ============================================================================
// Ports - External Collaborator Interfaces
// ============================================================================
//
// Trait boundaries for everything the engine consumes but does not own:
// - CatalogRepository: the menu
// - OrderRepository: persisted order aggregates
// - AssistantClient: the language model behind the conversation
//
// Implementations live in `crate::infra`.
//
// ============================================================================

pub mod assistant;
pub mod catalog;
pub mod orders;

pub use assistant::{AssistantClient, AssistantError, ChatTurn, Role};
pub use catalog::CatalogRepository;
pub use orders::OrderRepository;
