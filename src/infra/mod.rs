// ============================================================================
// Infrastructure Adapters
// ============================================================================
//
// Concrete implementations of the ports:
// - memory: in-memory catalog and order repositories over a tokio RwLock
// - scripted: assistant that replays a fixed list of annotated replies
// - retrying: backoff decorator for any AssistantClient
//
// ============================================================================

pub mod memory;
pub mod retrying;
pub mod scripted;

pub use memory::{InMemoryCatalog, InMemoryOrders};
pub use retrying::RetryingAssistant;
pub use scripted::ScriptedAssistant;
