use async_trait::async_trait;

use crate::domain::menu::MenuItem;
use crate::domain::order::OrderError;

// ============================================================================
// Catalog Repository Port
// ============================================================================

/// Read-only access to the menu. The engine fetches the full catalog once
/// per turn; menu management itself lives outside this crate.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_items(&self) -> Result<Vec<MenuItem>, OrderError>;
}
