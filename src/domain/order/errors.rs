use serde::Serialize;

// ============================================================================
// Order Business Rule Errors
// ============================================================================
// Recoverable variants surface back into the conversation as fixed Portuguese
// strings; the engine aborts the turn only on the unrecoverable ones.

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum OrderError {
    #[error("Item not recognized in catalog")]
    ItemNotRecognized,

    #[error("Insufficient inventory for {item_name}: requested {requested}, available {available}")]
    InsufficientInventory {
        item_id: String,
        item_name: String,
        requested: u32,
        available: u32,
    },

    #[error("Request cannot be fulfilled in the current order state")]
    InvalidRequest,

    #[error("No active order for this conversation")]
    NotInitialized,

    #[error("Assistant service failure: {0}")]
    AiService(String),
}

impl OrderError {
    /// Customer-facing wording, fixed per variant.
    pub fn user_message(&self) -> String {
        match self {
            OrderError::ItemNotRecognized => {
                "Desculpe, não encontrei esse item no cardápio.".to_string()
            }
            OrderError::InsufficientInventory {
                item_name,
                available,
                ..
            } => format!(
                "Desculpe, temos apenas {} unidades de {} em estoque.",
                available, item_name
            ),
            OrderError::InvalidRequest => {
                "Desculpe, não consegui processar esse pedido.".to_string()
            }
            OrderError::NotInitialized => {
                "Você ainda não tem um pedido aberto. Que tal começar um?".to_string()
            }
            OrderError::AiService(_) => {
                "Desculpe, estamos com problemas técnicos. Tente novamente em instantes."
                    .to_string()
            }
        }
    }

    /// Recoverable errors are reported inside the turn outcome; the rest
    /// abort the turn.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            OrderError::ItemNotRecognized
                | OrderError::InsufficientInventory { .. }
                | OrderError::NotInitialized
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_error_message_names_item() {
        let err = OrderError::InsufficientInventory {
            item_id: "acai".to_string(),
            item_name: "Açaí".to_string(),
            requested: 12,
            available: 10,
        };
        let msg = err.user_message();
        assert!(msg.contains("Açaí"));
        assert!(msg.contains("10"));
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(OrderError::ItemNotRecognized.is_recoverable());
        assert!(OrderError::NotInitialized.is_recoverable());
        assert!(!OrderError::InvalidRequest.is_recoverable());
        assert!(!OrderError::AiService("timeout".to_string()).is_recoverable());
    }
}
