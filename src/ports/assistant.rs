use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::menu::MenuItem;

// ============================================================================
// Assistant Client Port
// ============================================================================
// The language model behind the conversation is a black box. The engine
// depends only on the reply contract: annotated text with bracketed markers
// and the canonical listing / edit / remove phrases.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of the conversation as the assistant sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// How a reply generation can fail. `Unavailable` is worth retrying;
/// `InvalidReply` is not (the model answered, just unusably).
#[derive(Debug, Clone, thiserror::Error)]
pub enum AssistantError {
    #[error("assistant unavailable: {0}")]
    Unavailable(String),

    #[error("assistant returned an unusable reply: {0}")]
    InvalidReply(String),
}

#[async_trait]
pub trait AssistantClient: Send + Sync {
    /// Produce the annotated reply for the conversation so far.
    ///
    /// `order_summary` is the canonical listing of the current order, empty
    /// when the order has no lines yet.
    async fn generate_reply(
        &self,
        turns: &[ChatTurn],
        catalog: &[MenuItem],
        order_summary: &str,
    ) -> Result<String, AssistantError>;
}
