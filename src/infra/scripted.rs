use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::menu::MenuItem;
use crate::ports::{AssistantClient, AssistantError, ChatTurn};

// ============================================================================
// Scripted Assistant
// ============================================================================
// Replays a fixed queue of annotated replies. Used by the demo binary and
// by engine tests, where the interesting behavior is everything that
// happens AFTER the reply text exists.

pub struct ScriptedAssistant {
    replies: Mutex<VecDeque<String>>,
}

impl ScriptedAssistant {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
        }
    }
}

#[async_trait]
impl AssistantClient for ScriptedAssistant {
    async fn generate_reply(
        &self,
        _turns: &[ChatTurn],
        _catalog: &[MenuItem],
        _order_summary: &str,
    ) -> Result<String, AssistantError> {
        self.replies
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| AssistantError::InvalidReply("reply script exhausted".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replies_in_order_then_error() {
        let assistant = ScriptedAssistant::new(["primeira", "segunda"]);

        let first = assistant.generate_reply(&[], &[], "").await.unwrap();
        let second = assistant.generate_reply(&[], &[], "").await.unwrap();
        assert_eq!(first, "primeira");
        assert_eq!(second, "segunda");

        let exhausted = assistant.generate_reply(&[], &[], "").await;
        assert!(matches!(exhausted, Err(AssistantError::InvalidReply(_))));
    }
}
