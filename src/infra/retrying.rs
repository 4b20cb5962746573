use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::menu::MenuItem;
use crate::ports::{AssistantClient, AssistantError, ChatTurn};
use crate::utils::{retry_on_transient, IsTransient, RetryConfig};

// ============================================================================
// Retrying Assistant Decorator
// ============================================================================
// Wraps any AssistantClient with exponential backoff on transient failures.
// Malformed replies are returned straight away; only unavailability gets
// retried.

impl IsTransient for AssistantError {
    fn is_transient(&self) -> bool {
        matches!(self, AssistantError::Unavailable(_))
    }
}

pub struct RetryingAssistant {
    inner: Arc<dyn AssistantClient>,
    config: RetryConfig,
}

impl RetryingAssistant {
    pub fn new(inner: Arc<dyn AssistantClient>, config: RetryConfig) -> Self {
        Self { inner, config }
    }

    pub fn with_defaults(inner: Arc<dyn AssistantClient>) -> Self {
        Self::new(inner, RetryConfig::default())
    }
}

#[async_trait]
impl AssistantClient for RetryingAssistant {
    async fn generate_reply(
        &self,
        turns: &[ChatTurn],
        catalog: &[MenuItem],
        order_summary: &str,
    ) -> Result<String, AssistantError> {
        retry_on_transient(&self.config, "generate_reply", || {
            self.inner.generate_reply(turns, catalog, order_summary)
        })
        .await
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    struct FlakyAssistant {
        calls: AtomicU32,
        fail_first: u32,
    }

    #[async_trait]
    impl AssistantClient for FlakyAssistant {
        async fn generate_reply(
            &self,
            _turns: &[ChatTurn],
            _catalog: &[MenuItem],
            _order_summary: &str,
        ) -> Result<String, AssistantError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.fail_first {
                Err(AssistantError::Unavailable("connection reset".to_string()))
            } else {
                Ok("Pedido atualizado:\n- Pastel (1 unidade)".to_string())
            }
        }
    }

    fn fast_config() -> RetryConfig {
        RetryConfig {
            max_attempts: 3,
            initial_delay: Duration::from_millis(5),
            max_delay: Duration::from_millis(20),
            multiplier: 2.0,
        }
    }

    #[tokio::test]
    async fn test_transient_failures_are_retried() {
        let flaky = Arc::new(FlakyAssistant {
            calls: AtomicU32::new(0),
            fail_first: 2,
        });
        let assistant = RetryingAssistant::new(flaky.clone(), fast_config());

        let reply = assistant.generate_reply(&[], &[], "").await.unwrap();
        assert!(reply.contains("Pastel"));
        assert_eq!(flaky.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_invalid_reply_is_not_retried() {
        struct Broken;

        #[async_trait]
        impl AssistantClient for Broken {
            async fn generate_reply(
                &self,
                _turns: &[ChatTurn],
                _catalog: &[MenuItem],
                _order_summary: &str,
            ) -> Result<String, AssistantError> {
                Err(AssistantError::InvalidReply("garbage".to_string()))
            }
        }

        let assistant = RetryingAssistant::new(Arc::new(Broken), fast_config());
        let result = assistant.generate_reply(&[], &[], "").await;
        assert!(matches!(result, Err(AssistantError::InvalidReply(_))));
    }
}
