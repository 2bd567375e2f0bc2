use crate::config::toml_config::RetryConfig;
use crate::domain::model::LeadSubmission;
use crate::domain::ports::Transport;
use crate::utils::error::{GatewayError, Result};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// 第 `attempt` 次失敗後的等待時間（線性遞增）
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base_delay: config.base_delay(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub attempts: u32,
}

/// 依序嘗試傳送，失敗時等待 `base_delay * attempt` 後重試，
/// 直到成功或用完 `max_attempts` 次。
pub async fn submit_with_retry<T: Transport + ?Sized>(
    transport: &T,
    payload: &LeadSubmission,
    policy: &RetryPolicy,
) -> Result<Delivery> {
    let mut attempt = 1;

    loop {
        tracing::debug!("📤 Delivery attempt {}/{}", attempt, policy.max_attempts);

        match transport.send(payload).await {
            Ok(()) => {
                tracing::info!("✅ Lead delivered on attempt {}", attempt);
                return Ok(Delivery { attempts: attempt });
            }
            Err(e) if attempt < policy.max_attempts => {
                let delay = policy.delay_after(attempt);
                tracing::warn!(
                    "⚠️ Attempt {}/{} failed: {}. Retrying in {:?}",
                    attempt,
                    policy.max_attempts,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                tracing::error!("❌ Attempt {}/{} failed: {}", attempt, policy.max_attempts, e);
                return Err(GatewayError::RetriesExhausted {
                    attempts: attempt,
                    source: e,
                });
            }
        }
    }
}
