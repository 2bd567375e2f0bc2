use crate::domain::model::SubmissionState;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// 防止重複送出的狀態旗標
#[derive(Debug, Clone)]
pub struct SubmissionGuard {
    state: Arc<AtomicU8>,
}

/// 持有期間狀態為 InFlight。
///
/// 正常流程以 `settle` 結束；若在結束前被丟棄（例如呼叫端取消了 future），
/// 狀態會直接回到 Idle。
#[derive(Debug)]
pub struct InFlightToken {
    guard: SubmissionGuard,
    settled: bool,
}

impl SubmissionGuard {
    pub fn new() -> Self {
        Self {
            state: Arc::new(AtomicU8::new(SubmissionState::Idle.as_u8())),
        }
    }

    pub fn state(&self) -> SubmissionState {
        SubmissionState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Idle -> InFlight；其他狀態回傳 `None` 且不改變狀態
    pub fn try_begin(&self) -> Option<InFlightToken> {
        self.transition(SubmissionState::Idle, SubmissionState::InFlight)
            .then(|| InFlightToken {
                guard: self.clone(),
                settled: false,
            })
    }

    fn transition(&self, from: SubmissionState, to: SubmissionState) -> bool {
        self.state
            .compare_exchange(from.as_u8(), to.as_u8(), Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

impl InFlightToken {
    /// InFlight -> Settled，並在 `delay` 之後回到 Idle
    ///
    /// `delay` 為零時立即回到 Idle。計時器只會把 Settled 改回 Idle。
    pub fn settle(mut self, delay: Duration) {
        self.settled = true;
        let guard = self.guard.clone();
        guard.transition(SubmissionState::InFlight, SubmissionState::Settled);

        if delay.is_zero() {
            guard.transition(SubmissionState::Settled, SubmissionState::Idle);
            return;
        }

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            guard.transition(SubmissionState::Settled, SubmissionState::Idle);
            tracing::debug!("Submit control re-enabled after {:?}", delay);
        });
    }
}

impl Drop for InFlightToken {
    fn drop(&mut self) {
        if !self.settled
            && self
                .guard
                .transition(SubmissionState::InFlight, SubmissionState::Idle)
        {
            tracing::debug!("Submission ended without an outcome, guard released");
        }
    }
}

impl Default for SubmissionGuard {
    fn default() -> Self {
        Self::new()
    }
}
