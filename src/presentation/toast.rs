use std::time::{Duration, Instant};

pub const TOAST_DURATION: Duration = Duration::from_millis(4500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub is_error: bool,
}

/// 同一時間只顯示一則通知；新的通知會取代舊的並重新計時
#[derive(Debug, Default)]
pub struct ToastSlot {
    current: Option<(Toast, Instant)>,
}

impl ToastSlot {
    pub fn show(&mut self, toast: Toast, now: Instant) {
        self.current = Some((toast, now));
    }

    pub fn visible(&self, now: Instant) -> Option<&Toast> {
        match &self.current {
            Some((toast, shown_at)) if now.saturating_duration_since(*shown_at) < TOAST_DURATION => {
                Some(toast)
            }
            _ => None,
        }
    }
}
