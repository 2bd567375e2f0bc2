use crate::config::toml_config::FormConfig;
use crate::core::validation::rule_description;
use crate::domain::model::Field;
use crate::domain::ports::Presenter;
use crate::presentation::toast::{Toast, ToastSlot};
use std::sync::Mutex;
use std::time::Instant;

/// 把欄位標示與結果通知輸出到終端機
pub struct ConsolePresenter {
    rules: FormConfig,
    toast: Mutex<ToastSlot>,
}

impl ConsolePresenter {
    pub fn new(rules: FormConfig) -> Self {
        Self {
            rules,
            toast: Mutex::new(ToastSlot::default()),
        }
    }

    pub fn visible_toast(&self) -> Option<Toast> {
        let slot = self.toast.lock().ok()?;
        let toast = slot.visible(Instant::now()).cloned();
        toast
    }
}

impl Presenter for ConsolePresenter {
    fn report_validation(&self, field: Field, ok: bool) {
        if ok {
            tracing::debug!("Field '{}' is valid", field);
            println!("  ✓ {}", field);
        } else {
            let reason = rule_description(field, &self.rules);
            tracing::debug!("Field '{}' is invalid: {}", field, reason);
            println!("  ✗ {}: {}", field, reason);
        }
    }

    fn report_outcome(&self, success: bool, message: &str) {
        if success {
            println!("✅ {}", message);
        } else {
            eprintln!("❌ {}", message);
        }

        if let Ok(mut slot) = self.toast.lock() {
            slot.show(
                Toast {
                    message: message.to_string(),
                    is_error: !success,
                },
                Instant::now(),
            );
        }
    }
}
