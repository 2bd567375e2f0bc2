use crate::domain::model::{Field, LeadSubmission};
use crate::utils::error::TransportError;
use async_trait::async_trait;

/// 單次傳送嘗試；重試策略由呼叫端負責
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, payload: &LeadSubmission) -> Result<(), TransportError>;
}

/// 呈現層：欄位標示與結果通知
pub trait Presenter: Send + Sync {
    fn report_validation(&self, field: Field, ok: bool);
    fn report_outcome(&self, success: bool, message: &str);
}
