use crate::config::toml_config::GatewayConfig;
use crate::core::guard::SubmissionGuard;
use crate::core::retry::{submit_with_retry, RetryPolicy};
use crate::core::validation;
use crate::domain::model::{
    Field, LeadFields, LeadSubmission, SubmissionState, SubmitOutcome, ValidationReport,
};
use crate::domain::ports::{Presenter, Transport};
use crate::utils::error::{GatewayError, Result};
use chrono_tz::Tz;
use std::time::Duration;

pub const SUCCESS_MESSAGE: &str = "Muvaffaqiyatli yuborildi! Tez orada bog'lanamiz.";
pub const FAILURE_MESSAGE: &str = "Internet aloqasi yo'q. Iltimos, qayta urinib ko'ring.";

/// 表單送出流程：驗證、建立 payload、重試傳送、回報結果
pub struct FormGateway<T: Transport, P: Presenter> {
    transport: T,
    presenter: P,
    config: GatewayConfig,
    policy: RetryPolicy,
    tz: Tz,
    guard: SubmissionGuard,
}

impl<T: Transport, P: Presenter> FormGateway<T, P> {
    pub fn new(transport: T, presenter: P, config: GatewayConfig) -> Result<Self> {
        let tz = config.submission.tz()?;
        let policy = RetryPolicy::from(&config.retry);

        Ok(Self {
            transport,
            presenter,
            config,
            policy,
            tz,
            guard: SubmissionGuard::new(),
        })
    }

    pub fn state(&self) -> SubmissionState {
        self.guard.state()
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// 驗證欄位並把每個欄位的結果交給呈現層
    pub fn validate(&self, fields: &LeadFields) -> bool {
        self.check(fields).is_valid()
    }

    fn check(&self, fields: &LeadFields) -> ValidationReport {
        let report = validation::validate(fields, &self.config.form);
        for field in Field::ALL {
            self.presenter.report_validation(field, report.get(field));
        }
        report
    }

    pub async fn submit(&self, fields: &LeadFields) -> SubmitOutcome {
        // 先取得 token，輸掉的呼叫不會驗證也不會回報欄位
        let Some(token) = self.guard.try_begin() else {
            tracing::debug!("Submit ignored while state is {:?}", self.guard.state());
            return SubmitOutcome::Ignored;
        };

        let report = self.check(fields);
        if !report.is_valid() {
            tracing::info!("📝 Submission blocked, invalid fields: {:?}", report.invalid_fields());
            return SubmitOutcome::Rejected(report);
        }

        let result = match self.build_payload(fields) {
            Ok(payload) => {
                tracing::info!("🚀 Submitting lead to {}", self.config.endpoint.url);
                submit_with_retry(&self.transport, &payload, &self.policy).await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(delivery) => {
                token.settle(self.config.submission.settle_delay());
                self.presenter.report_outcome(true, SUCCESS_MESSAGE);
                SubmitOutcome::Delivered {
                    attempts: delivery.attempts,
                }
            }
            Err(e) => {
                tracing::error!("❌ Submission error: {}", e);
                token.settle(Duration::ZERO);
                self.presenter.report_outcome(false, FAILURE_MESSAGE);
                let attempts = match &e {
                    GatewayError::RetriesExhausted { attempts, .. } => *attempts,
                    _ => 0,
                };
                SubmitOutcome::Failed {
                    attempts,
                    reason: e.to_string(),
                }
            }
        }
    }

    fn build_payload(&self, fields: &LeadFields) -> Result<LeadSubmission> {
        LeadSubmission::build(
            fields,
            &self.config.form,
            self.tz,
            &self.config.submission.timestamp_format,
            chrono::Utc::now(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::TransportError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;

    #[derive(Default)]
    struct RecordingPresenter {
        validations: Mutex<Vec<(Field, bool)>>,
        outcomes: Mutex<Vec<(bool, String)>>,
    }

    impl Presenter for RecordingPresenter {
        fn report_validation(&self, field: Field, ok: bool) {
            self.validations.lock().unwrap().push((field, ok));
        }

        fn report_outcome(&self, success: bool, message: &str) {
            self.outcomes.lock().unwrap().push((success, message.to_string()));
        }
    }

    struct CountingTransport {
        calls: AtomicU32,
        fail: bool,
    }

    impl CountingTransport {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicU32::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl Transport for CountingTransport {
        async fn send(&self, _payload: &LeadSubmission) -> std::result::Result<(), TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(TransportError::Unreachable {
                    message: "offline".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    /// 送出開始時通知 `started`，等到 `release` 才回傳
    struct GatedTransport {
        calls: AtomicU32,
        started: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl Transport for GatedTransport {
        async fn send(&self, _payload: &LeadSubmission) -> std::result::Result<(), TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.started.notify_one();
            self.release.notified().await;
            Ok(())
        }
    }

    /// 第一次傳送卡住一分鐘，之後立即成功
    struct SlowFirstTransport {
        calls: AtomicU32,
    }

    #[async_trait]
    impl Transport for SlowFirstTransport {
        async fn send(&self, _payload: &LeadSubmission) -> std::result::Result<(), TransportError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                tokio::time::sleep(Duration::from_secs(60)).await;
            }
            Ok(())
        }
    }

    fn valid_fields() -> LeadFields {
        LeadFields::new("Madina", "90 123 45 67", "25-34")
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_submit_reports_success_and_settles() {
        let gateway = FormGateway::new(
            CountingTransport::new(false),
            RecordingPresenter::default(),
            GatewayConfig::default(),
        )
        .unwrap();

        let outcome = gateway.submit(&valid_fields()).await;

        assert_eq!(outcome, SubmitOutcome::Delivered { attempts: 1 });
        assert_eq!(gateway.state(), SubmissionState::Settled);
        assert_eq!(
            gateway.presenter().outcomes.lock().unwrap().as_slice(),
            &[(true, SUCCESS_MESSAGE.to_string())]
        );

        // 復原前再次送出會被忽略
        assert_eq!(gateway.submit(&valid_fields()).await, SubmitOutcome::Ignored);
        assert_eq!(gateway.transport().calls.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_millis(3600)).await;
        assert_eq!(gateway.state(), SubmissionState::Idle);
        assert_eq!(
            gateway.submit(&valid_fields()).await,
            SubmitOutcome::Delivered { attempts: 1 }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_fields_never_leave_idle() {
        let gateway = FormGateway::new(
            CountingTransport::new(false),
            RecordingPresenter::default(),
            GatewayConfig::default(),
        )
        .unwrap();

        let outcome = gateway
            .submit(&LeadFields::new("M", "90 123 45 67", ""))
            .await;

        match outcome {
            SubmitOutcome::Rejected(report) => {
                assert_eq!(report.invalid_fields(), vec![Field::Name, Field::Age]);
            }
            other => panic!("expected rejection, got {:?}", other),
        }
        assert_eq!(gateway.state(), SubmissionState::Idle);
        assert_eq!(gateway.transport().calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            gateway.presenter().validations.lock().unwrap().as_slice(),
            &[(Field::Name, false), (Field::Phone, true), (Field::Age, false)]
        );
        assert!(gateway.presenter().outcomes.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_retries_report_failure_and_reset_to_idle() {
        let gateway = FormGateway::new(
            CountingTransport::new(true),
            RecordingPresenter::default(),
            GatewayConfig::default(),
        )
        .unwrap();

        let outcome = gateway.submit(&valid_fields()).await;

        match outcome {
            SubmitOutcome::Failed { attempts, .. } => assert_eq!(attempts, 3),
            other => panic!("expected failure, got {:?}", other),
        }
        assert_eq!(gateway.transport().calls.load(Ordering::SeqCst), 3);
        assert_eq!(gateway.state(), SubmissionState::Idle);
        assert_eq!(
            gateway.presenter().outcomes.lock().unwrap().as_slice(),
            &[(false, FAILURE_MESSAGE.to_string())]
        );
    }

    #[tokio::test]
    async fn test_second_submit_while_in_flight_is_ignored() {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let gateway = FormGateway::new(
            GatedTransport {
                calls: AtomicU32::new(0),
                started: started.clone(),
                release: release.clone(),
            },
            RecordingPresenter::default(),
            GatewayConfig::default(),
        )
        .unwrap();
        let fields = valid_fields();

        let (first, second) = tokio::join!(gateway.submit(&fields), async {
            started.notified().await;
            assert_eq!(gateway.state(), SubmissionState::InFlight);
            let outcome = gateway.submit(&fields).await;
            assert_eq!(gateway.state(), SubmissionState::InFlight);
            release.notify_one();
            outcome
        });

        assert_eq!(first, SubmitOutcome::Delivered { attempts: 1 });
        assert_eq!(second, SubmitOutcome::Ignored);
        assert_eq!(gateway.transport().calls.load(Ordering::SeqCst), 1);
        assert_eq!(gateway.presenter().outcomes.lock().unwrap().len(), 1);
        // 被忽略的呼叫不會標示欄位
        assert_eq!(gateway.presenter().validations.lock().unwrap().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_submit_releases_guard() {
        let gateway = FormGateway::new(
            SlowFirstTransport {
                calls: AtomicU32::new(0),
            },
            RecordingPresenter::default(),
            GatewayConfig::default(),
        )
        .unwrap();
        let fields = valid_fields();

        let timed_out = tokio::time::timeout(Duration::from_secs(1), gateway.submit(&fields)).await;
        assert!(timed_out.is_err());
        assert_eq!(gateway.state(), SubmissionState::Idle);
        assert!(gateway.presenter().outcomes.lock().unwrap().is_empty());

        assert_eq!(
            gateway.submit(&fields).await,
            SubmitOutcome::Delivered { attempts: 1 }
        );
        assert_eq!(gateway.transport().calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_validate_reports_each_field_and_is_repeatable() {
        let gateway = FormGateway::new(
            CountingTransport::new(false),
            RecordingPresenter::default(),
            GatewayConfig::default(),
        )
        .unwrap();
        let fields = LeadFields::new("Ok", "12 345 67", "18-24");

        assert!(!gateway.validate(&fields));
        assert!(!gateway.validate(&fields));
        assert_eq!(gateway.presenter().validations.lock().unwrap().len(), 6);
    }

    #[test]
    fn test_invalid_timezone_is_rejected_at_construction() {
        let mut config = GatewayConfig::default();
        config.submission.timezone = "Nowhere/Town".to_string();

        let result = FormGateway::new(
            CountingTransport::new(false),
            RecordingPresenter::default(),
            config,
        );
        assert!(result.is_err());
    }
}
