pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod presentation;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::Cli;

pub use adapters::HttpTransport;
pub use config::{DeliveryMode, GatewayConfig};
pub use crate::core::gateway::{FormGateway, FAILURE_MESSAGE, SUCCESS_MESSAGE};
pub use crate::core::retry::{submit_with_retry, Delivery, RetryPolicy};
pub use domain::model::{Field, LeadFields, LeadSubmission, SubmissionState, SubmitOutcome};
pub use domain::ports::{Presenter, Transport};
pub use utils::error::{GatewayError, Result, TransportError};
