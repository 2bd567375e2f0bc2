pub mod gateway;
pub mod guard;
pub mod retry;
pub mod validation;

pub use crate::domain::model::{LeadFields, LeadSubmission, SubmissionState, SubmitOutcome};
pub use crate::domain::ports::{Presenter, Transport};
pub use crate::utils::error::Result;
