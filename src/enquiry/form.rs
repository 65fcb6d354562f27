use crate::enquiry::traits::EmailRelay;
use crate::enquiry::types::EnquiryRequest;
use crate::enquiry::validate::{validate, ValidationError};
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{error, info};

/// How long a status message stays up by default
pub const DEFAULT_STATUS_TTL: Duration = Duration::from_secs(5);

/// Terminal state of a submission that reached the relay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Delivered,
    Failed,
}

/// Why a submission never reached the relay
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("an enquiry from this form is already being sent")]
    InFlight,
    #[error("the form has {} invalid field(s)", .0.len())]
    Invalid(Vec<ValidationError>),
}

/// Transient banner shown under the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub outcome: Outcome,
    pub text: &'static str,
}

/// State of one enquiry form instance.
///
/// Holds the in-flight flag that disables the submit action and the status
/// banner from the last submission. Separate instances do not share state.
pub struct EnquiryForm<R> {
    relay: R,
    status_ttl: Duration,
    in_flight: AtomicBool,
    status: Mutex<Option<(StatusMessage, Instant)>>,
}

/// Clears the in-flight flag when a submission ends, or is abandoned
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<R: EmailRelay> EnquiryForm<R> {
    pub fn new(relay: R) -> Self {
        Self::with_status_ttl(relay, DEFAULT_STATUS_TTL)
    }

    pub fn with_status_ttl(relay: R, status_ttl: Duration) -> Self {
        Self {
            relay,
            status_ttl,
            in_flight: AtomicBool::new(false),
            status: Mutex::new(None),
        }
    }

    /// Whether the submit action is currently disabled
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Status banner, if one was set within the display window
    pub fn status(&self) -> Option<StatusMessage> {
        let mut slot = self.status.lock().unwrap_or_else(|e| e.into_inner());
        let expired = matches!(slot.as_ref(), Some((_, shown_at)) if shown_at.elapsed() >= self.status_ttl);
        if expired {
            *slot = None;
        }
        slot.as_ref().map(|(message, _)| message.clone())
    }

    fn set_status(&self, status: Option<StatusMessage>) {
        let mut slot = self.status.lock().unwrap_or_else(|e| e.into_inner());
        *slot = status.map(|message| (message, Instant::now()));
    }

    /// Validate and send one enquiry.
    ///
    /// Invalid requests and submissions made while another is in flight are
    /// rejected without contacting the relay. Relay failures are logged and
    /// reported as [`Outcome::Failed`]; nothing is retried.
    pub async fn submit(&self, request: EnquiryRequest) -> Result<Outcome, SubmitError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SubmitError::InFlight);
        }
        let _in_flight = InFlight(&self.in_flight);

        validate(&request).map_err(SubmitError::Invalid)?;
        self.set_status(None);

        let params = request.template_params(Utc::now());
        let outcome = match self.relay.send(&params).await {
            Ok(()) => {
                info!("Enquiry from {} delivered via {}", request.source, self.relay.relay_name());
                Outcome::Delivered
            }
            Err(e) => {
                error!("Enquiry from {} failed via {}: {}", request.source, self.relay.relay_name(), e);
                Outcome::Failed
            }
        };

        let text = match outcome {
            Outcome::Delivered => request.source.success_message(),
            Outcome::Failed => request.source.failure_message(),
        };
        self.set_status(Some(StatusMessage { outcome, text }));

        Ok(outcome)
    }
}
