use crate::enquiry::types::TemplateParams;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Why a relay did not deliver an enquiry
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("relay unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("relay rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("relay answered '{0}' instead of an acknowledgement")]
    UnexpectedAck(String),
}

/// Common trait for services that turn a form submission into an email
/// This keeps forms independent of the delivery provider
#[async_trait]
pub trait EmailRelay: Send + Sync {
    /// Deliver one enquiry; `Ok` only when the relay acknowledged it
    async fn send(&self, params: &TemplateParams) -> Result<(), RelayError>;

    /// Get the name of the relay provider
    fn relay_name(&self) -> &'static str;
}

#[async_trait]
impl<T: EmailRelay + ?Sized> EmailRelay for Arc<T> {
    async fn send(&self, params: &TemplateParams) -> Result<(), RelayError> {
        (**self).send(params).await
    }

    fn relay_name(&self) -> &'static str {
        (**self).relay_name()
    }
}
