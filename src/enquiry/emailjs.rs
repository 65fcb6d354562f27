use crate::config::RelayConfig;
use crate::enquiry::traits::{EmailRelay, RelayError};
use crate::enquiry::types::TemplateParams;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Path of the EmailJS send endpoint, relative to the API base
const SEND_PATH: &str = "/api/v1.0/email/send";

/// Body the relay acknowledges a delivered email with
const ACK: &str = "OK";

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a TemplateParams,
}

/// EmailJS relay, delivering enquiries through a configured email template
pub struct EmailJsRelay {
    client: Client,
    endpoint: String,
    service_id: String,
    template_id: String,
    public_key: String,
}

impl EmailJsRelay {
    pub fn new(config: &RelayConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("office-scout/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", config.api_base.trim_end_matches('/'), SEND_PATH),
            service_id: config.service_id.clone(),
            template_id: config.template_id.clone(),
            public_key: config.public_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request<'a>(&'a self, params: &'a TemplateParams) -> SendRequest<'a> {
        SendRequest {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.public_key,
            template_params: params,
        }
    }
}

/// Map the relay's answer onto delivered / not delivered
pub fn check_ack(status: StatusCode, body: &str) -> Result<(), RelayError> {
    if !status.is_success() {
        return Err(RelayError::Rejected {
            status: status.as_u16(),
            body: body.trim().to_string(),
        });
    }
    if body.trim() != ACK {
        return Err(RelayError::UnexpectedAck(body.trim().to_string()));
    }
    Ok(())
}

#[async_trait]
impl EmailRelay for EmailJsRelay {
    async fn send(&self, params: &TemplateParams) -> Result<(), RelayError> {
        debug!("Posting {} template params to {}", params.len(), self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&self.request(params))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if let Err(e) = check_ack(status, &body) {
            warn!("EmailJS did not accept the enquiry: {}", e);
            return Err(e);
        }

        info!("✉️  EmailJS accepted enquiry from {}", params.get("page").map(String::as_str).unwrap_or("unknown page"));
        Ok(())
    }

    fn relay_name(&self) -> &'static str {
        "EmailJS"
    }
}
