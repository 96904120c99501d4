use crate::domain::ports::EmailService;
use crate::error::AppError;
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error};

/// Posts outgoing report mail to an HTTP mail gateway with a bearer token.
pub struct HttpEmailService {
    client: Client,
    api_url: String,
    api_key: String,
    sender: String,
}

impl HttpEmailService {
    pub fn new(api_url: String, api_key: String, sender: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
            sender: sender.into(),
        }
    }
}

#[derive(Serialize)]
struct Attachment<'a> {
    filename: &'a str,
    content_base64: String,
}

#[derive(Serialize)]
struct OutgoingMail<'a> {
    from_alias: &'a str,
    to_addr: &'a str,
    subject: &'a str,
    html_body: &'a str,
    attachments: Vec<Attachment<'a>>,
}

#[async_trait]
impl EmailService for HttpEmailService {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
        attachment_name: Option<&str>,
        attachment_data: Option<&[u8]>,
    ) -> Result<(), AppError> {
        let attachments = match (attachment_name, attachment_data) {
            (Some(filename), Some(data)) => vec![Attachment {
                filename,
                content_base64: general_purpose::STANDARD.encode(data),
            }],
            _ => Vec::new(),
        };

        let mail = OutgoingMail {
            from_alias: &self.sender,
            to_addr: recipient,
            subject,
            html_body,
            attachments,
        };

        debug!(recipient, subject, "Dispatching report mail");

        let res = self.client.post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&mail)
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Mail gateway unreachable: {}", e);
                error!("{}", msg);
                AppError::InternalWithMsg(msg)
            })?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            let msg = format!("Mail gateway rejected message. Status: {}, Body: {}", status, text);
            error!("{}", msg);
            return Err(AppError::InternalWithMsg(msg));
        }

        Ok(())
    }
}
