use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_sesv2 as sesv2;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};

use super::{render_json, Delivery};
use crate::types::OwnerReport;

const CHARSET: &str = "UTF-8";

/// Sends the report as a plain-text email through SES v2.
pub struct SesDelivery {
    client: sesv2::Client,
    from: String,
}

impl SesDelivery {
    pub fn new(conf: &aws_config::SdkConfig, from: impl Into<String>) -> Self {
        Self { client: sesv2::Client::new(conf), from: from.into() }
    }
}

#[async_trait]
impl Delivery for SesDelivery {
    fn name(&self) -> &'static str {
        "ses"
    }

    async fn send(&self, address: &str, report: &OwnerReport) -> Result<()> {
        let subject = Content::builder()
            .data(format!("AWS resources tagged to you ({})", report.resources.len()))
            .charset(CHARSET)
            .build()?;
        let text = Content::builder().data(render_json(report)?).charset(CHARSET).build()?;
        let message = Message::builder()
            .subject(subject)
            .body(Body::builder().text(text).build())
            .build();

        self.client
            .send_email()
            .from_email_address(&self.from)
            .destination(Destination::builder().to_addresses(address).build())
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await?;
        Ok(())
    }
}
