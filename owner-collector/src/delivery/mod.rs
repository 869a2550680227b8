use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::types::OwnerReport;

pub mod http;
pub mod ses;

/// Hands a finished report to its owner.
#[async_trait]
pub trait Delivery: Send + Sync {
    fn name(&self) -> &'static str;
    async fn send(&self, address: &str, report: &OwnerReport) -> Result<()>;
}

/// Writes the report to the log instead of sending it anywhere.
#[derive(Default)]
pub struct LogDelivery;

impl LogDelivery {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Delivery for LogDelivery {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, address: &str, report: &OwnerReport) -> Result<()> {
        info!(user = %address, resources = report.resources.len(), "owner report");
        for r in &report.resources {
            info!(
                user = %address,
                account_id = %r.account_id,
                service = %r.service,
                resource = %r.resource,
                arn = %r.identifier,
                "owned resource"
            );
        }
        Ok(())
    }
}

pub(crate) fn render_json(report: &OwnerReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
