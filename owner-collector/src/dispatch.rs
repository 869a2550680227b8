use tracing::{info, warn};

use crate::address::parse_address;
use crate::delivery::Delivery;
use crate::error::CollectorError;
use crate::grouping::GroupedReport;
use crate::types::OwnerReport;

#[derive(Debug, Default)]
pub struct DispatchOutcome {
    pub delivered: Vec<String>,
    /// Tag values that are not email addresses.
    pub invalid: Vec<String>,
    pub failed: Vec<CollectorError>,
}

/// Sends one report per owner. Bad addresses and failed sends are logged and
/// counted; neither stops the remaining owners from being processed.
pub struct Dispatcher<'a> {
    delivery: &'a dyn Delivery,
}

impl<'a> Dispatcher<'a> {
    pub fn new(delivery: &'a dyn Delivery) -> Self {
        Self { delivery }
    }

    pub async fn dispatch(&self, report: &GroupedReport) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();

        for (value, resources) in report {
            let address = match parse_address(value) {
                Ok(a) => a,
                Err(e) => {
                    warn!(value = %value, "[{value}] is not a valid email address: {e}");
                    outcome.invalid.push(value.clone());
                    continue;
                }
            };

            let owner_report = OwnerReport { address: address.clone(), resources: resources.clone() };
            match self.delivery.send(&address, &owner_report).await {
                Ok(()) => outcome.delivered.push(address),
                Err(e) => {
                    warn!(channel = self.delivery.name(), user = %address, "delivery failed: {e:#}");
                    outcome.failed.push(CollectorError::Delivery { address, reason: format!("{e:#}") });
                }
            }
        }

        info!(
            channel = self.delivery.name(),
            delivered = outcome.delivered.len(),
            invalid = outcome.invalid.len(),
            failed = outcome.failed.len(),
            "dispatch finished"
        );
        outcome
    }
}
