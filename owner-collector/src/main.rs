mod address;
mod arn;
mod config;
mod delivery;
mod dispatch;
mod error;
mod grouping;
mod mock;
mod tagging;
mod types;

use std::process::ExitCode;

use aws_config::BehaviorVersion;
use aws_types::region::Region;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use config::{Config, DeliveryMode};
use delivery::{http::HttpDelivery, ses::SesDelivery, Delivery, LogDelivery};
use dispatch::{DispatchOutcome, Dispatcher};
use error::CollectorError;
use grouping::Grouped;
use mock::MockTagIndex;
use tagging::{AwsTagIndex, TagIndex};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let needs_aws = !cfg.mock || cfg.delivery == DeliveryMode::Ses;
    let sdk = if needs_aws { Some(aws_conf(cfg.region.as_deref()).await) } else { None };

    let index: Box<dyn TagIndex> = match &sdk {
        Some(conf) if !cfg.mock => Box::new(AwsTagIndex::new(conf)),
        _ => Box::new(MockTagIndex::new()),
    };
    let delivery = match build_delivery(&cfg, sdk.as_ref()) {
        Ok(d) => d,
        Err(e) => {
            error!("cannot build delivery channel: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        source = index.name(),
        channel = delivery.name(),
        keys = ?cfg.tag_keys,
        "collecting owner reports"
    );
    // errors from run are logged where they are raised
    exit_code(&run(&cfg, index.as_ref(), delivery.as_ref()).await)
}

fn exit_code<T>(res: &Result<T, CollectorError>) -> ExitCode {
    match res {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

async fn aws_conf(region: Option<&str>) -> aws_config::SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(r) = region {
        loader = loader.region(Region::new(r.to_string()));
    }
    loader.load().await
}

fn build_delivery(cfg: &Config, sdk: Option<&aws_config::SdkConfig>) -> anyhow::Result<Box<dyn Delivery>> {
    Ok(match (cfg.delivery, sdk, cfg.from_address.as_deref(), cfg.endpoint.as_deref()) {
        (DeliveryMode::Ses, Some(conf), Some(from), _) => Box::new(SesDelivery::new(conf, from)),
        (DeliveryMode::Http, _, _, Some(endpoint)) => Box::new(HttpDelivery::new(endpoint)?),
        _ => Box::new(LogDelivery::new()),
    })
}

/// One query, group and dispatch cycle.
///
/// Query failures abort. Unparsable ARNs abort too unless `allow_partial`
/// is set, in which case they are logged and left out of the report.
async fn run(cfg: &Config, index: &dyn TagIndex, delivery: &dyn Delivery) -> Result<DispatchOutcome, CollectorError> {
    let Grouped { report, skipped } = tagging::collect(index, &cfg.tag_keys).await?;

    for s in &skipped {
        warn!(arn = %s.arn, "cannot parse resource identifier: {}", s.error);
    }
    if !cfg.allow_partial {
        if let Some(first) = skipped.into_iter().next() {
            let err = CollectorError::Parse { arn: first.arn, source: first.error };
            error!("{err}");
            return Err(err);
        }
    }

    info!(owners = report.len(), "grouped tagged resources");
    Ok(Dispatcher::new(delivery).dispatch(&report).await)
}
