use thiserror::Error;

use crate::arn::ArnError;

/// Failures of a collection run.
///
/// `Query`, `Parse` and `Config` abort the run. `Delivery` only ever taints a
/// single owner and is counted by the dispatcher instead of being propagated.
#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("tag query for key `{key}` failed: {source}")]
    Query {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("cannot parse resource identifier `{arn}`: {source}")]
    Parse {
        arn: String,
        #[source]
        source: ArnError,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("delivery to {address} failed: {reason}")]
    Delivery { address: String, reason: String },
}

pub type Result<T> = std::result::Result<T, CollectorError>;
