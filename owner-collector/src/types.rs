use serde::{Deserialize, Serialize};

/// One key/value label as returned by the tag index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into() }
    }
}

/// A resource and every tag attached to it, straight from the tag index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTagMapping {
    pub arn: String,
    pub tags: Vec<Tag>,
}

/// A tagged resource with its identifier broken into parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub account_id: String,
    pub service: String,
    pub resource: String,
    /// Full ARN, kept verbatim.
    pub identifier: String,
}

/// What a delivery channel receives for one owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerReport {
    pub address: String,
    pub resources: Vec<ResourceDescriptor>,
}
