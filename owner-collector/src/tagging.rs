use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_resourcegroupstagging as tagging;
use aws_sdk_resourcegroupstagging::types::TagFilter;
use tracing::{debug, error, warn};

use crate::error::CollectorError;
use crate::grouping::{group_values, merge_replacing, Grouped};
use crate::types::{ResourceTagMapping, Tag};

/// Source of resources carrying a given tag key, whatever its value.
#[async_trait]
pub trait TagIndex: Send + Sync {
    fn name(&self) -> &'static str;
    async fn get_resources(&self, key: &str) -> Result<Vec<ResourceTagMapping>>;
}

/// Resource Groups Tagging API. Only the first page of results is read.
pub struct AwsTagIndex {
    client: tagging::Client,
}

impl AwsTagIndex {
    pub fn new(conf: &aws_config::SdkConfig) -> Self {
        Self { client: tagging::Client::new(conf) }
    }
}

#[async_trait]
impl TagIndex for AwsTagIndex {
    fn name(&self) -> &'static str {
        "resourcegroupstagging"
    }

    async fn get_resources(&self, key: &str) -> Result<Vec<ResourceTagMapping>> {
        let resp = self
            .client
            .get_resources()
            .include_compliance_details(true)
            .tag_filters(TagFilter::builder().key(key).build())
            .send()
            .await?;

        if resp.pagination_token().is_some_and(|t| !t.is_empty()) {
            warn!(key, "more results available, only the first page is used");
        }

        let out = resp
            .resource_tag_mapping_list()
            .iter()
            .map(|m| ResourceTagMapping {
                arn: m.resource_arn().unwrap_or_default().to_string(),
                tags: m.tags().iter().map(|t| Tag::new(t.key(), t.value())).collect(),
            })
            .collect();
        Ok(out)
    }
}

/// Queries every key in order and merges the grouped results.
///
/// The first failing query aborts the whole collection; nothing gathered for
/// earlier keys is returned. When two keys yield the same tag value the later
/// key's resources replace the earlier ones.
pub async fn collect(index: &dyn TagIndex, keys: &[String]) -> Result<Grouped, CollectorError> {
    let mut merged = Grouped::default();
    for key in keys {
        let resources = match index.get_resources(key).await {
            Ok(v) => v,
            Err(e) => {
                error!(source = index.name(), key = %key, "tag query failed: {e:#}");
                return Err(CollectorError::Query { key: key.clone(), source: e });
            }
        };
        debug!(key = %key, count = resources.len(), "tag query returned");

        let Grouped { report, skipped } = group_values(&resources, key);
        merge_replacing(&mut merged.report, report);
        merged.skipped.extend(skipped);
    }
    Ok(merged)
}
