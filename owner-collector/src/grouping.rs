//! Groups tag index results by tag value.
//!
//! Nothing here talks to AWS. A resource contributes a [`ResourceDescriptor`]
//! once per tag whose key equals the queried key exactly and whose value is
//! non-empty. Descriptors are appended in the order resources are returned.

use std::collections::HashMap;

use crate::arn::{Arn, ArnError};
use crate::types::{ResourceDescriptor, ResourceTagMapping};

/// Tag value (usually an owner's email address) to the resources carrying it.
pub type GroupedReport = HashMap<String, Vec<ResourceDescriptor>>;

/// A matching resource that was left out because its ARN did not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedResource {
    pub arn: String,
    pub error: ArnError,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Grouped {
    pub report: GroupedReport,
    pub skipped: Vec<SkippedResource>,
}

pub fn group_values(resources: &[ResourceTagMapping], key: &str) -> Grouped {
    let mut grouped = Grouped::default();
    for mapping in resources {
        for tag in &mapping.tags {
            if tag.key != key || tag.value.is_empty() {
                continue;
            }
            match Arn::parse(&mapping.arn) {
                Ok(arn) => {
                    grouped
                        .report
                        .entry(tag.value.clone())
                        .or_default()
                        .push(ResourceDescriptor {
                            account_id: arn.account_id,
                            service: arn.service,
                            resource: arn.resource,
                            identifier: mapping.arn.clone(),
                        });
                }
                Err(error) => grouped.skipped.push(SkippedResource {
                    arn: mapping.arn.clone(),
                    error,
                }),
            }
        }
    }
    grouped
}

/// Merges `from` into `into`. A tag value present in both ends up with the
/// list from `from`; lists are replaced, never concatenated.
pub fn merge_replacing(into: &mut GroupedReport, from: GroupedReport) {
    for (value, resources) in from {
        into.insert(value, resources);
    }
}
