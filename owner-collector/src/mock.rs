use anyhow::Result;
use async_trait::async_trait;

use crate::tagging::TagIndex;
use crate::types::{ResourceTagMapping, Tag};

/// Fixed tag index for running without AWS credentials (`MOCK_MODE`).
pub struct MockTagIndex {
    resources: Vec<ResourceTagMapping>,
}

impl MockTagIndex {
    pub fn new() -> Self {
        Self { resources: fixture() }
    }

    #[cfg(test)]
    pub fn with_resources(resources: Vec<ResourceTagMapping>) -> Self {
        Self { resources }
    }
}

impl Default for MockTagIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TagIndex for MockTagIndex {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn get_resources(&self, key: &str) -> Result<Vec<ResourceTagMapping>> {
        Ok(self
            .resources
            .iter()
            .filter(|r| r.tags.iter().any(|t| t.key == key))
            .cloned()
            .collect())
    }
}

fn fixture() -> Vec<ResourceTagMapping> {
    let r = |arn: &str, tags: &[(&str, &str)]| ResourceTagMapping {
        arn: arn.into(),
        tags: tags.iter().map(|(k, v)| Tag::new(*k, *v)).collect(),
    };
    vec![
        r("arn:aws:s3:::bucket-a", &[("Owner", "a@x.com"), ("env", "dev")]),
        r("arn:aws:ec2:us-east-1:111122223333:instance/i-1", &[("Owner", "a@x.com")]),
        r("arn:aws:rds:ap-northeast-2:111122223333:db:demo-db", &[("Owner", "")]),
        r("arn:aws:sqs:ap-northeast-2:111122223333:demo-queue", &[("owner", "data-team@x.com")]),
        r("arn:aws:dynamodb:ap-northeast-2:111122223333:table/orders", &[("Owner", "not-an-email")]),
    ]
}
