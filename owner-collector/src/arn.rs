//! Amazon Resource Name parsing.
//!
//! `arn:partition:service:region:account-id:resource`. Only the first five
//! colons separate sections, so resource paths such as
//! `function:my-fn:alias` stay intact. Region and account are empty for
//! global resources like S3 buckets.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const PREFIX: &str = "arn";
const SECTIONS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArnError {
    #[error("invalid prefix, expected `arn:`")]
    InvalidPrefix,
    #[error("not enough sections, expected 6 got {0}")]
    NotEnoughSections(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arn {
    pub partition: String,
    pub service: String,
    pub region: String,
    pub account_id: String,
    pub resource: String,
}

impl Arn {
    pub fn parse(s: &str) -> Result<Self, ArnError> {
        if !s.strip_prefix(PREFIX).is_some_and(|rest| rest.starts_with(':')) {
            return Err(ArnError::InvalidPrefix);
        }
        let sections: Vec<&str> = s.splitn(SECTIONS, ':').collect();
        if sections.len() != SECTIONS {
            return Err(ArnError::NotEnoughSections(sections.len()));
        }
        Ok(Self {
            partition: sections[1].to_string(),
            service: sections[2].to_string(),
            region: sections[3].to_string(),
            account_id: sections[4].to_string(),
            resource: sections[5].to_string(),
        })
    }
}

impl FromStr for Arn {
    type Err = ArnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Arn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{PREFIX}:{}:{}:{}:{}:{}",
            self.partition, self.service, self.region, self.account_id, self.resource
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_bucket() {
        let arn = Arn::parse("arn:aws:s3:::bucket-a").unwrap();
        assert_eq!(arn.partition, "aws");
        assert_eq!(arn.service, "s3");
        assert_eq!(arn.region, "");
        assert_eq!(arn.account_id, "");
        assert_eq!(arn.resource, "bucket-a");
    }

    #[test]
    fn parses_regional_instance() {
        let arn: Arn = "arn:aws:ec2:us-east-1:111122223333:instance/i-1".parse().unwrap();
        assert_eq!(arn.service, "ec2");
        assert_eq!(arn.region, "us-east-1");
        assert_eq!(arn.account_id, "111122223333");
        assert_eq!(arn.resource, "instance/i-1");
    }

    #[test]
    fn keeps_colons_inside_resource() {
        let arn = Arn::parse("arn:aws:lambda:eu-west-1:123456789012:function:my-fn:prod").unwrap();
        assert_eq!(arn.resource, "function:my-fn:prod");
        assert_eq!(
            arn.to_string(),
            "arn:aws:lambda:eu-west-1:123456789012:function:my-fn:prod"
        );
    }

    #[test]
    fn rejects_wrong_prefix() {
        assert_eq!(Arn::parse("urn:aws:s3:::bucket"), Err(ArnError::InvalidPrefix));
        assert_eq!(Arn::parse(""), Err(ArnError::InvalidPrefix));
        assert_eq!(Arn::parse("arn"), Err(ArnError::InvalidPrefix));
        assert_eq!(Arn::parse("arnx:aws:s3:::bucket"), Err(ArnError::InvalidPrefix));
    }

    #[test]
    fn rejects_short_identifier() {
        assert_eq!(Arn::parse("arn:aws:s3"), Err(ArnError::NotEnoughSections(3)));
        assert_eq!(Arn::parse("arn:"), Err(ArnError::NotEnoughSections(2)));
    }
}
