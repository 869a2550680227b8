use crate::address::parse_address;
use crate::error::{CollectorError, Result};

const DEFAULT_TAG_KEYS: &str = "Owner,owner";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeliveryMode {
    Log,
    Ses,
    Http,
}

impl DeliveryMode {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "ses" => DeliveryMode::Ses,
            "http" => DeliveryMode::Http,
            _ => DeliveryMode::Log,
        }
    }
}

/// Process-wide settings, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub tag_keys: Vec<String>,
    pub region: Option<String>,
    pub delivery: DeliveryMode,
    pub from_address: Option<String>,
    pub endpoint: Option<String>,
    pub allow_partial: bool,
    pub mock: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let tag_keys: Vec<String> = env_or("OWNER_TAG_KEYS", DEFAULT_TAG_KEYS)
            .split(',')
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        if tag_keys.is_empty() {
            return Err(CollectorError::Config("OWNER_TAG_KEYS names no tag keys".into()));
        }

        let delivery = DeliveryMode::parse(&env_or("DELIVERY_MODE", "log"));

        let from_address = match non_empty("REPORT_FROM_ADDRESS") {
            Some(a) => Some(
                parse_address(&a)
                    .map_err(|e| CollectorError::Config(format!("REPORT_FROM_ADDRESS `{a}`: {e}")))?,
            ),
            None => None,
        };
        if delivery == DeliveryMode::Ses && from_address.is_none() {
            return Err(CollectorError::Config("DELIVERY_MODE=ses requires REPORT_FROM_ADDRESS".into()));
        }

        let endpoint = non_empty("REPORT_ENDPOINT");
        if delivery == DeliveryMode::Http && endpoint.is_none() {
            return Err(CollectorError::Config("DELIVERY_MODE=http requires REPORT_ENDPOINT".into()));
        }

        Ok(Self {
            tag_keys,
            region: non_empty("AWS_REGION"),
            delivery,
            from_address,
            endpoint,
            allow_partial: parse_flag(&env_or("ALLOW_PARTIAL", "false")),
            mock: lookup("MOCK_MODE").is_some(),
        })
    }
}

fn parse_flag(s: &str) -> bool {
    matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.tag_keys, ["Owner", "owner"]);
        assert_eq!(cfg.delivery, DeliveryMode::Log);
        assert_eq!(cfg.region, None);
        assert!(!cfg.allow_partial);
        assert!(!cfg.mock);
    }

    #[test]
    fn tag_keys_are_trimmed_and_ordered() {
        let cfg = load(&[("OWNER_TAG_KEYS", " Team , ,Owner ")]).unwrap();
        assert_eq!(cfg.tag_keys, ["Team", "Owner"]);
    }

    #[test]
    fn blank_tag_keys_are_rejected() {
        assert!(matches!(load(&[("OWNER_TAG_KEYS", " , ")]), Err(CollectorError::Config(_))));
    }

    #[test]
    fn ses_needs_valid_sender() {
        assert!(load(&[("DELIVERY_MODE", "ses")]).is_err());
        assert!(load(&[("DELIVERY_MODE", "ses"), ("REPORT_FROM_ADDRESS", "nobody")]).is_err());
        let cfg = load(&[("DELIVERY_MODE", "SES"), ("REPORT_FROM_ADDRESS", "Cloud Ops <ops@example.com>")]).unwrap();
        assert_eq!(cfg.delivery, DeliveryMode::Ses);
        assert_eq!(cfg.from_address.as_deref(), Some("ops@example.com"));
    }

    #[test]
    fn http_needs_endpoint() {
        assert!(load(&[("DELIVERY_MODE", "http")]).is_err());
        let cfg = load(&[("DELIVERY_MODE", "http"), ("REPORT_ENDPOINT", "http://localhost:8080/reports")]).unwrap();
        assert_eq!(cfg.endpoint.as_deref(), Some("http://localhost:8080/reports"));
    }

    #[test]
    fn unknown_mode_falls_back_to_log() {
        assert_eq!(DeliveryMode::parse("carrier-pigeon"), DeliveryMode::Log);
    }

    #[test]
    fn flags() {
        let cfg = load(&[("ALLOW_PARTIAL", "TRUE"), ("MOCK_MODE", "1"), ("AWS_REGION", "eu-west-1")]).unwrap();
        assert!(cfg.allow_partial);
        assert!(cfg.mock);
        assert_eq!(cfg.region.as_deref(), Some("eu-west-1"));
    }
}
