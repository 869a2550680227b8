//! Email address validation for owner tag values.
//!
//! Accepts a bare `local@domain` or `Display Name <local@domain>`. The local
//! part is a dot-atom or a quoted string; the domain is a dot-atom or a
//! bracketed literal such as `[192.0.2.1]`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("empty address")]
    Empty,
    #[error("missing @")]
    MissingAt,
    #[error("invalid local part")]
    InvalidLocalPart,
    #[error("invalid domain")]
    InvalidDomain,
    #[error("unterminated angle address")]
    UnclosedAngle,
    #[error("invalid display name")]
    InvalidDisplayName,
}

/// Validates `input` and returns the bare `local@domain` it names.
pub fn parse_address(input: &str) -> Result<String, AddressError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(AddressError::Empty);
    }
    match s.find('<') {
        Some(open) => {
            if !is_phrase(s[..open].trim()) {
                return Err(AddressError::InvalidDisplayName);
            }
            let inner = s[open + 1..].strip_suffix('>').ok_or(AddressError::UnclosedAngle)?;
            parse_addr_spec(inner.trim())
        }
        None => parse_addr_spec(s),
    }
}

fn parse_addr_spec(s: &str) -> Result<String, AddressError> {
    let (local, domain) = if let Some(rest) = s.strip_prefix('"') {
        let end = quoted_end(rest).ok_or(AddressError::InvalidLocalPart)?;
        let domain = rest[end + 1..].strip_prefix('@').ok_or(AddressError::MissingAt)?;
        (&s[..end + 2], domain)
    } else {
        let (local, domain) = s.split_once('@').ok_or(AddressError::MissingAt)?;
        if !is_dot_atom(local) {
            return Err(AddressError::InvalidLocalPart);
        }
        (local, domain)
    };

    if !is_dot_atom(domain) && !is_domain_literal(domain) {
        return Err(AddressError::InvalidDomain);
    }
    Ok(format!("{local}@{domain}"))
}

/// Index of the closing quote in `s`, which starts just after the opening one.
fn quoted_end(s: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return if i == 0 { None } else { Some(i) },
            c if c.is_control() => return None,
            _ => {}
        }
    }
    None
}

/// Display name: words separated by whitespace, each an atom (dots allowed)
/// or a quoted string. Empty is fine.
fn is_phrase(s: &str) -> bool {
    let mut rest = s.trim_start();
    while !rest.is_empty() {
        if let Some(quoted) = rest.strip_prefix('"') {
            let Some(end) = quoted_end(quoted) else { return false };
            rest = &quoted[end + 1..];
        } else {
            let len = rest.find(|c: char| !(is_atext(c) || c == '.')).unwrap_or(rest.len());
            if len == 0 {
                return false;
            }
            rest = &rest[len..];
        }
        let trimmed = rest.trim_start();
        if trimmed.len() == rest.len() && !trimmed.is_empty() && !trimmed.starts_with('"') {
            return false;
        }
        rest = trimmed;
    }
    true
}

fn is_atext(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-/=?^_`{|}~".contains(c) || (!c.is_ascii() && c.is_alphanumeric())
}

fn is_dot_atom(s: &str) -> bool {
    !s.is_empty() && s.split('.').all(|atom| !atom.is_empty() && atom.chars().all(is_atext))
}

fn is_domain_literal(s: &str) -> bool {
    s.len() > 2
        && s.starts_with('[')
        && s.ends_with(']')
        && s[1..s.len() - 1]
            .chars()
            .all(|c| c.is_ascii_graphic() && !matches!(c, '[' | ']' | '\\'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_valid(input: &str) -> bool {
        parse_address(input).is_ok()
    }

    #[test]
    fn accepts_plain_address() {
        assert_eq!(parse_address("ops-team@example.com").unwrap(), "ops-team@example.com");
        assert!(is_valid("first.last+tag@sub.example.co.uk"));
        assert!(is_valid("root@localhost"));
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!(parse_address("not-an-address"), Err(AddressError::MissingAt));
        assert_eq!(parse_address("@example.com"), Err(AddressError::InvalidLocalPart));
        assert_eq!(parse_address(""), Err(AddressError::Empty));
        assert_eq!(parse_address("a@"), Err(AddressError::InvalidDomain));
        assert_eq!(parse_address("a..b@example.com"), Err(AddressError::InvalidLocalPart));
        assert_eq!(parse_address("a@example..com"), Err(AddressError::InvalidDomain));
        assert_eq!(parse_address("a b@example.com"), Err(AddressError::InvalidLocalPart));
        assert!(!is_valid("not-an-email"));
        assert_eq!(parse_address("a@b.com <c@d.com>"), Err(AddressError::InvalidDisplayName));
        assert_eq!(parse_address("@@@ <c@d.com>"), Err(AddressError::InvalidDisplayName));
        assert_eq!(parse_address("x> <c@d.com>"), Err(AddressError::InvalidDisplayName));
        assert_eq!(parse_address("\"unclosed <c@d.com>"), Err(AddressError::InvalidDisplayName));
    }

    #[test]
    fn display_name_form_yields_bare_address() {
        assert_eq!(parse_address("Ops Team <ops@example.com>").unwrap(), "ops@example.com");
        assert_eq!(parse_address("<ops@example.com>").unwrap(), "ops@example.com");
        assert_eq!(parse_address("\"Ops, Team\" <ops@example.com>").unwrap(), "ops@example.com");
        assert_eq!(parse_address("J. Doe \"ops\" <ops@example.com>").unwrap(), "ops@example.com");
        assert_eq!(parse_address("Ops <ops@example.com"), Err(AddressError::UnclosedAngle));
    }

    #[test]
    fn quoted_local_part_and_domain_literal() {
        assert_eq!(
            parse_address("\"john doe\"@example.com").unwrap(),
            "\"john doe\"@example.com"
        );
        assert!(is_valid("\"a@b\"@example.com"));
        assert!(is_valid("user@[192.0.2.1]"));
        assert!(!is_valid("\"unterminated@example.com"));
        assert!(!is_valid("\"\"@example.com"));
    }
}
