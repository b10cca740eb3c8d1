// weekshare-core/src/domain/principal.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// A recipient email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    pub fn new(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn email(&self) -> &str {
        &self.0
    }

    /// Case-insensitive match on the part after '@'.
    pub fn domain_is(&self, domain: &str) -> bool {
        let domain = domain.trim_start_matches('@');
        self.0
            .rsplit_once('@')
            .map(|(_, d)| d.eq_ignore_ascii_case(domain))
            .unwrap_or(false)
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Recipients eligible for sharing, already filtered to one email domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrincipalList {
    principals: Vec<Principal>,
}

impl PrincipalList {
    pub fn new(principals: Vec<Principal>) -> Self {
        Self { principals }
    }

    /// Parses a newline-delimited address list.
    ///
    /// Blank lines and lines starting with '#' are ignored; only addresses in
    /// `domain` are kept.
    pub fn parse(content: &str, domain: &str) -> Self {
        let principals = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(Principal::new)
            .filter(|p| p.domain_is(domain))
            .collect();
        Self { principals }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Principal> {
        self.principals.iter()
    }

    pub fn len(&self) -> usize {
        self.principals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.principals.is_empty()
    }
}
