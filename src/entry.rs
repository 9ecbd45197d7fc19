//! A single validated hosts record.

use std::fmt;
use std::net::IpAddr;

use serde::Serialize;

use crate::error::{Error, Result};

/// One line of the hosts file: address, primary hostname, aliases and an
/// optional trailing comment.
///
/// Fields are private and validated on construction, so an `Entry` can always
/// be encoded to a single line and decoded back to an equal value. Equality
/// covers every field, the comment included.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Entry {
    address: IpAddr,
    /// IPv6 scope, the part after `%` in `fe80::1%lo0`.
    #[serde(skip_serializing_if = "Option::is_none")]
    zone: Option<String>,
    hostname: String,
    aliases: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
}

impl Entry {
    /// Entry with no aliases and no comment.
    pub fn new(address: IpAddr, hostname: impl Into<String>) -> Result<Self> {
        let hostname = hostname.into();
        validate_name(&hostname).map_err(Error::InvalidHostname)?;
        Ok(Self {
            address,
            zone: None,
            hostname,
            aliases: Vec::new(),
            comment: None,
        })
    }

    /// Like [`Entry::new`] but parses the address from text.
    ///
    /// IPv6 addresses may carry a zone suffix (`fe80::1%lo0`).
    pub fn parse(address: &str, hostname: impl Into<String>) -> Result<Self> {
        let text = address.trim();
        let (ip, zone) = match text.split_once('%') {
            Some((ip, zone)) => (ip, Some(zone)),
            None => (text, None),
        };
        let ip = ip
            .parse::<IpAddr>()
            .map_err(|_| Error::InvalidAddress(address.to_string()))?;
        let entry = Self::new(ip, hostname)?;
        match zone {
            Some(z) => entry.with_zone(z),
            None => Ok(entry),
        }
    }

    /// Set the IPv6 zone. Only valid for IPv6 addresses.
    pub fn with_zone(mut self, zone: impl Into<String>) -> Result<Self> {
        let zone: String = zone.into();
        if !self.address.is_ipv6() {
            return Err(Error::InvalidAddress(format!(
                "{}%{zone}: zone is only allowed on IPv6 addresses",
                self.address
            )));
        }
        if zone.is_empty() || zone.contains(|c: char| c.is_whitespace() || c == '#' || c == '%') {
            return Err(Error::InvalidAddress(format!(
                "{}%{zone}: invalid zone",
                self.address
            )));
        }
        self.zone = Some(zone);
        Ok(self)
    }

    /// Replace the aliases, keeping their order.
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let aliases: Vec<String> = aliases.into_iter().map(Into::into).collect();
        for alias in &aliases {
            validate_name(alias).map_err(Error::InvalidAlias)?;
        }
        self.aliases = aliases;
        Ok(self)
    }

    /// Set the comment. The text is trimmed; an empty result clears it.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Result<Self> {
        let comment: String = comment.into();
        if comment.contains(['\n', '\r', '\t']) {
            return Err(Error::InvalidComment(format!(
                "{comment:?} contains a newline, carriage return or tab"
            )));
        }
        let trimmed = comment.trim();
        self.comment = (!trimmed.is_empty()).then(|| trimmed.to_string());
        Ok(self)
    }

    pub fn address(&self) -> IpAddr {
        self.address
    }

    pub fn zone(&self) -> Option<&str> {
        self.zone.as_deref()
    }

    /// Address as written in the file, zone included.
    pub fn address_text(&self) -> String {
        match &self.zone {
            Some(zone) => format!("{}%{zone}", self.address),
            None => self.address.to_string(),
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Hostname followed by the aliases.
    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.hostname.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Exact, case-sensitive match against the address text or any name.
    pub fn matches(&self, query: &str) -> bool {
        self.address_text() == query || self.all_names().any(|n| n == query)
    }

    /// True if the two entries share the address or any name.
    pub fn conflicts_with(&self, other: &Entry) -> bool {
        (self.address == other.address && self.zone == other.zone)
            || self.all_names().any(|n| other.all_names().any(|o| o == n))
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(crate::codec::encode(self).trim_end_matches('\n'))
    }
}

/// Names are single whitespace-free tokens; `#` would start a comment.
fn validate_name(name: &str) -> std::result::Result<(), String> {
    if name.trim().is_empty() {
        return Err("name cannot be empty".to_string());
    }
    if let Some(c) = name.chars().find(|c| c.is_whitespace() || *c == '#') {
        return Err(format!("{name:?} contains illegal char {c:?}"));
    }
    Ok(())
}
