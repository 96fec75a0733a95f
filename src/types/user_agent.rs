use std::fmt;

use super::facet::OTHER_FAMILY;

/// Client software identity: browser, crawler, library, ...
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[must_use]
pub struct UserAgent {
    pub family: String,
    pub major: Option<String>,
    pub minor: Option<String>,
    pub patch: Option<String>,
}

impl UserAgent {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            major: None,
            minor: None,
            patch: None,
        }
    }

    /// The result reported when no rule matches.
    pub fn other() -> Self {
        Self::new(OTHER_FAMILY)
    }

    pub fn with_version(
        mut self,
        major: Option<&str>,
        minor: Option<&str>,
        patch: Option<&str>,
    ) -> Self {
        self.major = major.map(str::to_owned);
        self.minor = minor.map(str::to_owned);
        self.patch = patch.map(str::to_owned);
        self
    }

    /// Dotted version built from the leading present components.
    #[must_use]
    pub fn version(&self) -> Option<String> {
        super::join_version(&[&self.major, &self.minor, &self.patch])
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.version() {
            Some(v) => write!(f, "{} {v}", self.family),
            None => f.write_str(&self.family),
        }
    }
}
