use std::fmt;

use super::facet::OTHER_FAMILY;

/// Operating system identity.
///
/// `patch_minor` is part of the result shape but no rule resolves it; it is
/// always `None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[must_use]
pub struct Os {
    pub family: String,
    pub major: Option<String>,
    pub minor: Option<String>,
    pub patch: Option<String>,
    pub patch_minor: Option<String>,
}

impl Os {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            major: None,
            minor: None,
            patch: None,
            patch_minor: None,
        }
    }

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

    #[must_use]
    pub fn version(&self) -> Option<String> {
        super::join_version(&[&self.major, &self.minor, &self.patch, &self.patch_minor])
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.version() {
            Some(v) => write!(f, "{} {v}", self.family),
            None => f.write_str(&self.family),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_partial_version() {
        let os = Os::new("Mac OS X").with_version(Some("10"), Some("4"), None);
        assert_eq!(os.to_string(), "Mac OS X 10.4");
    }

    #[test]
    fn other_os() {
        let os = Os::other();
        assert_eq!(os.family, "Other");
        assert!(os.major.is_none() && os.patch_minor.is_none());
    }
}
