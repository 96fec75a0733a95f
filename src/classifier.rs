use std::fmt;

use crate::engine::FacetEngine;
use crate::types::{
    Classification, ConfigError, Device, DeviceFacet, FacetKind, Os, OsFacet, RuleBuilder,
    RuleRecord, UserAgent, UserAgentFacet,
};

/// Something that maps a present user-agent string to a result.
///
/// This is the seam [`CachedClassifier`](crate::CachedClassifier) wraps. It
/// is implemented by [`Classifier`] and by every
/// [`FacetEngine`](crate::FacetEngine).
pub trait Classify: Send + Sync {
    type Output: Clone + Send + Sync;

    fn classify_str(&self, input: &str) -> Self::Output;
}

/// Builder for constructing a [`Classifier`].
///
/// Rules are kept in the order they are added; within a facet, earlier
/// rules take priority.
///
/// # Example
///
/// ```
/// use uaclass::ClassifierBuilder;
///
/// let classifier = ClassifierBuilder::new()
///     .user_agent_rule(|r| r.regex(r"(Firefox)/(\d+)\.(\d+)\.(\d+)"))
///     .os_rule(|r| {
///         r.regex(r"Mac OS X (\d+)[_.](\d+)")
///             .replace("os_replacement", "Mac OS X")
///             .replace("os_v1_replacement", "$1")
///             .replace("os_v2_replacement", "$2")
///     })
///     .device_rule(|r| r.regex("Macintosh").replace("device_replacement", "Mac"))
///     .build()
///     .unwrap();
///
/// let result = classifier
///     .classify("Mozilla/5.0 (Macintosh; Intel Mac OS X 10.4) Firefox/3.5.5")
///     .unwrap();
/// assert_eq!(result.user_agent.family, "Firefox");
/// assert_eq!(result.os.major.as_deref(), Some("10"));
/// assert_eq!(result.device.family, "Mac");
/// ```
#[derive(Debug, Default)]
pub struct ClassifierBuilder {
    user_agent: Vec<RuleRecord>,
    os: Vec<RuleRecord>,
    device: Vec<RuleRecord>,
}

impl ClassifierBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a user-agent rule. The closure must call `.regex(..)`.
    #[must_use]
    pub fn user_agent_rule(mut self, f: impl FnOnce(RuleBuilder) -> RuleBuilder) -> Self {
        self.user_agent.push(RuleBuilder::build(f));
        self
    }

    #[must_use]
    pub fn os_rule(mut self, f: impl FnOnce(RuleBuilder) -> RuleBuilder) -> Self {
        self.os.push(RuleBuilder::build(f));
        self
    }

    #[must_use]
    pub fn device_rule(mut self, f: impl FnOnce(RuleBuilder) -> RuleBuilder) -> Self {
        self.device.push(RuleBuilder::build(f));
        self
    }

    /// Append already-built records to one facet.
    #[must_use]
    pub fn records(mut self, facet: FacetKind, records: impl IntoIterator<Item = RuleRecord>) -> Self {
        let target = match facet {
            FacetKind::UserAgent => &mut self.user_agent,
            FacetKind::Os => &mut self.os,
            FacetKind::Device => &mut self.device,
        };
        target.extend(records);
        self
    }

    /// Compile every rule into an immutable [`Classifier`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any rule lacks a regex or fails to compile.
    pub fn build(self) -> Result<Classifier, ConfigError> {
        Classifier::new(&self.user_agent, &self.os, &self.device)
    }
}

/// Runs the user-agent, OS, and device engines over the same input.
///
/// Immutable once built. Thread-safe and designed to live behind `Arc`.
#[derive(Debug)]
pub struct Classifier {
    user_agent: FacetEngine<UserAgentFacet>,
    os: FacetEngine<OsFacet>,
    device: FacetEngine<DeviceFacet>,
}

impl Classifier {
    #[must_use]
    pub fn builder() -> ClassifierBuilder {
        ClassifierBuilder::new()
    }

    /// Compile three ordered lists of rule records.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any record lacks a regex or fails to compile.
    pub fn new(
        user_agent: &[RuleRecord],
        os: &[RuleRecord],
        device: &[RuleRecord],
    ) -> Result<Self, ConfigError> {
        let classifier = Self::from_engines(
            FacetEngine::from_records(user_agent)?,
            FacetEngine::from_records(os)?,
            FacetEngine::from_records(device)?,
        );
        tracing::debug!(
            user_agent_rules = classifier.user_agent.len(),
            os_rules = classifier.os.len(),
            device_rules = classifier.device.len(),
            "classifier built"
        );
        Ok(classifier)
    }

    #[must_use]
    pub fn from_engines(
        user_agent: FacetEngine<UserAgentFacet>,
        os: FacetEngine<OsFacet>,
        device: FacetEngine<DeviceFacet>,
    ) -> Self {
        Self {
            user_agent,
            os,
            device,
        }
    }

    /// Classify all three facets. Absent input yields `None`.
    #[must_use]
    pub fn classify<'a>(&self, input: impl Into<Option<&'a str>>) -> Option<Classification> {
        input.into().map(|s| self.classify_str(s))
    }

    #[must_use]
    pub fn classify_user_agent<'a>(&self, input: impl Into<Option<&'a str>>) -> Option<UserAgent> {
        self.user_agent.parse(input)
    }

    #[must_use]
    pub fn classify_os<'a>(&self, input: impl Into<Option<&'a str>>) -> Option<Os> {
        self.os.parse(input)
    }

    /// Device family only.
    #[must_use]
    pub fn classify_device<'a>(&self, input: impl Into<Option<&'a str>>) -> Option<String> {
        self.device.parse(input).map(|d| d.family)
    }

    /// Device family together with brand and model.
    #[must_use]
    pub fn classify_device_detailed<'a>(&self, input: impl Into<Option<&'a str>>) -> Option<Device> {
        self.device.parse(input)
    }

    #[must_use]
    pub fn user_agent_engine(&self) -> &FacetEngine<UserAgentFacet> {
        &self.user_agent
    }

    #[must_use]
    pub fn os_engine(&self) -> &FacetEngine<OsFacet> {
        &self.os
    }

    #[must_use]
    pub fn device_engine(&self) -> &FacetEngine<DeviceFacet> {
        &self.device
    }
}

/// The compact ruleset shipped with the crate, in the `user_agent_parsers` /
/// `os_parsers` / `device_parsers` layout. It covers common browsers and
/// platforms; production deployments usually load a full ruleset instead.
#[cfg(feature = "yaml")]
pub const BUNDLED_RULESET: &str = include_str!("../rules/regexes.yaml");

#[cfg(feature = "yaml")]
impl Classifier {
    /// Compile [`BUNDLED_RULESET`].
    ///
    /// # Errors
    ///
    /// Returns [`UaError`](crate::UaError) if the bundled document fails to
    /// load.
    pub fn bundled() -> Result<Self, crate::UaError> {
        Self::from_yaml(BUNDLED_RULESET)
    }

    /// Parse a YAML ruleset document and compile it.
    ///
    /// # Errors
    ///
    /// Returns [`UaError`](crate::UaError) on YAML or configuration failure.
    pub fn from_yaml(input: &str) -> Result<Self, crate::UaError> {
        let parsed = crate::parse::parse_ruleset(input)?;
        let classifier = Self::new(&parsed.user_agent, &parsed.os, &parsed.device)?;
        Ok(classifier)
    }

    /// Read a YAML ruleset file and compile it.
    ///
    /// # Errors
    ///
    /// Returns [`UaError`](crate::UaError) on I/O, YAML, or configuration failure.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::UaError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading ruleset");
        let input = std::fs::read_to_string(path)?;
        Self::from_yaml(&input)
    }
}

impl Classify for Classifier {
    type Output = Classification;

    fn classify_str(&self, input: &str) -> Classification {
        Classification::new(
            self.user_agent.parse_str(input),
            self.os.parse_str(input),
            self.device.parse_str(input),
        )
    }
}

impl fmt::Display for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Classifier({} user agent rules, {} os rules, {} device rules)",
            self.user_agent.len(),
            self.os.len(),
            self.device.len(),
        )
    }
}
