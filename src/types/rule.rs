use std::collections::BTreeMap;

use regex::{Regex, RegexBuilder};

use super::error::ConfigError;
use super::facet::Facet;
use super::template::Template;

/// `regex_flag` values that switch on case-insensitive matching.
const CASE_INSENSITIVE_FLAGS: &[&str] = &["i", "case-insensitive"];

/// A raw rule as it appears in a ruleset: a pattern, an optional flag, and
/// replacement templates keyed by field (`family_replacement`,
/// `os_v1_replacement`, `device_replacement`, ...).
///
/// Records are validated only when compiled into a
/// [`FacetEngine`](crate::FacetEngine).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleRecord {
    pub regex: Option<String>,
    pub regex_flag: Option<String>,
    pub replacements: BTreeMap<String, String>,
}

impl RuleRecord {
    #[must_use]
    pub fn new(regex: impl Into<String>) -> Self {
        Self {
            regex: Some(regex.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.regex_flag = Some(flag.into());
        self
    }

    #[must_use]
    pub fn with_replacement(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.replacements.insert(key.into(), template.into());
        self
    }

    /// The replacement template stored under `key`, if any.
    #[must_use]
    pub fn replacement(&self, key: &str) -> Option<&str> {
        self.replacements.get(key).map(String::as_str)
    }

    fn is_case_insensitive(&self) -> bool {
        self.regex_flag
            .as_deref()
            .is_some_and(|flag| CASE_INSENSITIVE_FLAGS.contains(&flag))
    }
}

/// Intermediate builder passed to the rule definition closures of
/// [`ClassifierBuilder`](crate::ClassifierBuilder).
#[derive(Debug, Default)]
pub struct RuleBuilder {
    record: RuleRecord,
}

impl RuleBuilder {
    /// Set the pattern. Compilation fails with
    /// [`ConfigError::MissingRegex`] if this is never called.
    #[must_use]
    pub fn regex(mut self, pattern: impl Into<String>) -> Self {
        self.record.regex = Some(pattern.into());
        self
    }

    #[must_use]
    pub fn flag(mut self, flag: impl Into<String>) -> Self {
        self.record.regex_flag = Some(flag.into());
        self
    }

    /// Set the replacement template for one field, e.g.
    /// `.replace("family_replacement", "Mobile Safari")`.
    #[must_use]
    pub fn replace(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.record.replacements.insert(key.into(), template.into());
        self
    }

    pub(crate) fn build(f: impl FnOnce(Self) -> Self) -> RuleRecord {
        f(Self::default()).record
    }
}

/// A rule whose pattern and templates have been compiled for one facet.
///
/// `templates` is aligned with [`Facet::FIELDS`].
#[derive(Debug, Clone)]
pub(crate) struct CompiledRule {
    pub(crate) pattern: Regex,
    pub(crate) templates: Vec<Option<Template>>,
}

impl CompiledRule {
    pub(crate) fn compile<F: Facet>(record: &RuleRecord, index: usize) -> Result<Self, ConfigError> {
        let source = record.regex.as_deref().ok_or(ConfigError::MissingRegex {
            facet: F::KIND,
            index,
        })?;

        let case_insensitive = if F::HONORS_REGEX_FLAG {
            record.is_case_insensitive()
        } else {
            if let Some(flag) = &record.regex_flag {
                tracing::debug!(facet = %F::KIND, index, flag, "ignoring regex_flag");
            }
            false
        };

        let pattern = RegexBuilder::new(source)
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|source| ConfigError::InvalidRegex {
                facet: F::KIND,
                index,
                source,
            })?;

        let templates = F::FIELDS
            .iter()
            .map(|field| record.replacement(field.key).map(Template::new))
            .collect();

        Ok(Self { pattern, templates })
    }
}
