//! Regex-driven user-agent classification.
//!
//! A [`Classifier`] runs three independent rule engines (user agent, OS,
//! device) over the same input string. Each engine tries its rules in order;
//! the first rule whose pattern matches and yields a family wins, and its
//! capture groups are substituted into the rule's replacement templates.
//! [`CachedClassifier`] puts a bounded LRU cache in front of any
//! [`Classify`] implementation.

mod cache;
mod classifier;
mod engine;
mod error;
pub mod parse;
mod types;

pub use cache::{CacheStats, CachedClassifier, DEFAULT_CACHE_CAPACITY};
#[cfg(feature = "yaml")]
pub use classifier::BUNDLED_RULESET;
pub use classifier::{Classifier, ClassifierBuilder, Classify};
pub use engine::FacetEngine;
pub use error::UaError;
pub use types::{
    Classification, ConfigError, Device, DeviceFacet, Facet, FacetKind, FieldSpec, Os, OsFacet,
    RuleBuilder, RuleRecord, Substitution, Template, UserAgent, UserAgentFacet, OTHER_FAMILY,
};
