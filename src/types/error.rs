use thiserror::Error;

use super::facet::FacetKind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{facet} rule #{index} is missing its regex")]
    MissingRegex { facet: FacetKind, index: usize },

    #[error("{facet} rule #{index} has an invalid regex: {source}")]
    InvalidRegex {
        facet: FacetKind,
        index: usize,
        #[source]
        source: regex::Error,
    },

    #[error("ruleset section '{section}' is missing")]
    MissingSection { section: &'static str },

    #[error("cache capacity must be a positive integer, got {capacity}")]
    InvalidCapacity { capacity: usize },
}
