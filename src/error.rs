use thiserror::Error;

use crate::ConfigError;

/// Unified error type covering configuration, ruleset loading, and I/O.
///
/// Returned by convenience constructors like
/// [`Classifier::from_file()`](crate::Classifier::from_file).
#[derive(Debug, Error)]
pub enum UaError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[cfg(feature = "yaml")]
    #[error("invalid ruleset document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
