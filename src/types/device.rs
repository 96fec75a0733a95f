use std::fmt;

use super::facet::OTHER_FAMILY;

/// Hardware device identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[must_use]
pub struct Device {
    pub family: String,
    pub brand: Option<String>,
    pub model: Option<String>,
}

impl Device {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            brand: None,
            model: None,
        }
    }

    pub fn other() -> Self {
        Self::new(OTHER_FAMILY)
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.family)
    }
}
