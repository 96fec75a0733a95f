mod classification;
mod device;
mod error;
mod facet;
mod os;
mod rule;
mod template;
mod user_agent;

pub use classification::Classification;
pub use device::Device;
pub use error::ConfigError;
pub use facet::{DeviceFacet, Facet, FacetKind, FieldSpec, OsFacet, UserAgentFacet, OTHER_FAMILY};
pub use os::Os;
pub use rule::{RuleBuilder, RuleRecord};
pub use template::{Substitution, Template};
pub use user_agent::UserAgent;

pub(crate) use rule::CompiledRule;
pub(crate) use template::Segment;

/// Join the leading present version components with dots.
fn join_version(parts: &[&Option<String>]) -> Option<String> {
    let present: Vec<&str> = parts
        .iter()
        .map_while(|p| p.as_deref())
        .collect();
    (!present.is_empty()).then(|| present.join("."))
}
