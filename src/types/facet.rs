use std::fmt;

use super::device::Device;
use super::os::Os;
use super::template::Substitution;
use super::user_agent::UserAgent;

/// Family reported by every facet when no rule matches.
pub const OTHER_FAMILY: &str = "Other";

/// The three independent classification dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacetKind {
    UserAgent,
    Os,
    Device,
}

impl FacetKind {
    /// Name of the ruleset section holding this facet's rules.
    #[must_use]
    pub fn section(self) -> &'static str {
        match self {
            Self::UserAgent => "user_agent_parsers",
            Self::Os => "os_parsers",
            Self::Device => "device_parsers",
        }
    }
}

impl fmt::Display for FacetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UserAgent => "user_agent",
            Self::Os => "os",
            Self::Device => "device",
        })
    }
}

/// How one output field of a facet is resolved from a matching rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Rule record key holding this field's replacement template.
    pub key: &'static str,
    /// Capture group used when the rule has no template for this field.
    pub group: Option<usize>,
    pub substitution: Substitution,
    /// Trim the resolved value and treat an empty result as absent.
    /// The lead field ignores this; it is always trimmed after substitution.
    pub trim: bool,
}

impl FieldSpec {
    const fn version(key: &'static str, group: usize) -> Self {
        Self {
            key,
            group: Some(group),
            substitution: Substitution::AllGroups,
            trim: false,
        }
    }
}

/// Per-facet configuration of the shared match-and-substitute algorithm.
///
/// A facet names its output fields (lead field first), how each one is
/// resolved, and how the resolved values are packaged into the facet's
/// result type. [`FacetEngine`](crate::FacetEngine) does the rest.
pub trait Facet: Send + Sync + 'static {
    type Output: Clone + fmt::Debug + PartialEq + Send + Sync;

    const KIND: FacetKind;

    /// Output fields in order. The first entry is the lead (family) field.
    const FIELDS: &'static [FieldSpec];

    /// Whether `regex_flag` is honoured when compiling this facet's rules.
    const HONORS_REGEX_FLAG: bool = false;

    /// Build the result from the resolved lead value and the remaining
    /// fields, which arrive in [`FIELDS`](Self::FIELDS) order.
    fn assemble(family: String, rest: Vec<Option<String>>) -> Self::Output;

    /// Result returned when no rule matches.
    fn fallback() -> Self::Output {
        Self::assemble(
            OTHER_FAMILY.to_owned(),
            vec![None; Self::FIELDS.len().saturating_sub(1)],
        )
    }
}

/// Browser or other client software.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserAgentFacet;

/// Operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFacet;

/// Hardware device.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceFacet;

impl Facet for UserAgentFacet {
    type Output = UserAgent;

    const KIND: FacetKind = FacetKind::UserAgent;

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec {
            key: "family_replacement",
            group: Some(1),
            substitution: Substitution::FirstGroupOnce,
            trim: false,
        },
        FieldSpec::version("v1_replacement", 2),
        FieldSpec::version("v2_replacement", 3),
        FieldSpec::version("v3_replacement", 4),
    ];

    fn assemble(family: String, rest: Vec<Option<String>>) -> UserAgent {
        let mut rest = rest.into_iter();
        UserAgent {
            family,
            major: rest.next().flatten(),
            minor: rest.next().flatten(),
            patch: rest.next().flatten(),
        }
    }
}

impl Facet for OsFacet {
    type Output = Os;

    const KIND: FacetKind = FacetKind::Os;

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec {
            key: "os_replacement",
            group: Some(1),
            substitution: Substitution::FirstGroupOnly,
            trim: false,
        },
        FieldSpec::version("os_v1_replacement", 2),
        FieldSpec::version("os_v2_replacement", 3),
        FieldSpec::version("os_v3_replacement", 4),
    ];

    fn assemble(family: String, rest: Vec<Option<String>>) -> Os {
        let mut rest = rest.into_iter();
        Os {
            family,
            major: rest.next().flatten(),
            minor: rest.next().flatten(),
            patch: rest.next().flatten(),
            patch_minor: None,
        }
    }
}

impl Facet for DeviceFacet {
    type Output = Device;

    const KIND: FacetKind = FacetKind::Device;

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec {
            key: "device_replacement",
            group: Some(1),
            substitution: Substitution::AllGroups,
            trim: false,
        },
        FieldSpec {
            key: "brand_replacement",
            group: None,
            substitution: Substitution::AllGroups,
            trim: true,
        },
        FieldSpec {
            key: "model_replacement",
            group: Some(1),
            substitution: Substitution::AllGroups,
            trim: true,
        },
    ];

    const HONORS_REGEX_FLAG: bool = true;

    fn assemble(family: String, rest: Vec<Option<String>>) -> Device {
        let mut rest = rest.into_iter();
        Device {
            family,
            brand: rest.next().flatten(),
            model: rest.next().flatten(),
        }
    }
}
