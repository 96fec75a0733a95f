use std::fmt;
use std::marker::PhantomData;

use regex::Captures;

use crate::classifier::Classify;
use crate::types::{CompiledRule, ConfigError, Facet, FieldSpec, RuleRecord, Template};

/// An ordered list of compiled rules for one facet.
///
/// Rules are tried in insertion order and the first one that resolves a
/// lead field wins. When none does, the facet's fallback (`"Other"`) is
/// returned. Immutable after construction and safe to share across threads:
/// every call gets its own match state from [`regex::Regex::captures`].
pub struct FacetEngine<F: Facet> {
    rules: Vec<CompiledRule>,
    _facet: PhantomData<fn() -> F>,
}

impl<F: Facet> FacetEngine<F> {
    /// Compile rule records in order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for the first record that is missing its
    /// regex or fails to compile. No partial engine is produced.
    pub fn from_records(records: &[RuleRecord]) -> Result<Self, ConfigError> {
        let rules = records
            .iter()
            .enumerate()
            .map(|(index, record)| CompiledRule::compile::<F>(record, index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            rules,
            _facet: PhantomData,
        })
    }

    /// An engine with no rules; every input yields the fallback.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            _facet: PhantomData,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Classify `input`, returning `None` only for absent input.
    pub fn parse<'a>(&self, input: impl Into<Option<&'a str>>) -> Option<F::Output> {
        input.into().map(|s| self.parse_str(s))
    }

    /// Classify a present input string. Never fails.
    pub fn parse_str(&self, input: &str) -> F::Output {
        self.rules
            .iter()
            .find_map(|rule| match_rule::<F>(rule, input))
            .unwrap_or_else(F::fallback)
    }

    /// Patterns in priority order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> + '_ {
        self.rules.iter().map(|r| r.pattern.as_str())
    }
}

impl<F: Facet> Classify for FacetEngine<F> {
    type Output = F::Output;

    fn classify_str(&self, input: &str) -> F::Output {
        self.parse_str(input)
    }
}

impl<F: Facet> fmt::Debug for FacetEngine<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FacetEngine")
            .field("facet", &F::KIND)
            .field("rules", &self.rules.len())
            .finish()
    }
}

/// Apply one rule to `input`.
///
/// Returns `None` when the pattern does not match or when it matches but
/// the lead field resolves to nothing, so the caller moves on to the next
/// rule.
pub(crate) fn match_rule<F: Facet>(rule: &CompiledRule, input: &str) -> Option<F::Output> {
    let caps = rule.pattern.captures(input)?;
    let (lead_spec, rest_specs) = F::FIELDS.split_first()?;
    let (lead_template, rest_templates) = rule.templates.split_first()?;

    let family = resolve_lead(lead_template.as_ref(), lead_spec, &caps)?;
    let rest = rest_specs
        .iter()
        .zip(rest_templates)
        .map(|(spec, template)| resolve_field(template.as_ref(), spec, &caps))
        .collect();

    Some(F::assemble(family, rest))
}

fn resolve_lead(template: Option<&Template>, spec: &FieldSpec, caps: &Captures<'_>) -> Option<String> {
    match template {
        Some(t) if t.as_str().contains('$') => {
            Some(trim_control(&t.render(caps, spec.substitution)).to_owned())
        }
        Some(t) => Some(t.as_str().to_owned()),
        None => group(caps, spec.group),
    }
}

fn resolve_field(
    template: Option<&Template>,
    spec: &FieldSpec,
    caps: &Captures<'_>,
) -> Option<String> {
    let value = match template {
        Some(t) if t.has_placeholders() => Some(t.render(caps, spec.substitution)),
        Some(t) => Some(t.as_str().to_owned()),
        None => group(caps, spec.group),
    }?;

    if spec.trim {
        let trimmed = trim_control(&value);
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    } else {
        Some(value)
    }
}

/// Strip leading and trailing ASCII control characters and spaces. Other
/// Unicode whitespace such as U+00A0 is kept.
fn trim_control(s: &str) -> &str {
    s.trim_matches(|c: char| c <= ' ')
}

fn group(caps: &Captures<'_>, index: Option<usize>) -> Option<String> {
    index
        .and_then(|i| caps.get(i))
        .map(|m| m.as_str().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Device, DeviceFacet, Os, OsFacet, UserAgent, UserAgentFacet};

    fn ua_engine(records: &[RuleRecord]) -> FacetEngine<UserAgentFacet> {
        FacetEngine::from_records(records).unwrap()
    }

    #[test]
    fn groups_fill_fields_by_position() {
        let engine = ua_engine(&[RuleRecord::new(r"(Firefox)/(\d+)\.(\d+)\.(\d+)")]);
        assert_eq!(
            engine.parse_str("Gecko Firefox/3.5.5"),
            UserAgent::new("Firefox").with_version(Some("3"), Some("5"), Some("5"))
        );
    }

    #[test]
    fn search_is_unanchored() {
        let engine = ua_engine(&[RuleRecord::new(r"(Opera)")]);
        assert_eq!(engine.parse_str("xx Opera yy").family, "Opera");
    }

    #[test]
    fn family_placeholder_substitution() {
        let engine = ua_engine(&[
            RuleRecord::new(r"ABC([0-9]+)").with_replacement("family_replacement", "ABC ($1)")
        ]);
        assert_eq!(engine.parse_str("ABC123").family, "ABC (123)");
    }

    #[test]
    fn family_template_substitutes_only_first_group() {
        let engine = ua_engine(&[
            RuleRecord::new(r"(a)(b)").with_replacement("family_replacement", "$1 $2")
        ]);
        assert_eq!(engine.parse_str("ab").family, "a $2");
    }

    #[test]
    fn family_template_is_trimmed_after_substitution() {
        let engine = ua_engine(&[
            RuleRecord::new(r"X(\s*)").with_replacement("family_replacement", "$1Name ")
        ]);
        assert_eq!(engine.parse_str("X   ").family, "Name");
    }

    #[test]
    fn literal_family_template_is_verbatim() {
        let engine = ua_engine(&[
            RuleRecord::new(r"Foo").with_replacement("family_replacement", " Bar ")
        ]);
        assert_eq!(engine.parse_str("Foo").family, " Bar ");
    }

    #[test]
    fn version_template_referencing_missing_group_is_empty() {
        let engine = ua_engine(&[RuleRecord::new(r"(Tool)")
            .with_replacement("v1_replacement", "$2")]);
        let ua = engine.parse_str("Tool");
        assert_eq!(ua.major.as_deref(), Some(""));
    }

    #[test]
    fn version_templates_are_not_trimmed() {
        let engine = ua_engine(&[RuleRecord::new(r"(Tool)(\s)")
            .with_replacement("v1_replacement", "$2x")]);
        assert_eq!(engine.parse_str("Tool ").major.as_deref(), Some(" x"));
    }

    #[test]
    fn version_literal_template_overrides_group() {
        let engine = ua_engine(&[RuleRecord::new(r"(Edge)/(\d+)")
            .with_replacement("v1_replacement", "12")]);
        assert_eq!(engine.parse_str("Edge/99").major.as_deref(), Some("12"));
    }

    #[test]
    fn patch_resolves_independently_of_minor_template() {
        let engine = ua_engine(&[RuleRecord::new(r"(B)/(\d)\.(\d)\.(\d)")
            .with_replacement("v2_replacement", "x")]);
        let ua = engine.parse_str("B/1.2.3");
        assert_eq!(ua.minor.as_deref(), Some("x"));
        assert_eq!(ua.patch.as_deref(), Some("3"));
    }

    #[test]
    fn non_participating_group_is_absent() {
        let engine = ua_engine(&[RuleRecord::new(r"(Safari)/(\d+)(?:\.(\d+))?")]);
        let ua = engine.parse_str("Safari/7");
        assert_eq!(ua.major.as_deref(), Some("7"));
        assert_eq!(ua.minor, None);
        assert_eq!(ua.patch, None);
    }

    #[test]
    fn match_without_lead_value_falls_through() {
        let engine = ua_engine(&[
            RuleRecord::new(r"Mozilla"),
            RuleRecord::new(r"(Mozilla)/(\d+)"),
        ]);
        let ua = engine.parse_str("Mozilla/5.0");
        assert_eq!(ua.family, "Mozilla");
        assert_eq!(ua.major.as_deref(), Some("5"));
    }

    #[test]
    fn optional_lead_group_not_participating_falls_through() {
        let engine = ua_engine(&[RuleRecord::new(r"(Bot)?crawl"), RuleRecord::new(r"(crawl)")]);
        assert_eq!(engine.parse_str("webcrawl").family, "crawl");
    }

    #[test]
    fn first_matching_rule_wins() {
        let engine = ua_engine(&[
            RuleRecord::new(r"(Chrome)/(\d+)"),
            RuleRecord::new(r"(Safari)/(\d+)"),
        ]);
        assert_eq!(engine.parse_str("Chrome/26 Safari/537").family, "Chrome");
    }

    #[test]
    fn no_match_yields_other() {
        let engine = ua_engine(&[RuleRecord::new(r"(Firefox)")]);
        assert_eq!(engine.parse_str("curl/7.0"), UserAgent::other());
    }

    #[test]
    fn empty_engine_yields_other() {
        let engine = FacetEngine::<OsFacet>::empty();
        assert!(engine.is_empty());
        assert_eq!(engine.parse_str("anything"), Os::other());
    }

    #[test]
    fn absent_input_yields_none() {
        let engine = ua_engine(&[RuleRecord::new(r"(.*)")]);
        assert_eq!(engine.parse(None), None);
        assert!(engine.parse("x").is_some());
    }

    #[test]
    fn os_family_replaces_every_first_group() {
        let engine = FacetEngine::<OsFacet>::from_records(&[
            RuleRecord::new(r"(Win)dows").with_replacement("os_replacement", "$1/$1")
        ])
        .unwrap();
        assert_eq!(engine.parse_str("Windows").family, "Win/Win");
    }

    #[test]
    fn user_agent_family_replaces_only_first_occurrence() {
        let engine = ua_engine(&[
            RuleRecord::new("(Foo)").with_replacement("family_replacement", "$1 $1")
        ]);
        assert_eq!(engine.parse_str("Foo").family, "Foo $1");
    }

    #[test]
    fn trimming_keeps_unicode_spaces() {
        let engine = FacetEngine::<DeviceFacet>::from_records(&[RuleRecord::new(
            r"Box (.+)",
        )
        .with_replacement("device_replacement", " $1 ")
        .with_replacement("model_replacement", "$1\t")])
        .unwrap();
        let device = engine.parse_str("Box \u{a0}X\u{3000}");
        assert_eq!(device.family, "\u{a0}X\u{3000}");
        assert_eq!(device.model.as_deref(), Some("\u{a0}X\u{3000}"));
    }

    #[test]
    fn lone_dollar_template_is_trimmed() {
        let engine = FacetEngine::<DeviceFacet>::from_records(&[
            RuleRecord::new("Cash").with_replacement("device_replacement", " Cash$ ")
        ])
        .unwrap();
        assert_eq!(engine.parse_str("Cash").family, "Cash$");
    }

    #[test]
    fn os_patch_minor_always_absent() {
        let engine = FacetEngine::<OsFacet>::from_records(&[RuleRecord::new(
            r"(OS) (\d)\.(\d)\.(\d)\.(\d)",
        )])
        .unwrap();
        let os = engine.parse_str("OS 1.2.3.4");
        assert_eq!(os.patch.as_deref(), Some("3"));
        assert_eq!(os.patch_minor, None);
    }

    #[test]
    fn device_template_substitutes_all_groups_and_trims() {
        let engine = FacetEngine::<DeviceFacet>::from_records(&[RuleRecord::new(
            r"(Samsung)[ _-]?(SM-\w+)?",
        )
        .with_replacement("device_replacement", " $1 $2 ")])
        .unwrap();
        assert_eq!(engine.parse_str("Samsung SM-G900").family, "Samsung SM-G900");
        assert_eq!(engine.parse_str("Samsung").family, "Samsung");
    }

    #[test]
    fn device_brand_and_model() {
        let engine = FacetEngine::<DeviceFacet>::from_records(&[RuleRecord::new(
            r"(iPhone|iPad|iPod)(\d+,\d+)",
        )
        .with_replacement("device_replacement", "$1")
        .with_replacement("brand_replacement", "Apple")
        .with_replacement("model_replacement", "$1$2")])
        .unwrap();
        assert_eq!(
            engine.parse_str("(iPhone10,8 CatOS)"),
            Device::new("iPhone").with_brand("Apple").with_model("iPhone10,8")
        );
    }

    #[test]
    fn device_model_defaults_to_first_group() {
        let engine =
            FacetEngine::<DeviceFacet>::from_records(&[RuleRecord::new(r"; (Nexus \d+) Build")])
                .unwrap();
        let device = engine.parse_str("Android; Nexus 5 Build/KOT49H");
        assert_eq!(device.family, "Nexus 5");
        assert_eq!(device.model.as_deref(), Some("Nexus 5"));
        assert_eq!(device.brand, None);
    }

    #[test]
    fn device_empty_brand_is_absent() {
        let engine = FacetEngine::<DeviceFacet>::from_records(&[RuleRecord::new(r"(Box)(\d)?")
            .with_replacement("brand_replacement", " $2 ")])
        .unwrap();
        assert_eq!(engine.parse_str("Box").brand, None);
    }

    #[test]
    fn patterns_keep_insertion_order() {
        let engine = ua_engine(&[RuleRecord::new("b"), RuleRecord::new("a")]);
        assert_eq!(engine.patterns().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(engine.len(), 2);
    }

    #[test]
    fn construction_error_reports_rule_index() {
        let result = FacetEngine::<DeviceFacet>::from_records(&[
            RuleRecord::new("ok"),
            RuleRecord::new("(bad"),
        ]);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidRegex { index: 1, .. })
        ));
    }
}
