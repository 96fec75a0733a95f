use std::collections::BTreeMap;

use serde::Deserialize;
use serde_yaml::Value;

use crate::{ConfigError, FacetKind, RuleRecord, UaError};

/// Rule records read from a ruleset document, one list per facet, in
/// document order.
#[derive(Debug, Default)]
pub struct ParsedRuleset {
    pub user_agent: Vec<RuleRecord>,
    pub os: Vec<RuleRecord>,
    pub device: Vec<RuleRecord>,
}

#[derive(Debug, Deserialize)]
struct RulesetDocument {
    user_agent_parsers: Option<Vec<BTreeMap<String, Value>>>,
    os_parsers: Option<Vec<BTreeMap<String, Value>>>,
    device_parsers: Option<Vec<BTreeMap<String, Value>>>,
}

/// Parse a YAML ruleset in the `user_agent_parsers` / `os_parsers` /
/// `device_parsers` layout.
///
/// Scalar values are taken as text (`os_v1_replacement: 10` reads as
/// `"10"`); `null` values count as absent.
///
/// # Errors
///
/// Returns [`UaError::Yaml`] if the document is malformed and
/// [`ConfigError::MissingSection`] (wrapped) if a section is absent.
pub fn parse_ruleset(input: &str) -> Result<ParsedRuleset, UaError> {
    let doc: RulesetDocument = serde_yaml::from_str(input)?;
    Ok(ParsedRuleset {
        user_agent: section(doc.user_agent_parsers, FacetKind::UserAgent)?,
        os: section(doc.os_parsers, FacetKind::Os)?,
        device: section(doc.device_parsers, FacetKind::Device)?,
    })
}

fn section(
    entries: Option<Vec<BTreeMap<String, Value>>>,
    facet: FacetKind,
) -> Result<Vec<RuleRecord>, ConfigError> {
    let entries = entries.ok_or(ConfigError::MissingSection {
        section: facet.section(),
    })?;
    Ok(entries.into_iter().map(to_record).collect())
}

fn to_record(entry: BTreeMap<String, Value>) -> RuleRecord {
    let mut record = RuleRecord::default();
    for (key, value) in entry {
        let Some(text) = scalar_text(value) else {
            continue;
        };
        match key.as_str() {
            "regex" => record.regex = Some(text),
            "regex_flag" => record.regex_flag = Some(text),
            _ => {
                record.replacements.insert(key, text);
            }
        }
    }
    record
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}
