use log::warn;
use serde::{Deserialize, Serialize};

/// How a rule's value is matched against a tournament name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKind {
    #[serde(alias = "has")]
    Contains,
    #[serde(alias = "starts")]
    StartsWith,
    #[serde(alias = "ends")]
    EndsWith,
    #[serde(alias = "hasnot")]
    NotContains,
    /// Kind stored by something we don't understand; never matches
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRule {
    #[serde(alias = "type")]
    pub kind: FilterKind,
    #[serde(default)]
    pub value: String,
}

impl FilterRule {
    pub fn new(kind: FilterKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Case-insensitive match against a tournament name
    pub fn matches(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        let value = self.value.to_lowercase();
        match self.kind {
            FilterKind::Contains => name.contains(&value),
            FilterKind::StartsWith => name.starts_with(&value),
            FilterKind::EndsWith => name.ends_with(&value),
            FilterKind::NotContains => !name.contains(&value),
            FilterKind::Unknown => false,
        }
    }
}

/// Include/exclude rules attached to a tier.
///
/// Exclusion always wins; an empty include list lets everything through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRuleSet {
    #[serde(default, alias = "include")]
    pub include_rules: Vec<FilterRule>,
    #[serde(default, alias = "exclude")]
    pub exclude_rules: Vec<FilterRule>,
}

impl FilterRuleSet {
    /// Read a stored rule set; missing or malformed JSON yields the empty set
    pub fn from_json(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Self::default();
        };
        match serde_json::from_str::<Option<Self>>(raw) {
            Ok(rules) => rules.unwrap_or_default(),
            Err(e) => {
                warn!("Ignoring malformed filter rules {:?}: {}", raw, e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn is_empty(&self) -> bool {
        self.include_rules.is_empty() && self.exclude_rules.is_empty()
    }

    pub fn evaluate(&self, name: &str) -> bool {
        let included = self.include_rules.is_empty()
            || self.include_rules.iter().any(|rule| rule.matches(name));
        let excluded = self.exclude_rules.iter().any(|rule| rule.matches(name));
        included && !excluded
    }
}

/// Anything that can be filtered by name
pub trait Named {
    fn name(&self) -> &str;
}

/// Decide whether a record is shown under the given rules
pub fn evaluate<T: Named>(record: &T, rules: &FilterRuleSet) -> bool {
    rules.evaluate(record.name())
}
