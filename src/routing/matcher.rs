//! Path template matching logic.
//!
//! # Responsibilities
//! - Parse templates into literal and placeholder segments
//! - Match request segments against a template
//! - Capture placeholder values in template order
//!
//! # Design Decisions
//! - Literal segments match case-sensitively
//! - A placeholder matches exactly one non-empty segment
//! - Segment counts must be equal, no wildcard suffixes
//! - No regex to guarantee O(n) matching

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One segment of a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
}

impl Segment {
    fn parse(raw: &str) -> Self {
        match raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(name) => Segment::Param(name.to_string()),
            None => Segment::Literal(raw.to_string()),
        }
    }

    fn matches(&self, value: &str) -> bool {
        match self {
            Segment::Literal(literal) => literal == value,
            Segment::Param(_) => !value.is_empty(),
        }
    }

    /// True if every value accepted by `other` is accepted by `self`.
    fn covers(&self, other: &Segment) -> bool {
        match (self, other) {
            (Segment::Param(_), _) => true,
            (Segment::Literal(a), Segment::Literal(b)) => a == b,
            (Segment::Literal(_), Segment::Param(_)) => false,
        }
    }
}

/// A captured placeholder value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathParam {
    pub name: String,
    pub value: String,
}

/// A slash-delimited path pattern such as `/banking/accounts/{accountId}`.
#[derive(Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            segments: split_segments(raw).into_iter().map(Segment::parse).collect(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholder names in template order.
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Returns true if the request segments match this template.
    pub fn matches(&self, segments: &[&str]) -> bool {
        self.segments.len() == segments.len()
            && self
                .segments
                .iter()
                .zip(segments)
                .all(|(template, value)| template.matches(value))
    }

    /// Match and capture placeholder values.
    pub fn captures(&self, segments: &[&str]) -> Option<Vec<PathParam>> {
        if !self.matches(segments) {
            return None;
        }
        let params = self
            .segments
            .iter()
            .zip(segments)
            .filter_map(|(template, value)| match template {
                Segment::Param(name) => Some(PathParam {
                    name: name.clone(),
                    value: (*value).to_string(),
                }),
                Segment::Literal(_) => None,
            })
            .collect();
        Some(params)
    }

    /// True if every path matched by `other` is also matched by `self`.
    /// An earlier template that shadows a later one makes the later unreachable.
    pub fn shadows(&self, other: &PathTemplate) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| a.covers(b))
    }
}

impl fmt::Debug for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PathTemplate({:?})", self.raw)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.raw)
    }
}

impl Serialize for PathTemplate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for PathTemplate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(PathTemplate::parse(&raw))
    }
}

/// Split a path into segments, ignoring the leading slash and one trailing slash.
pub fn split_segments(path: &str) -> Vec<&str> {
    let path = path.strip_prefix('/').unwrap_or(path);
    let path = path.strip_suffix('/').unwrap_or(path);
    if path.is_empty() {
        return Vec::new();
    }
    path.split('/').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_ignores_trailing_slash() {
        assert_eq!(split_segments("/energy/accounts/"), vec!["energy", "accounts"]);
        assert_eq!(split_segments("/energy/accounts"), vec!["energy", "accounts"]);
        assert!(split_segments("/").is_empty());
        assert!(split_segments("").is_empty());
    }

    #[test]
    fn test_literal_and_param_matching() {
        let template = PathTemplate::parse("/energy/accounts/{accountId}/balance");

        assert!(template.matches(&["energy", "accounts", "123", "balance"]));
        assert!(!template.matches(&["energy", "accounts", "", "balance"]));
        assert!(!template.matches(&["energy", "Accounts", "123", "balance"])); // Case sensitive
        assert!(!template.matches(&["energy", "accounts", "123"]));
    }

    #[test]
    fn test_multi_segment_suffix_is_literal() {
        let template = PathTemplate::parse("/banking/accounts/{accountId}/payments/scheduled");

        assert!(template.matches(&["banking", "accounts", "1", "payments", "scheduled"]));
        assert!(!template.matches(&["banking", "accounts", "1", "payments", "other"]));
    }

    #[test]
    fn test_captures_in_template_order() {
        let template =
            PathTemplate::parse("/banking/accounts/{accountId}/transactions/{transactionId}");
        let params = template
            .captures(&["banking", "accounts", "42", "transactions", "t-9"])
            .unwrap();

        assert_eq!(params.len(), 2);
        assert_eq!(params[0], PathParam { name: "accountId".into(), value: "42".into() });
        assert_eq!(params[1], PathParam { name: "transactionId".into(), value: "t-9".into() });
        assert_eq!(template.params().collect::<Vec<_>>(), vec!["accountId", "transactionId"]);
    }

    #[test]
    fn test_shadowing() {
        let param = PathTemplate::parse("/banking/accounts/{accountId}");
        let literal = PathTemplate::parse("/banking/accounts/balances");

        assert!(param.shadows(&literal));
        assert!(!literal.shadows(&param));
        assert!(literal.shadows(&literal.clone()));
    }
}
