use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::criteria::CriterionId;

/// Identifier wrapper for submitted proposals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProposalId(pub String);

impl ProposalId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

/// One supplier's submission against a tender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub responses: BTreeMap<CriterionId, ResponseValue>,
}

impl Proposal {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: ProposalId::new(id),
            supplier: None,
            submitted_at: None,
            responses: BTreeMap::new(),
        }
    }

    pub fn with_response(mut self, criterion: impl Into<String>, value: ResponseValue) -> Self {
        self.responses.insert(CriterionId::new(criterion), value);
        self
    }

    pub fn response(&self, criterion: &CriterionId) -> Option<&ResponseValue> {
        self.responses.get(criterion)
    }
}

/// Raw supplier answer as received from the calling layer.
///
/// The value is not tagged with a criterion kind; each kind interprets it through the
/// accessors below, and anything it cannot interpret is handled as an absent answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl ResponseValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Numeric reading; text is parsed leniently and non-finite values are rejected.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            ResponseValue::Number(value) => *value,
            ResponseValue::Text(raw) => raw.trim().replace(',', ".").parse::<f64>().ok()?,
            ResponseValue::Flag(_) => return None,
        };

        if value.is_finite() {
            Some(value)
        } else {
            None
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ResponseValue::Flag(value) => Some(*value),
            ResponseValue::Text(raw) => parse_flag(raw),
            ResponseValue::Number(_) => None,
        }
    }

    /// Textual reading used for scale option matching and descriptive answers.
    pub fn as_choice(&self) -> Option<String> {
        match self {
            ResponseValue::Text(raw) if !raw.trim().is_empty() => Some(raw.trim().to_string()),
            ResponseValue::Text(_) => None,
            ResponseValue::Number(value) => Some(value.to_string()),
            ResponseValue::Flag(_) => None,
        }
    }
}

pub(crate) fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "si" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

/// Stable pre-sort by submission time so that equal scores keep earliest-first order.
///
/// Proposals without a timestamp keep their relative order after the timestamped ones.
pub fn order_by_submission(proposals: &mut [Proposal]) {
    proposals.sort_by(|left, right| match (left.submitted_at, right.submitted_at) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn numeric_text_is_parsed_leniently() {
        assert_eq!(ResponseValue::text(" 12,5 ").as_number(), Some(12.5));
        assert_eq!(ResponseValue::text("twelve").as_number(), None);
        assert_eq!(ResponseValue::Number(f64::NAN).as_number(), None);
        assert_eq!(ResponseValue::text("inf").as_number(), None);
        assert_eq!(ResponseValue::text("-Infinity").as_number(), None);
        assert_eq!(ResponseValue::Number(f64::INFINITY).as_number(), None);
        assert_eq!(ResponseValue::Flag(true).as_number(), None);
    }

    #[test]
    fn flag_text_accepts_common_spellings() {
        assert_eq!(ResponseValue::text("Yes").as_flag(), Some(true));
        assert_eq!(ResponseValue::text("no").as_flag(), Some(false));
        assert_eq!(ResponseValue::text("maybe").as_flag(), None);
        assert_eq!(ResponseValue::Number(1.0).as_flag(), None);
    }

    #[test]
    fn untagged_json_maps_to_response_variants() {
        let parsed: Vec<ResponseValue> =
            serde_json::from_str(r#"[true, 42.5, "Full"]"#).expect("valid json");
        assert_eq!(
            parsed,
            vec![
                ResponseValue::Flag(true),
                ResponseValue::Number(42.5),
                ResponseValue::text("Full"),
            ]
        );
    }

    #[test]
    fn order_by_submission_puts_earliest_first_and_missing_last() {
        let at = |day| Utc.with_ymd_and_hms(2025, 3, day, 9, 0, 0).single();
        let mut late = Proposal::new("late");
        late.submitted_at = at(12);
        let unknown = Proposal::new("unknown");
        let mut early = Proposal::new("early");
        early.submitted_at = at(3);

        let mut proposals = vec![late, unknown, early];
        order_by_submission(&mut proposals);

        let ids: Vec<_> = proposals.iter().map(|p| p.id.0.as_str()).collect();
        assert_eq!(ids, vec!["early", "late", "unknown"]);
    }
}
