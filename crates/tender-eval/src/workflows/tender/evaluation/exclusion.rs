use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::super::criteria::{find_option, Criterion, CriterionId, CriterionKind};
use super::super::proposal::ResponseValue;

/// Why a proposal failed an exclusionary criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExclusionReason {
    MissingResponse,
    OutOfRange {
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
    },
    RequiredValueMismatch {
        required: bool,
    },
    FailingOption {
        value: String,
    },
    UnknownOption {
        value: String,
    },
}

impl ExclusionReason {
    pub fn summary(&self) -> String {
        match self {
            ExclusionReason::MissingResponse => "no valid response provided".to_string(),
            ExclusionReason::OutOfRange { value, min, max } => {
                let bound = |bound: &Option<f64>| {
                    bound.map_or_else(|| "unbounded".to_string(), |value| value.to_string())
                };
                format!(
                    "value {} outside accepted range [{}, {}]",
                    value,
                    bound(min),
                    bound(max)
                )
            }
            ExclusionReason::RequiredValueMismatch { required } => {
                let expected = if *required { "yes" } else { "no" };
                format!("required answer '{expected}' not met")
            }
            ExclusionReason::FailingOption { value } => {
                format!("option '{value}' does not meet the minimum")
            }
            ExclusionReason::UnknownOption { value } => {
                format!("option '{value}' is not offered on this criterion")
            }
        }
    }
}

/// A failed exclusionary criterion, reported back to the supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExclusionFailure {
    pub criterion_id: CriterionId,
    pub label: String,
    pub reason: ExclusionReason,
}

impl ExclusionFailure {
    pub fn summary(&self) -> String {
        format!("{}: {}", self.label, self.reason.summary())
    }
}

/// Disqualification verdict for one proposal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExclusionVerdict {
    pub disqualified: bool,
    pub failed: Vec<ExclusionFailure>,
}

/// Check every exclusionary criterion, collecting all failures in tender order.
pub fn evaluate_exclusions(
    criteria: &[Criterion],
    responses: &BTreeMap<CriterionId, ResponseValue>,
) -> ExclusionVerdict {
    let failed: Vec<ExclusionFailure> = criteria
        .iter()
        .filter(|criterion| criterion.gates_exclusion())
        .filter_map(|criterion| {
            check(criterion, responses.get(&criterion.id)).map(|reason| ExclusionFailure {
                criterion_id: criterion.id.clone(),
                label: criterion.label().to_string(),
                reason,
            })
        })
        .collect();

    ExclusionVerdict {
        disqualified: !failed.is_empty(),
        failed,
    }
}

fn check(criterion: &Criterion, response: Option<&ResponseValue>) -> Option<ExclusionReason> {
    match &criterion.kind {
        CriterionKind::Numeric(rule) => match response.and_then(ResponseValue::as_number) {
            None => Some(ExclusionReason::MissingResponse),
            Some(value) if rule.contains(value) => None,
            Some(value) => Some(ExclusionReason::OutOfRange {
                value,
                min: rule.min,
                max: rule.max,
            }),
        },
        CriterionKind::Boolean { required_value } => {
            match response.and_then(ResponseValue::as_flag) {
                None => Some(ExclusionReason::MissingResponse),
                Some(answer) if answer == *required_value => None,
                Some(_) => Some(ExclusionReason::RequiredValueMismatch {
                    required: *required_value,
                }),
            }
        }
        CriterionKind::Scale { options } => {
            let Some(answer) = response.and_then(ResponseValue::as_choice) else {
                return Some(ExclusionReason::MissingResponse);
            };
            match find_option(options, &answer) {
                None => Some(ExclusionReason::UnknownOption { value: answer }),
                Some(option) if option.points.is_some_and(|points| points > 0.0) => None,
                Some(option) => Some(ExclusionReason::FailingOption {
                    value: option.value.clone(),
                }),
            }
        }
        CriterionKind::Descriptive => None,
    }
}
