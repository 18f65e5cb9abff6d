use serde::{Deserialize, Serialize};
use tracing::debug;

use super::super::criteria::{find_option, max_points, Criterion, CriterionKind, NumericRule, ScaleOption};
use super::super::proposal::ResponseValue;

/// Outcome of mapping one response onto the comparable [0, 1] range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizedValue {
    Score(f64),
    NotApplicable,
}

impl NormalizedValue {
    pub fn score(self) -> Option<f64> {
        match self {
            NormalizedValue::Score(score) => Some(score),
            NormalizedValue::NotApplicable => None,
        }
    }
}

const NONE: NormalizedValue = NormalizedValue::Score(0.0);

/// Normalize a supplier response according to its criterion's kind.
///
/// Missing or unreadable responses never fail; they score zero.
pub fn normalize(criterion: &Criterion, response: Option<&ResponseValue>) -> NormalizedValue {
    match &criterion.kind {
        CriterionKind::Numeric(rule) => match response.map(ResponseValue::as_number) {
            Some(Some(value)) => normalize_numeric(rule, value),
            Some(None) => {
                debug!(criterion = %criterion.id.as_str(), "unreadable numeric response scored as zero");
                NONE
            }
            None => NONE,
        },
        CriterionKind::Boolean { required_value } => {
            match response.and_then(ResponseValue::as_flag) {
                Some(answer) if answer == *required_value => NormalizedValue::Score(1.0),
                _ => NONE,
            }
        }
        CriterionKind::Scale { options } => normalize_scale(criterion, options, response),
        CriterionKind::Descriptive => NormalizedValue::NotApplicable,
    }
}

fn normalize_numeric(rule: &NumericRule, value: f64) -> NormalizedValue {
    let Some((min, max)) = rule.bounds() else {
        // Unbounded criteria expect producers to send values already in [0, 1].
        return NormalizedValue::Score(value.clamp(0.0, 1.0));
    };

    if max <= min {
        return NormalizedValue::Score(1.0);
    }

    let clamped = value.clamp(min, max);
    let fraction = (clamped - min) / (max - min);
    let fraction = if rule.higher_is_better {
        fraction
    } else {
        1.0 - fraction
    };

    NormalizedValue::Score(fraction.clamp(0.0, 1.0))
}

fn normalize_scale(
    criterion: &Criterion,
    options: &[ScaleOption],
    response: Option<&ResponseValue>,
) -> NormalizedValue {
    let Some(best) = max_points(options) else {
        return NormalizedValue::NotApplicable;
    };

    let points = match response.and_then(ResponseValue::as_choice) {
        Some(answer) => match find_option(options, &answer) {
            Some(option) => option.points.unwrap_or(0.0),
            None => {
                debug!(criterion = %criterion.id.as_str(), %answer, "unknown scale option scored as zero");
                0.0
            }
        },
        None => 0.0,
    };

    if best <= 0.0 {
        return NONE;
    }

    NormalizedValue::Score((points / best).clamp(0.0, 1.0))
}
