use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::criteria::{max_points, Criterion, CriterionId, CriterionKind, Tender};
use super::evaluation::{EvaluationConfig, DEFAULT_WEIGHT_TOLERANCE};

/// Tender definitions that would make scoring meaningless.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("tender defines no evaluation criteria")]
    NoCriteria,
    #[error("criterion '{0}' appears more than once")]
    DuplicateCriterion(String),
    #[error("criterion '{criterion}' weight {weight} must be within (0, 100]")]
    WeightOutOfRange { criterion: String, weight: f64 },
    #[error("criterion weights must sum to 100 (found {total:.2})")]
    WeightsDoNotSum { total: f64 },
    #[error("descriptive criterion '{0}' cannot be exclusionary")]
    DescriptiveExclusionary(String),
    #[error("scale criterion '{0}' defines no options")]
    EmptyScale(String),
    #[error("scale criterion '{0}' is scored or exclusionary but no option carries points")]
    ScaleWithoutPoints(String),
    #[error("numeric criterion '{criterion}' has a non-finite bound {bound}")]
    NonFiniteBound { criterion: String, bound: f64 },
    #[error("numeric criterion '{criterion}' has min {min} greater than max {max}")]
    InvertedBounds { criterion: String, min: f64, max: f64 },
}

/// Accepted configurations worth surfacing to whoever defined the tender.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationWarning {
    UnboundedNumeric { criterion: CriterionId },
    InertCriterion { criterion: CriterionId },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::UnboundedNumeric { criterion } => write!(
                f,
                "numeric criterion '{}' lacks min/max; raw responses are assumed to lie in [0, 1]",
                criterion.as_str()
            ),
            ValidationWarning::InertCriterion { criterion } => write!(
                f,
                "criterion '{}' carries weight but is neither scored nor exclusionary",
                criterion.as_str()
            ),
        }
    }
}

/// Validates criterion sets once, when the tender is defined.
#[derive(Debug, Clone)]
pub struct TenderValidator {
    weight_tolerance: f64,
}

impl Default for TenderValidator {
    fn default() -> Self {
        Self::with_tolerance(DEFAULT_WEIGHT_TOLERANCE)
    }
}

impl TenderValidator {
    pub fn with_tolerance(weight_tolerance: f64) -> Self {
        let sanitized = if weight_tolerance.is_finite() && weight_tolerance >= 0.0 {
            weight_tolerance
        } else {
            DEFAULT_WEIGHT_TOLERANCE
        };

        Self {
            weight_tolerance: sanitized,
        }
    }

    pub fn from_config(config: &EvaluationConfig) -> Self {
        Self::with_tolerance(config.weight_tolerance)
    }

    pub fn weight_tolerance(&self) -> f64 {
        self.weight_tolerance
    }

    /// Reject invalid criterion sets, returning non-fatal warnings otherwise.
    pub fn validate(&self, tender: &Tender) -> Result<Vec<ValidationWarning>, ConfigurationError> {
        if tender.criteria.is_empty() {
            return Err(ConfigurationError::NoCriteria);
        }

        let mut seen = HashSet::new();
        let mut warnings = Vec::new();

        for criterion in &tender.criteria {
            if !seen.insert(&criterion.id) {
                return Err(ConfigurationError::DuplicateCriterion(
                    criterion.id.as_str().to_string(),
                ));
            }

            if !criterion.weight.is_finite() || criterion.weight <= 0.0 || criterion.weight > 100.0
            {
                return Err(ConfigurationError::WeightOutOfRange {
                    criterion: criterion.id.as_str().to_string(),
                    weight: criterion.weight,
                });
            }

            validate_kind(criterion, &mut warnings)?;
        }

        let total: f64 = tender.criteria.iter().map(|criterion| criterion.weight).sum();
        if (total - 100.0).abs() > self.weight_tolerance {
            return Err(ConfigurationError::WeightsDoNotSum { total });
        }

        Ok(warnings)
    }
}

fn validate_kind(
    criterion: &Criterion,
    warnings: &mut Vec<ValidationWarning>,
) -> Result<(), ConfigurationError> {
    let id = || criterion.id.as_str().to_string();

    match &criterion.kind {
        CriterionKind::Descriptive => {
            if criterion.exclusionary {
                return Err(ConfigurationError::DescriptiveExclusionary(id()));
            }
            return Ok(());
        }
        CriterionKind::Numeric(rule) => {
            if let Some(bound) = [rule.min, rule.max]
                .into_iter()
                .flatten()
                .find(|bound| !bound.is_finite())
            {
                return Err(ConfigurationError::NonFiniteBound {
                    criterion: id(),
                    bound,
                });
            }
            if let (Some(min), Some(max)) = (rule.min, rule.max) {
                if min > max {
                    return Err(ConfigurationError::InvertedBounds {
                        criterion: id(),
                        min,
                        max,
                    });
                }
            } else if criterion.scorable {
                warnings.push(ValidationWarning::UnboundedNumeric {
                    criterion: criterion.id.clone(),
                });
            }
        }
        CriterionKind::Scale { options } => {
            if options.is_empty() {
                return Err(ConfigurationError::EmptyScale(id()));
            }
            if (criterion.scorable || criterion.exclusionary) && max_points(options).is_none() {
                return Err(ConfigurationError::ScaleWithoutPoints(id()));
            }
        }
        CriterionKind::Boolean { .. } => {}
    }

    if !criterion.scorable && !criterion.exclusionary {
        warnings.push(ValidationWarning::InertCriterion {
            criterion: criterion.id.clone(),
        });
    }

    Ok(())
}
