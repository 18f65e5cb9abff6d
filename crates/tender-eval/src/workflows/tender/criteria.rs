use serde::{Deserialize, Serialize};

/// Identifier wrapper for a tender.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenderId(pub String);

/// Identifier of one evaluation criterion, unique within its tender.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CriterionId(pub String);

impl CriterionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A published request for proposals and its ordered evaluation criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tender {
    pub id: TenderId,
    #[serde(default)]
    pub title: String,
    pub criteria: Vec<Criterion>,
}

impl Tender {
    pub fn criterion(&self, id: &CriterionId) -> Option<&Criterion> {
        self.criteria.iter().find(|criterion| &criterion.id == id)
    }
}

/// One evaluation dimension of a tender together with its scoring rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: CriterionId,
    #[serde(default)]
    pub name: String,
    pub weight: f64,
    #[serde(default)]
    pub exclusionary: bool,
    #[serde(default = "default_scorable")]
    pub scorable: bool,
    pub kind: CriterionKind,
}

fn default_scorable() -> bool {
    true
}

impl Criterion {
    /// Label reported back to suppliers; falls back to the id for unnamed criteria.
    pub fn label(&self) -> &str {
        if self.name.trim().is_empty() {
            self.id.as_str()
        } else {
            &self.name
        }
    }

    /// Descriptive criteria never contribute points, whatever the flag says.
    pub fn contributes_score(&self) -> bool {
        self.scorable && !matches!(self.kind, CriterionKind::Descriptive)
    }

    /// Descriptive criteria are never evaluated as exclusion gates.
    pub fn gates_exclusion(&self) -> bool {
        self.exclusionary && !matches!(self.kind, CriterionKind::Descriptive)
    }
}

/// Closed set of criterion kinds, each carrying only the configuration it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CriterionKind {
    Numeric(NumericRule),
    Boolean { required_value: bool },
    Scale { options: Vec<ScaleOption> },
    Descriptive,
}

impl CriterionKind {
    pub const fn label(&self) -> &'static str {
        match self {
            CriterionKind::Numeric(_) => "numeric",
            CriterionKind::Boolean { .. } => "boolean",
            CriterionKind::Scale { .. } => "scale",
            CriterionKind::Descriptive => "descriptive",
        }
    }
}

/// Normalization and pass range for numeric criteria. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRule {
    #[serde(default = "default_higher_is_better")]
    pub higher_is_better: bool,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

fn default_higher_is_better() -> bool {
    true
}

impl NumericRule {
    /// Both bounds, when both are set and finite.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min.is_finite() && max.is_finite() => Some((min, max)),
            _ => None,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// A selectable answer on a scale criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleOption {
    pub value: String,
    #[serde(default)]
    pub points: Option<f64>,
}

impl ScaleOption {
    pub fn new(value: impl Into<String>, points: Option<f64>) -> Self {
        Self {
            value: value.into(),
            points,
        }
    }
}

/// Find the option matching a supplier's answer, ignoring surrounding whitespace and case.
/// Numeric answers also match options whose value parses to the same number ("4" and "4.0").
pub(crate) fn find_option<'a>(options: &'a [ScaleOption], answer: &str) -> Option<&'a ScaleOption> {
    let answer = answer.trim();
    let numeric_answer = parse_finite(answer);
    options.iter().find(|option| {
        let value = option.value.trim();
        value.eq_ignore_ascii_case(answer)
            || matches!(
                (numeric_answer, parse_finite(value)),
                (Some(left), Some(right)) if left == right
            )
    })
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Highest points value across the options, ignoring options without points.
pub(crate) fn max_points(options: &[ScaleOption]) -> Option<f64> {
    options
        .iter()
        .filter_map(|option| option.points)
        .filter(|points| points.is_finite())
        .fold(None, |best, points| match best {
            Some(current) if current >= points => Some(current),
            _ => Some(points),
        })
}
