mod aggregator;
mod config;
mod exclusion;
mod normalizer;
mod ranking;

pub use aggregator::aggregate;
pub use config::{EvaluationConfig, DEFAULT_WEIGHT_TOLERANCE};
pub use exclusion::{evaluate_exclusions, ExclusionFailure, ExclusionReason, ExclusionVerdict};
pub use normalizer::{normalize, NormalizedValue};
pub use ranking::{evaluate_proposal, rank, RankedProposal, Ranking};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::criteria::{Criterion, CriterionId, Tender};
use super::proposal::Proposal;
use super::validation::{ConfigurationError, TenderValidator};

/// Engine bound to one validated tender; holds no state between evaluations.
#[derive(Debug, Clone)]
pub struct EvaluationEngine {
    tender: Tender,
}

impl EvaluationEngine {
    /// Validate the tender's criteria once and build an engine for it.
    pub fn for_tender(tender: Tender, config: &EvaluationConfig) -> Result<Self, ConfigurationError> {
        let warnings = TenderValidator::from_config(config).validate(&tender)?;
        for warning in &warnings {
            warn!(tender = %tender.id.0, %warning, "tender criteria accepted with warning");
        }
        Ok(Self { tender })
    }

    pub fn tender(&self) -> &Tender {
        &self.tender
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.tender.criteria
    }

    pub fn evaluate(&self, proposal: &Proposal) -> EvaluationResult {
        evaluate_proposal(&self.tender.criteria, proposal)
    }

    pub fn rank(&self, proposals: &[Proposal]) -> Ranking {
        rank(&self.tender, proposals)
    }
}

/// Score and disqualification verdict for one proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Aggregate 0-100 score; absent when the proposal is disqualified.
    pub normalized_score: Option<f64>,
    pub per_criterion_scores: BTreeMap<CriterionId, Option<f64>>,
    pub disqualified: bool,
    pub failed_exclusionary_criteria: Vec<ExclusionFailure>,
}

impl EvaluationResult {
    pub fn failed_labels(&self) -> Vec<&str> {
        self.failed_exclusionary_criteria
            .iter()
            .map(|failure| failure.label.as_str())
            .collect()
    }

    pub fn summary(&self) -> String {
        match self.normalized_score {
            Some(score) => format!("qualified with score {score:.2}"),
            None => {
                let reasons: Vec<String> = self
                    .failed_exclusionary_criteria
                    .iter()
                    .map(ExclusionFailure::summary)
                    .collect();
                format!("disqualified: {}", reasons.join("; "))
            }
        }
    }
}
