use std::io::Read;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::criteria::Tender;
use super::evaluation::{EvaluationConfig, EvaluationEngine, Ranking};
use super::import::{ImportError, ResponseSheetImporter};
use super::proposal::{order_by_submission, Proposal};
use super::validation::{ConfigurationError, TenderValidator, ValidationWarning};

/// Inbound payload asking for a tender's proposals to be ranked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub tender: Tender,
    #[serde(default)]
    pub proposals: Vec<Proposal>,
    /// Pre-sort by submission time so equal scores favour the earliest proposal.
    #[serde(default)]
    pub order_by_submission: bool,
}

/// Facade composing tender validation with the ranking engine.
#[derive(Debug, Clone, Default)]
pub struct TenderEvaluationService {
    config: EvaluationConfig,
}

impl TenderEvaluationService {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Validate a tender definition without evaluating any proposals.
    pub fn validate(&self, tender: &Tender) -> Result<Vec<ValidationWarning>, TenderServiceError> {
        let warnings = TenderValidator::from_config(&self.config).validate(tender)?;
        info!(
            tender = %tender.id.0,
            criteria = tender.criteria.len(),
            warnings = warnings.len(),
            "tender criteria validated"
        );
        Ok(warnings)
    }

    /// Rank every proposal of the request against its tender.
    pub fn evaluate(&self, request: EvaluationRequest) -> Result<Ranking, TenderServiceError> {
        let EvaluationRequest {
            tender,
            mut proposals,
            order_by_submission: presort,
        } = request;

        if presort {
            order_by_submission(&mut proposals);
        }

        let engine = EvaluationEngine::for_tender(tender, &self.config)?;
        let ranking = engine.rank(&proposals);

        info!(
            tender = %ranking.tender_id.0,
            proposals = ranking.entries.len(),
            disqualified = ranking.disqualified().count(),
            winner = ?ranking.winner().map(|entry| entry.proposal_id.0.as_str()),
            "tender proposals ranked"
        );

        Ok(ranking)
    }

    /// Import a CSV response sheet and rank the resulting proposals.
    pub fn evaluate_sheet<R: Read>(
        &self,
        tender: Tender,
        sheet: R,
        order_by_submission: bool,
    ) -> Result<Ranking, TenderServiceError> {
        let proposals = ResponseSheetImporter::new(&tender).read_from(sheet)?;
        self.evaluate(EvaluationRequest {
            tender,
            proposals,
            order_by_submission,
        })
    }
}

/// Error raised by the evaluation service.
#[derive(Debug, thiserror::Error)]
pub enum TenderServiceError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Import(#[from] ImportError),
}
