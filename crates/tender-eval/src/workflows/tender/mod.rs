//! Tender proposal evaluation: criterion model, response normalization, exclusion gates,
//! weighted aggregation and ranking, plus the validation, import and HTTP surfaces the
//! calling application uses to reach them.

pub mod criteria;
pub mod evaluation;
pub mod import;
pub mod proposal;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use criteria::{Criterion, CriterionId, CriterionKind, NumericRule, ScaleOption, Tender, TenderId};
pub use evaluation::{
    EvaluationConfig, EvaluationEngine, EvaluationResult, ExclusionFailure, ExclusionReason,
    NormalizedValue, RankedProposal, Ranking,
};
pub use import::{ImportError, ResponseSheetImporter};
pub use proposal::{order_by_submission, Proposal, ProposalId, ResponseValue};
pub use router::tender_router;
pub use service::{EvaluationRequest, TenderEvaluationService, TenderServiceError};
pub use validation::{ConfigurationError, TenderValidator, ValidationWarning};
