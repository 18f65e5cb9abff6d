use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::super::criteria::{Criterion, Tender, TenderId};
use super::super::proposal::{Proposal, ProposalId};
use super::aggregator::aggregate;
use super::exclusion::evaluate_exclusions;
use super::normalizer::normalize;
use super::EvaluationResult;

/// A proposal's place in the final ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedProposal {
    pub position: usize,
    pub proposal_id: ProposalId,
    #[serde(flatten)]
    pub result: EvaluationResult,
}

/// Ordered evaluation of every proposal submitted to one tender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    pub tender_id: TenderId,
    pub entries: Vec<RankedProposal>,
}

impl Ranking {
    /// Highest ranked proposal that was not disqualified.
    pub fn winner(&self) -> Option<&RankedProposal> {
        self.entries.iter().find(|entry| !entry.result.disqualified)
    }

    pub fn qualified(&self) -> impl Iterator<Item = &RankedProposal> {
        self.entries.iter().filter(|entry| !entry.result.disqualified)
    }

    pub fn disqualified(&self) -> impl Iterator<Item = &RankedProposal> {
        self.entries.iter().filter(|entry| entry.result.disqualified)
    }

    pub fn position_of(&self, proposal_id: &ProposalId) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| &entry.proposal_id == proposal_id)
            .map(|entry| entry.position)
    }
}

/// Evaluate one proposal against the tender's criteria.
pub fn evaluate_proposal(criteria: &[Criterion], proposal: &Proposal) -> EvaluationResult {
    for criterion_id in proposal.responses.keys() {
        if !criteria.iter().any(|criterion| &criterion.id == criterion_id) {
            debug!(
                proposal = %proposal.id.0,
                criterion = %criterion_id.as_str(),
                "ignoring response for criterion not on tender"
            );
        }
    }

    let normalized: BTreeMap<_, _> = criteria
        .iter()
        .map(|criterion| {
            let value = normalize(criterion, proposal.response(&criterion.id));
            (criterion.id.clone(), value)
        })
        .collect();

    let per_criterion_scores = criteria
        .iter()
        .map(|criterion| {
            let score = if criterion.contributes_score() {
                normalized.get(&criterion.id).and_then(|value| value.score())
            } else {
                None
            };
            (criterion.id.clone(), score)
        })
        .collect();

    let verdict = evaluate_exclusions(criteria, &proposal.responses);
    let normalized_score = if verdict.disqualified {
        None
    } else {
        Some(aggregate(criteria, &normalized))
    };

    EvaluationResult {
        normalized_score,
        per_criterion_scores,
        disqualified: verdict.disqualified,
        failed_exclusionary_criteria: verdict.failed,
    }
}

/// Evaluate and order every proposal for a tender.
///
/// Assumes the tender's criteria were validated when the tender was defined. The sort is
/// stable: qualified proposals first by descending score, equal scores keep input order,
/// and disqualified proposals follow in input order.
pub fn rank(tender: &Tender, proposals: &[Proposal]) -> Ranking {
    let mut evaluated: Vec<(ProposalId, EvaluationResult)> = proposals
        .iter()
        .map(|proposal| {
            let result = evaluate_proposal(&tender.criteria, proposal);
            debug!(
                tender = %tender.id.0,
                proposal = %proposal.id.0,
                score = ?result.normalized_score,
                disqualified = result.disqualified,
                "proposal evaluated"
            );
            (proposal.id.clone(), result)
        })
        .collect();

    evaluated.sort_by(|(_, left), (_, right)| compare(left, right));

    let entries = evaluated
        .into_iter()
        .enumerate()
        .map(|(index, (proposal_id, result))| RankedProposal {
            position: index + 1,
            proposal_id,
            result,
        })
        .collect();

    Ranking {
        tender_id: tender.id.clone(),
        entries,
    }
}

fn compare(left: &EvaluationResult, right: &EvaluationResult) -> Ordering {
    match (left.normalized_score, right.normalized_score) {
        (Some(left), Some(right)) => right.total_cmp(&left),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
