use super::common::*;
use crate::workflows::tender::criteria::CriterionId;
use crate::workflows::tender::evaluation::{rank, EvaluationEngine};
use crate::workflows::tender::proposal::{Proposal, ProposalId, ResponseValue};
use crate::workflows::tender::validation::ConfigurationError;

#[test]
fn end_to_end_scenario_ranks_qualified_before_disqualified() {
    let ranking = rank(&tender(), &[proposal_b(), proposal_a()]);

    assert_eq!(ranking.entries.len(), 2);

    let first = &ranking.entries[0];
    assert_eq!(first.position, 1);
    assert_eq!(first.proposal_id, ProposalId::new("A"));
    assert!(!first.result.disqualified);
    assert_close(first.result.normalized_score.expect("qualified"), 75.0);
    assert_eq!(
        first.result.per_criterion_scores.get(&CriterionId::new("price")),
        Some(&Some(0.5))
    );
    assert_eq!(
        first.result.per_criterion_scores.get(&CriterionId::new("plan")),
        Some(&Some(1.0))
    );

    let second = &ranking.entries[1];
    assert_eq!(second.position, 2);
    assert_eq!(second.proposal_id, ProposalId::new("B"));
    assert!(second.result.disqualified);
    assert_eq!(second.result.normalized_score, None);
    assert_eq!(second.result.failed_labels(), vec!["Safety certification"]);

    assert_eq!(
        ranking.winner().map(|entry| &entry.proposal_id),
        Some(&ProposalId::new("A"))
    );
}

#[test]
fn disqualified_sorts_after_a_zero_score() {
    let mut criteria = tender().criteria;
    criteria[0].weight = 80.0;
    criteria[1].scorable = false;
    let tender = tender_with(criteria);

    let zero = proposal("zero", 1000.0, true, "Nothing");
    let strong_but_unsafe = proposal("unsafe", 0.0, false, "Full");

    let ranking = rank(&tender, &[strong_but_unsafe, zero]);

    assert_eq!(ranking.entries[0].proposal_id, ProposalId::new("zero"));
    assert_eq!(ranking.entries[0].result.normalized_score, Some(0.0));
    assert_eq!(ranking.entries[1].proposal_id, ProposalId::new("unsafe"));
    assert!(ranking.entries[1].result.disqualified);
    assert_eq!(ranking.entries[1].result.normalized_score, None);
}

#[test]
fn ties_keep_input_order() {
    let first = proposal("first", 400.0, true, "Basic");
    let second = proposal("second", 400.0, true, "Basic");
    let best = proposal("best", 100.0, true, "Full");

    let ranking = rank(&tender(), &[first, second, best]);

    let order: Vec<&str> = ranking
        .entries
        .iter()
        .map(|entry| entry.proposal_id.0.as_str())
        .collect();
    assert_eq!(order, vec!["best", "first", "second"]);
    assert_eq!(
        ranking.entries[1].result.normalized_score,
        ranking.entries[2].result.normalized_score
    );
}

#[test]
fn disqualified_proposals_keep_input_order() {
    let ranking = rank(
        &tender(),
        &[
            proposal("x", 10.0, false, "Full"),
            proposal("y", 900.0, false, "Basic"),
        ],
    );

    assert!(ranking.winner().is_none());
    let order: Vec<&str> = ranking
        .disqualified()
        .map(|entry| entry.proposal_id.0.as_str())
        .collect();
    assert_eq!(order, vec!["x", "y"]);
}

#[test]
fn every_qualified_proposal_shares_the_scorable_set() {
    let mut criteria = tender().criteria;
    criteria[0].weight = 40.0;
    criteria.push(notes());
    let tender = tender_with(criteria);

    let ranking = rank(
        &tender,
        &[
            proposal_a().with_response("notes", ResponseValue::text("Weekly visits")),
            proposal("C", 0.0, true, "Basic"),
        ],
    );

    for entry in ranking.qualified() {
        let scored: Vec<&CriterionId> = entry
            .result
            .per_criterion_scores
            .iter()
            .filter(|(_, score)| score.is_some())
            .map(|(id, _)| id)
            .collect();
        assert_eq!(scored.len(), 3);
        assert_eq!(
            entry.result.per_criterion_scores.get(&CriterionId::new("notes")),
            Some(&None)
        );
    }
}

#[test]
fn responses_for_unknown_criteria_are_ignored() {
    let stray = proposal_a().with_response("colour", ResponseValue::text("blue"));

    let ranking = rank(&tender(), &[stray]);

    assert_close(
        ranking.entries[0].result.normalized_score.expect("qualified"),
        75.0,
    );
    assert!(!ranking.entries[0]
        .result
        .per_criterion_scores
        .contains_key(&CriterionId::new("colour")));
}

#[test]
fn empty_proposal_never_panics() {
    let mut criteria = tender().criteria;
    criteria[1].exclusionary = false;

    let ranking = rank(&tender_with(criteria), &[Proposal::new("blank")]);

    let result = &ranking.entries[0].result;
    assert_close(result.normalized_score.expect("qualified"), 0.0);
}

#[test]
fn engine_rejects_invalid_tender() {
    let mut criteria = tender().criteria;
    criteria[2].weight = 10.0;

    let error = EvaluationEngine::for_tender(tender_with(criteria), &evaluation_config())
        .expect_err("weights sum to 90");

    assert!(matches!(error, ConfigurationError::WeightsDoNotSum { .. }));
}

#[test]
fn engine_evaluates_without_mutating_inputs() {
    let engine = EvaluationEngine::for_tender(tender(), &evaluation_config()).expect("valid");
    let proposals = vec![proposal_a(), proposal_b()];
    let snapshot = proposals.clone();

    let first = engine.rank(&proposals);
    let second = engine.rank(&proposals);

    assert_eq!(proposals, snapshot);
    assert_eq!(first, second);
    assert_eq!(engine.evaluate(&proposal_a()), first.entries[0].result);
}

#[test]
fn disqualified_summary_lists_every_failure() {
    let ranking = rank(&tender(), &[proposal_b()]);

    let summary = ranking.entries[0].result.summary();
    assert_eq!(
        summary,
        "disqualified: Safety certification: required answer 'yes' not met"
    );
}
