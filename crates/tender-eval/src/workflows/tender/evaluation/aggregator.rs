use std::collections::BTreeMap;

use super::super::criteria::{Criterion, CriterionId};
use super::normalizer::NormalizedValue;

/// Combine normalized per-criterion values into a 0-100 score.
///
/// Weight is redistributed over the criteria that actually score, so informational
/// criteria never cap the maximum below 100. Missing entries count as zero.
pub fn aggregate(criteria: &[Criterion], normalized: &BTreeMap<CriterionId, NormalizedValue>) -> f64 {
    let (total_weight, weighted_sum) = criteria
        .iter()
        .filter(|criterion| criterion.contributes_score())
        .filter_map(|criterion| {
            let value = normalized
                .get(&criterion.id)
                .copied()
                .unwrap_or(NormalizedValue::Score(0.0));
            value.score().map(|score| (criterion.weight, score))
        })
        .fold((0.0_f64, 0.0_f64), |(total, sum), (weight, score)| {
            (total + weight, sum + weight * score)
        });

    if total_weight > 0.0 {
        (weighted_sum / total_weight) * 100.0
    } else {
        0.0
    }
}
