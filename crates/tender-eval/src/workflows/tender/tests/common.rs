use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::tender::criteria::{
    Criterion, CriterionId, CriterionKind, NumericRule, ScaleOption, Tender, TenderId,
};
use crate::workflows::tender::evaluation::EvaluationConfig;
use crate::workflows::tender::proposal::{Proposal, ResponseValue};
use crate::workflows::tender::{tender_router, TenderEvaluationService};

pub(super) fn price() -> Criterion {
    Criterion {
        id: CriterionId::new("price"),
        name: "Price".to_string(),
        weight: 50.0,
        exclusionary: false,
        scorable: true,
        kind: CriterionKind::Numeric(NumericRule {
            higher_is_better: false,
            min: Some(0.0),
            max: Some(1000.0),
        }),
    }
}

pub(super) fn safety() -> Criterion {
    Criterion {
        id: CriterionId::new("safety"),
        name: "Safety certification".to_string(),
        weight: 30.0,
        exclusionary: true,
        scorable: true,
        kind: CriterionKind::Boolean {
            required_value: true,
        },
    }
}

pub(super) fn plan() -> Criterion {
    Criterion {
        id: CriterionId::new("plan"),
        name: "Maintenance plan".to_string(),
        weight: 20.0,
        exclusionary: false,
        scorable: true,
        kind: CriterionKind::Scale {
            options: vec![
                ScaleOption::new("Full", Some(10.0)),
                ScaleOption::new("Basic", Some(4.0)),
            ],
        },
    }
}

pub(super) fn notes() -> Criterion {
    Criterion {
        id: CriterionId::new("notes"),
        name: "Methodology notes".to_string(),
        weight: 10.0,
        exclusionary: false,
        scorable: false,
        kind: CriterionKind::Descriptive,
    }
}

/// Price / Safety / Plan tender used across the engine tests.
pub(super) fn tender() -> Tender {
    Tender {
        id: TenderId("T-2025-014".to_string()),
        title: "Elevator maintenance".to_string(),
        criteria: vec![price(), safety(), plan()],
    }
}

pub(super) fn tender_with(criteria: Vec<Criterion>) -> Tender {
    Tender {
        criteria,
        ..tender()
    }
}

pub(super) fn proposal(id: &str, price: f64, safety: bool, plan: &str) -> Proposal {
    Proposal::new(id)
        .with_response("price", ResponseValue::Number(price))
        .with_response("safety", ResponseValue::Flag(safety))
        .with_response("plan", ResponseValue::text(plan))
}

pub(super) fn proposal_a() -> Proposal {
    proposal("A", 500.0, true, "Full")
}

pub(super) fn proposal_b() -> Proposal {
    proposal("B", 200.0, false, "Basic")
}

pub(super) fn evaluation_config() -> EvaluationConfig {
    EvaluationConfig {
        weight_tolerance: 0.01,
    }
}

pub(super) fn service() -> Arc<TenderEvaluationService> {
    Arc::new(TenderEvaluationService::new(evaluation_config()))
}

pub(super) fn router() -> axum::Router {
    tender_router(service())
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}
