use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use super::criteria::{Tender, TenderId};
use super::evaluation::RankedProposal;
use super::proposal::ProposalId;
use super::service::{EvaluationRequest, TenderEvaluationService, TenderServiceError};
use super::validation::ValidationWarning;

/// Router builder exposing tender validation and ranking over HTTP.
pub fn tender_router(service: Arc<TenderEvaluationService>) -> Router {
    Router::new()
        .route("/api/v1/tenders/validate", post(validate_handler))
        .route("/api/v1/tenders/evaluate", post(evaluate_handler))
        .with_state(service)
}

/// Response body for a successful validation.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationView {
    pub tender_id: TenderId,
    pub valid: bool,
    pub warnings: Vec<ValidationWarning>,
}

/// Response body for a ranked tender.
#[derive(Debug, Clone, Serialize)]
pub struct RankingView {
    pub tender_id: TenderId,
    pub evaluated_at: DateTime<Utc>,
    pub winner: Option<ProposalId>,
    pub entries: Vec<RankedProposal>,
}

pub(crate) async fn validate_handler(
    State(service): State<Arc<TenderEvaluationService>>,
    axum::Json(tender): axum::Json<Tender>,
) -> Response {
    match service.validate(&tender) {
        Ok(warnings) => {
            let view = ValidationView {
                tender_id: tender.id,
                valid: true,
                warnings,
            };
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn evaluate_handler(
    State(service): State<Arc<TenderEvaluationService>>,
    axum::Json(request): axum::Json<EvaluationRequest>,
) -> Response {
    match service.evaluate(request) {
        Ok(ranking) => {
            let view = RankingView {
                winner: ranking.winner().map(|entry| entry.proposal_id.clone()),
                tender_id: ranking.tender_id,
                evaluated_at: Utc::now(),
                entries: ranking.entries,
            };
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: TenderServiceError) -> Response {
    let status = match error {
        TenderServiceError::Configuration(_) | TenderServiceError::Import(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
