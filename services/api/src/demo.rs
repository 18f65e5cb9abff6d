use chrono::Local;
use clap::Args;
use std::path::PathBuf;
use tender_eval::config::AppConfig;
use tender_eval::error::AppError;
use tender_eval::workflows::tender::{
    Criterion, CriterionId, CriterionKind, EvaluationRequest, NumericRule, Proposal, Ranking,
    ResponseSheetImporter, ResponseValue, ScaleOption, Tender, TenderEvaluationService, TenderId,
};

use crate::infra::{load_proposals, load_tender};

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// Tender definition (JSON)
    #[arg(long)]
    pub(crate) tender: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Tender definition (JSON)
    #[arg(long)]
    pub(crate) tender: PathBuf,
    /// Proposals as a JSON array
    #[arg(long, conflicts_with = "responses", required_unless_present = "responses")]
    pub(crate) proposals: Option<PathBuf>,
    /// Proposals as a CSV response sheet (proposal_id,criterion_id,response[,supplier][,submitted_at])
    #[arg(long)]
    pub(crate) responses: Option<PathBuf>,
    /// Break score ties by earliest submission time
    #[arg(long)]
    pub(crate) order_by_submission: bool,
    /// Print the ranking as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the ranking as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

fn evaluation_service() -> Result<TenderEvaluationService, AppError> {
    let config = AppConfig::load()?;
    Ok(TenderEvaluationService::new(config.evaluation))
}

pub(crate) fn run_validate(args: ValidateArgs) -> Result<(), AppError> {
    let tender = load_tender(&args.tender)?;
    let service = evaluation_service()?;
    let warnings = service.validate(&tender)?;

    println!(
        "Tender {} is valid ({} criteria)",
        tender.id.0,
        tender.criteria.len()
    );
    if warnings.is_empty() {
        println!("Warnings: none");
    } else {
        println!("Warnings");
        for warning in &warnings {
            println!("- {warning}");
        }
    }

    Ok(())
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        tender,
        proposals,
        responses,
        order_by_submission,
        json,
    } = args;

    let tender = load_tender(&tender)?;
    let proposals = match (proposals, responses) {
        (Some(path), _) => load_proposals(&path)?,
        (None, Some(path)) => ResponseSheetImporter::new(&tender).read_path(path)?,
        (None, None) => Vec::new(),
    };

    let service = evaluation_service()?;
    let ranking = service.evaluate(EvaluationRequest {
        tender: tender.clone(),
        proposals,
        order_by_submission,
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ranking)?);
    } else {
        render_ranking(&tender, &ranking);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let tender = sample_tender();
    let service = TenderEvaluationService::default();
    let ranking = service.evaluate(EvaluationRequest {
        tender: tender.clone(),
        proposals: sample_proposals(),
        order_by_submission: false,
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ranking)?);
        return Ok(());
    }

    println!("Tender evaluation demo");
    println!("\nCriteria");
    for criterion in &tender.criteria {
        let mut flags = Vec::new();
        if criterion.exclusionary {
            flags.push("exclusionary");
        }
        if !criterion.contributes_score() {
            flags.push("informational");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };
        println!(
            "- {} ({}, weight {}){}",
            criterion.label(),
            criterion.kind.label(),
            criterion.weight,
            flags
        );
    }

    render_ranking(&tender, &ranking);
    Ok(())
}

fn render_ranking(tender: &Tender, ranking: &Ranking) {
    let title = if tender.title.is_empty() {
        String::new()
    } else {
        format!(" ({})", tender.title)
    };
    println!("\nRanking for tender {}{}", ranking.tender_id.0, title);
    println!("Evaluated {}", Local::now().format("%Y-%m-%d %H:%M"));

    if ranking.entries.is_empty() {
        println!("No proposals submitted");
        return;
    }

    for entry in &ranking.entries {
        match entry.result.normalized_score {
            Some(score) => println!(
                "{:>3}. {:<16} {:>6.2}",
                entry.position, entry.proposal_id.0, score
            ),
            None => {
                println!(
                    "{:>3}. {:<16} DISQUALIFIED",
                    entry.position, entry.proposal_id.0
                );
                for failure in &entry.result.failed_exclusionary_criteria {
                    println!("       - {}", failure.summary());
                }
            }
        }
    }

    match ranking.winner() {
        Some(winner) => println!("\nWinner: {}", winner.proposal_id.0),
        None => println!("\nWinner: none (every proposal was disqualified)"),
    }
}

/// Price / safety / maintenance-plan tender with a descriptive methodology item.
pub(crate) fn sample_tender() -> Tender {
    Tender {
        id: TenderId("T-DEMO-001".to_string()),
        title: "Elevator maintenance 2025-2027".to_string(),
        criteria: vec![
            Criterion {
                id: CriterionId::new("price"),
                name: "Annual price".to_string(),
                weight: 45.0,
                exclusionary: false,
                scorable: true,
                kind: CriterionKind::Numeric(NumericRule {
                    higher_is_better: false,
                    min: Some(0.0),
                    max: Some(1000.0),
                }),
            },
            Criterion {
                id: CriterionId::new("safety"),
                name: "Safety certification".to_string(),
                weight: 30.0,
                exclusionary: true,
                scorable: true,
                kind: CriterionKind::Boolean {
                    required_value: true,
                },
            },
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
            },
            Criterion {
                id: CriterionId::new("methodology"),
                name: "Methodology".to_string(),
                weight: 5.0,
                exclusionary: false,
                scorable: false,
                kind: CriterionKind::Descriptive,
            },
        ],
    }
}

pub(crate) fn sample_proposals() -> Vec<Proposal> {
    vec![
        Proposal::new("acme-lifts")
            .with_response("price", ResponseValue::Number(500.0))
            .with_response("safety", ResponseValue::Flag(true))
            .with_response("plan", ResponseValue::text("Full"))
            .with_response("methodology", ResponseValue::text("Monthly inspections")),
        Proposal::new("borealis")
            .with_response("price", ResponseValue::Number(200.0))
            .with_response("safety", ResponseValue::Flag(false))
            .with_response("plan", ResponseValue::text("Basic")),
        Proposal::new("contoso")
            .with_response("price", ResponseValue::text("650"))
            .with_response("safety", ResponseValue::text("yes")),
    ]
}
