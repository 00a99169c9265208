use crate::infra::{read_projects, OutputFormat};
use carbon_market::error::AppError;
use carbon_market::workflows::eligibility::{
    evaluate, max_points, Article6Status, EligibilityVerdict, NumericField, OfftakeType,
    ProjectEligibilityInput, RegistrationIntent, HARD_FAIL_CONDITION_LIST, SOFT_SIGNAL_LIST,
};
use clap::Args;
use serde_json::json;
use std::path::PathBuf;

const DEMO_JUSTIFICATION: &str = "Project IRR sits below the lender hurdle rate without \
     credit revenue and no feed-in tariff or concessional finance is available.";

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// JSON file holding one project object or an array of them (`-` reads stdin)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Output format for the verdicts
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CriteriaArgs {
    /// Output format for the catalog
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let projects = read_projects(&args.input)?;
    let verdicts: Vec<EligibilityVerdict> = projects.iter().map(evaluate).collect();

    match args.format {
        OutputFormat::Json => {
            let rendered = if verdicts.len() == 1 {
                serde_json::to_string_pretty(&verdicts[0])?
            } else {
                serde_json::to_string_pretty(&verdicts)?
            };
            println!("{rendered}");
        }
        OutputFormat::Text => {
            for (index, verdict) in verdicts.iter().enumerate() {
                if index > 0 {
                    println!();
                }
                println!("Project #{}", index + 1);
                render_verdict(verdict);
            }
        }
    }

    Ok(())
}

pub(crate) fn run_criteria(args: CriteriaArgs) -> Result<(), AppError> {
    match args.format {
        OutputFormat::Json => {
            let payload = json!({
                "hardFailConditions": *HARD_FAIL_CONDITION_LIST,
                "softSignals": *SOFT_SIGNAL_LIST,
                "maxPoints": max_points(),
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        OutputFormat::Text => {
            println!("Hard-fail conditions (any one disqualifies the project)");
            for condition in HARD_FAIL_CONDITION_LIST.iter() {
                println!("- [{}] {}", condition.id.id(), condition.condition);
            }
            println!("\nSoft signals (max {} points)", max_points());
            for signal in SOFT_SIGNAL_LIST.iter() {
                println!(
                    "- [{}] {} (+{})",
                    signal.id.id(),
                    signal.signal,
                    signal.max_points
                );
            }
        }
    }

    Ok(())
}

pub(crate) fn run_demo() {
    println!("Carbon-credit eligibility demo");
    for (label, project) in demo_projects() {
        println!("\n== {label}");
        render_verdict(&evaluate(&project));
    }
}

pub(crate) fn demo_projects() -> Vec<(&'static str, ProjectEligibilityInput)> {
    vec![
        (
            "Utility-scale solar park (60 MW DC)",
            ProjectEligibilityInput {
                installed_capacity_dc: Some(NumericField::from("60")),
                ..Default::default()
            },
        ),
        (
            "Wind farm with a 12-year PPA",
            ProjectEligibilityInput {
                installed_capacity_dc: Some(NumericField::from("20")),
                offtake_type: Some(OfftakeType::Ppa),
                ppa_duration_years: Some(NumericField::from("12")),
                additionality_justification: Some(DEMO_JUSTIFICATION.to_string()),
                ..Default::default()
            },
        ),
        (
            "Merchant mini-grid registering ex-ante",
            ProjectEligibilityInput {
                installed_capacity_dc: Some(NumericField::from("10")),
                offtake_type: Some(OfftakeType::Merchant),
                carbon_revenue_material: Some(true),
                host_country_article6_status: Some(Article6Status::Clear),
                carbon_registration_intent: Some(RegistrationIntent::BeforeCommissioning),
                additionality_justification: Some(DEMO_JUSTIFICATION.to_string()),
                ..Default::default()
            },
        ),
        (
            "Rooftop portfolio with a thin justification",
            ProjectEligibilityInput {
                installed_capacity_dc: Some(NumericField::from("10")),
                additionality_justification: Some("too short".to_string()),
                ..Default::default()
            },
        ),
        (
            "Hydro retrofit where only carbon revenue stands out",
            ProjectEligibilityInput {
                installed_capacity: Some(NumericField::from("35")),
                carbon_revenue_material: Some(true),
                additionality_justification: Some(DEMO_JUSTIFICATION.to_string()),
                ..Default::default()
            },
        ),
    ]
}

pub(crate) fn render_verdict(verdict: &EligibilityVerdict) {
    println!("{}", verdict.summary());

    if verdict.hard_fail_triggered {
        println!("Hard-fail conditions triggered:");
        for outcome in verdict.triggered_hard_fails() {
            println!("  - {}", outcome.condition);
        }
    } else {
        println!(
            "Confidence score: {}% ({})",
            verdict.confidence_score,
            verdict.confidence_level.label()
        );
        println!("Eligibility signals:");
        for signal in &verdict.soft_signals {
            let marker = if signal.present { "x" } else { " " };
            println!("  [{marker}] {} (+{})", signal.signal, signal.points);
        }
    }

    if !verdict.risk_warnings.is_empty() {
        println!("Risk warnings:");
        for warning in &verdict.risk_warnings {
            println!("  ! {warning}");
        }
    }
}
