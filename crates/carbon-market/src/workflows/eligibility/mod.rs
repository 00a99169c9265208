//! Carbon-credit eligibility assessment for renewable-energy projects.
//!
//! Assessment is a two-stage cascade. Every hard-fail condition is evaluated and reported;
//! if any triggers the project is not recommended and soft signals are skipped entirely.
//! Otherwise the weighted soft signals are summed into a 0-100 confidence score and a tier.

pub mod catalog;
pub mod domain;
mod normalizer;
pub mod policy;
pub mod router;

#[cfg(test)]
mod tests;

pub use catalog::{
    max_points, HardFailConditionView, HardFailKind, SoftSignalKind, SoftSignalView,
    HARD_FAIL_CONDITION_LIST, SOFT_SIGNAL_LIST,
};
pub use domain::{
    Article6Status, FormDate, NumericField, OfftakeType, OfftakerType, ProjectEligibilityInput,
    RegistrationIntent, UnknownLabel,
};
pub use policy::ConfidenceLevel;
pub use router::{eligibility_router, AssessmentRequestError, AssessmentSettings};

use catalog::{HARD_FAIL_CONDITIONS, SOFT_SIGNALS};
use normalizer::normalize;
use policy::{confidence_score, risk_warnings_for_score};
use serde::{Deserialize, Serialize};

/// Result of a single hard-fail condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardFailOutcome {
    pub id: HardFailKind,
    pub condition: String,
    pub triggered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Result of a single soft signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftSignalOutcome {
    pub id: SoftSignalKind,
    pub signal: String,
    pub present: bool,
    pub points: u32,
}

/// Verdict for one project, including the full audit trail of evaluated rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityVerdict {
    pub is_eligible: bool,
    pub hard_fail_triggered: bool,
    #[serde(rename = "hardFailReasons")]
    pub hard_fail_results: Vec<HardFailOutcome>,
    pub soft_signals: Vec<SoftSignalOutcome>,
    pub confidence_level: ConfidenceLevel,
    pub confidence_score: u8,
    pub recommendation: String,
    pub risk_warnings: Vec<String>,
}

impl EligibilityVerdict {
    pub fn triggered_hard_fails(&self) -> impl Iterator<Item = &HardFailOutcome> {
        self.hard_fail_results
            .iter()
            .filter(|outcome| outcome.triggered)
    }

    pub fn summary(&self) -> String {
        if self.hard_fail_triggered {
            let ids = self
                .triggered_hard_fails()
                .map(|outcome| outcome.id.id())
                .collect::<Vec<_>>();
            format!("{} (hard fail: {})", self.recommendation, ids.join(", "))
        } else {
            format!(
                "{} (score {}, {})",
                self.recommendation,
                self.confidence_score,
                self.confidence_level.label()
            )
        }
    }
}

/// Assesses one project. Pure and total: the same input always yields the same verdict.
pub fn evaluate(input: &ProjectEligibilityInput) -> EligibilityVerdict {
    let project = normalize(input);

    let hard_fail_results: Vec<HardFailOutcome> = HARD_FAIL_CONDITIONS
        .iter()
        .map(|rule| {
            let triggered = (rule.check)(&project);
            HardFailOutcome {
                id: rule.kind,
                condition: rule.condition.to_string(),
                triggered,
                reason: triggered.then(|| rule.reason.to_string()),
            }
        })
        .collect();

    let risk_warnings: Vec<String> = hard_fail_results
        .iter()
        .filter_map(|outcome| outcome.reason.clone())
        .collect();

    if !risk_warnings.is_empty() {
        return EligibilityVerdict {
            is_eligible: false,
            hard_fail_triggered: true,
            hard_fail_results,
            soft_signals: Vec::new(),
            confidence_level: ConfidenceLevel::NotRecommended,
            confidence_score: 0,
            recommendation: ConfidenceLevel::NotRecommended.recommendation().to_string(),
            risk_warnings,
        };
    }

    let soft_signals: Vec<SoftSignalOutcome> = SOFT_SIGNALS
        .iter()
        .map(|rule| {
            let present = (rule.check)(&project);
            SoftSignalOutcome {
                id: rule.kind,
                signal: rule.signal.to_string(),
                present,
                points: if present { rule.points } else { 0 },
            }
        })
        .collect();

    let earned: u32 = soft_signals.iter().map(|outcome| outcome.points).sum();
    let confidence_score = confidence_score(earned, max_points());
    let confidence_level = ConfidenceLevel::from_score(confidence_score);

    EligibilityVerdict {
        is_eligible: true,
        hard_fail_triggered: false,
        hard_fail_results,
        soft_signals,
        confidence_level,
        confidence_score,
        recommendation: confidence_level.recommendation().to_string(),
        risk_warnings: risk_warnings_for_score(confidence_score),
    }
}
