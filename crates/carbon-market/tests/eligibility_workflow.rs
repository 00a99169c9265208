//! End-to-end assessment scenarios driven through the public API with the raw payloads the
//! project wizard submits.

use carbon_market::workflows::eligibility::{
    evaluate, ConfidenceLevel, EligibilityVerdict, HardFailKind, ProjectEligibilityInput,
    HARD_FAIL_CONDITION_LIST, SOFT_SIGNAL_LIST,
};
use serde_json::json;

const JUSTIFICATION: &str = "Merchant tail exposure leaves the project unbankable without \
     carbon revenue; lenders require the credit stream to close financing.";

fn assess(payload: serde_json::Value) -> EligibilityVerdict {
    let input: ProjectEligibilityInput =
        serde_json::from_value(payload).expect("wizard payload deserializes");
    evaluate(&input)
}

fn triggered(verdict: &EligibilityVerdict) -> Vec<HardFailKind> {
    verdict
        .triggered_hard_fails()
        .map(|outcome| outcome.id)
        .collect()
}

#[test]
fn utility_scale_project_is_not_recommended() {
    let verdict = assess(json!({ "installedCapacityDC": "60" }));

    assert!(!verdict.is_eligible);
    assert!(triggered(&verdict).contains(&HardFailKind::UtilityScale));
    assert_eq!(verdict.confidence_score, 0);
    assert_eq!(verdict.confidence_level, ConfidenceLevel::NotRecommended);
}

#[test]
fn ac_only_capacity_triggers_utility_scale() {
    let verdict = assess(json!({
        "installedCapacityAC": 60,
        "additionalityJustification": JUSTIFICATION,
    }));

    assert_eq!(triggered(&verdict), vec![HardFailKind::UtilityScale]);
}

#[test]
fn long_ppa_project_is_not_recommended() {
    let verdict = assess(json!({
        "offtakeType": "PPA",
        "ppaDuration": "12",
        "installedCapacityDC": "20",
        "additionalityJustification": JUSTIFICATION,
    }));

    assert!(verdict.hard_fail_triggered);
    assert_eq!(triggered(&verdict), vec![HardFailKind::LongTermPpa]);
}

#[test]
fn clean_merchant_project_is_high_confidence() {
    let verdict = assess(json!({
        "installedCapacityDC": "10",
        "offtakeType": "MERCHANT",
        "carbonRevenueMaterial": true,
        "hostCountryArticle6Status": "CLEAR",
        "carbonRegistrationIntent": "BEFORE_COMMISSIONING",
        "additionalityJustification": JUSTIFICATION,
    }));

    assert!(verdict.is_eligible);
    assert_eq!(verdict.soft_signals.len(), 5);
    assert!(verdict.soft_signals.iter().all(|signal| signal.present));
    assert_eq!(verdict.confidence_score, 100);
    assert_eq!(verdict.confidence_level, ConfidenceLevel::High);
    assert!(verdict.risk_warnings.is_empty());
}

#[test]
fn thin_justification_is_not_recommended() {
    let verdict = assess(json!({
        "installedCapacityDC": "10",
        "additionalityJustification": "too short",
    }));

    assert_eq!(triggered(&verdict), vec![HardFailKind::NoAdditionality]);
    assert!(verdict.soft_signals.is_empty());
}

#[test]
fn single_soft_signal_is_low_confidence_with_warning() {
    let verdict = assess(json!({
        "installedCapacity": "35",
        "carbonRevenueMaterial": true,
        "hostCountryArticle6Status": "AMBIGUOUS",
        "carbonRegistrationIntent": "NOT_DECIDED",
        "additionalityJustification": JUSTIFICATION,
    }));

    assert!(verdict.is_eligible);
    assert_eq!(verdict.confidence_score, 25);
    assert_eq!(verdict.confidence_level, ConfidenceLevel::Low);
    assert_eq!(verdict.risk_warnings.len(), 1);
    let warning = &verdict.risk_warnings[0];
    assert!(warning.contains("additionality may be questioned"));
}

#[test]
fn retroactive_crediting_is_detected_from_iso_dates() {
    let verdict = assess(json!({
        "installedCapacityDC": "5",
        "commissioningDate": "2018-04-01",
        "creditingPeriodStart": "2023-04-01T00:00:00Z",
        "additionalityJustification": JUSTIFICATION,
    }));

    assert_eq!(
        triggered(&verdict),
        vec![HardFailKind::RetroactiveRegistration]
    );
}

#[test]
fn unknown_form_values_degrade_to_absent() {
    let verdict = assess(json!({
        "installedCapacityDC": "about ten",
        "offtakerType": "COOPERATIVE",
        "commissioningDate": "",
        "additionalityJustification": JUSTIFICATION,
    }));

    assert!(verdict.is_eligible);
    assert_eq!(verdict.confidence_score, 15);
}

#[test]
fn display_catalogs_are_exposed() {
    assert_eq!(HARD_FAIL_CONDITION_LIST.len(), 8);
    assert_eq!(
        SOFT_SIGNAL_LIST
            .iter()
            .map(|signal| signal.max_points)
            .sum::<u32>(),
        100
    );
}
