//! Rule catalog for the eligibility assessment.
//!
//! Both tables are ordered; outcomes are always reported in catalog order. Soft-signal
//! weights sum to [`max_points`], which the score is normalised against.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::domain::{Article6Status, OfftakeType, OfftakerType, RegistrationIntent};
use super::normalizer::{years_between, ProjectProfile};

const UTILITY_SCALE_MW: f64 = 50.0;
const POLICY_THRESHOLD_MW: f64 = 25.0;
const LONG_TERM_PPA_YEARS: f64 = 10.0;
const MAX_REGISTRATION_GAP_YEARS: f64 = 2.0;
const MIN_JUSTIFICATION_CHARS: usize = 50;

/// Absolute disqualifiers, identified by their wire ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardFailKind {
    UtilityScale,
    LongTermPpa,
    GovernmentOfftaker,
    PolicyDriven,
    CommissioningBeforeIntent,
    RetroactiveRegistration,
    NoAdditionality,
    #[serde(rename = "article_6_risk")]
    Article6Risk,
}

impl HardFailKind {
    pub const fn id(self) -> &'static str {
        match self {
            HardFailKind::UtilityScale => "utility_scale",
            HardFailKind::LongTermPpa => "long_term_ppa",
            HardFailKind::GovernmentOfftaker => "government_offtaker",
            HardFailKind::PolicyDriven => "policy_driven",
            HardFailKind::CommissioningBeforeIntent => "commissioning_before_intent",
            HardFailKind::RetroactiveRegistration => "retroactive_registration",
            HardFailKind::NoAdditionality => "no_additionality",
            HardFailKind::Article6Risk => "article_6_risk",
        }
    }
}

/// Positive indicators, identified by their wire ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoftSignalKind {
    MerchantProject,
    CarbonRevenueMaterial,
    BelowPolicyThreshold,
    HostCountryPrecedent,
    ExAnteRegistration,
}

impl SoftSignalKind {
    pub const fn id(self) -> &'static str {
        match self {
            SoftSignalKind::MerchantProject => "merchant_project",
            SoftSignalKind::CarbonRevenueMaterial => "carbon_revenue_material",
            SoftSignalKind::BelowPolicyThreshold => "below_policy_threshold",
            SoftSignalKind::HostCountryPrecedent => "host_country_precedent",
            SoftSignalKind::ExAnteRegistration => "ex_ante_registration",
        }
    }
}

pub(crate) struct HardFailCondition {
    pub kind: HardFailKind,
    pub condition: &'static str,
    pub reason: &'static str,
    pub check: fn(&ProjectProfile) -> bool,
}

pub(crate) struct SoftSignal {
    pub kind: SoftSignalKind,
    pub signal: &'static str,
    pub points: u32,
    pub check: fn(&ProjectProfile) -> bool,
}

pub(crate) static HARD_FAIL_CONDITIONS: [HardFailCondition; 8] = [
    HardFailCondition {
        kind: HardFailKind::UtilityScale,
        condition: "Project is utility-scale grid-connected renewable (typically >50 MW)",
        reason: "Project capacity exceeds 50 MW threshold for utility-scale projects.",
        check: |project| project.capacity_mw > UTILITY_SCALE_MW,
    },
    HardFailCondition {
        kind: HardFailKind::LongTermPpa,
        condition: "Project has a long-term Power Purchase Agreement (PPA)",
        reason: "Project has a long-term PPA (10+ years), which typically indicates financial viability without carbon revenue.",
        check: |project| {
            project.offtake_type == Some(OfftakeType::Ppa)
                && project.ppa_duration_years >= LONG_TERM_PPA_YEARS
        },
    },
    HardFailCondition {
        kind: HardFailKind::GovernmentOfftaker,
        condition: "Offtaker is a government entity or regulated utility",
        reason: "Government or regulated utility offtakers typically provide guaranteed revenue streams.",
        check: |project| {
            matches!(
                project.offtaker_type,
                Some(OfftakerType::Government | OfftakerType::Utility)
            )
        },
    },
    HardFailCondition {
        kind: HardFailKind::PolicyDriven,
        condition: "Project is part of a policy-driven renewable program, auction, or mandate",
        reason: "Policy-driven projects face significant additionality challenges.",
        check: |project| project.policy_driven,
    },
    HardFailCondition {
        kind: HardFailKind::CommissioningBeforeIntent,
        condition: "Project commissioning occurred before carbon registration intent",
        reason: "Carbon registration intent documented more than 2 years after commissioning.",
        check: |project| {
            project.commissioning_date_submitted
                && project.registration_intent == Some(RegistrationIntent::After2Years)
        },
    },
    HardFailCondition {
        kind: HardFailKind::RetroactiveRegistration,
        condition: "Carbon crediting would require retroactive registration",
        reason: "Significant gap between commissioning and crediting period suggests retroactive registration.",
        check: |project| match (project.commissioning_date, project.crediting_period_start) {
            (Some(commissioning), Some(crediting)) => {
                years_between(commissioning, crediting) > MAX_REGISTRATION_GAP_YEARS
            }
            _ => false,
        },
    },
    HardFailCondition {
        kind: HardFailKind::NoAdditionality,
        condition: "No documented financial, regulatory, or barrier additionality",
        reason: "Insufficient additionality documentation provided.",
        check: |project| {
            project.additionality_justification.chars().count() < MIN_JUSTIFICATION_CHARS
        },
    },
    HardFailCondition {
        kind: HardFailKind::Article6Risk,
        condition: "High risk of double counting or Article 6 ambiguity in host country",
        reason: "Host country has high risk of double counting under Article 6.",
        check: |project| project.article6_status == Some(Article6Status::HighRisk),
    },
];

pub(crate) static SOFT_SIGNALS: [SoftSignal; 5] = [
    SoftSignal {
        kind: SoftSignalKind::MerchantProject,
        signal: "Project is merchant or partially merchant (no guaranteed offtake)",
        points: 20,
        check: |project| {
            project.offtake_type == Some(OfftakeType::Merchant) || project.merchant
        },
    },
    SoftSignal {
        kind: SoftSignalKind::CarbonRevenueMaterial,
        signal: "Carbon revenue is material to project IRR or viability",
        points: 25,
        check: |project| project.carbon_revenue_material,
    },
    SoftSignal {
        kind: SoftSignalKind::BelowPolicyThreshold,
        signal: "Project size is below policy-driven thresholds",
        points: 15,
        check: |project| project.capacity_mw <= POLICY_THRESHOLD_MW,
    },
    SoftSignal {
        kind: SoftSignalKind::HostCountryPrecedent,
        signal: "Host country has precedent voluntary carbon registrations",
        points: 20,
        check: |project| project.article6_status == Some(Article6Status::Clear),
    },
    SoftSignal {
        kind: SoftSignalKind::ExAnteRegistration,
        signal: "Ex-ante registration is possible",
        points: 20,
        check: |project| {
            matches!(
                project.registration_intent,
                Some(RegistrationIntent::BeforeCommissioning | RegistrationIntent::Within2Years)
            )
        },
    },
];

/// Sum of every soft-signal weight in the catalog.
pub fn max_points() -> u32 {
    SOFT_SIGNALS.iter().map(|signal| signal.points).sum()
}

/// Display projection of a hard-fail condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HardFailConditionView {
    pub id: HardFailKind,
    pub condition: &'static str,
}

/// Display projection of a soft signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftSignalView {
    pub id: SoftSignalKind,
    pub signal: &'static str,
    pub max_points: u32,
}

/// Checklist of hard-fail conditions for end-user display.
pub static HARD_FAIL_CONDITION_LIST: LazyLock<Vec<HardFailConditionView>> = LazyLock::new(|| {
    HARD_FAIL_CONDITIONS
        .iter()
        .map(|rule| HardFailConditionView {
            id: rule.kind,
            condition: rule.condition,
        })
        .collect()
});

/// Checklist of soft signals and their weights for end-user display.
pub static SOFT_SIGNAL_LIST: LazyLock<Vec<SoftSignalView>> = LazyLock::new(|| {
    SOFT_SIGNALS
        .iter()
        .map(|rule| SoftSignalView {
            id: rule.kind,
            signal: rule.signal,
            max_points: rule.points,
        })
        .collect()
});
