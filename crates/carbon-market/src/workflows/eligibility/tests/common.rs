use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::eligibility::domain::{
    Article6Status, NumericField, OfftakeType, ProjectEligibilityInput, RegistrationIntent,
};

pub(super) const SOLID_JUSTIFICATION: &str =
    "Without carbon revenue the project IRR falls below the national hurdle rate; \
     no concessional finance or feed-in tariff is available.";

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Small merchant project hitting every soft signal and no hard fail.
pub(super) fn clean_merchant_project() -> ProjectEligibilityInput {
    ProjectEligibilityInput {
        installed_capacity_dc: Some(NumericField::from("10")),
        offtake_type: Some(OfftakeType::Merchant),
        carbon_revenue_material: Some(true),
        host_country_article6_status: Some(Article6Status::Clear),
        carbon_registration_intent: Some(RegistrationIntent::BeforeCommissioning),
        additionality_justification: Some(SOLID_JUSTIFICATION.to_string()),
        ..Default::default()
    }
}

/// Passes every hard-fail condition while presenting as few soft signals as possible.
///
/// Capacity sits between the policy threshold and the utility-scale cut-off so that
/// `below_policy_threshold` stays off.
pub(super) fn bare_passing_project() -> ProjectEligibilityInput {
    ProjectEligibilityInput {
        installed_capacity_dc: Some(NumericField::Number(30.0)),
        additionality_justification: Some(SOLID_JUSTIFICATION.to_string()),
        ..Default::default()
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 64)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
