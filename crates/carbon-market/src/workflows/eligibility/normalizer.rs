use chrono::NaiveDate;

use super::domain::{
    Article6Status, FormDate, NumericField, OfftakeType, OfftakerType, ProjectEligibilityInput,
    RegistrationIntent,
};

/// Typed view of a project with every permissive coercion already applied.
///
/// Rule predicates only ever see this shape: missing or unparsable numbers are `0.0`,
/// missing text is empty, missing booleans are `false`. A commissioning date that was
/// submitted but does not parse still counts as submitted.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ProjectProfile {
    pub capacity_mw: f64,
    pub ppa_duration_years: f64,
    pub offtake_type: Option<OfftakeType>,
    pub offtaker_type: Option<OfftakerType>,
    pub crediting_period_start: Option<NaiveDate>,
    pub commissioning_date: Option<NaiveDate>,
    pub commissioning_date_submitted: bool,
    pub policy_driven: bool,
    pub registration_intent: Option<RegistrationIntent>,
    pub additionality_justification: String,
    pub article6_status: Option<Article6Status>,
    pub merchant: bool,
    pub carbon_revenue_material: bool,
}

pub(crate) fn normalize(input: &ProjectEligibilityInput) -> ProjectProfile {
    ProjectProfile {
        capacity_mw: capacity_mw(input),
        ppa_duration_years: numeric_or_zero(input.ppa_duration_years.as_ref()),
        offtake_type: input.offtake_type,
        offtaker_type: input.offtaker_type,
        crediting_period_start: input.crediting_period_start.as_ref().and_then(FormDate::date),
        commissioning_date: input.commissioning_date.as_ref().and_then(FormDate::date),
        commissioning_date_submitted: input.commissioning_date.is_some(),
        policy_driven: input.is_policy_driven.unwrap_or(false),
        registration_intent: input.carbon_registration_intent,
        additionality_justification: input
            .additionality_justification
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
        article6_status: input.host_country_article6_status,
        merchant: input.is_merchant.unwrap_or(false),
        carbon_revenue_material: input.carbon_revenue_material.unwrap_or(false),
    }
}

/// DC, then AC, then the generic field. The first one submitted wins even if it does not
/// parse, in which case the capacity is zero.
fn capacity_mw(input: &ProjectEligibilityInput) -> f64 {
    let selected = [
        &input.installed_capacity_dc,
        &input.installed_capacity_ac,
        &input.installed_capacity,
    ]
    .into_iter()
    .flatten()
    .find(|field| !field.is_blank());

    numeric_or_zero(selected)
}

fn numeric_or_zero(field: Option<&NumericField>) -> f64 {
    let value = match field {
        Some(NumericField::Number(number)) => *number,
        Some(NumericField::Text(text)) => leading_number(text).unwrap_or(0.0),
        None => 0.0,
    };

    if value.is_nan() {
        0.0
    } else {
        value
    }
}

/// Longest numeric prefix of the text, so `"12 MW"` reads as 12 and `"Infinity"` as
/// infinity. Single pass over an optional sign, digits, an optional fraction and an exponent
/// that only counts when digits follow it.
fn leading_number(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();

    let negative = bytes.first() == Some(&b'-');
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    if trimmed[end..].starts_with("Infinity") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let integer_digits = count_digits(&bytes[end..]);
    end += integer_digits;
    let mut fraction_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction_digits = count_digits(&bytes[end + 1..]);
        if integer_digits + fraction_digits > 0 {
            end += 1 + fraction_digits;
        }
    }
    if integer_digits + fraction_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let exponent_digits = count_digits(&bytes[exponent..]);
        if exponent_digits > 0 {
            end = exponent + exponent_digits;
        }
    }

    trimmed[..end].parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|byte| byte.is_ascii_digit()).count()
}

/// Fractional years between two dates using a 365-day year.
pub(crate) fn years_between(start: NaiveDate, end: NaiveDate) -> f64 {
    (end - start).num_days() as f64 / 365.0
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    fn input_with_capacities(
        dc: Option<NumericField>,
        ac: Option<NumericField>,
        generic: Option<NumericField>,
    ) -> ProjectEligibilityInput {
        ProjectEligibilityInput {
            installed_capacity_dc: dc,
            installed_capacity_ac: ac,
            installed_capacity: generic,
            ..Default::default()
        }
    }

    #[test]
    fn capacity_prefers_dc_then_ac_then_generic() {
        let all = input_with_capacities(
            Some("12".into()),
            Some("60".into()),
            Some(NumericField::Number(80.0)),
        );
        assert_eq!(normalize(&all).capacity_mw, 12.0);

        let ac_only = input_with_capacities(None, Some(NumericField::Number(60.0)), None);
        assert_eq!(normalize(&ac_only).capacity_mw, 60.0);

        let generic_only = input_with_capacities(None, None, Some("30.5".into()));
        assert_eq!(normalize(&generic_only).capacity_mw, 30.5);
    }

    #[test]
    fn blank_capacity_falls_through_but_garbage_does_not() {
        let blank_dc = input_with_capacities(Some("  ".into()), Some("60".into()), None);
        assert_eq!(normalize(&blank_dc).capacity_mw, 60.0);

        let garbage_dc = input_with_capacities(Some("n/a".into()), Some("60".into()), None);
        assert_eq!(normalize(&garbage_dc).capacity_mw, 0.0);
    }

    #[test]
    fn numeric_text_uses_leading_number() {
        assert_eq!(leading_number("12 MW"), Some(12.0));
        assert_eq!(leading_number(" -3.5e1x"), Some(-35.0));
        assert_eq!(leading_number("1e"), Some(1.0));
        assert_eq!(leading_number("2.5e+1MW"), Some(25.0));
        assert_eq!(leading_number(".5"), Some(0.5));
        assert_eq!(leading_number("7.x"), Some(7.0));
        assert_eq!(leading_number("MW 12"), None);
        assert_eq!(leading_number("-.e5"), None);
        assert_eq!(leading_number(""), None);
        assert_eq!(numeric_or_zero(Some(&"inf".into())), 0.0);
        assert_eq!(numeric_or_zero(Some(&NumericField::Number(f64::NAN))), 0.0);
    }

    #[test]
    fn infinity_token_is_kept_as_infinite() {
        assert_eq!(leading_number("Infinity MW"), Some(f64::INFINITY));
        assert_eq!(leading_number("-Infinity"), Some(f64::NEG_INFINITY));
        let huge = input_with_capacities(Some("Infinity".into()), None, None);
        assert_eq!(normalize(&huge).capacity_mw, f64::INFINITY);
        let overflow = input_with_capacities(Some("1e999".into()), None, None);
        assert_eq!(normalize(&overflow).capacity_mw, f64::INFINITY);
    }

    #[test]
    fn long_sign_runs_scan_in_linear_time() {
        let digits = "1".repeat(100_000);
        let signs = "-".repeat(100_000);
        let started = Instant::now();

        let value = leading_number(&format!("{digits}{signs}")).expect("digits parse");
        assert!(value.is_infinite());
        assert_eq!(
            leading_number(&format!("12{}", "e-".repeat(100_000))),
            Some(12.0)
        );

        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn unparsable_commissioning_date_still_counts_as_submitted() {
        let input = ProjectEligibilityInput {
            commissioning_date: Some(FormDate::Unparsed("01/06/2019".to_string())),
            ..Default::default()
        };

        let profile = normalize(&input);
        assert!(profile.commissioning_date_submitted);
        assert_eq!(profile.commissioning_date, None);
    }

    #[test]
    fn missing_fields_take_neutral_defaults() {
        let profile = normalize(&ProjectEligibilityInput::default());
        assert_eq!(profile.capacity_mw, 0.0);
        assert_eq!(profile.ppa_duration_years, 0.0);
        assert!(!profile.policy_driven);
        assert!(!profile.merchant);
        assert!(!profile.carbon_revenue_material);
        assert!(profile.additionality_justification.is_empty());
        assert_eq!(profile.commissioning_date, None);
        assert!(!profile.commissioning_date_submitted);
    }

    #[test]
    fn justification_is_trimmed() {
        let input = ProjectEligibilityInput {
            additionality_justification: Some("   barrier analysis   ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            normalize(&input).additionality_justification,
            "barrier analysis"
        );
    }

    #[test]
    fn years_between_uses_365_day_years() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date");
        let end = NaiveDate::from_ymd_opt(2022, 1, 1).expect("valid date");
        assert!((years_between(start, end) - 731.0 / 365.0).abs() < f64::EPSILON);
    }
}
