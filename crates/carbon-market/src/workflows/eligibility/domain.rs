use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Project record as assembled by the project-creation wizard.
///
/// Every field is optional: absence means "unknown". Numeric fields accept either JSON
/// numbers or the raw strings the forms submit. Enumerations with an unrecognised label are
/// treated as absent; unparsable dates are kept verbatim as [`FormDate::Unparsed`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectEligibilityInput {
    #[serde(rename = "installedCapacityDC", default, skip_serializing_if = "Option::is_none")]
    pub installed_capacity_dc: Option<NumericField>,
    #[serde(rename = "installedCapacityAC", default, skip_serializing_if = "Option::is_none")]
    pub installed_capacity_ac: Option<NumericField>,
    #[serde(rename = "installedCapacity", default, skip_serializing_if = "Option::is_none")]
    pub installed_capacity: Option<NumericField>,
    #[serde(
        rename = "ppaDuration",
        alias = "ppaDurationYears",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ppa_duration_years: Option<NumericField>,
    #[serde(
        rename = "offtakeType",
        default,
        deserialize_with = "lenient_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub offtake_type: Option<OfftakeType>,
    #[serde(
        rename = "creditingPeriodStart",
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub crediting_period_start: Option<FormDate>,
    #[serde(
        rename = "commissioningDate",
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub commissioning_date: Option<FormDate>,
    #[serde(
        rename = "offtakerType",
        default,
        deserialize_with = "lenient_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub offtaker_type: Option<OfftakerType>,
    #[serde(rename = "isPolicyDriven", default, skip_serializing_if = "Option::is_none")]
    pub is_policy_driven: Option<bool>,
    #[serde(
        rename = "carbonRegistrationIntent",
        default,
        deserialize_with = "lenient_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub carbon_registration_intent: Option<RegistrationIntent>,
    #[serde(
        rename = "additionalityJustification",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub additionality_justification: Option<String>,
    #[serde(
        rename = "hostCountryArticle6Status",
        default,
        deserialize_with = "lenient_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub host_country_article6_status: Option<Article6Status>,
    #[serde(rename = "isMerchant", default, skip_serializing_if = "Option::is_none")]
    pub is_merchant: Option<bool>,
    #[serde(rename = "merchantPercentage", default, skip_serializing_if = "Option::is_none")]
    pub merchant_percentage: Option<NumericField>,
    #[serde(rename = "carbonRevenueMaterial", default, skip_serializing_if = "Option::is_none")]
    pub carbon_revenue_material: Option<bool>,
}

/// Numeric form value that may arrive as a JSON number or as free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Number(f64),
    Text(String),
}

impl NumericField {
    /// Blank text is treated as if the field had not been submitted.
    pub fn is_blank(&self) -> bool {
        matches!(self, NumericField::Text(text) if text.trim().is_empty())
    }
}

impl From<f64> for NumericField {
    fn from(value: f64) -> Self {
        NumericField::Number(value)
    }
}

impl From<&str> for NumericField {
    fn from(value: &str) -> Self {
        NumericField::Text(value.to_string())
    }
}

/// Date form value. Text that is not a recognised date still counts as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormDate {
    Date(NaiveDate),
    Unparsed(String),
}

impl FormDate {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            FormDate::Date(date) => Some(*date),
            FormDate::Unparsed(_) => None,
        }
    }
}

impl From<NaiveDate> for FormDate {
    fn from(date: NaiveDate) -> Self {
        FormDate::Date(date)
    }
}

impl Serialize for FormDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FormDate::Date(date) => serializer.collect_str(&date.format("%Y-%m-%d")),
            FormDate::Unparsed(raw) => serializer.serialize_str(raw),
        }
    }
}

/// Error returned when a wire label does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised {kind} label '{label}'")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub label: String,
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value.trim() {
                    $($label => Ok($name::$variant),)+
                    other => Err(UnknownLabel {
                        kind: $kind,
                        label: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

wire_enum! {
    /// Commercial arrangement for the project's output.
    OfftakeType, "offtake type" {
        Ppa => "PPA",
        Merchant => "MERCHANT",
        Other => "OTHER",
    }
}

wire_enum! {
    /// Counterparty buying the project's output.
    OfftakerType, "offtaker type" {
        Government => "GOVERNMENT",
        Utility => "UTILITY",
        Private => "PRIVATE",
        Other => "OTHER",
    }
}

wire_enum! {
    /// When the developer intends to register the project with a carbon standard.
    RegistrationIntent, "carbon registration intent" {
        BeforeCommissioning => "BEFORE_COMMISSIONING",
        Within2Years => "WITHIN_2_YEARS",
        After2Years => "AFTER_2_YEARS",
        NotDecided => "NOT_DECIDED",
    }
}

wire_enum! {
    /// Host-country status regarding Article 6 corresponding adjustments.
    Article6Status, "Article 6 status" {
        Clear => "CLEAR",
        Ambiguous => "AMBIGUOUS",
        HighRisk => "HIGH_RISK",
    }
}

fn lenient_label<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = UnknownLabel>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            if !value.trim().is_empty() {
                tracing::debug!(%err, "ignoring unrecognised label");
            }
            None
        }
    }))
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<FormDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .filter(|value| !value.trim().is_empty())
        .map(|value| match parse_form_date(&value) {
            Some(date) => FormDate::Date(date),
            None => {
                tracing::debug!(value = %value, "keeping unparsable date verbatim");
                FormDate::Unparsed(value)
            }
        }))
}

/// Parses `YYYY-MM-DD` or an RFC 3339 timestamp, keeping only the calendar date.
pub fn parse_form_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}
