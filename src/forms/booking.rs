//! Review replies and the search/date-range filter bars of the booking
//! screens.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::mutation::MutationBody;
use crate::domain::page::{FilterValue, Filters};
use crate::forms::{FormError, json_body};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Deserialize, Validate)]
pub struct ReviewReplyForm {
    #[validate(length(min = 1, max = 1000))]
    pub reply: String,
}

impl ReviewReplyForm {
    pub fn into_body(self) -> Result<MutationBody, FormError> {
        self.validate()?;
        json_body(&serde_json::json!({ "reply": self.reply.trim() }))
    }
}

fn parse_date(field: &str, value: &str) -> Result<Option<NaiveDate>, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(Some)
        .map_err(|_| FormError::InvalidDate(field.to_string()))
}

/// Shared search + date range + status filter bar.
///
/// Empty inputs still appear in the patch as blank text so that merging it
/// clears whatever was filtered before.
fn date_range_patch(
    search: &str,
    status: &str,
    from: &str,
    to: &str,
    search_key: &str,
) -> Result<Filters, FormError> {
    let from_date = parse_date("from", from)?;
    let to_date = parse_date("to", to)?;
    if let (Some(from), Some(to)) = (from_date, to_date)
        && from > to
    {
        return Err(FormError::InvertedDateRange);
    }

    let format = |date: Option<NaiveDate>| {
        date.map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default()
    };

    Ok(Filters::new()
        .with(search_key, FilterValue::Text(search.trim().to_string()))
        .with("status", FilterValue::Text(status.trim().to_lowercase()))
        .with("from", FilterValue::Text(format(from_date)))
        .with("to", FilterValue::Text(format(to_date))))
}

#[derive(Debug, Default, Deserialize)]
pub struct AppointmentFilterForm {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
}

impl TryFrom<AppointmentFilterForm> for Filters {
    type Error = FormError;

    fn try_from(form: AppointmentFilterForm) -> Result<Self, Self::Error> {
        date_range_patch(&form.search, &form.status, &form.from, &form.to, "patient_name")
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TransactionFilterForm {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
}

impl TryFrom<TransactionFilterForm> for Filters {
    type Error = FormError;

    fn try_from(form: TransactionFilterForm) -> Result<Self, Self::Error> {
        date_range_patch(&form.search, &form.status, &form.from, &form.to, "search")
    }
}
