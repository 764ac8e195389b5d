//! Display formatting for person records.
//!
//! User-facing text is Brazilian Portuguese, matching the registry's
//! audience.

use chrono::{Datelike, NaiveDate};

use crate::types::{PersonRecord, PersonStatus};

/// Placeholder for missing values.
pub const NOT_INFORMED: &str = "Não informado";

const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// `dd/mm/yyyy`, or [`NOT_INFORMED`].
pub fn short_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%d/%m/%Y").to_string(),
        None => NOT_INFORMED.to_string(),
    }
}

/// `15 de janeiro de 2024`, or [`NOT_INFORMED`].
pub fn long_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => format!(
            "{:02} de {} de {}",
            d.day(),
            MONTHS[d.month0() as usize],
            d.year()
        ),
        None => NOT_INFORMED.to_string(),
    }
}

/// `"34 anos"`; zero or unknown ages read as not informed.
pub fn age_label(age: Option<u32>) -> String {
    match age {
        Some(1) => "1 ano".to_string(),
        Some(n) if n > 0 => format!("{n} anos"),
        _ => "Idade não informada".to_string(),
    }
}

pub fn status_label(status: PersonStatus) -> &'static str {
    match status {
        PersonStatus::Missing => "Desaparecido(a)",
        PersonStatus::Located => "Localizado(a)",
    }
}

/// Days elapsed between disappearance and `today` (or localization, if any).
pub fn days_missing(record: &PersonRecord, today: NaiveDate) -> Option<i64> {
    let occurrence = record.last_occurrence.as_ref()?;
    let start = occurrence.disappeared_on?;
    let end = occurrence.located_on.unwrap_or(today);
    Some((end - start).num_days().max(0))
}

/// Non-blank text or [`NOT_INFORMED`].
pub fn or_not_informed(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(NOT_INFORMED)
        .to_string()
}
