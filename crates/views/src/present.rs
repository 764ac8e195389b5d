//! View models and plain-text rendering.
//!
//! [`PersonCard`] backs one cell of the list grid and [`PersonDetail`] the
//! detail panel. Both are serializable so a web host can hand them to a
//! template; the `render_*` functions produce the terminal output of the
//! bundled binary.

use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::Serialize;

use locator_core::display::{
    age_label, days_missing, long_date, or_not_informed, short_date, status_label,
};
use locator_core::pagination::PageItem;
use locator_core::{PersonRecord, PersonStatus};

use crate::detail::DetailController;
use crate::list::ListController;
use crate::message::ViewError;

const EMPTY_LIST: &str = "Nenhuma pessoa encontrada com os filtros informados.";
const LOADING: &str = "Carregando...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonCard {
    pub id: String,
    pub name: String,
    pub age: String,
    pub status: PersonStatus,
    pub status_label: &'static str,
    pub disappeared_on: String,
    pub location: String,
    pub photo_url: Option<String>,
}

impl From<&PersonRecord> for PersonCard {
    fn from(record: &PersonRecord) -> Self {
        let occurrence = record.last_occurrence.as_ref();
        Self {
            id: record.id.to_string(),
            name: record.name.clone(),
            age: age_label(record.age),
            status: record.status(),
            status_label: status_label(record.status()),
            disappeared_on: short_date(occurrence.and_then(|o| o.disappeared_on)),
            location: or_not_informed(occurrence.map(|o| o.location.as_str())),
            photo_url: record.photo_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonDetail {
    pub card: PersonCard,
    pub sex: String,
    pub disappeared_on: String,
    pub located_on: Option<String>,
    pub days_missing: Option<i64>,
    pub information: String,
    pub clothing: String,
    pub posters: Vec<String>,
    pub can_offer_tip: bool,
}

impl PersonDetail {
    pub fn new(record: &PersonRecord, today: NaiveDate) -> Self {
        let occurrence = record.last_occurrence.as_ref();
        let interview = occurrence.and_then(|o| o.interview.as_ref());
        Self {
            card: PersonCard::from(record),
            sex: or_not_informed(Some(record.sex.as_str())),
            disappeared_on: long_date(occurrence.and_then(|o| o.disappeared_on)),
            located_on: occurrence
                .and_then(|o| o.located_on)
                .map(|d| long_date(Some(d))),
            days_missing: days_missing(record, today),
            information: or_not_informed(interview.and_then(|i| i.information.as_deref())),
            clothing: or_not_informed(interview.and_then(|i| i.clothing.as_deref())),
            posters: occurrence.map(|o| o.posters.clone()).unwrap_or_default(),
            can_offer_tip: record.is_missing(),
        }
    }
}

/// Pagination control as text, e.g. `< 1 … 4 [5] 6 … 12 >`.
pub fn render_pagination(list: &ListController) -> String {
    let items = list.page_items();
    if items.is_empty() {
        return String::new();
    }
    let current = list.current_page();
    let mut parts = Vec::with_capacity(items.len() + 2);
    if list.has_previous() {
        parts.push("<".to_string());
    }
    for item in items {
        parts.push(match item {
            PageItem::Page(n) if n == current => format!("[{n}]"),
            PageItem::Page(n) => n.to_string(),
            PageItem::Ellipsis => "…".to_string(),
        });
    }
    if list.has_next() {
        parts.push(">".to_string());
    }
    parts.join(" ")
}

pub fn render_list(list: &ListController) -> String {
    let mut out = String::new();

    let mut filters = Vec::new();
    if let Some(name) = list.name_filter() {
        filters.push(format!("nome: {name}"));
    }
    if let Some(status) = list.status_filter() {
        filters.push(format!("status: {}", status.token()));
    }
    if !filters.is_empty() {
        let _ = writeln!(out, "Filtros: {}", filters.join(", "));
    }

    if let Some(error) = list.error() {
        render_error(&mut out, error);
        return out;
    }
    if list.is_empty() {
        let _ = writeln!(out, "{EMPTY_LIST}");
        return out;
    }
    if list.is_loading() {
        let _ = writeln!(out, "{LOADING}");
    }

    if let Some(results) = list.results() {
        let _ = writeln!(
            out,
            "{} registro(s), página {} de {}",
            results.total_elements,
            list.current_page(),
            results.total_pages.max(1)
        );
    }
    for record in list.records() {
        let card = PersonCard::from(record);
        let _ = writeln!(
            out,
            "#{:<6} {:<32} {:<16} {:<16} desde {} em {}",
            card.id, card.name, card.age, card.status_label, card.disappeared_on, card.location
        );
    }

    let pagination = render_pagination(list);
    if !pagination.is_empty() {
        let _ = writeln!(out, "{pagination}");
    }
    out
}

pub fn render_detail(detail: &DetailController, today: NaiveDate) -> String {
    let mut out = String::new();

    if let Some(error) = detail.error() {
        render_error(&mut out, error);
        return out;
    }
    let Some(record) = detail.record() else {
        if detail.is_loading() {
            let _ = writeln!(out, "{LOADING}");
        }
        return out;
    };

    let view = PersonDetail::new(record, today);
    let _ = writeln!(out, "{} ({})", view.card.name, view.card.status_label);
    let _ = writeln!(out, "Idade: {}", view.card.age);
    let _ = writeln!(out, "Sexo: {}", view.sex);
    let _ = writeln!(out, "Desaparecimento: {}", view.disappeared_on);
    let _ = writeln!(out, "Local: {}", view.card.location);
    if let Some(located_on) = &view.located_on {
        let _ = writeln!(out, "Localizado(a) em: {located_on}");
    }
    if let Some(days) = view.days_missing {
        let _ = writeln!(out, "Dias desaparecido(a): {days}");
    }
    let _ = writeln!(out, "Informações: {}", view.information);
    let _ = writeln!(out, "Vestimentas: {}", view.clothing);
    for poster in &view.posters {
        let _ = writeln!(out, "Cartaz: {poster}");
    }
    if detail.can_offer_tip() {
        let _ = writeln!(out, "Tem informações sobre esta pessoa? Envie uma informação.");
    }
    out
}

fn render_error(out: &mut String, error: &ViewError) {
    let _ = writeln!(out, "{}", error.message);
    if error.retryable {
        let _ = writeln!(out, "[Tentar novamente]");
    }
}
