//! Domain types shared by the registry client and the views.
//!
//! These are immutable snapshots of registry data. The registry's own
//! (Portuguese) field names live in `locator_registry::wire`; everything
//! here uses the internal vocabulary.

use chrono::NaiveDate;
use serde::Serialize;

/// Default number of records per list page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

// ---------------------------------------------------------------------------
// PersonId
// ---------------------------------------------------------------------------

/// Opaque registry identifier for a person.
///
/// The registry sends numeric ids; older payloads use strings. Both are kept
/// as text and never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the id is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PersonId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<i64> for PersonId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

// ---------------------------------------------------------------------------
// PersonRecord
// ---------------------------------------------------------------------------

/// Whether a person is still missing, derived from the last occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonStatus {
    Missing,
    Located,
}

/// Free-text interview notes attached to an occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InterviewDetails {
    pub information: Option<String>,
    pub clothing: Option<String>,
}

/// The most recent disappearance event recorded for a person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LastOccurrence {
    /// Registry occurrence id, used to address tips.
    pub occurrence_id: Option<i64>,
    pub disappeared_on: Option<NaiveDate>,
    /// `None` while the person is still missing.
    pub located_on: Option<NaiveDate>,
    pub found_alive: Option<bool>,
    /// Free-text description of where the person was last seen.
    pub location: String,
    pub interview: Option<InterviewDetails>,
    /// Poster / flyer image URLs.
    pub posters: Vec<String>,
}

/// One entry in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonRecord {
    pub id: PersonId,
    pub name: String,
    pub age: Option<u32>,
    pub age_when_missing: Option<u32>,
    pub sex: String,
    pub alive: bool,
    pub has_dna_sample: bool,
    pub photo_url: Option<String>,
    pub last_occurrence: Option<LastOccurrence>,
}

impl PersonRecord {
    /// Derive the status from `last_occurrence.located_on`.
    ///
    /// A person with no occurrence, or with an occurrence that has no
    /// localization date, is missing.
    pub fn status(&self) -> PersonStatus {
        match self.last_occurrence.as_ref().and_then(|o| o.located_on) {
            Some(_) => PersonStatus::Located,
            None => PersonStatus::Missing,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.status() == PersonStatus::Missing
    }

    pub fn occurrence_id(&self) -> Option<i64> {
        self.last_occurrence.as_ref().and_then(|o| o.occurrence_id)
    }

    /// Case-insensitive substring match on the name.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }
}

// ---------------------------------------------------------------------------
// SearchQuery
// ---------------------------------------------------------------------------

/// Status filter for list searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    Missing,
    Located,
}

impl StatusFilter {
    /// Registry wire token for this filter.
    pub fn token(self) -> &'static str {
        match self {
            StatusFilter::Missing => "DESAPARECIDO",
            StatusFilter::Located => "LOCALIZADO",
        }
    }

    /// Parse a wire token or a lowercase internal name.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "DESAPARECIDO" | "MISSING" => Some(StatusFilter::Missing),
            "LOCALIZADO" | "LOCATED" => Some(StatusFilter::Located),
            _ => None,
        }
    }

    pub fn matches(self, status: PersonStatus) -> bool {
        matches!(
            (self, status),
            (StatusFilter::Missing, PersonStatus::Missing)
                | (StatusFilter::Located, PersonStatus::Located)
        )
    }
}

/// Parameters of one list search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    /// Zero-based page index.
    pub page: u32,
    pub page_size: u32,
    /// Trimmed name substring; `None` when blank.
    pub name: Option<String>,
    pub status: Option<StatusFilter>,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl SearchQuery {
    /// First page, no filters.
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 0,
            page_size,
            name: None,
            status: None,
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Set the name filter. Whitespace is trimmed and blank input clears it.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = normalize_name(name);
        self
    }

    pub fn with_status(mut self, status: Option<StatusFilter>) -> Self {
        self.status = status;
        self
    }

    /// Ids of records that do not satisfy this query's name filter.
    ///
    /// The registry is expected to filter server-side; a non-empty result
    /// is a contract violation by the registry.
    pub fn name_mismatches(&self, result: &PagedResult) -> Vec<PersonId> {
        let Some(name) = self.name.as_deref() else {
            return Vec::new();
        };
        result
            .records
            .iter()
            .filter(|r| !r.name_contains(name))
            .map(|r| r.id.clone())
            .collect()
    }
}

/// Trim a user-entered name filter, mapping blank input to `None`.
pub fn normalize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ---------------------------------------------------------------------------
// PagedResult
// ---------------------------------------------------------------------------

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagedResult {
    pub records: Vec<PersonRecord>,
    pub total_elements: u64,
    pub total_pages: u32,
    /// Zero-based page index.
    pub page: u32,
    pub page_size: u32,
}

impl PagedResult {
    /// Build a page, deriving `total_pages` from the element count.
    pub fn new(records: Vec<PersonRecord>, total_elements: u64, page: u32, page_size: u32) -> Self {
        Self {
            records,
            total_elements,
            total_pages: total_pages(total_elements, page_size),
            page,
            page_size,
        }
    }

    /// An empty first page.
    pub fn empty(page_size: u32) -> Self {
        Self::new(Vec::new(), 0, 0, page_size)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// `ceil(total_elements / page_size)`, or `0` when `page_size` is zero.
pub fn total_pages(total_elements: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total_elements.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
