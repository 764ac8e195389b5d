//! In-memory registry over a fixed record set.
//!
//! Applies the same filtering and pagination rules as the remote registry:
//! case-insensitive name substring, status derived from the localization
//! date, zero-based pages. Submitted tips are kept for inspection.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use locator_core::types::{InterviewDetails, LastOccurrence};
use locator_core::{
    PagedResult, PersonId, PersonRecord, RawFailure, RegistryError, SearchQuery, TipSubmission,
};

use crate::registry::Registry;

/// Registry backed by a `Vec` of records.
#[derive(Debug, Default)]
pub struct StaticRegistry {
    records: Vec<PersonRecord>,
    tips: Mutex<Vec<TipSubmission>>,
}

impl StaticRegistry {
    pub fn new(records: Vec<PersonRecord>) -> Self {
        Self {
            records,
            tips: Mutex::new(Vec::new()),
        }
    }

    /// A small sample data set for local runs and tests.
    pub fn with_sample_data() -> Self {
        Self::new(sample_records())
    }

    /// Tips received so far, in submission order.
    pub fn submitted_tips(&self) -> Vec<TipSubmission> {
        self.tips
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Registry for StaticRegistry {
    async fn search(&self, query: &SearchQuery) -> Result<PagedResult, RegistryError> {
        if query.page_size == 0 {
            return Err(RegistryError::from_raw(
                RawFailure::Status(400),
                "page size must be positive",
            ));
        }

        let matching: Vec<&PersonRecord> = self
            .records
            .iter()
            .filter(|r| query.name.as_deref().map_or(true, |n| r.name_contains(n)))
            .filter(|r| query.status.map_or(true, |s| s.matches(r.status())))
            .collect();

        let start = (query.page as usize).saturating_mul(query.page_size as usize);
        let page: Vec<PersonRecord> = matching
            .iter()
            .skip(start)
            .take(query.page_size as usize)
            .map(|r| (*r).clone())
            .collect();

        Ok(PagedResult::new(
            page,
            matching.len() as u64,
            query.page,
            query.page_size,
        ))
    }

    async fn get_by_id(&self, id: &str) -> Result<PersonRecord, RegistryError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(RegistryError::invalid_argument("person id is blank"));
        }
        self.records
            .iter()
            .find(|r| r.id.as_str() == id)
            .cloned()
            .ok_or_else(|| {
                RegistryError::from_raw(RawFailure::Status(404), format!("person {id} not found"))
            })
    }

    async fn submit_tip(&self, tip: &TipSubmission) -> Result<(), RegistryError> {
        if !self.records.iter().any(|r| r.id == tip.person_id) {
            return Err(RegistryError::from_raw(
                RawFailure::Status(404),
                format!("person {} not found", tip.person_id),
            ));
        }
        self.tips
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(tip.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sample data
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
fn sample(
    id: i64,
    name: &str,
    age: u32,
    sex: &str,
    disappeared: (i32, u32, u32),
    located: Option<(i32, u32, u32)>,
    location: &str,
    clothing: &str,
) -> PersonRecord {
    let date = |(y, m, d): (i32, u32, u32)| NaiveDate::from_ymd_opt(y, m, d);
    PersonRecord {
        id: PersonId::from(id),
        name: name.to_string(),
        age: Some(age),
        age_when_missing: Some(age),
        sex: sex.to_string(),
        alive: true,
        has_dna_sample: false,
        photo_url: None,
        last_occurrence: Some(LastOccurrence {
            occurrence_id: Some(1000 + id),
            disappeared_on: date(disappeared),
            located_on: located.and_then(date),
            found_alive: located.map(|_| true),
            location: location.to_string(),
            interview: Some(InterviewDetails {
                information: None,
                clothing: Some(clothing.to_string()),
            }),
            posters: Vec::new(),
        }),
    }
}

#[rustfmt::skip]
fn sample_records() -> Vec<PersonRecord> {
    vec![
        sample(1, "Maria Silva Santos", 28, "FEMININO", (2024, 1, 15), None,
            "Centro - Cuiabá/MT", "Blusa azul e calça jeans"),
        sample(2, "João Carlos Oliveira", 45, "MASCULINO", (2024, 2, 20), Some((2024, 3, 1)),
            "Várzea Grande/MT", "Camisa xadrez"),
        sample(3, "Ana Paula Costa", 16, "FEMININO", (2024, 3, 10), None,
            "Rondonópolis/MT", "Uniforme escolar azul e branco"),
        sample(4, "Roberto Ferreira Lima", 62, "MASCULINO", (2024, 2, 28), None,
            "Sinop/MT", "Camiseta branca, usa óculos"),
        sample(5, "Carla Mendes Souza", 34, "FEMININO", (2024, 1, 5), Some((2024, 1, 20)),
            "Tangará da Serra/MT", "Vestido verde"),
        sample(6, "Mariana Rocha Alves", 22, "FEMININO", (2023, 12, 2), None,
            "Barra do Garças/MT", "Jaqueta preta"),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
