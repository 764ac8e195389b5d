//! Registry wire schema.
//!
//! Mirrors the JSON the registry actually sends (Portuguese field names,
//! nullable everywhere) and converts it into `locator_core` types.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use locator_core::types::{
    InterviewDetails, LastOccurrence, PagedResult, PersonId, PersonRecord, SearchQuery,
};

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Translate a [`SearchQuery`] into the registry's query parameters.
///
/// Internal `page`/`size`/`name`/`status` become `pagina`/`porPagina`/
/// `nome`/`status`. Unset filters are omitted.
pub fn search_params(query: &SearchQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("pagina", query.page.to_string()),
        ("porPagina", query.page_size.to_string()),
    ];
    if let Some(name) = query.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        params.push(("nome", name.to_string()));
    }
    if let Some(status) = query.status {
        params.push(("status", status.token().to_string()));
    }
    params
}

// ---------------------------------------------------------------------------
// Person
// ---------------------------------------------------------------------------

/// Numeric or string id.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Number(i64),
    Text(String),
}

impl From<WireId> for PersonId {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Number(n) => PersonId::from(n),
            WireId::Text(s) => PersonId::new(s),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireInterview {
    #[serde(default)]
    pub informacao: Option<String>,
    #[serde(default)]
    pub vestimentas_desaparecido: Option<String>,
}

/// Poster entry: either a bare URL or `{ "urlCartaz": ..., "tipoCartaz": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WirePoster {
    Url(String),
    Object {
        #[serde(rename = "urlCartaz")]
        url_cartaz: Option<String>,
    },
}

impl WirePoster {
    fn into_url(self) -> Option<String> {
        match self {
            WirePoster::Url(url) => Some(url),
            WirePoster::Object { url_cartaz } => url_cartaz,
        }
        .filter(|u| !u.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireOccurrence {
    #[serde(default)]
    pub oco_id: Option<i64>,
    #[serde(default, deserialize_with = "registry_date")]
    pub dt_desaparecimento: Option<NaiveDate>,
    #[serde(default, deserialize_with = "registry_date")]
    pub data_localizacao: Option<NaiveDate>,
    #[serde(default)]
    pub encontrado_vivo: Option<bool>,
    #[serde(default)]
    pub local_desaparecimento_concat: Option<String>,
    #[serde(default, rename = "ocorrenciaEntrevDesapDTO")]
    pub entrevista: Option<WireInterview>,
    #[serde(default)]
    pub lista_cartaz: Option<Vec<WirePoster>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePerson {
    pub id: WireId,
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub idade: Option<u32>,
    #[serde(default)]
    pub idade_quando_desapareceu: Option<u32>,
    #[serde(default)]
    pub sexo: Option<String>,
    #[serde(default)]
    pub vivo: Option<bool>,
    #[serde(default)]
    pub possui_dna_coletado: Option<bool>,
    #[serde(default)]
    pub url_foto: Option<String>,
    #[serde(default)]
    pub ultima_ocorrencia: Option<WireOccurrence>,
}

impl From<WireOccurrence> for LastOccurrence {
    fn from(o: WireOccurrence) -> Self {
        LastOccurrence {
            occurrence_id: o.oco_id,
            disappeared_on: o.dt_desaparecimento,
            located_on: o.data_localizacao,
            found_alive: o.encontrado_vivo,
            location: o.local_desaparecimento_concat.unwrap_or_default(),
            interview: o.entrevista.map(|e| InterviewDetails {
                information: e.informacao,
                clothing: e.vestimentas_desaparecido,
            }),
            posters: o
                .lista_cartaz
                .unwrap_or_default()
                .into_iter()
                .filter_map(WirePoster::into_url)
                .collect(),
        }
    }
}

impl From<WirePerson> for PersonRecord {
    fn from(p: WirePerson) -> Self {
        PersonRecord {
            id: p.id.into(),
            name: p.nome.as_deref().unwrap_or_default().trim().to_string(),
            age: p.idade,
            age_when_missing: p.idade_quando_desapareceu,
            sex: p.sexo.unwrap_or_default(),
            alive: p.vivo.unwrap_or(false),
            has_dna_sample: p.possui_dna_coletado.unwrap_or(false),
            photo_url: p.url_foto.filter(|u| !u.trim().is_empty()),
            last_occurrence: p.ultima_ocorrencia.map(Into::into),
        }
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// Paged search envelope. `content` is required; its absence is a
/// malformed response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePage {
    pub content: Vec<WirePerson>,
    #[serde(default)]
    pub total_elements: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub size: Option<u32>,
}

impl WirePage {
    /// Convert into a [`PagedResult`] for `query`.
    ///
    /// `total_pages` is always recomputed from `totalElements`; the
    /// registry's own value is returned alongside so callers can log
    /// disagreement.
    pub fn into_result(self, query: &SearchQuery) -> (PagedResult, Option<u32>) {
        let page_size = self.size.filter(|s| *s > 0).unwrap_or(query.page_size);
        let page = self.number.unwrap_or(query.page);
        let records = self.content.into_iter().map(PersonRecord::from).collect();
        (
            PagedResult::new(
                records,
                self.total_elements.unwrap_or_default(),
                page,
                page_size,
            ),
            self.total_pages,
        )
    }
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

/// Parse `YYYY-MM-DD` or an ISO datetime starting with it. Null and empty
/// strings are `None`.
fn registry_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map(Some)
        .map_err(|e| serde::de::Error::custom(format!("invalid date {raw:?}: {e}")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
