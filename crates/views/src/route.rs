//! Path routing for the host.
//!
//! `/` (with optional `nome`, `status`, `pagina` query parameters) shows the
//! list; `/person/{id}` shows one record. `pagina` is one-based. The id
//! segment is percent-decoded, so it is handed to the registry client as
//! the raw id.

use percent_encoding::percent_decode_str;
use reqwest::Url;

use locator_core::{SearchQuery, StatusFilter};

const ROUTE_BASE: &str = "http://localhost/";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("Malformed route {0:?}")]
    Malformed(String),

    #[error("Invalid page number {0:?}")]
    InvalidPage(String),

    #[error("Unknown status filter {0:?}")]
    InvalidStatus(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List {
        name: Option<String>,
        status: Option<StatusFilter>,
        /// One-based.
        page: u32,
    },
    Detail {
        id: String,
    },
    NotFound,
}

impl Route {
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let base = Url::parse(ROUTE_BASE).map_err(|_| RouteError::Malformed(path.to_string()))?;
        let url = base
            .join(path.trim())
            .map_err(|_| RouteError::Malformed(path.to_string()))?;

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            [] => Self::list_from_query(&url),
            ["person", id] => {
                let id = percent_decode_str(id)
                    .decode_utf8()
                    .map_err(|_| RouteError::Malformed(path.to_string()))?;
                Ok(Route::Detail { id: id.into_owned() })
            }
            _ => Ok(Route::NotFound),
        }
    }

    fn list_from_query(url: &Url) -> Result<Self, RouteError> {
        let mut name = None;
        let mut status = None;
        let mut page = 1;

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "nome" => name = Some(value.trim().to_string()).filter(|n| !n.is_empty()),
                "status" if value.trim().is_empty() => status = None,
                "status" => {
                    status = Some(
                        StatusFilter::parse(&value)
                            .ok_or_else(|| RouteError::InvalidStatus(value.to_string()))?,
                    )
                }
                "pagina" => {
                    page = value
                        .parse::<u32>()
                        .ok()
                        .filter(|p| *p > 0)
                        .ok_or_else(|| RouteError::InvalidPage(value.to_string()))?
                }
                _ => {}
            }
        }

        Ok(Route::List { name, status, page })
    }

    /// The search a list route asks for; `None` for other routes.
    pub fn search_query(&self, page_size: u32) -> Option<SearchQuery> {
        match self {
            Route::List { name, status, page } => Some(
                SearchQuery::new(page_size)
                    .with_page(page.saturating_sub(1))
                    .with_name(name.as_deref().unwrap_or_default())
                    .with_status(*status),
            ),
            _ => None,
        }
    }
}
