//! HTTP client for the registry REST API.
//!
//! Wraps the three registry endpoints (paged search, record lookup, tip
//! submission) using [`reqwest`]. Every failure is reduced to a
//! [`RawFailure`] and classified before it leaves this module.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use serde::de::DeserializeOwned;

use locator_core::phone::phone_digits;
use locator_core::{
    ErrorKind, PagedResult, PersonRecord, RawFailure, RegistryError, SearchQuery, TipSubmission,
};

use crate::config::RegistryConfig;
use crate::registry::Registry;
use crate::wire::{self, WirePage, WirePerson};

const SEARCH_PATH: &[&str] = &["v1", "pessoas", "aberto", "filtro"];
const PERSON_PATH: &[&str] = &["v1", "pessoas"];
const TIP_PATH: &[&str] = &["v1", "ocorrencias", "informacoes-desaparecido"];

/// Longest slice of an error body kept in diagnostics.
const MAX_BODY_EXCERPT: usize = 200;

/// HTTP client for one registry deployment.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpRegistry {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpRegistry {
    /// Build a client with the configured timeout.
    pub fn new(config: &RegistryConfig) -> Result<Self, RegistryError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RegistryError::from_raw(RawFailure::Other, e.to_string()))?;
        Self::with_client(client, &config.base_url)
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, RegistryError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            RegistryError::invalid_argument(format!("invalid registry URL {base_url:?}: {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(RegistryError::invalid_argument(format!(
                "registry URL {base_url} cannot be a base"
            )));
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    // ---- private helpers ----

    /// Append percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Ensure the response has a success status code. Non-2xx responses are
    /// classified by status, keeping a short body excerpt for diagnostics.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, RegistryError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let excerpt: String = body.chars().take(MAX_BODY_EXCERPT).collect();
        Err(RegistryError::from_raw(
            RawFailure::Status(status.as_u16()),
            format!("registry returned {status}: {excerpt}"),
        ))
    }

    /// Parse a successful JSON body into the expected type.
    ///
    /// The body is read as text first so that a transport failure while
    /// reading is not confused with a shape mismatch.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, RegistryError> {
        let response = Self::ensure_success(response).await?;
        let body = response.text().await.map_err(transport_error)?;
        serde_json::from_str(&body)
            .map_err(|e| RegistryError::malformed(format!("unexpected response shape: {e}")))
    }
}

#[async_trait]
impl Registry for HttpRegistry {
    async fn search(&self, query: &SearchQuery) -> Result<PagedResult, RegistryError> {
        let params = wire::search_params(query);
        tracing::debug!(?params, "Registry search");

        let result = async {
            let response = self
                .client
                .get(self.endpoint(SEARCH_PATH))
                .query(&params)
                .send()
                .await
                .map_err(transport_error)?;
            Self::parse_response::<WirePage>(response).await
        }
        .await;

        match result {
            Ok(page) => {
                let (result, reported_pages) = page.into_result(query);
                if let Some(reported) = reported_pages.filter(|p| *p != result.total_pages) {
                    tracing::warn!(
                        reported,
                        computed = result.total_pages,
                        total_elements = result.total_elements,
                        "Registry totalPages disagrees with totalElements"
                    );
                }
                Ok(result)
            }
            Err(err) => {
                log_failure("search", &err);
                Err(err)
            }
        }
    }

    async fn get_by_id(&self, id: &str) -> Result<PersonRecord, RegistryError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(RegistryError::invalid_argument("person id is blank"));
        }

        let mut segments = PERSON_PATH.to_vec();
        segments.push(id);

        let result = async {
            let response = self
                .client
                .get(self.endpoint(&segments))
                .send()
                .await
                .map_err(transport_error)?;
            Self::parse_response::<WirePerson>(response).await
        }
        .await;

        match result {
            Ok(person) => Ok(person.into()),
            Err(err) => {
                log_failure("get_by_id", &err);
                Err(err)
            }
        }
    }

    async fn submit_tip(&self, tip: &TipSubmission) -> Result<(), RegistryError> {
        let form = tip_form(tip)?;

        tracing::info!(
            person_id = %tip.person_id,
            occurrence_id = ?tip.occurrence_id,
            photos = tip.photos.len(),
            "Submitting tip"
        );

        let result = async {
            let response = self
                .client
                .post(self.endpoint(TIP_PATH))
                .multipart(form)
                .send()
                .await
                .map_err(transport_error)?;
            Self::ensure_success(response).await.map(|_| ())
        }
        .await;

        if let Err(err) = &result {
            log_failure("submit_tip", err);
        }
        result
    }
}

/// Build the multipart payload for a tip.
fn tip_form(tip: &TipSubmission) -> Result<Form, RegistryError> {
    let mut form = Form::new()
        .text("pessoaId", tip.person_id.to_string())
        .text("informacao", tip.observation.clone())
        .text("descricao", tip.location.clone())
        .text(
            "data",
            chrono::Local::now().date_naive().format("%Y-%m-%d").to_string(),
        );

    if let Some(occurrence_id) = tip.occurrence_id {
        form = form.text("ocoId", occurrence_id.to_string());
    }
    if let Some(phone) = tip.phone.as_deref() {
        form = form.text("telefone", phone_digits(phone));
    }
    for photo in &tip.photos {
        let part = Part::bytes(photo.bytes.clone())
            .file_name(photo.file_name.clone())
            .mime_str(&photo.content_type)
            .map_err(|e| {
                RegistryError::invalid_argument(format!(
                    "attachment {} has invalid content type {:?}: {e}",
                    photo.file_name, photo.content_type
                ))
            })?;
        form = form.part("files", part);
    }
    Ok(form)
}

/// Reduce a reqwest error to a [`RawFailure`].
fn raw_failure(err: &reqwest::Error) -> RawFailure {
    if let Some(status) = err.status() {
        RawFailure::Status(status.as_u16())
    } else if err.is_decode() {
        RawFailure::BadBody
    } else if err.is_timeout() || err.is_connect() || err.is_request() || err.is_body() {
        RawFailure::NoResponse
    } else if err.is_builder() {
        RawFailure::InvalidInput
    } else {
        RawFailure::Other
    }
}

fn transport_error(err: reqwest::Error) -> RegistryError {
    RegistryError::from_raw(raw_failure(&err), err.to_string())
}

fn log_failure(operation: &'static str, err: &RegistryError) {
    match err.kind {
        ErrorKind::NotFound => {
            tracing::debug!(operation, status = ?err.status, "Registry resource not found");
        }
        ErrorKind::MalformedResponse | ErrorKind::Unknown => {
            tracing::error!(
                operation,
                kind = %err.kind,
                status = ?err.status,
                error = %err.message,
                "Registry request failed"
            );
        }
        _ => {
            tracing::warn!(
                operation,
                kind = %err.kind,
                status = ?err.status,
                error = %err.message,
                "Registry request failed"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
