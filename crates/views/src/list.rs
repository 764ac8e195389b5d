//! List view controller.
//!
//! Owns the page number, page size, name filter and status filter of the
//! search listing. Each parameter change produces exactly one
//! [`SearchRequest`] tagged with a generation number; only the response to
//! the most recently issued request is applied.
//!
//! Page numbers in this API are one-based display numbers. The underlying
//! [`SearchQuery`] keeps the registry's zero-based index.

use locator_core::pagination::{self, PageItem};
use locator_core::{
    PagedResult, PersonId, PersonRecord, RegistryError, SearchQuery, StatusFilter,
};
use locator_registry::Registry;

use crate::message::{ViewContext, ViewError};

/// A search the caller must run and hand back to [`ListController::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub generation: u64,
    pub query: SearchQuery,
}

/// State of the search listing.
#[derive(Debug)]
pub struct ListController {
    query: SearchQuery,
    results: Option<PagedResult>,
    loading: bool,
    error: Option<ViewError>,
    /// Generation of the latest issued request.
    issued: u64,
    contract_violations: Vec<PersonId>,
}

impl ListController {
    /// First page, no filters, nothing loaded yet.
    pub fn new(page_size: u32) -> Self {
        Self::with_query(SearchQuery::new(page_size))
    }

    /// Start from an existing query (e.g. one parsed from a route).
    pub fn with_query(query: SearchQuery) -> Self {
        Self {
            query,
            results: None,
            loading: false,
            error: None,
            issued: 0,
            contract_violations: Vec::new(),
        }
    }

    // ---- accessors ----

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// One-based page number currently requested.
    pub fn current_page(&self) -> u32 {
        self.query.page.saturating_add(1)
    }

    pub fn name_filter(&self) -> Option<&str> {
        self.query.name.as_deref()
    }

    pub fn status_filter(&self) -> Option<StatusFilter> {
        self.query.status
    }

    pub fn results(&self) -> Option<&PagedResult> {
        self.results.as_ref()
    }

    /// Records currently displayed; stale while a newer request is loading.
    pub fn records(&self) -> &[PersonRecord] {
        self.results
            .as_ref()
            .map(|r| r.records.as_slice())
            .unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&ViewError> {
        self.error.as_ref()
    }

    pub fn total_pages(&self) -> u32 {
        self.results.as_ref().map_or(0, |r| r.total_pages)
    }

    /// Loaded without error and holding zero records.
    pub fn is_empty(&self) -> bool {
        !self.loading
            && self.error.is_none()
            && self.results.as_ref().is_some_and(PagedResult::is_empty)
    }

    /// Page numbers for the pagination control.
    pub fn page_items(&self) -> Vec<PageItem> {
        pagination::page_window(self.current_page(), self.total_pages())
    }

    pub fn has_previous(&self) -> bool {
        pagination::has_previous(self.current_page())
    }

    pub fn has_next(&self) -> bool {
        pagination::has_next(self.current_page(), self.total_pages())
    }

    /// Records returned that do not match the active name filter.
    pub fn contract_violations(&self) -> &[PersonId] {
        &self.contract_violations
    }

    // ---- transitions ----

    /// Issue the current query (initial load).
    pub fn refresh(&mut self) -> SearchRequest {
        self.issue()
    }

    /// Re-issue the last query unchanged.
    pub fn retry(&mut self) -> SearchRequest {
        self.issue()
    }

    /// Go to one-based `page`. Filters are kept.
    ///
    /// Returns `None` when the page is unchanged, zero, or beyond the last
    /// known page.
    pub fn set_page(&mut self, page: u32) -> Option<SearchRequest> {
        if page == 0 || page == self.current_page() {
            return None;
        }
        if self.results.is_some() && page > self.total_pages() {
            return None;
        }
        self.query.page = page - 1;
        Some(self.issue())
    }

    pub fn next_page(&mut self) -> Option<SearchRequest> {
        self.set_page(self.current_page().saturating_add(1))
    }

    pub fn previous_page(&mut self) -> Option<SearchRequest> {
        self.set_page(self.current_page().saturating_sub(1))
    }

    /// Change the name filter and return to the first page.
    ///
    /// Input is trimmed; a blank filter clears it. Returns `None` when the
    /// normalized filter is unchanged.
    pub fn set_name_filter(&mut self, name: &str) -> Option<SearchRequest> {
        let next = self.query.clone().with_name(name);
        if next.name == self.query.name {
            return None;
        }
        self.query = next.with_page(0);
        Some(self.issue())
    }

    /// Change the status filter and return to the first page.
    pub fn set_status_filter(&mut self, status: Option<StatusFilter>) -> Option<SearchRequest> {
        if status == self.query.status {
            return None;
        }
        self.query.status = status;
        self.query.page = 0;
        Some(self.issue())
    }

    /// Apply the outcome of request `generation`.
    ///
    /// Returns `false` (and changes nothing) when a newer request has been
    /// issued since.
    pub fn resolve(
        &mut self,
        generation: u64,
        result: Result<PagedResult, RegistryError>,
    ) -> bool {
        if generation != self.issued {
            tracing::debug!(
                generation,
                latest = self.issued,
                "Discarding superseded search response"
            );
            return false;
        }
        self.loading = false;

        match result {
            Ok(page) => {
                self.contract_violations = self.query.name_mismatches(&page);
                for id in &self.contract_violations {
                    tracing::warn!(
                        person_id = %id,
                        name_filter = ?self.query.name,
                        "Registry returned a record outside the name filter"
                    );
                }
                self.results = Some(page);
                self.error = None;
            }
            Err(err) => {
                self.results = None;
                self.contract_violations.clear();
                self.error = Some(ViewError::from_registry(&err, ViewContext::List));
            }
        }
        true
    }

    /// Run `request` against `registry` and apply the outcome.
    pub async fn load(&mut self, registry: &dyn Registry, request: SearchRequest) -> bool {
        let result = registry.search(&request.query).await;
        self.resolve(request.generation, result)
    }

    fn issue(&mut self) -> SearchRequest {
        self.issued += 1;
        self.loading = true;
        SearchRequest {
            generation: self.issued,
            query: self.query.clone(),
        }
    }
}

impl Default for ListController {
    fn default() -> Self {
        Self::new(locator_core::types::DEFAULT_PAGE_SIZE)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use locator_core::{ErrorKind, RawFailure};

    use super::*;

    fn person(id: i64, name: &str) -> PersonRecord {
        PersonRecord {
            id: PersonId::from(id),
            name: name.to_string(),
            age: None,
            age_when_missing: None,
            sex: String::new(),
            alive: true,
            has_dna_sample: false,
            photo_url: None,
            last_occurrence: None,
        }
    }

    fn page_of(names: &[&str], total: u64, query: &SearchQuery) -> PagedResult {
        let records = names
            .iter()
            .enumerate()
            .map(|(i, n)| person(i as i64 + 1, n))
            .collect();
        PagedResult::new(records, total, query.page, query.page_size)
    }

    fn loaded(total: u64) -> ListController {
        let mut list = ListController::new(10);
        let req = list.refresh();
        let page = page_of(&["Ana"], total, &req.query);
        assert!(list.resolve(req.generation, Ok(page)));
        list
    }

    // -- transitions ---------------------------------------------------------

    #[test]
    fn filter_change_resets_page() {
        let mut list = loaded(50);
        let req = list.set_page(3).unwrap();
        assert_eq!(req.query.page, 2);

        let req = list.set_name_filter("Maria").unwrap();
        assert_eq!(list.current_page(), 1);
        assert_eq!(req.query.page, 0);
        assert_eq!(req.query.name.as_deref(), Some("Maria"));

        list.resolve(req.generation, Ok(PagedResult::new(Vec::new(), 50, 0, 10)));
        list.set_page(4).unwrap();
        let req = list.set_status_filter(Some(StatusFilter::Missing)).unwrap();
        assert_eq!(list.current_page(), 1);
        assert_eq!(req.query.name.as_deref(), Some("Maria"));
    }

    #[test]
    fn page_change_keeps_filters() {
        let mut list = loaded(50);
        let req = list.set_name_filter("Ana").unwrap();
        list.resolve(req.generation, Ok(PagedResult::new(Vec::new(), 50, 0, 10)));
        let req = list.set_status_filter(Some(StatusFilter::Located)).unwrap();
        list.resolve(req.generation, Ok(PagedResult::new(Vec::new(), 50, 0, 10)));

        let req = list.set_page(2).unwrap();
        assert_eq!(req.query.name.as_deref(), Some("Ana"));
        assert_eq!(req.query.status, Some(StatusFilter::Located));
        assert_eq!(list.name_filter(), Some("Ana"));
    }

    #[test]
    fn unchanged_parameters_issue_nothing() {
        let mut list = loaded(50);
        assert!(list.set_page(1).is_none());
        assert!(list.set_name_filter("   ").is_none());
        assert!(list.set_status_filter(None).is_none());

        list.set_name_filter("Maria").unwrap();
        assert!(list.set_name_filter(" Maria ").is_none());
    }

    #[test]
    fn out_of_range_pages_are_ignored() {
        let mut list = loaded(25);
        assert_eq!(list.total_pages(), 3);
        assert!(list.set_page(0).is_none());
        assert!(list.set_page(4).is_none());
        assert!(list.set_page(3).is_some());
    }

    #[test]
    fn next_page_at_highest_page_number_is_ignored() {
        let mut list = ListController::with_query(SearchQuery::new(10).with_page(u32::MAX - 1));
        list.refresh();
        assert_eq!(list.current_page(), u32::MAX);
        assert!(list.next_page().is_none());

        let list = ListController::with_query(SearchQuery::new(10).with_page(u32::MAX));
        assert_eq!(list.current_page(), u32::MAX);
    }

    #[test]
    fn next_and_previous() {
        let mut list = loaded(25);
        assert!(list.previous_page().is_none());
        let req = list.next_page().unwrap();
        assert_eq!(req.query.page, 1);
    }

    // -- loading / error states ----------------------------------------------

    #[test]
    fn stale_results_stay_visible_while_loading() {
        let mut list = loaded(50);
        list.set_page(2).unwrap();
        assert!(list.is_loading());
        assert_eq!(list.records().len(), 1);
        assert!(!list.is_empty());
    }

    #[test]
    fn failure_clears_results_and_retry_repeats_query() {
        let mut list = loaded(50);
        let req = list.set_page(2).unwrap();
        let err = RegistryError::from_raw(RawFailure::Status(503), "down");
        assert!(list.resolve(req.generation, Err(err)));

        assert!(list.records().is_empty());
        assert!(!list.is_loading());
        let error = list.error().unwrap();
        assert_eq!(error.kind, ErrorKind::ServerUnavailable);
        assert!(error.retryable);

        let retry = list.retry();
        assert_eq!(retry.query, req.query);
        assert!(retry.generation > req.generation);

        let page = page_of(&["Bia"], 50, &retry.query);
        assert!(list.resolve(retry.generation, Ok(page)));
        assert!(list.error().is_none());
    }

    #[test]
    fn empty_result_is_empty_not_error() {
        let mut list = ListController::new(10);
        let req = list.refresh();
        assert!(!list.is_empty());
        list.resolve(req.generation, Ok(PagedResult::empty(10)));
        assert!(list.is_empty());
        assert!(list.error().is_none());
        assert!(list.page_items().is_empty());
    }

    // -- ordering ------------------------------------------------------------

    #[test]
    fn later_request_wins_when_earlier_resolves_last() {
        let mut list = ListController::new(10);
        let a = list.set_name_filter("Ana").unwrap();
        let b = list.set_name_filter("Bruno").unwrap();

        let b_page = page_of(&["Bruno Lima"], 1, &b.query);
        assert!(list.resolve(b.generation, Ok(b_page.clone())));

        let a_page = page_of(&["Ana Souza", "Ana Lima"], 2, &a.query);
        assert!(!list.resolve(a.generation, Ok(a_page)));

        assert_eq!(list.results(), Some(&b_page));
        assert_eq!(list.name_filter(), Some("Bruno"));
        assert!(!list.is_loading());
    }

    #[test]
    fn superseded_failure_does_not_clobber_results() {
        let mut list = ListController::new(10);
        let a = list.refresh();
        let b = list.set_status_filter(Some(StatusFilter::Missing)).unwrap();
        let b_page = page_of(&["Ana"], 1, &b.query);
        list.resolve(b.generation, Ok(b_page));

        let err = RegistryError::from_raw(RawFailure::NoResponse, "timeout");
        assert!(!list.resolve(a.generation, Err(err)));
        assert!(list.error().is_none());
        assert_eq!(list.records().len(), 1);
    }

    #[test]
    fn pending_older_response_keeps_loading_flag() {
        let mut list = ListController::new(10);
        let a = list.refresh();
        let _b = list.set_name_filter("x").unwrap();
        list.resolve(a.generation, Ok(PagedResult::empty(10)));
        assert!(list.is_loading());
    }

    // -- contract check ------------------------------------------------------

    #[test]
    fn flags_records_outside_name_filter() {
        let mut list = ListController::new(10);
        let req = list.set_name_filter("Maria").unwrap();
        let page = page_of(&["Maria José", "Pedro Alves"], 2, &req.query);
        list.resolve(req.generation, Ok(page));

        assert_eq!(list.contract_violations(), &[PersonId::from(2)]);
        assert_eq!(list.records().len(), 2);
    }
}
