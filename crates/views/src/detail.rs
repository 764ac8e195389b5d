//! Detail view controller.
//!
//! Loads one person by id and, for records that are still missing, hosts
//! the [`TipForm`]. Like the list, each id change is tagged with a
//! generation and only the latest response is applied.

use locator_core::{PersonId, PersonRecord, RegistryError};
use locator_registry::Registry;

use crate::message::{ViewContext, ViewError};
use crate::tip_form::{TipForm, TipFormError};

/// A fetch the caller must run and hand back to [`DetailController::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub generation: u64,
    pub person_id: PersonId,
}

#[derive(Debug, Default)]
pub struct DetailController {
    person_id: Option<PersonId>,
    record: Option<PersonRecord>,
    loading: bool,
    error: Option<ViewError>,
    issued: u64,
    tip_form: Option<TipForm>,
}

impl DetailController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn person_id(&self) -> Option<&PersonId> {
        self.person_id.as_ref()
    }

    pub fn record(&self) -> Option<&PersonRecord> {
        self.record.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&ViewError> {
        self.error.as_ref()
    }

    /// Show the person at `id`.
    ///
    /// Returns `None` if that id is already shown. Otherwise the previous
    /// record, error and tip form are dropped.
    pub fn set_person_id(&mut self, id: &str) -> Option<DetailRequest> {
        let id = PersonId::new(id);
        if self.person_id.as_ref() == Some(&id) {
            return None;
        }
        self.person_id = Some(id);
        self.record = None;
        self.error = None;
        self.tip_form = None;
        self.issue()
    }

    /// Re-fetch the current id. `None` when no id has been set.
    pub fn retry(&mut self) -> Option<DetailRequest> {
        self.issue()
    }

    /// Apply the outcome of request `generation`; `false` if superseded.
    pub fn resolve(
        &mut self,
        generation: u64,
        result: Result<PersonRecord, RegistryError>,
    ) -> bool {
        if generation != self.issued {
            tracing::debug!(
                generation,
                latest = self.issued,
                "Discarding superseded detail response"
            );
            return false;
        }
        self.loading = false;

        match result {
            Ok(record) => {
                self.record = Some(record);
                self.error = None;
            }
            Err(err) => {
                self.record = None;
                self.error = Some(ViewError::from_registry(&err, ViewContext::Detail));
            }
        }
        true
    }

    pub async fn load(&mut self, registry: &dyn Registry, request: DetailRequest) -> bool {
        let result = registry.get_by_id(request.person_id.as_str()).await;
        self.resolve(request.generation, result)
    }

    fn issue(&mut self) -> Option<DetailRequest> {
        let person_id = self.person_id.clone()?;
        self.issued += 1;
        self.loading = true;
        Some(DetailRequest {
            generation: self.issued,
            person_id,
        })
    }

    // ---- tip form ----

    /// Tips are only offered for a loaded record that is still missing.
    pub fn can_offer_tip(&self) -> bool {
        !self.loading && self.record.as_ref().is_some_and(PersonRecord::is_missing)
    }

    /// Open the form. Returns `false` when tips are not offered.
    pub fn open_tip_form(&mut self) -> bool {
        if !self.can_offer_tip() {
            return false;
        }
        self.tip_form.get_or_insert_with(TipForm::new);
        true
    }

    pub fn close_tip_form(&mut self) {
        self.tip_form = None;
    }

    pub fn tip_form(&self) -> Option<&TipForm> {
        self.tip_form.as_ref()
    }

    pub fn tip_form_mut(&mut self) -> Option<&mut TipForm> {
        self.tip_form.as_mut()
    }

    /// Submit the open form for the loaded person.
    ///
    /// The form closes on success and stays open with its fields on failure.
    /// Validation failures never reach the registry.
    pub async fn submit_tip(&mut self, registry: &dyn Registry) -> Result<(), TipFormError> {
        let (person_id, occurrence_id) = match &self.record {
            Some(record) if self.tip_form.is_some() => (record.id.clone(), record.occurrence_id()),
            _ => return Err(TipFormError::Closed),
        };
        let form = self.tip_form.as_mut().ok_or(TipFormError::Closed)?;
        let submission = form.begin_submit(person_id, occurrence_id)?;

        let result = registry.submit_tip(&submission).await;
        form.complete(result)?;

        tracing::info!(person_id = %submission.person_id, "Tip sent");
        self.tip_form = None;
        Ok(())
    }
}
