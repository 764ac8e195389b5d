//! Tip form state machine.
//!
//! `Editing -> Submitting -> Editing`. A successful submission clears the
//! fields; a failed one leaves them as they were so the user can retry.

use serde::Serialize;

use locator_core::phone::format_phone;
use locator_core::tip::AttachmentPolicy;
use locator_core::{PersonId, PhotoAttachment, RegistryError, TipSubmission, TipValidationError};

use crate::message::{ViewContext, ViewError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TipFormState {
    Editing,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TipFormError {
    #[error(transparent)]
    Invalid(#[from] TipValidationError),

    #[error("A submission is already in progress")]
    AlreadySubmitting,

    #[error("The tip form is not open")]
    Closed,

    #[error(transparent)]
    Submit(ViewError),
}

/// Fields and state of the tip form.
#[derive(Debug, Clone)]
pub struct TipForm {
    observation: String,
    location: String,
    phone: String,
    photos: Vec<PhotoAttachment>,
    state: TipFormState,
    last_error: Option<ViewError>,
    policy: Option<AttachmentPolicy>,
}

impl Default for TipForm {
    fn default() -> Self {
        Self::new()
    }
}

impl TipForm {
    pub fn new() -> Self {
        Self {
            observation: String::new(),
            location: String::new(),
            phone: String::new(),
            photos: Vec::new(),
            state: TipFormState::Editing,
            last_error: None,
            policy: None,
        }
    }

    /// Check attachments against `policy` before each submission.
    pub fn with_policy(mut self, policy: AttachmentPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    // ---- fields ----

    pub fn observation(&self) -> &str {
        &self.observation
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Phone as displayed (formatted).
    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn photos(&self) -> &[PhotoAttachment] {
        &self.photos
    }

    pub fn state(&self) -> TipFormState {
        self.state
    }

    /// Error from the last failed submission, cleared on the next attempt.
    pub fn last_error(&self) -> Option<&ViewError> {
        self.last_error.as_ref()
    }

    pub fn set_observation(&mut self, text: impl Into<String>) {
        self.observation = text.into();
    }

    pub fn set_location(&mut self, text: impl Into<String>) {
        self.location = text.into();
    }

    /// Store the phone input, reformatted as typed.
    pub fn set_phone(&mut self, input: &str) {
        self.phone = format_phone(input);
    }

    /// Attach a photo. A photo with the same file name replaces the old one.
    pub fn attach_photo(&mut self, photo: PhotoAttachment) {
        match self.photos.iter_mut().find(|p| p.file_name == photo.file_name) {
            Some(existing) => *existing = photo,
            None => self.photos.push(photo),
        }
    }

    /// Returns `true` if a photo with that (sanitized) name was removed.
    pub fn remove_photo(&mut self, file_name: &str) -> bool {
        let name = locator_core::tip::sanitize_file_name(file_name);
        let before = self.photos.len();
        self.photos.retain(|p| p.file_name != name);
        self.photos.len() != before
    }

    /// True when the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        self.state == TipFormState::Editing
            && !(self.observation.trim().is_empty() && self.location.trim().is_empty())
    }

    // ---- transitions ----

    /// Validate and move to `Submitting`.
    ///
    /// On error nothing changes and no submission should be sent.
    pub fn begin_submit(
        &mut self,
        person_id: PersonId,
        occurrence_id: Option<i64>,
    ) -> Result<TipSubmission, TipFormError> {
        if self.state == TipFormState::Submitting {
            return Err(TipFormError::AlreadySubmitting);
        }
        if let Some(policy) = &self.policy {
            policy.check_all(&self.photos)?;
        }
        let submission = TipSubmission::new(
            person_id,
            occurrence_id,
            &self.observation,
            &self.location,
            Some(self.phone.as_str()),
            self.photos.clone(),
        )?;

        self.state = TipFormState::Submitting;
        self.last_error = None;
        Ok(submission)
    }

    /// Return to `Editing` with the outcome of the submission.
    pub fn complete(&mut self, result: Result<(), RegistryError>) -> Result<(), TipFormError> {
        self.state = TipFormState::Editing;
        match result {
            Ok(()) => {
                self.observation.clear();
                self.location.clear();
                self.phone.clear();
                self.photos.clear();
                Ok(())
            }
            Err(err) => {
                let view = ViewError::from_registry(&err, ViewContext::Tip);
                self.last_error = Some(view.clone());
                Err(TipFormError::Submit(view))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use locator_core::{ErrorKind, RawFailure};

    use super::*;

    fn filled() -> TipForm {
        let mut form = TipForm::new();
        form.set_observation("Vista na feira");
        form.set_location("Mercado do Porto");
        form.set_phone("65999991234");
        form.attach_photo(PhotoAttachment::new("a.jpg", "image/jpeg", vec![1, 2]));
        form
    }

    #[test]
    fn phone_is_formatted_per_keystroke() {
        let mut form = TipForm::new();
        form.set_phone("6599");
        assert_eq!(form.phone(), "6599");
        form.set_phone("65999991234");
        assert_eq!(form.phone(), "(65) 99999-1234");
        form.set_phone("659999912345");
        assert_eq!(form.phone(), "659999912345");
    }

    #[test]
    fn blank_form_is_rejected_without_state_change() {
        let mut form = TipForm::new();
        form.set_observation("  ");
        assert!(!form.can_submit());
        assert_matches!(
            form.begin_submit(PersonId::from(1), None),
            Err(TipFormError::Invalid(TipValidationError::Blank))
        );
        assert_eq!(form.state(), TipFormState::Editing);
    }

    #[test]
    fn location_only_is_accepted() {
        let mut form = TipForm::new();
        form.set_location("Terminal Bispo Dom José");
        let tip = form.begin_submit(PersonId::from(1), Some(7)).unwrap();
        assert_eq!(tip.location, "Terminal Bispo Dom José");
        assert_eq!(tip.phone, None);
        assert_eq!(form.state(), TipFormState::Submitting);
    }

    #[test]
    fn double_submit_is_rejected() {
        let mut form = filled();
        form.begin_submit(PersonId::from(1), None).unwrap();
        assert_matches!(
            form.begin_submit(PersonId::from(1), None),
            Err(TipFormError::AlreadySubmitting)
        );
    }

    #[test]
    fn success_clears_fields() {
        let mut form = filled();
        form.begin_submit(PersonId::from(1), None).unwrap();
        form.complete(Ok(())).unwrap();

        assert_eq!(form.state(), TipFormState::Editing);
        assert!(form.observation().is_empty());
        assert!(form.location().is_empty());
        assert!(form.phone().is_empty());
        assert!(form.photos().is_empty());
    }

    #[test]
    fn failure_keeps_fields() {
        let mut form = filled();
        form.begin_submit(PersonId::from(1), None).unwrap();
        let err = RegistryError::from_raw(RawFailure::NoResponse, "refused");
        assert_matches!(form.complete(Err(err)), Err(TipFormError::Submit(_)));

        assert_eq!(form.state(), TipFormState::Editing);
        assert_eq!(form.observation(), "Vista na feira");
        assert_eq!(form.phone(), "(65) 99999-1234");
        assert_eq!(form.photos().len(), 1);
        assert_eq!(form.last_error().unwrap().kind, ErrorKind::NetworkFailure);

        form.begin_submit(PersonId::from(1), None).unwrap();
        assert!(form.last_error().is_none());
    }

    #[test]
    fn photos_are_a_set_by_name() {
        let mut form = TipForm::new();
        form.attach_photo(PhotoAttachment::new("a.jpg", "image/jpeg", vec![1]));
        form.attach_photo(PhotoAttachment::new("a.jpg", "image/jpeg", vec![1, 2, 3]));
        form.attach_photo(PhotoAttachment::new("b.png", "image/png", vec![1]));
        assert_eq!(form.photos().len(), 2);
        assert_eq!(form.photos()[0].size(), 3);

        assert!(form.remove_photo("b.png"));
        assert!(!form.remove_photo("b.png"));
    }

    #[test]
    fn policy_blocks_oversized_photos() {
        let mut form = filled().with_policy(AttachmentPolicy {
            max_bytes: 1,
            ..Default::default()
        });
        assert_matches!(
            form.begin_submit(PersonId::from(1), None),
            Err(TipFormError::Invalid(TipValidationError::AttachmentTooLarge { .. }))
        );
        assert_eq!(form.state(), TipFormState::Editing);
    }
}
