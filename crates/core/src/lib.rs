//! Domain core for the missing-persons registry client.
//!
//! Pure types and logic with no I/O: records and queries, the registry
//! error taxonomy, tip validation, pagination and display formatting.

pub mod display;
pub mod error;
pub mod pagination;
pub mod phone;
pub mod tip;
pub mod types;

pub use error::{classify, ErrorKind, RawFailure, RegistryError};
pub use tip::{PhotoAttachment, TipSubmission, TipValidationError};
pub use types::{
    LastOccurrence, PagedResult, PersonId, PersonRecord, PersonStatus, SearchQuery, StatusFilter,
};
