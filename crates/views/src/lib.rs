//! View controllers for the registry client.
//!
//! Controllers hold view state and hand out generation-tagged requests;
//! the host runs each request against a [`locator_registry::Registry`] and
//! feeds the result back through `resolve`. Only the most recently issued
//! request of each controller is ever applied.

pub mod detail;
pub mod list;
pub mod message;
pub mod present;
pub mod route;
pub mod tip_form;

pub use detail::{DetailController, DetailRequest};
pub use list::{ListController, SearchRequest};
pub use message::{ViewContext, ViewError};
pub use present::{render_detail, render_list, PersonCard, PersonDetail};
pub use route::{Route, RouteError};
pub use tip_form::{TipForm, TipFormError, TipFormState};
