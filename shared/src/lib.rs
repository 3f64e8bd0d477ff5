//! Contact-form core shared by the browser app and the server: the request
//! model, its validation rules, the per-modal session state machine and the
//! localized string catalogs.

pub mod contact;
pub mod i18n;
pub mod pipeline;
pub mod session;
pub mod validation;

pub use contact::{ContactForm, ContactReceipt, ContactRequest, Field, ProjectType, Timeline};
pub use i18n::{Catalog, CatalogError, Locale, TextProvider, Translator};
pub use pipeline::{run_submission, submit_with_deadline, ContactSubmitter, SubmissionError, SUBMIT_TIMEOUT};
pub use session::{AutoCloseToken, FormSession, Phase, SubmissionTicket, TicketId, AUTO_CLOSE_DELAY_MS};
pub use validation::{check_field, validate, FieldErrors, Violation};
