//! Webhooks dashboard extension state

pub mod form;
pub mod table;
pub mod validation;

pub use form::{FormField, FormPhase, NamespaceScope, OptionList, ScopedList, WebhookForm};
pub use table::{DELETE_TIMEOUT, DeleteBatch, DeleteOutcome, WebhookTable};
pub use validation::validate_name;
