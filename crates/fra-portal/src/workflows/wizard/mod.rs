//! Four-step citizen application wizard.
//!
//! The core is a pure transition function over [`WizardState`]; sessions,
//! storage and HTTP routing are layered on top so hosts can drive the same
//! state machine in-process or over the API.

pub mod catalog;
pub mod documents;
pub mod domain;
pub mod identifier;
pub mod machine;
pub mod progress;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use catalog::{scheme_catalog, SchemeId, SchemeSummary};
pub use documents::{UploadPolicy, UploadRejected};
pub use domain::{
    ApplicationDraft, DocumentKind, DocumentReference, DraftField, FieldParseError, FieldUpdate,
    Gender, Step, SupportedState,
};
pub use identifier::{ApplicationIdentifier, Clock, FixedClock, SystemClock};
pub use machine::{
    transition, SessionStatus, Transition, WizardEvent, WizardHost, WizardSession, WizardState,
};
pub use progress::{
    missing_required, step_caption, step_indicators, MissingRequired, StepIndicator, StepMarker,
    WizardView,
};
pub use router::wizard_router;
pub use service::{
    DispatchOutcome, SessionServiceError, SessionView, WizardSessionService, DEFAULT_IDLE_TIMEOUT,
};
pub use store::{
    DraftSession, DraftSessionId, DraftSessionStore, InMemoryDraftSessionStore, SessionStoreError,
    SessionUpdate,
};
