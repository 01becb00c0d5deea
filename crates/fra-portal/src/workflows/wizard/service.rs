use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info};

use super::catalog::SchemeId;
use super::documents::{UploadPolicy, UploadRejected};
use super::domain::{DocumentKind, FieldParseError, FieldUpdate};
use super::identifier::{ApplicationIdentifier, Clock};
use super::machine::{transition, Transition, WizardEvent, WizardState};
use super::progress::WizardView;
use super::store::{DraftSession, DraftSessionId, DraftSessionStore, SessionStoreError};
use crate::workflows::tracking::ApplicationReceipt;

/// Drafts untouched for this long are released.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Drives wizard sessions on behalf of remote hosts.
pub struct WizardSessionService<S, C> {
    store: Arc<S>,
    clock: Arc<C>,
    uploads: UploadPolicy,
    idle_timeout: Duration,
}

/// Session snapshot returned after every accepted event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub session_id: DraftSessionId,
    pub wizard: WizardView,
}

impl SessionView {
    fn of(session_id: &DraftSessionId, state: &WizardState) -> Self {
        Self {
            session_id: session_id.clone(),
            wizard: WizardView::of(state),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DispatchOutcome {
    InProgress(SessionView),
    Exited {
        session_id: DraftSessionId,
    },
    Completed {
        session_id: DraftSessionId,
        application_id: ApplicationIdentifier,
        receipt: ApplicationReceipt,
    },
}

impl<S, C> WizardSessionService<S, C>
where
    S: DraftSessionStore + 'static,
    C: Clock + 'static,
{
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self::with_upload_policy(store, clock, UploadPolicy::standard())
    }

    pub fn with_upload_policy(store: Arc<S>, clock: Arc<C>, uploads: UploadPolicy) -> Self {
        Self {
            store,
            clock,
            uploads,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Open a wizard on step 1 with an empty draft. Idle drafts are swept first
    /// so every new session bounds the store.
    pub fn start(&self) -> Result<SessionView, SessionServiceError> {
        self.release_idle()?;
        let session = DraftSession {
            session_id: DraftSessionId::generate(),
            state: WizardState::new(),
            touched_at: self.clock.now_millis(),
        };
        let stored = self.store.insert(session)?;
        info!(session_id = %stored.session_id, "application wizard started");
        Ok(SessionView::of(&stored.session_id, &stored.state))
    }

    pub fn view(&self, session_id: &DraftSessionId) -> Result<SessionView, SessionServiceError> {
        let session = self.load(session_id)?;
        Ok(SessionView::of(&session.session_id, &session.state))
    }

    /// Apply one event. Exit and completion discard the draft, and each is
    /// reported to exactly one caller even when requests race.
    pub fn dispatch(
        &self,
        session_id: &DraftSessionId,
        event: WizardEvent,
    ) -> Result<DispatchOutcome, SessionServiceError> {
        self.load(session_id)?;

        let now = self.clock.now_millis();
        let clock = self.clock.as_ref();
        let update = self
            .store
            .modify(session_id, now, |state| transition(state, event, clock))?;

        match update.transition {
            Transition::Continue(state) => {
                if state.step != update.previous.step {
                    debug!(
                        %session_id,
                        from = update.previous.step.number(),
                        to = state.step.number(),
                        "wizard step changed"
                    );
                }
                Ok(DispatchOutcome::InProgress(SessionView::of(session_id, &state)))
            }
            Transition::Exited => {
                info!(%session_id, "citizen left the application wizard");
                Ok(DispatchOutcome::Exited {
                    session_id: session_id.clone(),
                })
            }
            Transition::Completed(application_id) => {
                info!(
                    %session_id,
                    %application_id,
                    schemes = update.previous.draft.selected_schemes.len(),
                    "application submitted"
                );
                let receipt = ApplicationReceipt::new(application_id.clone(), self.today());
                Ok(DispatchOutcome::Completed {
                    session_id: session_id.clone(),
                    application_id,
                    receipt,
                })
            }
        }
    }

    /// Host tore the wizard down without finishing; the draft is released.
    pub fn abandon(&self, session_id: &DraftSessionId) -> Result<(), SessionServiceError> {
        self.store
            .remove(session_id)?
            .ok_or(SessionStoreError::NotFound)?;
        info!(%session_id, "application draft abandoned");
        Ok(())
    }

    /// Release every draft idle for longer than the configured timeout.
    pub fn release_idle(&self) -> Result<usize, SessionServiceError> {
        let released = self.store.remove_idle(self.idle_cutoff())?;
        if released > 0 {
            info!(released, "idle application drafts released");
        }
        Ok(released)
    }

    pub fn set_field(
        &self,
        session_id: &DraftSessionId,
        field_key: &str,
        raw_value: &str,
    ) -> Result<DispatchOutcome, SessionServiceError> {
        let update = FieldUpdate::parse_key(field_key, raw_value)?;
        self.dispatch(session_id, WizardEvent::SetField(update))
    }

    pub fn toggle_scheme(
        &self,
        session_id: &DraftSessionId,
        scheme_key: &str,
    ) -> Result<DispatchOutcome, SessionServiceError> {
        let scheme = SchemeId::from_key(scheme_key)
            .ok_or_else(|| SessionServiceError::UnknownScheme(scheme_key.to_string()))?;
        self.dispatch(session_id, WizardEvent::ToggleScheme(scheme))
    }

    pub fn attach_document(
        &self,
        session_id: &DraftSessionId,
        kind_key: &str,
        file_name: &str,
        content_type: Option<&str>,
    ) -> Result<DispatchOutcome, SessionServiceError> {
        let kind = document_kind(kind_key)?;
        let reference = self.uploads.check(file_name, content_type)?;
        self.dispatch(session_id, WizardEvent::AttachDocument { kind, reference })
    }

    pub fn detach_document(
        &self,
        session_id: &DraftSessionId,
        kind_key: &str,
    ) -> Result<DispatchOutcome, SessionServiceError> {
        let kind = document_kind(kind_key)?;
        self.dispatch(session_id, WizardEvent::DetachDocument(kind))
    }

    fn load(&self, session_id: &DraftSessionId) -> Result<DraftSession, SessionServiceError> {
        let session = self
            .store
            .fetch(session_id)?
            .ok_or(SessionStoreError::NotFound)?;
        if session.touched_at < self.idle_cutoff() {
            self.store.remove(session_id)?;
            debug!(%session_id, "idle draft released on access");
            return Err(SessionStoreError::NotFound.into());
        }
        Ok(session)
    }

    fn idle_cutoff(&self) -> i64 {
        let timeout = i64::try_from(self.idle_timeout.as_millis()).unwrap_or(i64::MAX);
        self.clock.now_millis().saturating_sub(timeout)
    }

    fn today(&self) -> NaiveDate {
        DateTime::<Utc>::from_timestamp_millis(self.clock.now_millis())
            .map(|instant| instant.date_naive())
            .unwrap_or_default()
    }
}

fn document_kind(raw: &str) -> Result<DocumentKind, SessionServiceError> {
    DocumentKind::from_key(raw)
        .ok_or_else(|| SessionServiceError::UnknownDocument(raw.to_string()))
}

/// Error raised by the wizard session service.
#[derive(Debug, thiserror::Error)]
pub enum SessionServiceError {
    #[error(transparent)]
    Field(#[from] FieldParseError),
    #[error(transparent)]
    Upload(#[from] UploadRejected),
    #[error("unknown scheme '{0}'")]
    UnknownScheme(String),
    #[error("unknown document kind '{0}'")]
    UnknownDocument(String),
    #[error(transparent)]
    Store(#[from] SessionStoreError),
}
