use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::catalog::SchemeId;
use super::domain::{ApplicationDraft, DocumentKind, DocumentReference, FieldUpdate, Step};
use super::identifier::{ApplicationIdentifier, Clock};

/// Position and collected data of one wizard run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    pub step: Step,
    pub draft: ApplicationDraft,
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            step: Step::FIRST,
            draft: ApplicationDraft::new(),
        }
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

/// Input events a host forwards to the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    Next,
    Previous,
    SetField(FieldUpdate),
    ToggleScheme(SchemeId),
    AttachDocument {
        kind: DocumentKind,
        reference: DocumentReference,
    },
    DetachDocument(DocumentKind),
}

/// Result of feeding one event to the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Still inside the wizard.
    Continue(WizardState),
    /// `Previous` on the first step; the host should leave the wizard.
    Exited,
    /// `Next` on the last step.
    Completed(ApplicationIdentifier),
}

/// Pure transition function. Navigation is never gated on field content and
/// out-of-range moves turn into exit or completion instead of errors.
pub fn transition(state: &WizardState, event: WizardEvent, clock: &impl Clock) -> Transition {
    match event {
        WizardEvent::Next => match state.step.next() {
            Some(step) => Transition::Continue(WizardState {
                step,
                draft: state.draft.clone(),
            }),
            None => Transition::Completed(ApplicationIdentifier::generate(clock)),
        },
        WizardEvent::Previous => match state.step.previous() {
            Some(step) => Transition::Continue(WizardState {
                step,
                draft: state.draft.clone(),
            }),
            None => Transition::Exited,
        },
        WizardEvent::SetField(update) => edit(state, |draft| draft.set(update)),
        WizardEvent::ToggleScheme(scheme) => edit(state, |draft| {
            draft.toggle_scheme(scheme);
        }),
        WizardEvent::AttachDocument { kind, reference } => {
            edit(state, |draft| draft.attach_document(kind, reference))
        }
        WizardEvent::DetachDocument(kind) => edit(state, |draft| {
            draft.detach_document(kind);
        }),
    }
}

fn edit(state: &WizardState, apply: impl FnOnce(&mut ApplicationDraft)) -> Transition {
    let mut next = state.clone();
    apply(&mut next.draft);
    Transition::Continue(next)
}

/// Callbacks into whatever embeds the wizard.
pub trait WizardHost {
    /// The citizen backed out from the first step.
    fn go_back(&mut self);
    /// The citizen submitted the last step.
    fn complete(&mut self, application_id: ApplicationIdentifier);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active(Step),
    Exited,
    Completed,
    Closed,
}

/// Single wizard instance bound to a host.
///
/// Exit and completion are signalled exactly once; afterwards the session is
/// closed and ignores further events.
pub struct WizardSession<H, C> {
    state: Option<WizardState>,
    host: H,
    clock: C,
}

impl<H, C> WizardSession<H, C>
where
    H: WizardHost,
    C: Clock,
{
    pub fn new(host: H, clock: C) -> Self {
        Self {
            state: Some(WizardState::new()),
            host,
            clock,
        }
    }

    pub fn dispatch(&mut self, event: WizardEvent) -> SessionStatus {
        let Some(state) = self.state.as_ref() else {
            return SessionStatus::Closed;
        };

        match transition(state, event, &self.clock) {
            Transition::Continue(next) => {
                if next.step != state.step {
                    debug!(
                        from = state.step.number(),
                        to = next.step.number(),
                        "wizard step changed"
                    );
                }
                let step = next.step;
                self.state = Some(next);
                SessionStatus::Active(step)
            }
            Transition::Exited => {
                self.state = None;
                debug!("citizen left the application wizard");
                self.host.go_back();
                SessionStatus::Exited
            }
            Transition::Completed(application_id) => {
                let schemes = state.draft.selected_schemes.len();
                self.state = None;
                info!(%application_id, schemes, "application wizard completed");
                self.host.complete(application_id);
                SessionStatus::Completed
            }
        }
    }

    pub fn state(&self) -> Option<&WizardState> {
        self.state.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.state.is_none()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }
}
