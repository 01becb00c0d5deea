use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Barrier};
use std::time::Duration;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::wizard::identifier::{Clock, FixedClock};
use crate::workflows::wizard::machine::{Transition, WizardState};
use crate::workflows::wizard::service::{DispatchOutcome, SessionView, WizardSessionService};
use crate::workflows::wizard::store::{
    DraftSession, DraftSessionId, DraftSessionStore, InMemoryDraftSessionStore, SessionStoreError,
    SessionUpdate,
};
use crate::workflows::wizard::wizard_router;

/// 2025-01-16T07:25:45.678Z
pub(super) const SUBMITTED_AT: i64 = 1_737_012_345_678;

pub(super) fn clock() -> FixedClock {
    FixedClock(SUBMITTED_AT)
}

pub(super) fn build_service() -> (
    WizardSessionService<InMemoryDraftSessionStore, FixedClock>,
    Arc<InMemoryDraftSessionStore>,
) {
    let store = Arc::new(InMemoryDraftSessionStore::default());
    let service = WizardSessionService::new(store.clone(), Arc::new(clock()));
    (service, store)
}

pub(super) fn router_with_store() -> (axum::Router, Arc<InMemoryDraftSessionStore>) {
    let (service, store) = build_service();
    (wizard_router(Arc::new(service)), store)
}

pub(super) fn expect_in_progress(outcome: DispatchOutcome) -> SessionView {
    match outcome {
        DispatchOutcome::InProgress(view) => view,
        other => panic!("expected the wizard to stay open, got {other:?}"),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) struct UnavailableStore;

impl DraftSessionStore for UnavailableStore {
    fn insert(&self, _session: DraftSession) -> Result<DraftSession, SessionStoreError> {
        Err(SessionStoreError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &DraftSessionId) -> Result<Option<DraftSession>, SessionStoreError> {
        Err(SessionStoreError::Unavailable("store offline".to_string()))
    }

    fn modify<F>(
        &self,
        _id: &DraftSessionId,
        _touched_at: i64,
        _change: F,
    ) -> Result<SessionUpdate, SessionStoreError>
    where
        F: FnOnce(&WizardState) -> Transition,
    {
        Err(SessionStoreError::Unavailable("store offline".to_string()))
    }

    fn remove(&self, _id: &DraftSessionId) -> Result<Option<DraftSession>, SessionStoreError> {
        Err(SessionStoreError::Unavailable("store offline".to_string()))
    }

    fn remove_idle(&self, _idle_since: i64) -> Result<usize, SessionStoreError> {
        Err(SessionStoreError::Unavailable("store offline".to_string()))
    }
}

/// Store whose reads wait at a barrier, so two dispatches load the same
/// session before either one writes.
pub(super) struct GatedStore {
    pub(super) inner: InMemoryDraftSessionStore,
    pub(super) gate: Barrier,
}

impl GatedStore {
    pub(super) fn new(parties: usize) -> Self {
        Self {
            inner: InMemoryDraftSessionStore::default(),
            gate: Barrier::new(parties),
        }
    }
}

impl DraftSessionStore for GatedStore {
    fn insert(&self, session: DraftSession) -> Result<DraftSession, SessionStoreError> {
        self.inner.insert(session)
    }

    fn fetch(&self, id: &DraftSessionId) -> Result<Option<DraftSession>, SessionStoreError> {
        let session = self.inner.fetch(id)?;
        self.gate.wait();
        Ok(session)
    }

    fn modify<F>(
        &self,
        id: &DraftSessionId,
        touched_at: i64,
        change: F,
    ) -> Result<SessionUpdate, SessionStoreError>
    where
        F: FnOnce(&WizardState) -> Transition,
    {
        self.inner.modify(id, touched_at, change)
    }

    fn remove(&self, id: &DraftSessionId) -> Result<Option<DraftSession>, SessionStoreError> {
        self.inner.remove(id)
    }

    fn remove_idle(&self, idle_since: i64) -> Result<usize, SessionStoreError> {
        self.inner.remove_idle(idle_since)
    }
}

/// Clock the test moves by hand.
#[derive(Debug)]
pub(super) struct ManualClock(AtomicI64);

impl ManualClock {
    pub(super) fn at(millis: i64) -> Self {
        Self(AtomicI64::new(millis))
    }

    pub(super) fn advance(&self, by: Duration) {
        let millis = i64::try_from(by.as_millis()).expect("duration fits in i64");
        self.0.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}
