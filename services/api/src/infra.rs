use chrono::DateTime;
use fra_portal::config::PortalConfig;
use fra_portal::workflows::tracking::SeededTrackingRegistry;
use fra_portal::workflows::wizard::{
    FixedClock, InMemoryDraftSessionStore, SystemClock, WizardSessionService,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type PortalWizardService = WizardSessionService<InMemoryDraftSessionStore, SystemClock>;

pub(crate) fn wizard_service(portal: &PortalConfig) -> Arc<PortalWizardService> {
    Arc::new(
        WizardSessionService::new(
            Arc::new(InMemoryDraftSessionStore::default()),
            Arc::new(SystemClock),
        )
        .with_idle_timeout(portal.draft_idle_timeout),
    )
}

/// Release idle drafts in the background so abandoned tabs do not pile up
/// between `start` calls.
pub(crate) fn spawn_draft_sweeper(
    service: Arc<PortalWizardService>,
) -> tokio::task::JoinHandle<()> {
    let period = (service.idle_timeout() / 2).max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            if let Err(err) = service.release_idle() {
                warn!(error = %err, "idle draft sweep failed");
            }
        }
    })
}

pub(crate) fn tracking_registry(portal: &PortalConfig) -> Arc<SeededTrackingRegistry> {
    if portal.seed_demo_applications {
        let registry = SeededTrackingRegistry::demo();
        info!(records = registry.len(), "tracking registry seeded with demo applications");
        Arc::new(registry)
    } else {
        Arc::new(SeededTrackingRegistry::default())
    }
}

/// Parse an RFC 3339 instant into a fixed clock so demo runs are reproducible.
pub(crate) fn parse_instant(raw: &str) -> Result<FixedClock, String> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|instant| FixedClock(instant.timestamp_millis()))
        .map_err(|err| format!("failed to parse '{raw}' as an RFC 3339 timestamp ({err})"))
}
