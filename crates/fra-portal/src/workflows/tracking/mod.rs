//! Application status lookup, submission receipts and the officer status report.

pub mod domain;
pub mod export;
pub mod receipt;
pub mod registry;
pub mod router;

pub use domain::{
    ApplicationStatus, ApplicationStatusView, FollowUpAction, LandCoordinates, TimelineEntry,
    TimelineStage, TrackedApplication,
};
pub use export::{status_report_csv, write_status_report};
pub use receipt::ApplicationReceipt;
pub use registry::{find_application, SeededTrackingRegistry, TrackingError, TrackingRegistry};
pub use router::tracking_router;
