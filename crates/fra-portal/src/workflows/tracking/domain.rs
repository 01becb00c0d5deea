use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::workflows::wizard::ApplicationIdentifier;

/// Officer decision state of a submitted application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub const fn display_label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Approved => "Approved",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandCoordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Application record as shown on the status screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedApplication {
    pub application_id: ApplicationIdentifier,
    pub applicant_name: String,
    pub submitted_on: NaiveDate,
    pub status: ApplicationStatus,
    pub schemes: Vec<String>,
    pub officer_remarks: String,
    pub land_coordinates: Option<LandCoordinates>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineStage {
    Submitted,
    UnderReview,
    Decision,
    Completed,
}

impl TimelineStage {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Submitted,
            Self::UnderReview,
            Self::Decision,
            Self::Completed,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Submitted => "Application submitted",
            Self::UnderReview => "Under verification",
            Self::Decision => "Decision taken",
            Self::Completed => "Process complete",
        }
    }

    /// Whether this stage is done for an application in `status`.
    pub const fn reached(self, status: ApplicationStatus) -> bool {
        match self {
            Self::Submitted => true,
            Self::UnderReview => !matches!(status, ApplicationStatus::Pending),
            Self::Decision => matches!(
                status,
                ApplicationStatus::Approved | ApplicationStatus::Rejected
            ),
            Self::Completed => matches!(status, ApplicationStatus::Approved),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub stage: TimelineStage,
    pub label: &'static str,
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowUpAction {
    DownloadReceipt,
    ViewLandOnMap,
    Reapply,
}

impl TrackedApplication {
    pub fn timeline(&self) -> Vec<TimelineEntry> {
        TimelineStage::ordered()
            .into_iter()
            .map(|stage| TimelineEntry {
                stage,
                label: stage.label(),
                completed: stage.reached(self.status),
            })
            .collect()
    }

    pub fn follow_up_actions(&self) -> Vec<FollowUpAction> {
        let mut actions = vec![FollowUpAction::DownloadReceipt];
        match self.status {
            ApplicationStatus::Approved if self.land_coordinates.is_some() => {
                actions.push(FollowUpAction::ViewLandOnMap)
            }
            ApplicationStatus::Rejected => actions.push(FollowUpAction::Reapply),
            _ => {}
        }
        actions
    }

    pub fn status_view(&self) -> ApplicationStatusView {
        ApplicationStatusView {
            application: self.clone(),
            status_label: self.status.display_label(),
            timeline: self.timeline(),
            actions: self.follow_up_actions(),
        }
    }
}

/// Status payload returned to citizens looking up an application.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationStatusView {
    #[serde(flatten)]
    pub application: TrackedApplication,
    pub status_label: &'static str,
    pub timeline: Vec<TimelineEntry>,
    pub actions: Vec<FollowUpAction>,
}
