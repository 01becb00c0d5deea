use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::domain::{ApplicationStatus, LandCoordinates, TrackedApplication};
use crate::workflows::wizard::ApplicationIdentifier;

/// Read access to submitted applications for status lookups and reports.
pub trait TrackingRegistry: Send + Sync {
    fn lookup(
        &self,
        id: &ApplicationIdentifier,
    ) -> Result<Option<TrackedApplication>, TrackingError>;
    fn all(&self) -> Result<Vec<TrackedApplication>, TrackingError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TrackingError {
    #[error("'{0}' is not a valid application id (expected FRA followed by 6 digits)")]
    InvalidId(String),
    #[error("application {0} was not found")]
    NotFound(String),
    #[error("tracking registry unavailable: {0}")]
    Unavailable(String),
}

/// Fixed registry seeded at construction time.
#[derive(Debug, Clone, Default)]
pub struct SeededTrackingRegistry {
    records: BTreeMap<ApplicationIdentifier, TrackedApplication>,
}

impl SeededTrackingRegistry {
    pub fn new(records: impl IntoIterator<Item = TrackedApplication>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|record| (record.application_id.clone(), record))
                .collect(),
        }
    }

    /// Demonstration records covering each decision state.
    pub fn demo() -> Self {
        Self::new(demo_applications())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl TrackingRegistry for SeededTrackingRegistry {
    fn lookup(
        &self,
        id: &ApplicationIdentifier,
    ) -> Result<Option<TrackedApplication>, TrackingError> {
        Ok(self.records.get(id).cloned())
    }

    fn all(&self) -> Result<Vec<TrackedApplication>, TrackingError> {
        Ok(self.records.values().cloned().collect())
    }
}

/// Resolve a raw id typed by a citizen.
pub fn find_application<R>(registry: &R, raw_id: &str) -> Result<TrackedApplication, TrackingError>
where
    R: TrackingRegistry + ?Sized,
{
    let id = ApplicationIdentifier::parse(raw_id)
        .ok_or_else(|| TrackingError::InvalidId(raw_id.trim().to_string()))?;
    registry
        .lookup(&id)?
        .ok_or_else(|| TrackingError::NotFound(id.to_string()))
}

fn demo_id(raw: &str) -> ApplicationIdentifier {
    ApplicationIdentifier::parse(raw)
        .unwrap_or_else(|| ApplicationIdentifier::from_timestamp_millis(0))
}

fn demo_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

pub fn demo_applications() -> Vec<TrackedApplication> {
    vec![
        TrackedApplication {
            application_id: demo_id("FRA123456"),
            applicant_name: "राम कुमार".to_string(),
            submitted_on: demo_date(2025, 1, 15),
            status: ApplicationStatus::Approved,
            schemes: vec![
                "Forest Rights Act 2006".to_string(),
                "PM Kisan Yojana".to_string(),
            ],
            officer_remarks: "सभी दस्तावेज सत्यापित। भूमि अधिकार स्वीकृत।".to_string(),
            land_coordinates: Some(LandCoordinates {
                lat: 23.2599,
                lng: 77.4126,
            }),
        },
        TrackedApplication {
            application_id: demo_id("FRA789012"),
            applicant_name: "सीता देवी".to_string(),
            submitted_on: demo_date(2025, 1, 20),
            status: ApplicationStatus::Pending,
            schemes: vec!["Jal Jeevan Mission".to_string()],
            officer_remarks: "दस्तावेज सत्यापन के लिए भेजा गया।".to_string(),
            land_coordinates: None,
        },
        TrackedApplication {
            application_id: demo_id("FRA345678"),
            applicant_name: "मोहन लाल".to_string(),
            submitted_on: demo_date(2025, 1, 18),
            status: ApplicationStatus::Rejected,
            schemes: vec!["Tribal Loan Scheme".to_string()],
            officer_remarks: "आय प्रमाण पत्र में त्रुटि। पुनः आवेदन करें।".to_string(),
            land_coordinates: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_registry_resolves_each_status() {
        let registry = SeededTrackingRegistry::demo();
        let approved = find_application(&registry, "FRA123456").expect("approved record");
        assert_eq!(approved.status, ApplicationStatus::Approved);
        let pending = find_application(&registry, "fra789012").expect("pending record");
        assert_eq!(pending.status, ApplicationStatus::Pending);
        let rejected = find_application(&registry, " FRA345678 ").expect("rejected record");
        assert_eq!(rejected.status, ApplicationStatus::Rejected);
        assert_eq!(registry.all().expect("all records").len(), 3);
    }

    #[test]
    fn unknown_and_malformed_ids_are_distinguished() {
        let registry = SeededTrackingRegistry::demo();
        assert!(matches!(
            find_application(&registry, "FRA000001"),
            Err(TrackingError::NotFound(id)) if id == "FRA000001"
        ));
        assert!(matches!(
            find_application(&registry, "12345"),
            Err(TrackingError::InvalidId(_))
        ));
    }
}
