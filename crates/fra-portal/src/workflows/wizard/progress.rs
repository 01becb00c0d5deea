use serde::Serialize;

use super::domain::{ApplicationDraft, DocumentKind, DraftField, Step};
use super::machine::WizardState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepMarker {
    Completed,
    Current,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepIndicator {
    pub number: u8,
    pub label: &'static str,
    pub marker: StepMarker,
}

/// Header indicator for all four steps relative to `current`.
pub fn step_indicators(current: Step) -> Vec<StepIndicator> {
    Step::ordered()
        .into_iter()
        .map(|step| StepIndicator {
            number: step.number(),
            label: step.label(),
            marker: match step.cmp(&current) {
                std::cmp::Ordering::Less => StepMarker::Completed,
                std::cmp::Ordering::Equal => StepMarker::Current,
                std::cmp::Ordering::Greater => StepMarker::Upcoming,
            },
        })
        .collect()
}

pub fn step_caption(step: Step) -> String {
    format!(
        "Step {} of {} - {}",
        step.number(),
        Step::LAST.number(),
        step.label()
    )
}

/// Marked-required inputs that are still empty on `step`.
///
/// Advisory only: the wizard lets citizens advance regardless.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MissingRequired {
    pub fields: Vec<DraftField>,
    pub documents: Vec<DocumentKind>,
}

impl MissingRequired {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.documents.is_empty()
    }
}

pub fn missing_required(draft: &ApplicationDraft, step: Step) -> MissingRequired {
    let fields = DraftField::ordered()
        .into_iter()
        .filter(|field| field.step() == step && field.marked_required() && draft.is_blank(*field))
        .collect();

    let documents = if step == Step::Documents {
        DocumentKind::ordered()
            .into_iter()
            .filter(|kind| kind.marked_required() && !draft.has_document(*kind))
            .collect()
    } else {
        Vec::new()
    };

    MissingRequired { fields, documents }
}

/// Serializable snapshot of a wizard for hosts and API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardView {
    pub current_step: u8,
    pub caption: String,
    pub steps: Vec<StepIndicator>,
    pub draft: ApplicationDraft,
    pub missing_required: MissingRequired,
    pub can_go_back: bool,
    pub submits_on_next: bool,
}

impl WizardView {
    pub fn of(state: &WizardState) -> Self {
        Self {
            current_step: state.step.number(),
            caption: step_caption(state.step),
            steps: step_indicators(state.step),
            draft: state.draft.clone(),
            missing_required: missing_required(&state.draft, state.step),
            can_go_back: state.step.previous().is_some(),
            submits_on_next: state.step == Step::LAST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::wizard::domain::{DocumentReference, FieldUpdate};

    #[test]
    fn indicators_mark_position() {
        let markers: Vec<_> = step_indicators(Step::Documents)
            .into_iter()
            .map(|indicator| indicator.marker)
            .collect();
        assert_eq!(
            markers,
            vec![
                StepMarker::Completed,
                StepMarker::Completed,
                StepMarker::Current,
                StepMarker::Upcoming
            ]
        );
        assert_eq!(
            step_caption(Step::AdditionalInfo),
            "Step 2 of 4 - Additional Information"
        );
    }

    #[test]
    fn missing_required_ignores_optional_email() {
        let mut draft = ApplicationDraft::new();
        draft.set(FieldUpdate::FullName("Asha Devi".to_string()));

        let missing = missing_required(&draft, Step::BasicInfo);
        assert!(!missing.fields.contains(&DraftField::FullName));
        assert!(!missing.fields.contains(&DraftField::Email));
        assert!(missing.fields.contains(&DraftField::NationalId));
        assert!(missing.documents.is_empty());
    }

    #[test]
    fn missing_required_lists_marked_documents() {
        let mut draft = ApplicationDraft::new();
        draft.attach_document(
            DocumentKind::IdentityCard,
            DocumentReference {
                file_name: "id.png".to_string(),
                content_type: "image/png".to_string(),
            },
        );

        let missing = missing_required(&draft, Step::Documents);
        assert!(missing.fields.is_empty());
        assert_eq!(missing.documents, vec![DocumentKind::CasteCertificate]);
        assert!(missing_required(&draft, Step::SchemeSelection).is_empty());
    }

    #[test]
    fn view_flags_edges() {
        let first = WizardView::of(&WizardState::new());
        assert!(!first.can_go_back);
        assert!(!first.submits_on_next);

        let last = WizardView::of(&WizardState {
            step: Step::SchemeSelection,
            draft: ApplicationDraft::new(),
        });
        assert!(last.can_go_back);
        assert!(last.submits_on_next);
        assert_eq!(last.current_step, 4);
    }
}
