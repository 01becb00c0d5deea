use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::catalog::SchemeId;

/// Linear stages of the application wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    BasicInfo,
    AdditionalInfo,
    Documents,
    SchemeSelection,
}

impl Step {
    pub const FIRST: Self = Self::BasicInfo;
    pub const LAST: Self = Self::SchemeSelection;

    pub const fn ordered() -> [Self; 4] {
        [
            Self::BasicInfo,
            Self::AdditionalInfo,
            Self::Documents,
            Self::SchemeSelection,
        ]
    }

    /// One-based position shown to the citizen ("Step 2 of 4").
    pub const fn number(self) -> u8 {
        match self {
            Self::BasicInfo => 1,
            Self::AdditionalInfo => 2,
            Self::Documents => 3,
            Self::SchemeSelection => 4,
        }
    }

    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::BasicInfo),
            2 => Some(Self::AdditionalInfo),
            3 => Some(Self::Documents),
            4 => Some(Self::SchemeSelection),
            _ => None,
        }
    }

    pub const fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub const fn previous(self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BasicInfo => "Personal Information",
            Self::AdditionalInfo => "Additional Information",
            Self::Documents => "Document Upload",
            Self::SchemeSelection => "Scheme Selection",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const fn key(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    pub fn from_key(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            _ => None,
        }
    }
}

/// States where the portal currently accepts applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportedState {
    MadhyaPradesh,
    Tripura,
    Odisha,
    Telangana,
}

impl SupportedState {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::MadhyaPradesh,
            Self::Tripura,
            Self::Odisha,
            Self::Telangana,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::MadhyaPradesh => "Madhya Pradesh",
            Self::Tripura => "Tripura",
            Self::Odisha => "Odisha",
            Self::Telangana => "Telangana",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ordered().into_iter().find(|state| {
            state.label().eq_ignore_ascii_case(raw)
                || state
                    .label()
                    .replace(' ', "_")
                    .eq_ignore_ascii_case(raw)
        })
    }
}

/// Every field captured by the wizard, keyed the way host forms name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DraftField {
    #[serde(rename = "fullName")]
    FullName,
    #[serde(rename = "aadhaar")]
    NationalId,
    #[serde(rename = "mobile")]
    Mobile,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "dob")]
    DateOfBirth,
    #[serde(rename = "gender")]
    Gender,
    #[serde(rename = "fatherName")]
    FatherName,
    #[serde(rename = "address")]
    Address,
    #[serde(rename = "village")]
    Village,
    #[serde(rename = "district")]
    District,
    #[serde(rename = "state")]
    State,
    #[serde(rename = "pincode")]
    PostalCode,
    #[serde(rename = "caste")]
    Caste,
}

impl DraftField {
    pub const fn ordered() -> [Self; 13] {
        [
            Self::FullName,
            Self::NationalId,
            Self::Mobile,
            Self::Email,
            Self::DateOfBirth,
            Self::Gender,
            Self::FatherName,
            Self::Address,
            Self::Village,
            Self::District,
            Self::State,
            Self::PostalCode,
            Self::Caste,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::NationalId => "aadhaar",
            Self::Mobile => "mobile",
            Self::Email => "email",
            Self::DateOfBirth => "dob",
            Self::Gender => "gender",
            Self::FatherName => "fatherName",
            Self::Address => "address",
            Self::Village => "village",
            Self::District => "district",
            Self::State => "state",
            Self::PostalCode => "pincode",
            Self::Caste => "caste",
        }
    }

    pub fn from_key(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(raw))
    }

    /// Step on which the field is rendered.
    pub const fn step(self) -> Step {
        match self {
            Self::FullName
            | Self::NationalId
            | Self::Mobile
            | Self::Email
            | Self::DateOfBirth
            | Self::Gender => Step::BasicInfo,
            Self::FatherName
            | Self::Address
            | Self::Village
            | Self::District
            | Self::State
            | Self::PostalCode
            | Self::Caste => Step::AdditionalInfo,
        }
    }

    /// Presentation marking only; transitions never consult it.
    pub const fn marked_required(self) -> bool {
        !matches!(self, Self::Email)
    }
}

/// A typed replacement for one draft field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    FullName(String),
    NationalId(String),
    Mobile(String),
    Email(String),
    DateOfBirth(String),
    Gender(Gender),
    FatherName(String),
    Address(String),
    Village(String),
    District(String),
    State(SupportedState),
    PostalCode(String),
    Caste(String),
}

impl FieldUpdate {
    pub const fn field(&self) -> DraftField {
        match self {
            Self::FullName(_) => DraftField::FullName,
            Self::NationalId(_) => DraftField::NationalId,
            Self::Mobile(_) => DraftField::Mobile,
            Self::Email(_) => DraftField::Email,
            Self::DateOfBirth(_) => DraftField::DateOfBirth,
            Self::Gender(_) => DraftField::Gender,
            Self::FatherName(_) => DraftField::FatherName,
            Self::Address(_) => DraftField::Address,
            Self::Village(_) => DraftField::Village,
            Self::District(_) => DraftField::District,
            Self::State(_) => DraftField::State,
            Self::PostalCode(_) => DraftField::PostalCode,
            Self::Caste(_) => DraftField::Caste,
        }
    }

    /// Build an update from raw host input. Free-text fields accept anything,
    /// including empty strings, and are stored verbatim. Only the enumerated
    /// fields can be rejected, and they are stored in canonical form: gender
    /// matches its key case-insensitively and reads back lowercase ("Female"
    /// becomes "female"); state matches its label or the underscored label
    /// case-insensitively and reads back as the label ("madhya_pradesh"
    /// becomes "Madhya Pradesh"). Surrounding whitespace is ignored for both.
    pub fn parse(field: DraftField, raw: &str) -> Result<Self, FieldParseError> {
        let text = raw.to_string();
        let update = match field {
            DraftField::FullName => Self::FullName(text),
            DraftField::NationalId => Self::NationalId(text),
            DraftField::Mobile => Self::Mobile(text),
            DraftField::Email => Self::Email(text),
            DraftField::DateOfBirth => Self::DateOfBirth(text),
            DraftField::Gender => Self::Gender(Gender::from_key(raw).ok_or_else(|| {
                FieldParseError::UnknownOption {
                    field,
                    value: text.clone(),
                }
            })?),
            DraftField::FatherName => Self::FatherName(text),
            DraftField::Address => Self::Address(text),
            DraftField::Village => Self::Village(text),
            DraftField::District => Self::District(text),
            DraftField::State => Self::State(SupportedState::from_label(raw).ok_or_else(|| {
                FieldParseError::UnknownOption {
                    field,
                    value: text.clone(),
                }
            })?),
            DraftField::PostalCode => Self::PostalCode(text),
            DraftField::Caste => Self::Caste(text),
        };
        Ok(update)
    }

    pub fn parse_key(key: &str, raw: &str) -> Result<Self, FieldParseError> {
        let field = DraftField::from_key(key).ok_or_else(|| FieldParseError::UnknownField {
            key: key.to_string(),
        })?;
        Self::parse(field, raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldParseError {
    #[error("unknown application field '{key}'")]
    UnknownField { key: String },
    #[error("'{value}' is not a valid option for {}", .field.key())]
    UnknownOption { field: DraftField, value: String },
}

/// Supporting documents requested on the upload step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    #[serde(rename = "aadhaarCard")]
    IdentityCard,
    #[serde(rename = "casteCard")]
    CasteCertificate,
    #[serde(rename = "incomeCard")]
    IncomeCertificate,
    #[serde(rename = "landDocuments")]
    LandDocuments,
}

impl DocumentKind {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::IdentityCard,
            Self::CasteCertificate,
            Self::IncomeCertificate,
            Self::LandDocuments,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::IdentityCard => "aadhaarCard",
            Self::CasteCertificate => "casteCard",
            Self::IncomeCertificate => "incomeCard",
            Self::LandDocuments => "landDocuments",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::IdentityCard => "Aadhaar Card",
            Self::CasteCertificate => "Caste Certificate",
            Self::IncomeCertificate => "Income Certificate",
            Self::LandDocuments => "Land Documents",
        }
    }

    pub const fn marked_required(self) -> bool {
        matches!(self, Self::IdentityCard | Self::CasteCertificate)
    }

    pub fn from_key(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(raw))
    }
}

/// Reference to a file accepted by the upload collaborator. Content never
/// reaches the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentReference {
    pub file_name: String,
    pub content_type: String,
}

/// In-progress application owned by a single wizard session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationDraft {
    pub full_name: String,
    pub national_id: String,
    pub mobile: String,
    pub email: String,
    pub date_of_birth: String,
    pub gender: Option<Gender>,
    pub father_name: String,
    pub address: String,
    pub village: String,
    pub district: String,
    pub state: Option<SupportedState>,
    pub postal_code: String,
    pub caste: String,
    pub documents: BTreeMap<DocumentKind, DocumentReference>,
    pub selected_schemes: BTreeSet<SchemeId>,
}

impl ApplicationDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace one field, leaving every other field untouched.
    pub fn set(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::FullName(value) => self.full_name = value,
            FieldUpdate::NationalId(value) => self.national_id = value,
            FieldUpdate::Mobile(value) => self.mobile = value,
            FieldUpdate::Email(value) => self.email = value,
            FieldUpdate::DateOfBirth(value) => self.date_of_birth = value,
            FieldUpdate::Gender(value) => self.gender = Some(value),
            FieldUpdate::FatherName(value) => self.father_name = value,
            FieldUpdate::Address(value) => self.address = value,
            FieldUpdate::Village(value) => self.village = value,
            FieldUpdate::District(value) => self.district = value,
            FieldUpdate::State(value) => self.state = Some(value),
            FieldUpdate::PostalCode(value) => self.postal_code = value,
            FieldUpdate::Caste(value) => self.caste = value,
        }
    }

    /// Current value of a field as the host would display it; unset options read as "".
    pub fn value(&self, field: DraftField) -> &str {
        match field {
            DraftField::FullName => &self.full_name,
            DraftField::NationalId => &self.national_id,
            DraftField::Mobile => &self.mobile,
            DraftField::Email => &self.email,
            DraftField::DateOfBirth => &self.date_of_birth,
            DraftField::Gender => self.gender.map(Gender::key).unwrap_or(""),
            DraftField::FatherName => &self.father_name,
            DraftField::Address => &self.address,
            DraftField::Village => &self.village,
            DraftField::District => &self.district,
            DraftField::State => self.state.map(SupportedState::label).unwrap_or(""),
            DraftField::PostalCode => &self.postal_code,
            DraftField::Caste => &self.caste,
        }
    }

    pub fn is_blank(&self, field: DraftField) -> bool {
        self.value(field).trim().is_empty()
    }

    /// Flip scheme membership. Returns whether the scheme is selected afterwards.
    pub fn toggle_scheme(&mut self, scheme: SchemeId) -> bool {
        if self.selected_schemes.remove(&scheme) {
            false
        } else {
            self.selected_schemes.insert(scheme);
            true
        }
    }

    pub fn is_scheme_selected(&self, scheme: SchemeId) -> bool {
        self.selected_schemes.contains(&scheme)
    }

    pub fn attach_document(&mut self, kind: DocumentKind, reference: DocumentReference) {
        self.documents.insert(kind, reference);
    }

    pub fn detach_document(&mut self, kind: DocumentKind) -> Option<DocumentReference> {
        self.documents.remove(&kind)
    }

    pub fn has_document(&self, kind: DocumentKind) -> bool {
        self.documents.contains_key(&kind)
    }
}
