use serde::{Deserialize, Serialize};

/// Welfare and land-rights schemes a citizen can apply for from the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SchemeId {
    #[serde(rename = "fra2006")]
    ForestRightsAct2006,
    #[serde(rename = "pmkisan")]
    PmKisan,
    #[serde(rename = "jaljeevan")]
    JalJeevanMission,
    #[serde(rename = "scholarship")]
    TribalScholarship,
    #[serde(rename = "loan")]
    TribalLoan,
}

impl SchemeId {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::ForestRightsAct2006,
            Self::PmKisan,
            Self::JalJeevanMission,
            Self::TribalScholarship,
            Self::TribalLoan,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::ForestRightsAct2006 => "fra2006",
            Self::PmKisan => "pmkisan",
            Self::JalJeevanMission => "jaljeevan",
            Self::TribalScholarship => "scholarship",
            Self::TribalLoan => "loan",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::ForestRightsAct2006 => "Forest Rights Act 2006",
            Self::PmKisan => "PM Kisan Yojana",
            Self::JalJeevanMission => "Jal Jeevan Mission",
            Self::TribalScholarship => "Tribal Scholarship",
            Self::TribalLoan => "Tribal Loan Scheme",
        }
    }

    /// Hindi description shown beneath the scheme name.
    pub const fn description(self) -> &'static str {
        match self {
            Self::ForestRightsAct2006 => "वन अधिकार अधिनियम 2006",
            Self::PmKisan => "प्रधानमंत्री किसान सम्मान निधि",
            Self::JalJeevanMission => "जल जीवन मिशन",
            Self::TribalScholarship => "आदिवासी छात्रवृत्ति",
            Self::TribalLoan => "आदिवासी ऋण योजना",
        }
    }

    pub fn from_key(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|scheme| scheme.key().eq_ignore_ascii_case(raw))
    }

    pub fn summary(self) -> SchemeSummary {
        SchemeSummary {
            id: self.key(),
            name: self.name(),
            description: self.description(),
        }
    }
}

/// Serializable catalog entry for hosts rendering the scheme checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemeSummary {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub fn scheme_catalog() -> Vec<SchemeSummary> {
    SchemeId::ordered()
        .into_iter()
        .map(SchemeId::summary)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lists_five_schemes_in_display_order() {
        let catalog = scheme_catalog();
        let ids: Vec<_> = catalog.iter().map(|entry| entry.id).collect();
        assert_eq!(
            ids,
            vec!["fra2006", "pmkisan", "jaljeevan", "scholarship", "loan"]
        );
    }

    #[test]
    fn from_key_rejects_ids_outside_catalog() {
        assert_eq!(
            SchemeId::from_key("fra2006"),
            Some(SchemeId::ForestRightsAct2006)
        );
        assert_eq!(SchemeId::from_key(" PMKISAN "), Some(SchemeId::PmKisan));
        assert_eq!(SchemeId::from_key("mgnrega"), None);
    }

    #[test]
    fn serde_uses_catalog_keys() {
        let json = serde_json::to_string(&SchemeId::JalJeevanMission).expect("serializes");
        assert_eq!(json, "\"jaljeevan\"");
    }
}
