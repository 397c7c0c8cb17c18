//! Record categories and their per-category display rules.

use serde::{Deserialize, Serialize};

/// A named sub-collection of a patient record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Demographics,
    ClinicalNote,
    PathologyReport,
    RadiologyReport,
    Diagnoses,
    Immunization,
    Labs,
    MedAdmin,
    MedOrders,
    OrdersAndOrdersets,
    Procedures,
}

impl Category {
    /// Every category, in canonical dataset order.
    pub const ALL: [Category; 11] = [
        Category::Demographics,
        Category::ClinicalNote,
        Category::PathologyReport,
        Category::RadiologyReport,
        Category::Diagnoses,
        Category::Immunization,
        Category::Labs,
        Category::MedAdmin,
        Category::MedOrders,
        Category::OrdersAndOrdersets,
        Category::Procedures,
    ];

    /// Key used for this category in the dataset.
    pub fn key(self) -> &'static str {
        match self {
            Category::Demographics => "demographics",
            Category::ClinicalNote => "clinical_note",
            Category::PathologyReport => "pathology_report",
            Category::RadiologyReport => "radiology_report",
            Category::Diagnoses => "diagnoses",
            Category::Immunization => "immunization",
            Category::Labs => "labs",
            Category::MedAdmin => "med_admin",
            Category::MedOrders => "med_orders",
            Category::OrdersAndOrdersets => "orders_and_ordersets",
            Category::Procedures => "procedures",
        }
    }

    /// Look up a category by its dataset key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Maximum number of entries shown for this category.
    pub fn display_limit(self) -> usize {
        match self {
            Category::Demographics => 1,
            Category::ClinicalNote
            | Category::PathologyReport
            | Category::RadiologyReport
            | Category::MedAdmin
            | Category::MedOrders
            | Category::OrdersAndOrdersets => 3,
            Category::Diagnoses
            | Category::Immunization
            | Category::Labs
            | Category::Procedures => 5,
        }
    }

    /// Whether the truncated, newest-first selection is flipped before display.
    ///
    /// Immunizations and labs show the most recent N entries oldest-first;
    /// everything else stays newest-first.
    pub fn reverse_for_display(self) -> bool {
        matches!(self, Category::Immunization | Category::Labs)
    }

    /// Fields consulted for the sort date, in priority order.
    ///
    /// Labs and immunizations carry their own date columns; `date` is the
    /// fallback for exports that only have the generic field.
    pub fn date_fields(self) -> &'static [&'static str] {
        match self {
            Category::Demographics => &[],
            Category::Immunization => &["immunization_date", "date"],
            Category::Labs => &["result_date", "taken_date", "order_date", "date"],
            Category::MedAdmin => &["taken_date", "date"],
            Category::MedOrders => &["order_date", "start_date", "date"],
            Category::ClinicalNote
            | Category::PathologyReport
            | Category::RadiologyReport
            | Category::Diagnoses
            | Category::OrdersAndOrdersets
            | Category::Procedures => &["date"],
        }
    }

    /// Literal shown when the category has no entries.
    pub fn empty_message(self) -> &'static str {
        match self {
            Category::Demographics => "No demographics available.",
            Category::ClinicalNote => "No clinical notes available.",
            Category::PathologyReport => "No pathology reports available.",
            Category::RadiologyReport => "No radiology reports available.",
            Category::Diagnoses => "No diagonis notes available.",
            Category::Immunization => "No immunizations available.",
            Category::Labs => "No lab notes available.",
            Category::MedAdmin => "No medical admin notes available.",
            Category::MedOrders => "No medical order reports available.",
            Category::OrdersAndOrdersets => "No orders and ordersets available.",
            Category::Procedures => "No procedures available.",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_key(category.key()), Some(category));
        }
        assert_eq!(Category::from_key("vitals"), None);
    }

    #[test]
    fn test_display_limits() {
        assert_eq!(Category::ClinicalNote.display_limit(), 3);
        assert_eq!(Category::OrdersAndOrdersets.display_limit(), 3);
        assert_eq!(Category::Diagnoses.display_limit(), 5);
        assert_eq!(Category::Immunization.display_limit(), 5);
        assert_eq!(Category::Labs.display_limit(), 5);
    }

    #[test]
    fn test_only_immunization_and_labs_reverse() {
        let reversed: Vec<_> = Category::ALL
            .into_iter()
            .filter(|c| c.reverse_for_display())
            .collect();
        assert_eq!(reversed, vec![Category::Immunization, Category::Labs]);
    }

    #[test]
    fn test_serde_uses_dataset_keys() {
        let json = serde_json::to_string(&Category::OrdersAndOrdersets).unwrap();
        assert_eq!(json, "\"orders_and_ordersets\"");
    }
}
