//! Field tables and value formatting for record cards.

use serde_json::Value;

use crate::models::{Category, Entry};
use crate::projector::{format_day, DATA_UNKNOWN};

/// Placeholder for missing values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Masking disclaimer the export appends to every note body.
pub const PHI_DISCLAIMER: &str = "All dates have been shifted by a fixed per-patient offset for PHI masking Accession numbers and numeric identifiers have been replaced by plausible looking alternatives for PHI masking";

/// How a field's raw value is turned into display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Value as-is, `N/A` when missing.
    Text,
    /// Value as-is with a custom placeholder.
    TextOr(&'static str),
    /// `YYYY-MM-DD`; the `Data Unknown` sentinel is shown literally.
    Date,
    /// `<n> years`.
    Years,
    /// `<value> <unit>` with the unit read from another key.
    WithUnit(&'static str),
    /// Note body with the masking disclaimer removed.
    NoteText,
    /// Part after the first delimiter, e.g. `"2-Never"` → `Never`.
    AfterDelimiter(char),
}

/// One labelled field of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub label: &'static str,
    pub key: &'static str,
    pub kind: FieldKind,
}

const fn field(label: &'static str, key: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { label, key, kind }
}

use FieldKind::*;

const DEMOGRAPHICS: &[FieldSpec] = &[
    field("Patient ID", "patient_id", Text),
    field("Legal Sex", "legal_sex", Text),
    field("Date of Birth", "date_of_birth", Date),
    field("Marital Status", "marital_status", Text),
    field("Language", "language", Text),
    field("Recent Height (cm)", "recent_height_cm", Text),
    field("Recent Weight (kg)", "recent_weight_kg", Text),
    field("Recent BMI", "recent_bmi", Text),
    field("Smoking History", "smoking_hx", AfterDelimiter('-')),
    field("Alcohol Use", "alcohol_use", AfterDelimiter(';')),
    field("Insurance Name", "insurance_name", Text),
    field("Insurance Type", "insurance_type", Text),
];

const NOTE: &[FieldSpec] = &[
    field("Patient ID", "patient_id", Text),
    field("Date", "date", Date),
    field("Age", "age", Years),
    field("Type", "type", Text),
    field("Text", "text", NoteText),
];

const DIAGNOSES: &[FieldSpec] = &[
    field("Patient ID", "patient_id", Text),
    field("Date", "date", Date),
    field("Age", "age", Years),
    field("Type", "type", Text),
    field("Source", "source", Text),
    field("ICD-9 Code", "icd9_code", Text),
    field("ICD-10 Code", "icd10_code", Text),
    field("Description", "description", Text),
    field("Performing Provider", "performing_provider", TextOr("Unknown")),
];

const IMMUNIZATION: &[FieldSpec] = &[
    field("Patient ID", "patient_id", Text),
    field("Immunization Date", "immunization_date", Date),
    field("Age at Event", "age_at_event", Years),
    field("Vaccine Name", "name", Text),
    field("Dose", "dose", Text),
    field("Route", "route", Text),
    field("Site", "site", Text),
    field("Manufacturer", "manufacturer", Text),
    field("Lot Number", "lot", Text),
    field("Administered By", "administered_by", Text),
    field("Status", "status", Text),
    field("Data Source", "data_source", Text),
];

const LABS: &[FieldSpec] = &[
    field("Patient ID", "patient_id", Text),
    field("Order Date", "order_date", Date),
    field("Taken Date", "taken_date", Date),
    field("Result Date", "result_date", Date),
    field("Age", "age", Years),
    field("Lab Test", "lab", Text),
    field("Result", "result", Text),
    field("Value", "value", Text),
];

const MED_ADMIN: &[FieldSpec] = &[
    field("Patient ID", "patient_id", Text),
    field("Medication", "medication", Text),
    field("Line", "line", Text),
    field("Taken Date", "taken_date", Date),
    field("Taken Date Age", "taken_date_age", Years),
    field("Taken Time", "taken_time", Text),
    field("MAR Action", "mar_action", Text),
    field("SIG", "sig", Text),
    field("Route", "route", Text),
    field("Site", "site", Text),
    field("Infusion Rate", "infusion_rate", WithUnit("infusion_rate_unit")),
    field("Dose Unit", "dose_unit", Text),
    field("MAR Duration", "mar_duration", WithUnit("mar_duration_unit")),
];

const MED_ORDERS: &[FieldSpec] = &[
    field("Patient ID", "patient_id", Text),
    field("Medication", "medication", Text),
    field("SIG", "sig", Text),
    field("Order Date", "order_date", Date),
    field("Order Age", "order_age", Years),
    field("Start Date", "start_date", Date),
    field("Start Age", "start_age", Years),
    field("End Date", "end_date", Date),
    field("End Age", "end_age", Years),
    field("Route", "route", Text),
    field("Dispensed Amount", "disp", WithUnit("unit")),
    field("Refills", "refills", Text),
    field("Frequency", "frequency", Text),
    field("Number of Times", "number_of_times", Text),
    field("Order Status", "order_status", Text),
    field("Order Class", "order_class", Text),
    field("Order Mode", "order_mode", Text),
    field("Pharmaceutical Class", "pharmaceutical_class", Text),
    field("Therapeutic Class", "therapeutic_class", Text),
    field("Ingredients", "ingredients", Text),
    field("Prescribing Provider", "prescribing_provider", Text),
];

const ORDERS_AND_ORDERSETS: &[FieldSpec] = &[
    field("Patient ID", "patient_id", Text),
    field("Order ID", "order_id", Text),
    field("Date", "date", Date),
    field("Age", "age", Years),
    field("Order Type Code", "order_type_code", Text),
    field("Order Type", "order_type", Text),
    field("Procedure ID", "proc_id", Text),
    field("Order Class Code", "order_class_code", Text),
    field("Order Class", "order_class", Text),
    field("Description", "description", Text),
    field("Authorizing Provider", "authrzing_provider", Text),
    field("Billing Provider", "billing_provider", Text),
    field("Result Time", "result_time", Text),
    field("Future or Standing Order", "future_or_standing", Text),
    field("Instantiated Time", "instantiated_time", Date),
    field("Quantity", "quantity", Text),
    field("Order Status Code", "order_status_code", Text),
    field("Order Status", "order_status", Text),
];

const PROCEDURES: &[FieldSpec] = &[
    field("Patient ID", "patient_id", Text),
    field("Date", "date", Date),
    field("Age", "age", Years),
    field("Code", "code", Text),
    field("Description", "description", Text),
];

/// Card layout for a category.
pub fn fields_for(category: Category) -> &'static [FieldSpec] {
    match category {
        Category::Demographics => DEMOGRAPHICS,
        Category::ClinicalNote | Category::PathologyReport | Category::RadiologyReport => NOTE,
        Category::Diagnoses => DIAGNOSES,
        Category::Immunization => IMMUNIZATION,
        Category::Labs => LABS,
        Category::MedAdmin => MED_ADMIN,
        Category::MedOrders => MED_ORDERS,
        Category::OrdersAndOrdersets => ORDERS_AND_ORDERSETS,
        Category::Procedures => PROCEDURES,
    }
}

/// Display text of a present, non-empty value.
fn present(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Render one field of an entry.
pub fn format_field(entry: &Entry, spec: &FieldSpec) -> String {
    let raw = entry.get(spec.key);
    let text = present(raw);

    match spec.kind {
        Text => text.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        TextOr(placeholder) => text.unwrap_or_else(|| placeholder.to_string()),
        Date => match (raw, text) {
            (_, None) => NOT_AVAILABLE.to_string(),
            (_, Some(t)) if t.trim() == DATA_UNKNOWN => DATA_UNKNOWN.to_string(),
            (Some(value), Some(t)) => format_day(value).unwrap_or(t),
            (None, Some(t)) => t,
        },
        Years => text
            .map(|t| format!("{} years", t))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        WithUnit(unit_key) => match text {
            Some(t) => {
                let unit = present(entry.get(unit_key)).unwrap_or_default();
                format!("{} {}", t, unit).trim_end().to_string()
            }
            None => NOT_AVAILABLE.to_string(),
        },
        NoteText => text
            .map(|t| t.replace(PHI_DISCLAIMER, "").trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        AfterDelimiter(delimiter) => text
            .and_then(|t| {
                t.split_once(delimiter)
                    .map(|(_, rest)| rest.split(delimiter).next().unwrap_or("").trim().to_string())
            })
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(value: Value) -> Entry {
        value.as_object().cloned().unwrap()
    }

    fn spec(key: &'static str, kind: FieldKind) -> FieldSpec {
        field("Label", key, kind)
    }

    #[test]
    fn test_text_placeholder() {
        let e = entry(json!({"a": "x", "b": "", "c": null, "d": 42}));
        assert_eq!(format_field(&e, &spec("a", Text)), "x");
        assert_eq!(format_field(&e, &spec("b", Text)), "N/A");
        assert_eq!(format_field(&e, &spec("c", Text)), "N/A");
        assert_eq!(format_field(&e, &spec("d", Text)), "42");
        assert_eq!(format_field(&e, &spec("missing", Text)), "N/A");
        assert_eq!(format_field(&e, &spec("missing", TextOr("Unknown"))), "Unknown");
    }

    #[test]
    fn test_date_formatting() {
        let e = entry(json!({
            "iso": "2020-02-03T11:00:00",
            "unknown": "Data Unknown",
            "junk": "sometime"
        }));
        assert_eq!(format_field(&e, &spec("iso", Date)), "2020-02-03");
        assert_eq!(format_field(&e, &spec("unknown", Date)), "Data Unknown");
        assert_eq!(format_field(&e, &spec("junk", Date)), "sometime");
        assert_eq!(format_field(&e, &spec("missing", Date)), "N/A");
    }

    #[test]
    fn test_years_and_units() {
        let e = entry(json!({
            "age": 64,
            "rate": 125,
            "rate_unit": "mL/hr",
            "disp": "30"
        }));
        assert_eq!(format_field(&e, &spec("age", Years)), "64 years");
        assert_eq!(format_field(&e, &spec("rate", WithUnit("rate_unit"))), "125 mL/hr");
        assert_eq!(format_field(&e, &spec("disp", WithUnit("unit"))), "30");
        assert_eq!(format_field(&e, &spec("none", WithUnit("unit"))), "N/A");
    }

    #[test]
    fn test_note_text_strips_disclaimer() {
        let body = format!("{} Patient stable overnight.", PHI_DISCLAIMER);
        let e = entry(json!({"text": body, "only": PHI_DISCLAIMER}));
        assert_eq!(format_field(&e, &spec("text", NoteText)), "Patient stable overnight.");
        assert_eq!(format_field(&e, &spec("only", NoteText)), "N/A");
    }

    #[test]
    fn test_after_delimiter() {
        let e = entry(json!({
            "smoking_hx": "3-Never Smoker",
            "alcohol_use": "1;Yes;daily",
            "flat": "Unknown"
        }));
        assert_eq!(format_field(&e, &spec("smoking_hx", AfterDelimiter('-'))), "Never Smoker");
        assert_eq!(format_field(&e, &spec("alcohol_use", AfterDelimiter(';'))), "Yes");
        assert_eq!(format_field(&e, &spec("flat", AfterDelimiter('-'))), "N/A");
    }

    #[test]
    fn test_every_category_has_fields() {
        for category in Category::ALL {
            assert!(!fields_for(category).is_empty());
        }
    }
}
