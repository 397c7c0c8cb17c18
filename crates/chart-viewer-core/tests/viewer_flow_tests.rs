//! End-to-end viewer flow and projection property tests.

use chart_viewer_core::models::{Category, PatientRecord, RecordStore};
use chart_viewer_core::navigation::{MenuAction, Navigator, Route};
use chart_viewer_core::projector::project;
use chart_viewer_core::screens::render;
use proptest::prelude::*;
use serde_json::{json, Value};

const DATASET: &str = r#"{
    "P100": {
        "demographics": [{
            "patient_id": "P100",
            "legal_sex": "Male",
            "date_of_birth": "1961-02-03",
            "smoking_hx": "2-Never",
            "alcohol_use": "1;Yes"
        }],
        "labs": [
            {"patient_id": "P100", "result_date": "2020-01-05", "lab": "A1C", "value": 6.1},
            {"patient_id": "P100", "result_date": "2020-01-03", "lab": "LDL", "value": 120},
            {"patient_id": "P100", "result_date": "2020-01-01", "lab": "HDL", "value": 50},
            {"patient_id": "P100", "result_date": "2020-01-04", "lab": "TSH", "value": 2.2},
            {"patient_id": "P100", "result_date": "2020-01-02", "lab": "K", "value": 4.1}
        ],
        "clinical_note": [
            {"patient_id": "P100", "date": "2019-03-01", "age": 58, "type": "Progress", "text": "a"},
            {"patient_id": "P100", "date": "2019-05-01", "age": 58, "type": "Progress", "text": "b"},
            {"patient_id": "P100", "date": "2019-04-01", "age": 58, "type": "Progress", "text": "c"},
            {"patient_id": "P100", "date": "2019-06-01", "age": 58, "type": "Progress", "text": "d"}
        ],
        "med_admin": []
    },
    "P200": {
        "diagnoses": [{"patient_id": "P200", "date": "2018-01-01", "description": "Flu"}]
    }
}"#;

#[test]
fn test_login_menu_and_screens() {
    let store = RecordStore::from_json_str(DATASET).unwrap();
    let mut nav = Navigator::new(&store);

    let id = nav.login("P100").unwrap();
    assert_eq!(nav.current(), Route::PatientData);

    let menu = nav.menu();
    let labels: Vec<_> = menu.iter().map(|e| e.label).collect();
    assert_eq!(labels, vec!["Home", "Labs", "Patient Notes", "Logout"]);

    let labs = menu.iter().find(|e| e.label == "Labs").copied().unwrap();
    assert_eq!(nav.select(labs), Route::Labs);

    let (_, record) = nav.patient().unwrap();
    let view = render(nav.current(), &id, record).unwrap();
    let values: Vec<_> = view.sections[0]
        .cards
        .iter()
        .map(|c| c.value("Lab Test").unwrap().to_string())
        .collect();
    // Oldest-to-newest among all five.
    assert_eq!(values, vec!["HDL", "K", "LDL", "TSH", "A1C"]);

    let notes = render(Route::PatientNotes, &id, record).unwrap();
    let texts: Vec<_> = notes.sections[0]
        .cards
        .iter()
        .map(|c| c.value("Text").unwrap().to_string())
        .collect();
    assert_eq!(texts, vec!["d", "b", "c"]);

    let logout = *menu.last().unwrap();
    assert_eq!(logout.action, MenuAction::Logout);
    assert_eq!(nav.select(logout), Route::Login);
    assert!(nav.patient().is_none());
}

#[test]
fn test_patient_without_demographics() {
    let store = RecordStore::from_json_str(DATASET).unwrap();
    let mut nav = Navigator::new(&store);
    let id = nav.login("P200").unwrap();

    let (_, record) = nav.patient().unwrap();
    assert!(render(Route::PatientData, &id, record).is_err());

    let diagnoses = render(Route::Diagnoses, &id, record).unwrap();
    assert_eq!(diagnoses.sections[0].cards.len(), 1);

    // Switching patients replaces the selection.
    nav.login("P100").unwrap();
    assert_eq!(nav.session().patient_id().unwrap().as_str(), "P100");
}

#[test]
fn test_deep_link_guard() {
    let store = RecordStore::from_json_str(DATASET).unwrap();
    let mut nav = Navigator::new(&store);

    assert_eq!(nav.navigate_path("/labs", None).unwrap(), Route::Login);
    assert!(nav.navigate_path("/nowhere", None).is_err());
}

fn record_from_days(category: Category, days: &[u32]) -> PatientRecord {
    let entries: Vec<Value> = days
        .iter()
        .enumerate()
        .map(|(i, d)| json!({ "seq": i, "date": format!("2023-03-{:02}", d) }))
        .collect();
    PatientRecord::from_value(json!({ category.key(): entries })).unwrap()
}

fn category_strategy() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

proptest! {
    #[test]
    fn projection_respects_limit(
        category in category_strategy(),
        days in prop::collection::vec(1u32..29, 0..25),
    ) {
        let record = record_from_days(category, &days);
        let shown = project(&record, category);
        prop_assert_eq!(shown.len(), days.len().min(category.display_limit()));
    }

    #[test]
    fn projection_leaves_record_unchanged(
        category in category_strategy(),
        days in prop::collection::vec(1u32..29, 0..25),
    ) {
        let record = record_from_days(category, &days);
        let before = record.clone();
        let _ = project(&record, category);
        prop_assert_eq!(record, before);
    }

    #[test]
    fn projection_is_ordered(days in prop::collection::vec(1u32..29, 1..25)) {
        let record = record_from_days(Category::Diagnoses, &days);
        let shown: Vec<String> = project(&record, Category::Diagnoses)
            .iter()
            .map(|e| e["date"].as_str().unwrap().to_string())
            .collect();
        let mut sorted = shown.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        prop_assert_eq!(shown, sorted);
    }
}
