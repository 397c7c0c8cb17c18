//! Screen renderers.
//!
//! Each screen composes the shared dropdown menu with projected record
//! sections into a read-only [`ScreenView`]. Front ends only lay the view out.

mod fields;

pub use fields::*;

use thiserror::Error;

use crate::models::{Category, Entry, PatientId, PatientRecord};
use crate::navigation::{dropdown_menu, MenuEntry, Route};
use crate::projector::project;

/// Screen rendering errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScreenError {
    #[error("Patient {0} has no demographics entry")]
    MissingDemographics(PatientId),

    #[error("Screen {0} has no patient view")]
    NotAPatientScreen(Route),
}

pub type ScreenResult<T> = Result<T, ScreenError>;

/// A labelled value on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

/// One rendered entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub fields: Vec<Field>,
}

impl Card {
    /// Render an entry with a category's field table.
    pub fn from_entry(entry: &Entry, category: Category) -> Self {
        Self {
            fields: fields_for(category)
                .iter()
                .map(|spec| Field {
                    label: spec.label,
                    value: format_field(entry, spec),
                })
                .collect(),
        }
    }

    /// Value of the field with `label`.
    pub fn value(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }
}

/// A titled group of cards, or the category's "no data" message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: &'static str,
    pub category: Category,
    pub cards: Vec<Card>,
    pub empty_message: Option<&'static str>,
}

impl Section {
    /// Project a category and render its cards.
    pub fn project(record: &PatientRecord, category: Category, heading: &'static str) -> Self {
        let cards: Vec<Card> = project(record, category)
            .into_iter()
            .map(|entry| Card::from_entry(entry, category))
            .collect();
        let empty_message = cards.is_empty().then(|| category.empty_message());
        Self {
            heading,
            category,
            cards,
            empty_message,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Everything a front end needs to draw one screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenView {
    pub route: Route,
    pub title: &'static str,
    pub menu: Vec<MenuEntry>,
    pub sections: Vec<Section>,
}

const PATIENT_DATA: &[(Category, &str)] = &[(Category::Demographics, "Patient Information")];

const PATIENT_NOTES: &[(Category, &str)] = &[
    (Category::ClinicalNote, "Clinical Notes"),
    (Category::PathologyReport, "Pathology Reports"),
    (Category::RadiologyReport, "Radiology Reports"),
];

const DIAGNOSES: &[(Category, &str)] = &[(Category::Diagnoses, "Diagnosis Notes")];

const ORDERS: &[(Category, &str)] = &[
    (Category::MedAdmin, "Medical Admin Notes"),
    (Category::MedOrders, "Medical Order Reports"),
    (Category::OrdersAndOrdersets, "Orders and Ordersets"),
];

const IMMUNIZATIONS: &[(Category, &str)] = &[(Category::Immunization, "Immunizations")];

const LABS: &[(Category, &str)] = &[(Category::Labs, "Lab Reports")];

/// Title and sections of each patient screen.
fn layout(route: Route) -> Option<(&'static str, &'static [(Category, &'static str)])> {
    match route {
        Route::Login => None,
        Route::PatientData => Some(("Patient Information", PATIENT_DATA)),
        Route::PatientNotes => Some(("Patient Notes", PATIENT_NOTES)),
        Route::Diagnoses => Some(("Diagnoses", DIAGNOSES)),
        Route::Orders => Some(("Orders", ORDERS)),
        Route::Immunizations => Some(("Immunizations", IMMUNIZATIONS)),
        Route::Labs => Some(("Labs", LABS)),
    }
}

/// Render a patient screen.
///
/// The patient-data screen requires a demographics entry; the category
/// screens never fail on missing data.
pub fn render(route: Route, patient_id: &PatientId, record: &PatientRecord) -> ScreenResult<ScreenView> {
    let (title, sections) = layout(route).ok_or(ScreenError::NotAPatientScreen(route))?;

    if route == Route::PatientData && record.demographics().is_none() {
        return Err(ScreenError::MissingDemographics(patient_id.clone()));
    }

    Ok(ScreenView {
        route,
        title,
        menu: dropdown_menu(record),
        sections: sections
            .iter()
            .map(|&(category, heading)| Section::project(record, category, heading))
            .collect(),
    })
}
