//! Screen routes and the shared dropdown menu.

use serde::{Deserialize, Serialize};

use crate::models::{Category, PatientRecord};

/// A screen of the viewer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    PatientData,
    PatientNotes,
    Diagnoses,
    Orders,
    Immunizations,
    Labs,
}

impl Route {
    pub const ALL: [Route; 7] = [
        Route::Login,
        Route::PatientData,
        Route::PatientNotes,
        Route::Diagnoses,
        Route::Orders,
        Route::Immunizations,
        Route::Labs,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::PatientData => "/patient-data",
            Route::PatientNotes => "/patient-notes",
            Route::Diagnoses => "/diagnoses",
            Route::Orders => "/orders",
            Route::Immunizations => "/immunizations",
            Route::Labs => "/labs",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.path() == path)
    }

    /// Every screen except login needs a selected patient.
    pub fn requires_patient(self) -> bool {
        self != Route::Login
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// An item of the dropdown menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: &'static str,
    pub action: MenuAction,
}

/// What selecting a menu item does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Go(Route),
    Logout,
}

impl MenuEntry {
    const fn go(label: &'static str, route: Route) -> Self {
        Self {
            label,
            action: MenuAction::Go(route),
        }
    }

    pub const HOME: MenuEntry = MenuEntry::go("Home", Route::PatientData);
    pub const LOGOUT: MenuEntry = MenuEntry {
        label: "Logout",
        action: MenuAction::Logout,
    };
}

/// Category → menu entry. Categories without a dedicated screen are absent.
const CATEGORY_MENU: &[(Category, MenuEntry)] = &[
    (Category::ClinicalNote, MenuEntry::go("Patient Notes", Route::PatientNotes)),
    (Category::Diagnoses, MenuEntry::go("Diagnoses", Route::Diagnoses)),
    (Category::Immunization, MenuEntry::go("Immunizations", Route::Immunizations)),
    (Category::Labs, MenuEntry::go("Labs", Route::Labs)),
    (Category::OrdersAndOrdersets, MenuEntry::go("Orders", Route::Orders)),
];

/// Menu entry for a category, if it has its own screen.
pub fn category_entry(category: Category) -> Option<MenuEntry> {
    CATEGORY_MENU
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, entry)| *entry)
}

/// Category entries for the keys present in `record`, in the record's key order.
pub fn menu_entries_for(record: &PatientRecord) -> Vec<MenuEntry> {
    record
        .keys()
        .filter_map(Category::from_key)
        .filter_map(category_entry)
        .collect()
}

/// Full dropdown: Home, the record's category entries, then Logout.
pub fn dropdown_menu(record: &PatientRecord) -> Vec<MenuEntry> {
    let mut menu = vec![MenuEntry::HOME];
    menu.extend(menu_entries_for(record));
    menu.push(MenuEntry::LOGOUT);
    menu
}
