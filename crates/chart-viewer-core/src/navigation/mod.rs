//! Navigation controller.
//!
//! Holds the session scope, resolves logins, and guards protected routes.
//! A protected route entered without a valid patient falls back to login
//! silently; that is a redirect, not an error.

mod routes;
mod session;

pub use routes::*;
pub use session::*;

use thiserror::Error;
use tracing::{debug, info};

use crate::models::{PatientId, PatientRecord, RecordStore};

/// Navigation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Unknown path: {0}")]
    UnknownPath(String),
}

/// Current screen plus the session that owns the selected patient.
pub struct Navigator<'a> {
    store: &'a RecordStore,
    session: Session,
    current: Route,
}

impl<'a> Navigator<'a> {
    /// Start on the login screen with nothing selected.
    pub fn new(store: &'a RecordStore) -> Self {
        Self {
            store,
            session: Session::new(),
            current: Route::Login,
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Record of the selected patient.
    pub fn patient(&self) -> Option<(&PatientId, &'a PatientRecord)> {
        let id = self.session.patient_id()?;
        self.store.get(id.as_str()).map(|record| (id, record))
    }

    /// Resolve an identifier and enter the patient-data screen.
    ///
    /// On failure the session is left exactly as it was.
    pub fn login(&mut self, candidate: &str) -> Result<PatientId, LoginError> {
        let patient_id = resolve(self.store, candidate)?;
        info!(
            session = %self.session.session_id(),
            patient_id = %patient_id,
            "Patient selected"
        );
        self.navigate(Route::PatientData, Some(patient_id.clone()));
        Ok(patient_id)
    }

    /// Move to `route`, carrying `patient_id` forward.
    ///
    /// Returns the route actually entered: protected routes without a known
    /// patient land on login and clear the session.
    pub fn navigate(&mut self, route: Route, patient_id: Option<PatientId>) -> Route {
        if !route.requires_patient() {
            self.session.clear();
            self.current = Route::Login;
            return self.current;
        }

        match patient_id {
            Some(id) if self.store.contains(id.as_str()) => {
                self.session.select(id);
                self.current = route;
            }
            _ => {
                debug!(route = %route, "No patient selected, redirecting to login");
                self.session.clear();
                self.current = Route::Login;
            }
        }
        self.current
    }

    /// Like [`navigate`](Self::navigate) but from a path string.
    pub fn navigate_path(
        &mut self,
        path: &str,
        patient_id: Option<PatientId>,
    ) -> Result<Route, NavigationError> {
        let route =
            Route::from_path(path).ok_or_else(|| NavigationError::UnknownPath(path.to_string()))?;
        Ok(self.navigate(route, patient_id))
    }

    /// Follow a menu item, carrying the current patient.
    pub fn select(&mut self, entry: MenuEntry) -> Route {
        match entry.action {
            MenuAction::Go(route) => {
                let patient_id = self.session.patient_id().cloned();
                self.navigate(route, patient_id)
            }
            MenuAction::Logout => {
                self.logout();
                self.current
            }
        }
    }

    /// Menu for the selected patient; empty when nobody is selected.
    pub fn menu(&self) -> Vec<MenuEntry> {
        self.patient()
            .map(|(_, record)| dropdown_menu(record))
            .unwrap_or_default()
    }

    /// Clear the selection and return to login.
    pub fn logout(&mut self) {
        if let Some(id) = self.session.patient_id() {
            info!(session = %self.session.session_id(), patient_id = %id, "Logged out");
        }
        self.session.clear();
        self.current = Route::Login;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = r#"{
        "P1": {
            "demographics": [{"patient_id": "P1"}],
            "labs": [],
            "diagnoses": []
        }
    }"#;

    #[test]
    fn test_starts_on_login() {
        let store = RecordStore::from_json_str(DATASET).unwrap();
        let nav = Navigator::new(&store);
        assert_eq!(nav.current(), Route::Login);
        assert!(nav.menu().is_empty());
    }

    #[test]
    fn test_login_enters_patient_data() {
        let store = RecordStore::from_json_str(DATASET).unwrap();
        let mut nav = Navigator::new(&store);

        let id = nav.login("P1").unwrap();
        assert_eq!(id.as_str(), "P1");
        assert_eq!(nav.current(), Route::PatientData);
        assert_eq!(nav.session().patient_id(), Some(&id));
    }

    #[test]
    fn test_invalid_login_leaves_state() {
        let store = RecordStore::from_json_str(DATASET).unwrap();
        let mut nav = Navigator::new(&store);

        assert_eq!(nav.login("P2"), Err(LoginError::InvalidIdentifier));
        assert_eq!(nav.current(), Route::Login);
        assert!(nav.session().patient_id().is_none());
    }

    #[test]
    fn test_guard_redirects_without_patient() {
        let store = RecordStore::from_json_str(DATASET).unwrap();
        let mut nav = Navigator::new(&store);

        for route in Route::ALL.into_iter().filter(|r| r.requires_patient()) {
            assert_eq!(nav.navigate(route, None), Route::Login);
            assert_eq!(
                nav.navigate(route, Some(PatientId::new("ghost"))),
                Route::Login
            );
        }
        assert!(!nav.session().is_active());
    }

    #[test]
    fn test_menu_navigation_carries_patient() {
        let store = RecordStore::from_json_str(DATASET).unwrap();
        let mut nav = Navigator::new(&store);
        nav.login("P1").unwrap();

        let menu = nav.menu();
        let labels: Vec<_> = menu.iter().map(|e| e.label).collect();
        assert_eq!(labels, vec!["Home", "Labs", "Diagnoses", "Logout"]);

        assert_eq!(nav.select(menu[1]), Route::Labs);
        assert_eq!(nav.session().patient_id().unwrap().as_str(), "P1");

        assert_eq!(nav.select(MenuEntry::HOME), Route::PatientData);
        assert_eq!(nav.select(MenuEntry::LOGOUT), Route::Login);
        assert!(nav.session().patient_id().is_none());
    }

    #[test]
    fn test_navigate_path() {
        let store = RecordStore::from_json_str(DATASET).unwrap();
        let mut nav = Navigator::new(&store);

        let to_labs = nav.navigate_path("/labs", Some(PatientId::new("P1")));
        assert_eq!(to_labs, Ok(Route::Labs));

        let unknown = nav.navigate_path("/procedures", Some(PatientId::new("P1")));
        assert_eq!(
            unknown,
            Err(NavigationError::UnknownPath("/procedures".into()))
        );
        // Unknown paths do not move the navigator.
        assert_eq!(nav.current(), Route::Labs);

        assert_eq!(nav.navigate_path("/", None), Ok(Route::Login));
        assert!(!nav.session().is_active());
    }
}
