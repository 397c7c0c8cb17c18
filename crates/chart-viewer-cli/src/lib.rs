//! Terminal front end for the patient chart viewer.
//!
//! Reads commands line by line, renders screens as text and runs the
//! assistant chat in the background so navigation never waits on it.

pub mod app;
pub mod commands;
pub mod config;
pub mod view;

pub use app::{App, Flow, Step};
pub use config::Config;
