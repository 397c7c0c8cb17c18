//! Chart Viewer Core Library
//!
//! Read-only patient chart viewer over a pre-loaded record dataset, plus a
//! small local patient index.
//!
//! # Architecture
//!
//! ```text
//!   patients.json ──► RecordStore
//!                          │
//!        login(id) ──► Navigator ──► Route ──┐
//!                          │                 │
//!                          ▼                 ▼
//!                   dropdown_menu     screens::render
//!                                            │
//!                                  projector::project (sort, cap, order)
//!                                            │
//!                                            ▼
//!                                        ScreenView
//!
//!   question ──► ChatLog ──► (assistant service) ──► ChatLog ──► ChatTranscript
//!                                                          split <think>...</think>
//!
//!   POST/GET /api/patients ──► Database (SQLite, patients table)
//! ```
//!
//! # Modules
//!
//! - [`models`]: Record dataset, categories, chat log, index rows
//! - [`projector`]: Per-category sort, truncation and display order
//! - [`navigation`]: Routes, session scope, login and route guard
//! - [`screens`]: Screen composition and field formatting
//! - [`chat`]: Reasoning split, per-message toggles, emphasis rendering
//! - [`db`]: SQLite local patient index

pub mod chat;
pub mod db;
pub mod models;
pub mod navigation;
pub mod projector;
pub mod screens;

// Re-export commonly used types
pub use chat::{split_reasoning, ChatTranscript, MessageView, ParsedMessage};
pub use db::{Database, DbError, DbResult};
pub use models::{
    Category, ChatLog, ChatMessage, Entry, IndexedPatient, NewPatient, PatientId, PatientRecord,
    RecordError, RecordStore, Role,
};
pub use navigation::{LoginError, MenuAction, MenuEntry, Navigator, Route};
pub use projector::project;
pub use screens::{render, Card, ScreenError, ScreenView, Section};
