//! Chat bridge to the patient question-answering service.
//!
//! The service is an external HTTP process. This crate provides the reqwest
//! client for it, the [`AnswerBackend`] seam the chat panel talks through,
//! and the screen-scoped [`ChatBridge`] that owns the message log.

pub mod bridge;
pub mod client;
pub mod mock;
pub mod modes;

pub use bridge::*;
pub use client::*;
pub use mock::MockBackend;
pub use modes::*;
