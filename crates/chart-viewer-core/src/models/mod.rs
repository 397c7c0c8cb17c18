//! Domain models for the chart viewer.

mod category;
mod chat;
mod patient;
mod record;

pub use category::*;
pub use chat::*;
pub use patient::*;
pub use record::*;
