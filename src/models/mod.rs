//! Data models for the studio booking application.
//!
//! Field names serialize as camelCase to match the web client.

mod booking;
mod studio;

pub use booking::*;
pub use studio::*;
