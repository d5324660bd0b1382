//! Data models for the hostel accommodation backend.
//!
//! Field names serialize as camelCase to match the web frontend.

mod application;
mod hostel;
mod room;
mod stats;

pub use application::*;
pub use hostel::*;
pub use room::*;
pub use stats::*;
