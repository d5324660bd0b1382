//! Hostel inventory model.
//!
//! The catalog is static; rooms are enumerated from it with randomized
//! occupancy and filtered by availability. Nothing in here touches I/O, the
//! persisted snapshot lives in [`crate::db`].

mod availability;
mod catalog;
mod generate;
mod summary;

pub use availability::*;
pub use catalog::*;
pub use generate::*;
pub use summary::*;
