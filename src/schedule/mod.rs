//! Schedule module
//!
//! Loads week-parity schedule documents from disk and derives the set of
//! class groups they describe. Documents are re-read on every call.

mod error;
mod groups;
mod loader;
mod parity;

pub use error::ScheduleError;
pub use groups::merge_group_names;
pub use loader::ScheduleStore;
pub use parity::WeekParity;
