//! Request handler module
//!
//! Routes requests to the schedule, group list, health and docs handlers.

mod docs;
pub mod router;
mod schedule;

// Re-export main entry point
pub use router::handle_request;
