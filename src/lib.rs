//! Class schedule HTTP API.
//!
//! Serves numerator/denominator week schedules from static JSON files and
//! the merged, sorted list of class groups found in them.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod schedule;
pub mod server;
