//! TraceLens server
//!
//! Per-user analytics over traces, observations and scores stored per project.

pub mod api;
mod app;
pub mod core;
pub mod data;
pub mod domain;
pub mod utils;
