//! HTTP surface for the bracket engine.
//!
//! Exposes tournament brackets over a versioned REST API backed by
//! [`bracket_engine::tournament::TournamentManager`].

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;
