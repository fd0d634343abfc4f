//! services/api/src/lib.rs
//!
//! The local host shell around `mindmate_core`: configuration, SQLite
//! persistence and the HTTP surface.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;
