//! AgriScout Core - Domain models, ports, and configuration
//!
//! This crate contains the field domain model (coordinates, rings, lands,
//! partitions, onboarding phases) and the port definitions shared by the
//! other AgriScout crates.

pub mod config;
pub mod error;
pub mod models;
pub mod ports;

pub use error::{AgriError, Result};
