//! Shared types and domain logic for the AgriGIS Farm Management Platform
//!
//! This crate contains types and pure calculations shared between the
//! backend, frontend (via WASM), and other components of the system.

pub mod maturity;
pub mod models;
pub mod types;
pub mod validation;
pub mod valuation;

pub use maturity::*;
pub use models::*;
pub use types::*;
pub use validation::*;
pub use valuation::*;
