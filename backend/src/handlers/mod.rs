//! HTTP handlers for the AgriGIS Farm Management Platform

mod auth;
mod calamity;
mod crop;
mod farmer;
mod health;
mod lookup;
mod reporting;

pub use auth::*;
pub use calamity::*;
pub use crop::*;
pub use farmer::*;
pub use health::*;
pub use lookup::*;
pub use reporting::*;
