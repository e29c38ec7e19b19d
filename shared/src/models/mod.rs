//! Domain models for the AgriGIS Farm Management Platform

mod calamity;
mod crop;
mod farmer;
mod lookup;

pub use calamity::*;
pub use crop::*;
pub use farmer::*;
pub use lookup::*;
