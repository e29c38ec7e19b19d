//! Business logic services for the AgriGIS Farm Management Platform

pub mod auth;
pub mod calamity;
pub mod crop;
pub mod farmer;
pub mod lookup;
pub mod reporting;

pub use auth::AuthService;
pub use calamity::CalamityService;
pub use crop::CropService;
pub use farmer::FarmerService;
pub use lookup::LookupService;
pub use reporting::ReportingService;
