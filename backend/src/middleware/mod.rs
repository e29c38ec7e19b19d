//! HTTP middleware for the AgriGIS Farm Management Platform

mod auth;

pub use auth::{auth_middleware, require_super_admin, AuthUser, CurrentUser, UserRole};
