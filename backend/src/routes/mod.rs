//! Route definitions for the AgriGIS backend

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes. The state is cloned into the auth layers so token
/// verification uses the configured JWT secret.
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public)
        .nest("/auth", auth_routes())
        // Protected routes - crop record management
        .nest("/crops", crop_routes(state.clone()))
        // Protected routes - calamity incident triage
        .nest("/calamities", calamity_routes(state.clone()))
        // Protected routes - farmer registry
        .nest("/farmers", farmer_routes(state.clone()))
        // Protected routes - lookup tables
        .nest("/lookups", lookup_routes(state.clone()))
        // Protected routes - reporting and export
        .nest("/reports", report_routes(state))
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/refresh", post(handlers::refresh))
}

/// Crop record routes (protected)
fn crop_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_crops).post(handlers::create_crop))
        // Bulk archive lifecycle
        .route("/bulk/archive", post(handlers::bulk_archive_crops))
        .route("/bulk/restore", post(handlers::bulk_restore_crops))
        .route("/bulk/permanent", delete(handlers::bulk_delete_crops_permanent))
        .route(
            "/:crop_id",
            get(handlers::get_crop)
                .put(handlers::update_crop)
                .delete(handlers::archive_crop),
        )
        .route("/:crop_id/harvest", post(handlers::mark_harvested))
        .route("/:crop_id/restore", post(handlers::restore_crop))
        .route("/:crop_id/permanent", delete(handlers::delete_crop_permanent))
        .route("/:crop_id/valuation", get(handlers::get_crop_valuation))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Calamity incident routes (protected)
fn calamity_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_incidents).post(handlers::create_incident))
        .route(
            "/:incident_id",
            get(handlers::get_incident)
                .put(handlers::update_incident)
                .delete(handlers::delete_incident),
        )
        .route("/:incident_id/status", put(handlers::set_incident_status))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Farmer registry routes (protected)
fn farmer_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_farmers).post(handlers::create_farmer))
        .route(
            "/:farmer_id",
            get(handlers::get_farmer)
                .put(handlers::update_farmer)
                .delete(handlers::delete_farmer),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Lookup table routes (protected)
fn lookup_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/crop-types", get(handlers::list_crop_types))
        .route("/crop-types/:crop_type_id/varieties", get(handlers::list_varieties))
        .route("/ecosystems", get(handlers::list_ecosystems))
        .route("/tenures", get(handlers::list_tenures))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Reporting routes (protected)
fn report_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/damage", get(handlers::get_damage_report))
        .route("/crops/export", get(handlers::export_crops_csv))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
