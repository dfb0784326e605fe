// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

pub fn create_router(app_state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/auth/login", post(handlers::auth::login));

    // Every route below needs a session; admin-only handlers also take `AdminOnly`.
    let session_routes = Router::new()
        .route("/session", get(handlers::auth::get_session))
        .route(
            "/session/preferences",
            get(handlers::preferences::get_preferences).put(handlers::preferences::update_preferences),
        )
        .route("/auth/users", post(handlers::auth::create_user))
        // Customers
        .route(
            "/customers",
            get(handlers::customers::list_customers).post(handlers::customers::create_customer),
        )
        .route("/customers/duplicates", get(handlers::customers::list_duplicates))
        .route(
            "/customers/{id}",
            get(handlers::customers::get_customer)
                .put(handlers::customers::update_customer)
                .delete(handlers::customers::delete_customer),
        )
        // Appointments
        .route(
            "/appointments",
            get(handlers::appointments::list_appointments).post(handlers::appointments::create_appointment),
        )
        .route(
            "/appointments/{id}",
            put(handlers::appointments::update_appointment).delete(handlers::appointments::delete_appointment),
        )
        .route("/appointments/{id}/status", post(handlers::appointments::change_status))
        // Services, staff, inventory
        .route(
            "/services",
            get(handlers::catalog::list_services).post(handlers::catalog::create_service),
        )
        .route(
            "/services/{id}",
            put(handlers::catalog::update_service).delete(handlers::catalog::delete_service),
        )
        .route("/staff", get(handlers::staff::list_staff).post(handlers::staff::create_staff))
        .route(
            "/staff/{id}",
            put(handlers::staff::update_staff).delete(handlers::staff::delete_staff),
        )
        .route(
            "/inventory",
            get(handlers::inventory::list_items).post(handlers::inventory::create_item),
        )
        .route("/inventory/low-stock", get(handlers::inventory::list_low_stock))
        .route(
            "/inventory/{id}",
            put(handlers::inventory::update_item).delete(handlers::inventory::delete_item),
        )
        // Loyalty
        .route("/loyalty/stats", get(handlers::loyalty::get_stats))
        .route("/loyalty/tiers", get(handlers::loyalty::list_tiers))
        .route("/loyalty/customers/{id}/points", post(handlers::loyalty::adjust_points))
        .route(
            "/loyalty/customers/{id}/recalculate-tier",
            post(handlers::loyalty::recalculate_tier),
        )
        // Marketing
        .route(
            "/marketing/campaigns",
            get(handlers::marketing::list_campaigns).post(handlers::marketing::create_campaign),
        )
        .route("/marketing/campaigns/{id}", delete(handlers::marketing::delete_campaign))
        .route("/marketing/campaigns/{id}/send", post(handlers::marketing::send_campaign))
        .route(
            "/marketing/campaigns/{id}/responses",
            post(handlers::marketing::record_responses),
        )
        .route("/marketing/stats", get(handlers::marketing::get_stats))
        .route("/marketing/audience/{segment}", get(handlers::marketing::get_audience))
        // Coupons
        .route(
            "/coupons",
            get(handlers::coupons::list_coupons).post(handlers::coupons::create_coupon),
        )
        .route("/coupons/validate", post(handlers::coupons::validate_coupon))
        .route("/coupons/{id}", delete(handlers::coupons::delete_coupon))
        // Backups
        .route(
            "/backups",
            get(handlers::backups::list_backups).post(handlers::backups::create_backup),
        )
        .route("/backups/import", post(handlers::backups::import_backup))
        .route("/backups/{id}", delete(handlers::backups::delete_backup))
        .route("/backups/{id}/export", get(handlers::backups::export_backup))
        // Dashboard
        .route("/dashboard/summary", get(handlers::dashboard::get_summary))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", public_routes.merge(session_routes))
        .with_state(app_state)
}
