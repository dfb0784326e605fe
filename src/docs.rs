// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth / Session ---
        handlers::auth::login,
        handlers::auth::create_user,
        handlers::auth::get_session,
        handlers::preferences::get_preferences,
        handlers::preferences::update_preferences,

        // --- Customers ---
        handlers::customers::list_customers,
        handlers::customers::create_customer,
        handlers::customers::get_customer,
        handlers::customers::update_customer,
        handlers::customers::delete_customer,
        handlers::customers::list_duplicates,

        // --- Appointments ---
        handlers::appointments::list_appointments,
        handlers::appointments::create_appointment,
        handlers::appointments::update_appointment,
        handlers::appointments::delete_appointment,
        handlers::appointments::change_status,

        // --- Services / Staff / Inventory ---
        handlers::catalog::list_services,
        handlers::catalog::create_service,
        handlers::catalog::update_service,
        handlers::catalog::delete_service,
        handlers::staff::list_staff,
        handlers::staff::create_staff,
        handlers::staff::update_staff,
        handlers::staff::delete_staff,
        handlers::inventory::list_items,
        handlers::inventory::list_low_stock,
        handlers::inventory::create_item,
        handlers::inventory::update_item,
        handlers::inventory::delete_item,

        // --- Loyalty ---
        handlers::loyalty::get_stats,
        handlers::loyalty::list_tiers,
        handlers::loyalty::adjust_points,
        handlers::loyalty::recalculate_tier,

        // --- Marketing ---
        handlers::marketing::list_campaigns,
        handlers::marketing::create_campaign,
        handlers::marketing::delete_campaign,
        handlers::marketing::get_stats,
        handlers::marketing::get_audience,
        handlers::marketing::send_campaign,
        handlers::marketing::record_responses,

        // --- Coupons ---
        handlers::coupons::list_coupons,
        handlers::coupons::create_coupon,
        handlers::coupons::delete_coupon,
        handlers::coupons::validate_coupon,

        // --- Backups ---
        handlers::backups::list_backups,
        handlers::backups::create_backup,
        handlers::backups::export_backup,
        handlers::backups::import_backup,
        handlers::backups::delete_backup,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::LoginUserPayload,
            models::auth::CreateUserPayload,
            models::auth::AuthResponse,
            models::auth::Session,
            models::auth::AdminSession,
            models::auth::StaffSession,
            models::preferences::UiPreferences,
            models::preferences::UpdatePreferencesPayload,

            // --- Customers / Appointments ---
            models::customer::Tier,
            models::customer::RecordStatus,
            models::customer::Customer,
            models::customer::CustomerPayload,
            models::customer::DuplicateGroup,
            models::appointment::AppointmentStatus,
            models::appointment::Appointment,
            models::appointment::AppointmentPayload,
            models::appointment::UpdateAppointmentStatusPayload,

            // --- Catalog ---
            models::catalog::SalonService,
            models::catalog::ServicePayload,
            models::staff::Staff,
            models::staff::StaffPayload,
            models::inventory::InventoryItem,
            models::inventory::InventoryItemPayload,

            // --- Loyalty ---
            models::loyalty::TierCounts,
            models::loyalty::LoyaltyStats,
            models::loyalty::TierBenefit,
            models::loyalty::AdjustPointsPayload,

            // --- Marketing ---
            models::marketing::Channel,
            models::marketing::Audience,
            models::marketing::CampaignStatus,
            models::marketing::Campaign,
            models::marketing::CampaignResponse,
            models::marketing::CreateCampaignPayload,
            models::marketing::RecordResponsesPayload,
            models::marketing::CampaignStats,
            models::marketing::SendReport,

            // --- Coupons / Backups ---
            models::coupon::DiscountKind,
            models::coupon::Coupon,
            models::coupon::CouponPayload,
            models::coupon::ValidateCouponPayload,
            models::coupon::CouponQuote,
            models::backup::BackupSummary,
            models::backup::CreateBackupPayload,
            models::backup::BackupDocument,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,
        )
    ),
    tags(
        (name = "Auth", description = "Login and account management"),
        (name = "Session", description = "Per-user dashboard state"),
        (name = "Customers", description = "Customer records and duplicate phones"),
        (name = "Appointments", description = "Bookings and their status"),
        (name = "Services", description = "Service menu"),
        (name = "Staff", description = "Stylists and therapists"),
        (name = "Inventory", description = "Products and stock levels"),
        (name = "Loyalty", description = "Tiers and points"),
        (name = "Marketing", description = "Campaigns, audiences and delivery"),
        (name = "Coupons", description = "Discount codes"),
        (name = "Backups", description = "Data snapshots, export and import"),
        (name = "Dashboard", description = "Admin indicators")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
