pub mod appointment_service;
pub use appointment_service::AppointmentService;
pub mod auth;
pub use auth::AuthService;
pub mod backup_service;
pub use backup_service::BackupService;
pub mod catalog_service;
pub use catalog_service::CatalogService;
pub mod coupon_service;
pub use coupon_service::CouponService;
pub mod customer_service;
pub use customer_service::CustomerService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
pub mod inventory_service;
pub use inventory_service::InventoryService;
pub mod loyalty_service;
pub use loyalty_service::LoyaltyService;
pub mod marketing_service;
pub use marketing_service::MarketingService;
pub mod staff_service;
pub use staff_service::StaffService;
