pub mod appointment_repo;
pub use appointment_repo::AppointmentRepository;
pub mod backup_repo;
pub use backup_repo::BackupRepository;
pub mod campaign_repo;
pub use campaign_repo::CampaignRepository;
pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod coupon_repo;
pub use coupon_repo::CouponRepository;
pub mod customer_repo;
pub use customer_repo::CustomerRepository;
pub mod inventory_repo;
pub use inventory_repo::InventoryRepository;
pub mod preference_repo;
pub use preference_repo::{InMemoryPreferenceStore, PgPreferenceStore, PreferenceStore};
pub mod staff_repo;
pub use staff_repo::StaffRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
