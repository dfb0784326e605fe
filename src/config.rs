// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        AppointmentRepository, BackupRepository, CampaignRepository, CatalogRepository,
        CouponRepository, CustomerRepository, InventoryRepository, PgPreferenceStore,
        PreferenceStore, StaffRepository, UserRepository,
    },
    notify::{DisabledNotifier, Notifier, WorkflowNotifier},
    services::{
        AppointmentService, AuthService, BackupService, CatalogService, CouponService,
        CustomerService, DashboardService, InventoryService, LoyaltyService, MarketingService,
        StaffService,
    },
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Settings read from the environment (and `.env`, when present).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub max_connections: u32,
    pub notify: Option<NotifyConfig>,
    pub bootstrap_admin: Option<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct NotifyConfig {
    pub base_url: String,
    pub api_key: String,
    pub workflow: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt_secret = get("JWT_SECRET").context("JWT_SECRET must be set")?;

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse::<u32>()
                .with_context(|| format!("DB_MAX_CONNECTIONS is not a number: {raw}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        // All three or nothing.
        let notify = match (get("NOTIFY_BASE_URL"), get("NOTIFY_API_KEY"), get("NOTIFY_WORKFLOW")) {
            (Some(base_url), Some(api_key), Some(workflow)) => Some(NotifyConfig {
                base_url,
                api_key,
                workflow,
            }),
            (None, None, None) => None,
            _ => anyhow::bail!("NOTIFY_BASE_URL, NOTIFY_API_KEY and NOTIFY_WORKFLOW must be set together"),
        };

        let bootstrap_admin = get("BOOTSTRAP_ADMIN_EMAIL").zip(get("BOOTSTRAP_ADMIN_PASSWORD"));

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr,
            max_connections,
            notify,
            bootstrap_admin,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub customer_service: CustomerService,
    pub appointment_service: AppointmentService,
    pub catalog_service: CatalogService,
    pub staff_service: StaffService,
    pub inventory_service: InventoryService,
    pub loyalty_service: LoyaltyService,
    pub marketing_service: MarketingService,
    pub coupon_service: CouponService,
    pub backup_service: BackupService,
    pub dashboard_service: DashboardService,
    pub preferences: Arc<dyn PreferenceStore>,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Failed to connect to the database")?;

        tracing::info!("Database connection established");

        let notifier: Arc<dyn Notifier> = match &config.notify {
            Some(n) => Arc::new(WorkflowNotifier::new(&n.base_url, &n.api_key, &n.workflow)?),
            None => {
                tracing::warn!("Notifications are not configured; campaign sends will fail");
                Arc::new(DisabledNotifier)
            }
        };

        Ok(Self::build(db_pool, config.jwt_secret.clone(), notifier))
    }

    /// Wires the dependency graph around an existing pool.
    pub fn build(db_pool: PgPool, jwt_secret: String, notifier: Arc<dyn Notifier>) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let customer_repo = CustomerRepository::new(db_pool.clone());
        let appointment_repo = AppointmentRepository::new(db_pool.clone());
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let staff_repo = StaffRepository::new(db_pool.clone());
        let inventory_repo = InventoryRepository::new(db_pool.clone());
        let campaign_repo = CampaignRepository::new(db_pool.clone());
        let coupon_repo = CouponRepository::new(db_pool.clone());
        let backup_repo = BackupRepository::new(db_pool.clone());

        Self {
            auth_service: AuthService::new(user_repo, jwt_secret),
            customer_service: CustomerService::new(customer_repo.clone(), db_pool.clone()),
            appointment_service: AppointmentService::new(
                appointment_repo.clone(),
                customer_repo.clone(),
                db_pool.clone(),
            ),
            catalog_service: CatalogService::new(catalog_repo),
            staff_service: StaffService::new(staff_repo.clone()),
            inventory_service: InventoryService::new(inventory_repo.clone()),
            loyalty_service: LoyaltyService::new(customer_repo.clone(), db_pool.clone()),
            marketing_service: MarketingService::new(
                campaign_repo,
                customer_repo.clone(),
                appointment_repo.clone(),
                notifier,
                db_pool.clone(),
            ),
            coupon_service: CouponService::new(coupon_repo),
            backup_service: BackupService::new(backup_repo, db_pool.clone()),
            dashboard_service: DashboardService::new(
                customer_repo,
                appointment_repo,
                inventory_repo,
                staff_repo,
            ),
            preferences: Arc::new(PgPreferenceStore::new(db_pool.clone())),
            db_pool,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_required_vars_are_set() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/salon"),
            ("JWT_SECRET", "s3cret"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert!(config.notify.is_none());
        assert!(config.bootstrap_admin.is_none());
    }

    #[test]
    fn missing_jwt_secret_is_an_error() {
        let err = Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/salon")]))
            .unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn partial_notification_settings_are_rejected() {
        let result = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/salon"),
            ("JWT_SECRET", "s3cret"),
            ("NOTIFY_BASE_URL", "https://notify.example.com"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn full_notification_settings_are_read() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/salon"),
            ("JWT_SECRET", "s3cret"),
            ("NOTIFY_BASE_URL", "https://notify.example.com"),
            ("NOTIFY_API_KEY", "key"),
            ("NOTIFY_WORKFLOW", "salon-campaign"),
        ]))
        .unwrap();
        assert_eq!(config.notify.unwrap().workflow, "salon-campaign");
    }
}
