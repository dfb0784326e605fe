pub mod appointments;
pub mod auth;
pub mod backups;
pub mod catalog;
pub mod coupons;
pub mod customers;
pub mod dashboard;
pub mod inventory;
pub mod loyalty;
pub mod marketing;
pub mod preferences;
pub mod staff;

use chrono::NaiveDate;

/// The salon's calendar day, in the server's local time zone.
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
