// src/services/dashboard_service.rs

use chrono::NaiveDate;

use crate::{
    analytics::{CampaignStatsAggregator, CustomerAggregator, LoyaltyTierCalculator},
    common::error::AppError,
    db::{AppointmentRepository, CustomerRepository, InventoryRepository, StaffRepository},
    models::{
        appointment::{Appointment, AppointmentStatus},
        customer::{Customer, RecordStatus},
        dashboard::DashboardSummary,
        inventory::InventoryItem,
        staff::Staff,
    },
};

const UPCOMING_LIMIT: usize = 10;

#[derive(Clone)]
pub struct DashboardService {
    customer_repo: CustomerRepository,
    appointment_repo: AppointmentRepository,
    inventory_repo: InventoryRepository,
    staff_repo: StaffRepository,
}

impl DashboardService {
    pub fn new(
        customer_repo: CustomerRepository,
        appointment_repo: AppointmentRepository,
        inventory_repo: InventoryRepository,
        staff_repo: StaffRepository,
    ) -> Self {
        Self {
            customer_repo,
            appointment_repo,
            inventory_repo,
            staff_repo,
        }
    }

    pub async fn get_summary(&self, today: NaiveDate) -> Result<DashboardSummary, AppError> {
        let (customers, appointments, items, staff) = tokio::try_join!(
            self.customer_repo.list_all(),
            self.appointment_repo.list_all(),
            self.inventory_repo.list(),
            self.staff_repo.list(),
        )?;
        Ok(summarize(&customers, appointments, &items, &staff, today))
    }
}

fn is_open(status: AppointmentStatus) -> bool {
    matches!(status, AppointmentStatus::Pending | AppointmentStatus::Confirmed)
}

fn summarize(
    customers: &[Customer],
    appointments: Vec<Appointment>,
    items: &[InventoryItem],
    staff: &[Staff],
    today: NaiveDate,
) -> DashboardSummary {
    let aggregator = CustomerAggregator::new(customers);

    let appointments_today = appointments.iter().filter(|a| a.date == today).count();
    let pending_appointments = appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::Pending)
        .count();
    let revenue_last_30_days = CampaignStatsAggregator::completed_revenue(&appointments, today);

    let mut upcoming: Vec<Appointment> = appointments
        .into_iter()
        .filter(|a| is_open(a.status) && a.date >= today)
        .collect();
    upcoming.sort_by_key(|a| (a.date, a.time));
    upcoming.truncate(UPCOMING_LIMIT);

    DashboardSummary {
        unique_customers: aggregator.unique_customers().len(),
        duplicate_phones: aggregator.duplicate_phones().len(),
        appointments_today,
        pending_appointments,
        revenue_last_30_days,
        low_stock_items: items.iter().filter(|i| i.is_low_stock()).count(),
        active_staff: staff.iter().filter(|s| s.status == RecordStatus::Active).count(),
        loyalty: LoyaltyTierCalculator::stats(customers),
        upcoming,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::{customer, date, instant};
    use chrono::NaiveTime;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn appointment(status: AppointmentStatus, on: NaiveDate, hour: u32) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            customer_name: "Asha".into(),
            customer_phone: "9876543210".into(),
            service: "Facial".into(),
            staff: "Anita".into(),
            date: on,
            time: NaiveTime::from_hms_opt(hour, 0, 0).expect("valid time"),
            status,
            price: Decimal::from(800),
            notes: None,
            created_at: instant(2025, 6, 1),
        }
    }

    #[test]
    fn summary_counts_unique_customers_and_open_work() {
        let today = date(2025, 6, 15);
        let customers = vec![
            customer("Asha", "9876543210"),
            customer("Asha K", "9876543210"),
            customer("Ritu", "9123456780"),
        ];
        let appointments = vec![
            appointment(AppointmentStatus::Pending, today, 16),
            appointment(AppointmentStatus::Confirmed, today, 10),
            appointment(AppointmentStatus::Completed, date(2025, 6, 10), 12),
            appointment(AppointmentStatus::Cancelled, date(2025, 6, 20), 12),
            appointment(AppointmentStatus::Pending, date(2025, 6, 1), 12),
        ];

        let summary = summarize(&customers, appointments, &[], &[], today);

        assert_eq!(summary.unique_customers, 2);
        assert_eq!(summary.duplicate_phones, 1);
        assert_eq!(summary.appointments_today, 2);
        assert_eq!(summary.pending_appointments, 2);
        assert_eq!(summary.revenue_last_30_days, Decimal::from(800));

        let hours: Vec<u32> = summary
            .upcoming
            .iter()
            .map(|a| chrono::Timelike::hour(&a.time))
            .collect();
        assert_eq!(hours, vec![10, 16]);
    }
}
