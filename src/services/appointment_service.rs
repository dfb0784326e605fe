// src/services/appointment_service.rs

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AppointmentRepository, CustomerRepository},
    models::appointment::{Appointment, AppointmentPayload, AppointmentStatus},
};

#[derive(Clone)]
pub struct AppointmentService {
    repo: AppointmentRepository,
    customer_repo: CustomerRepository,
    pool: PgPool,
}

impl AppointmentService {
    pub fn new(repo: AppointmentRepository, customer_repo: CustomerRepository, pool: PgPool) -> Self {
        Self { repo, customer_repo, pool }
    }

    pub async fn list_appointments(&self, date: Option<NaiveDate>) -> Result<Vec<Appointment>, AppError> {
        match date {
            Some(d) => self.repo.list_by_date(d).await,
            None => self.repo.list_all().await,
        }
    }

    pub async fn create_appointment(&self, input: &AppointmentPayload) -> Result<Appointment, AppError> {
        let appointment = self.repo.create(&self.pool, input).await?;
        tracing::info!(
            appointment_id = %appointment.id,
            date = %appointment.date,
            "Appointment booked"
        );
        Ok(appointment)
    }

    pub async fn update_appointment(&self, id: Uuid, input: &AppointmentPayload) -> Result<Appointment, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = self
            .repo
            .lock_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Appointment {}", id)))?;

        check_editable(current.status)?;

        let updated = self
            .repo
            .update(&mut *tx, id, input)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Appointment {}", id)))?;

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn delete_appointment(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(&self.pool, id).await? {
            return Err(AppError::ResourceNotFound(format!("Appointment {}", id)));
        }
        Ok(())
    }

    /// Moves an appointment to a new status. The first move into Completed
    /// credits the visit and price to the customer's current record.
    pub async fn change_status(&self, id: Uuid, status: AppointmentStatus) -> Result<Appointment, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = self
            .repo
            .lock_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Appointment {}", id)))?;

        check_transition(current.status, status)?;

        let updated = self.repo.set_status(&mut *tx, id, status).await?;

        if credits_visit(current.status, status) {
            // Latest row for the phone is the current one
            let matches = self.customer_repo.find_by_phone(&mut *tx, &updated.customer_phone).await?;
            match matches.first() {
                Some(customer) => {
                    self.customer_repo
                        .record_visit(&mut *tx, customer.id, updated.price, updated.date)
                        .await?;
                }
                None => tracing::warn!(
                    phone = %updated.customer_phone,
                    "Completed appointment has no customer record to credit"
                ),
            }
        }

        tx.commit().await?;
        Ok(updated)
    }
}

fn credits_visit(from: AppointmentStatus, to: AppointmentStatus) -> bool {
    to == AppointmentStatus::Completed && from != AppointmentStatus::Completed
}

// A completed visit is already credited at its price; edits would desync the customer.
fn check_editable(status: AppointmentStatus) -> Result<(), AppError> {
    match status {
        AppointmentStatus::Completed | AppointmentStatus::Cancelled => Err(AppError::BadRequest(format!(
            "A {:?} appointment can no longer be edited",
            status
        ))),
        _ => Ok(()),
    }
}

// Completed and cancelled appointments are final.
fn check_transition(from: AppointmentStatus, to: AppointmentStatus) -> Result<(), AppError> {
    use AppointmentStatus::*;
    match (from, to) {
        (a, b) if a == b => Ok(()),
        (Completed, _) | (Cancelled, _) => Err(AppError::BadRequest(format!(
            "Cannot move a {:?} appointment to {:?}",
            from, to
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AppointmentStatus::*;

    #[test]
    fn open_appointments_can_move_anywhere() {
        assert!(check_transition(Pending, Confirmed).is_ok());
        assert!(check_transition(Confirmed, Completed).is_ok());
        assert!(check_transition(Pending, Cancelled).is_ok());
    }

    #[test]
    fn final_states_are_locked() {
        assert!(check_transition(Completed, Pending).is_err());
        assert!(check_transition(Cancelled, Confirmed).is_err());
        assert!(check_transition(Completed, Completed).is_ok());
    }

    #[test]
    fn only_open_appointments_are_editable() {
        assert!(check_editable(Pending).is_ok());
        assert!(check_editable(Confirmed).is_ok());
        assert!(matches!(check_editable(Completed), Err(AppError::BadRequest(_))));
        assert!(matches!(check_editable(Cancelled), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn only_the_first_completion_credits_the_customer() {
        assert!(credits_visit(Confirmed, Completed));
        assert!(credits_visit(Pending, Completed));
        assert!(!credits_visit(Completed, Completed));
        assert!(!credits_visit(Pending, Cancelled));
    }
}
