// src/services/marketing_service.rs

use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    analytics::{AudienceSegmenter, CampaignStatsAggregator, CustomerAggregator},
    common::error::AppError,
    db::{AppointmentRepository, CampaignRepository, CustomerRepository},
    models::{
        customer::Customer,
        marketing::{Audience, Campaign, CampaignStats, CampaignStatus, CreateCampaignPayload, SendReport},
    },
    notify::{Notifier, Recipient},
};

#[derive(Clone)]
pub struct MarketingService {
    campaign_repo: CampaignRepository,
    customer_repo: CustomerRepository,
    appointment_repo: AppointmentRepository,
    notifier: Arc<dyn Notifier>,
    pool: PgPool,
}

impl MarketingService {
    pub fn new(
        campaign_repo: CampaignRepository,
        customer_repo: CustomerRepository,
        appointment_repo: AppointmentRepository,
        notifier: Arc<dyn Notifier>,
        pool: PgPool,
    ) -> Self {
        Self {
            campaign_repo,
            customer_repo,
            appointment_repo,
            notifier,
            pool,
        }
    }

    pub async fn list_campaigns(&self) -> Result<Vec<Campaign>, AppError> {
        self.campaign_repo.list().await
    }

    pub async fn create_campaign(&self, input: &CreateCampaignPayload) -> Result<Campaign, AppError> {
        let campaign = self.campaign_repo.create(input).await?;
        tracing::info!(campaign_id = %campaign.id, channel = ?campaign.channel, "Campaign created");
        Ok(campaign)
    }

    pub async fn delete_campaign(&self, id: Uuid) -> Result<(), AppError> {
        if !self.campaign_repo.delete(id).await? {
            return Err(AppError::ResourceNotFound(format!("Campaign {}", id)));
        }
        Ok(())
    }

    pub async fn stats(&self, today: NaiveDate) -> Result<CampaignStats, AppError> {
        let (campaigns, appointments) =
            tokio::try_join!(self.campaign_repo.list(), self.appointment_repo.list_all())?;
        Ok(CampaignStatsAggregator::stats(&campaigns, &appointments, today))
    }

    /// Current (latest-per-phone) customers falling into `audience`.
    pub async fn audience(&self, audience: Audience, today: NaiveDate) -> Result<Vec<Customer>, AppError> {
        let customers = self.customer_repo.list_all().await?;
        Ok(select_audience(audience, &customers, today)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Delivers the campaign message to its audience. Counters move only when
    /// the whole batch was accepted. The campaign row stays locked until the
    /// counters are written.
    pub async fn send_campaign(&self, id: Uuid, today: NaiveDate) -> Result<SendReport, AppError> {
        let mut tx = self.pool.begin().await?;

        let campaign = self
            .campaign_repo
            .lock_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Campaign {}", id)))?;

        check_sendable(&campaign)?;

        let customers = self.customer_repo.list_all().await?;
        let recipients: Vec<Recipient> = select_audience(campaign.target_audience, &customers, today)
            .into_iter()
            .map(|c| Recipient {
                phone: c.phone.clone(),
                name: c.name.clone(),
            })
            .collect();

        let delivered = match self.notifier.send_batch(&recipients, &campaign.message).await {
            Ok(n) => n,
            Err(e) => {
                tracing::error!(campaign_id = %id, error = %e, "Campaign delivery failed");
                return Err(e.into());
            }
        };

        let sent = i32::try_from(delivered).map_err(anyhow::Error::from)?;
        self.campaign_repo
            .mark_sent(&mut *tx, id, sent)
            .await?
            .ok_or_else(|| AppError::BadRequest("Campaign was already sent".into()))?;

        tx.commit().await?;

        tracing::info!(campaign_id = %id, recipients = delivered, "Campaign sent");
        Ok(SendReport {
            campaign_id: id,
            recipients: delivered,
        })
    }

    /// Responses accumulate but never exceed the number of messages sent.
    pub async fn record_responses(&self, id: Uuid, count: i32) -> Result<Campaign, AppError> {
        let mut tx = self.pool.begin().await?;

        let campaign = self
            .campaign_repo
            .lock_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Campaign {}", id)))?;

        check_responses(&campaign, count)?;

        let updated = self
            .campaign_repo
            .add_responses(&mut *tx, id, count)
            .await?
            .ok_or_else(|| AppError::BadRequest("Responses cannot exceed messages sent".into()))?;

        tx.commit().await?;
        Ok(updated)
    }
}

fn check_sendable(campaign: &Campaign) -> Result<(), AppError> {
    if campaign.status == CampaignStatus::Sent {
        return Err(AppError::BadRequest("Campaign was already sent".into()));
    }
    Ok(())
}

fn check_responses(campaign: &Campaign, count: i32) -> Result<(), AppError> {
    if count < 1 {
        return Err(AppError::BadRequest("Response count must be positive".into()));
    }
    let total = campaign.responses.checked_add(count);
    if total.map_or(true, |t| t > campaign.sent) {
        return Err(AppError::BadRequest(format!(
            "Responses cannot exceed messages sent ({} sent, {} recorded)",
            campaign.sent, campaign.responses
        )));
    }
    Ok(())
}

fn select_audience<'a>(audience: Audience, customers: &'a [Customer], today: NaiveDate) -> Vec<&'a Customer> {
    let segmenter = AudienceSegmenter::new(today);
    CustomerAggregator::new(customers)
        .unique_customers()
        .into_iter()
        .filter(|c| segmenter.matches(audience, c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::{customer, date, instant};
    use rust_decimal::Decimal;

    #[test]
    fn audience_uses_only_the_latest_row_per_phone() {
        let mut old = customer("Meera (old)", "9000000001");
        old.total_spent = Decimal::from(20_000);
        let mut current = customer("Meera", "9000000001");
        current.created_at = instant(2025, 2, 1);
        current.total_spent = Decimal::from(2_000);
        let mut other = customer("Kavya", "9000000002");
        other.total_spent = Decimal::from(12_000);

        let customers = vec![old, current, other];
        let picked = select_audience(Audience::HighValue, &customers, date(2025, 6, 15));

        let names: Vec<&str> = picked.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Kavya"]);
    }

    fn campaign(status: CampaignStatus, sent: i32, responses: i32) -> Campaign {
        Campaign {
            id: Uuid::new_v4(),
            name: "Monsoon Offer".into(),
            channel: crate::models::marketing::Channel::WhatsApp,
            target_audience: Audience::All,
            message: "Flat 20% off".into(),
            sent,
            responses,
            status,
            created_at: instant(2025, 6, 1),
        }
    }

    #[test]
    fn a_sent_campaign_cannot_be_sent_again() {
        assert!(check_sendable(&campaign(CampaignStatus::Draft, 0, 0)).is_ok());
        assert!(check_sendable(&campaign(CampaignStatus::Scheduled, 0, 0)).is_ok());
        assert!(matches!(
            check_sendable(&campaign(CampaignStatus::Sent, 40, 0)),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn responses_are_capped_by_messages_sent() {
        let sent = campaign(CampaignStatus::Sent, 10, 7);
        assert!(check_responses(&sent, 3).is_ok());
        assert!(matches!(check_responses(&sent, 4), Err(AppError::BadRequest(_))));
        assert!(check_responses(&campaign(CampaignStatus::Draft, 0, 0), 1).is_err());
        assert!(check_responses(&sent, 0).is_err());
    }

    #[test]
    fn everyone_audience_collapses_duplicates() {
        let customers = vec![
            customer("A", "9000000001"),
            customer("A again", "9000000001"),
            customer("B", "9000000002"),
        ];
        assert_eq!(select_audience(Audience::All, &customers, date(2025, 6, 15)).len(), 2);
    }
}
