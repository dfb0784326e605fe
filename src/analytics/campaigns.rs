// src/analytics/campaigns.rs

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{
    appointment::{Appointment, AppointmentStatus},
    marketing::{Campaign, CampaignStats, Channel},
};

pub const REVENUE_WINDOW_DAYS: u64 = 30;

pub struct CampaignStatsAggregator;

impl CampaignStatsAggregator {
    pub fn stats(campaigns: &[Campaign], appointments: &[Appointment], today: NaiveDate) -> CampaignStats {
        let mut emails_sent: i64 = 0;
        let mut sms_sent: i64 = 0;
        let mut whatsapp_sent: i64 = 0;
        let mut total_responses: i64 = 0;

        for c in campaigns {
            let sent = i64::from(c.sent);
            match c.channel {
                Channel::Email => emails_sent += sent,
                Channel::Sms => sms_sent += sent,
                Channel::WhatsApp => whatsapp_sent += sent,
            }
            total_responses += i64::from(c.responses);
        }

        let total_sent = emails_sent + sms_sent + whatsapp_sent;
        let open_rate = if total_sent == 0 {
            0.0
        } else {
            total_responses as f64 * 100.0 / total_sent as f64
        };

        let average_response_rate = if campaigns.is_empty() {
            0.0
        } else {
            campaigns.iter().map(Campaign::response_rate).sum::<f64>() / campaigns.len() as f64
        };

        CampaignStats {
            total_campaigns: campaigns.len(),
            emails_sent,
            sms_sent,
            whatsapp_sent,
            open_rate,
            average_response_rate,
            revenue_last_30_days: Self::completed_revenue(appointments, today),
        }
    }

    /// Σ price of Completed appointments dated within [today - 30 days, today].
    pub fn completed_revenue(appointments: &[Appointment], today: NaiveDate) -> Decimal {
        let since = today
            .checked_sub_days(Days::new(REVENUE_WINDOW_DAYS))
            .unwrap_or(NaiveDate::MIN);

        appointments
            .iter()
            .filter(|a| a.status == AppointmentStatus::Completed)
            .filter(|a| a.date >= since && a.date <= today)
            .map(|a| a.price)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::{date, instant};
    use crate::models::marketing::{Audience, CampaignStatus};
    use chrono::NaiveTime;
    use uuid::Uuid;

    fn campaign(channel: Channel, sent: i32, responses: i32) -> Campaign {
        Campaign {
            id: Uuid::new_v4(),
            name: "Offer".into(),
            channel,
            target_audience: Audience::All,
            message: "Hello".into(),
            sent,
            responses,
            status: CampaignStatus::Sent,
            created_at: instant(2025, 6, 1),
        }
    }

    fn appointment(status: AppointmentStatus, price: i64, on: NaiveDate) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            customer_name: "Asha".into(),
            customer_phone: "9876543210".into(),
            service: "Haircut".into(),
            staff: "Anita".into(),
            date: on,
            time: NaiveTime::from_hms_opt(11, 0, 0).expect("valid time"),
            status,
            price: Decimal::from(price),
            notes: None,
            created_at: instant(2025, 6, 1),
        }
    }

    #[test]
    fn no_campaigns_means_zero_rates_not_nan() {
        let stats = CampaignStatsAggregator::stats(&[], &[], date(2025, 6, 15));
        assert_eq!(stats.average_response_rate, 0.0);
        assert_eq!(stats.open_rate, 0.0);
        assert_eq!(stats.total_campaigns, 0);
    }

    #[test]
    fn only_completed_appointments_count_as_revenue() {
        let today = date(2025, 6, 15);
        let appointments = vec![
            appointment(AppointmentStatus::Completed, 1200, today),
            appointment(AppointmentStatus::Pending, 500, today),
        ];

        let stats = CampaignStatsAggregator::stats(&[], &appointments, today);

        assert_eq!(stats.revenue_last_30_days, Decimal::from(1200));
    }

    #[test]
    fn revenue_window_is_thirty_days() {
        let today = date(2025, 6, 15);
        let appointments = vec![
            appointment(AppointmentStatus::Completed, 100, date(2025, 5, 16)),
            appointment(AppointmentStatus::Completed, 200, date(2025, 5, 15)),
            appointment(AppointmentStatus::Completed, 400, date(2025, 6, 16)),
        ];

        assert_eq!(
            CampaignStatsAggregator::completed_revenue(&appointments, today),
            Decimal::from(100)
        );
    }

    #[test]
    fn sends_are_summed_per_channel() {
        let campaigns = vec![
            campaign(Channel::Email, 100, 10),
            campaign(Channel::Email, 50, 0),
            campaign(Channel::Sms, 40, 20),
            campaign(Channel::WhatsApp, 10, 5),
        ];

        let stats = CampaignStatsAggregator::stats(&campaigns, &[], date(2025, 6, 15));

        assert_eq!(stats.emails_sent, 150);
        assert_eq!(stats.sms_sent, 40);
        assert_eq!(stats.whatsapp_sent, 10);
        // 35 responses over 200 sends
        assert!((stats.open_rate - 17.5).abs() < 1e-9);
        // (10 + 0 + 50 + 50) / 4
        assert!((stats.average_response_rate - 27.5).abs() < 1e-9);
    }

    #[test]
    fn unsent_campaign_has_zero_response_rate() {
        assert_eq!(campaign(Channel::Sms, 0, 3).response_rate(), 0.0);
    }
}
