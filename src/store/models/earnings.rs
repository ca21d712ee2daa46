//! Earnings reporting models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoutStatus {
    Paid,
    Pending,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payout {
    pub id: String,
    pub doctor_id: String,
    pub amount: u64,
    pub date: NaiveDate,
    pub status: PayoutStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyEarnings {
    /// Display label, e.g. "Jan 2024"
    pub month: String,
    pub earnings: u64,
    pub consultations: u32,
}

/// Summary computed over the doctor's completed bookings.
#[derive(Debug, Serialize)]
pub struct EarningsReport {
    pub total_earnings: u64,
    pub monthly_earnings: u64,
    pub weekly_earnings: u64,
    pub daily_earnings: u64,
    pub average_per_consultation: u64,
    pub total_consultations: u32,
    pub monthly_breakdown: Vec<MonthlyEarnings>,
    pub payout_history: Vec<Payout>,
}
