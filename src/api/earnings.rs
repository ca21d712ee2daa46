//! Earnings reporting, computed from completed bookings.

use axum::{extract::State, Json};
use chrono::{Datelike, Duration, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::store::models::{
    BookingStatus, EarningsReport, MonthlyEarnings, Payout, User,
};
use crate::AppState;

/// Summarize the caller's completed consultations
///
/// GET /api/doctor/earnings
pub async fn get_earnings(State(state): State<Arc<AppState>>, user: User) -> Json<EarningsReport> {
    let today = Utc::now().date_naive();
    let week_ago = today - Duration::days(7);

    let mut total_earnings = 0u64;
    let mut monthly_earnings = 0u64;
    let mut weekly_earnings = 0u64;
    let mut daily_earnings = 0u64;
    let mut total_consultations = 0u32;
    // Keyed by (year, month) so the breakdown sorts chronologically
    let mut by_month: BTreeMap<(i32, u32), (u64, u32)> = BTreeMap::new();

    for entry in state.store.bookings.iter() {
        if entry.doctor_id != user.id || entry.status != BookingStatus::Completed {
            continue;
        }
        let fee = entry.consultation_fee as u64;
        total_earnings += fee;
        total_consultations += 1;
        if entry.date.year() == today.year() && entry.date.month() == today.month() {
            monthly_earnings += fee;
        }
        if entry.date > week_ago && entry.date <= today {
            weekly_earnings += fee;
        }
        if entry.date == today {
            daily_earnings += fee;
        }
        let bucket = by_month.entry((entry.date.year(), entry.date.month())).or_default();
        bucket.0 += fee;
        bucket.1 += 1;
    }

    let average_per_consultation = if total_consultations > 0 {
        total_earnings / total_consultations as u64
    } else {
        0
    };

    // Newest month first
    let monthly_breakdown: Vec<MonthlyEarnings> = by_month
        .into_iter()
        .rev()
        .map(|((year, month), (earnings, consultations))| MonthlyEarnings {
            month: format!("{} {}", month_label(month), year),
            earnings,
            consultations,
        })
        .collect();

    let mut payout_history: Vec<Payout> = state
        .store
        .payouts
        .iter()
        .filter(|entry| entry.doctor_id == user.id)
        .map(|entry| entry.clone())
        .collect();
    payout_history.sort_by(|a, b| b.date.cmp(&a.date));

    Json(EarningsReport {
        total_earnings,
        monthly_earnings,
        weekly_earnings,
        daily_earnings,
        average_per_consultation,
        total_consultations,
        monthly_breakdown,
        payout_history,
    })
}

fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        _ => "Dec",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::models::PayoutStatus;
    use crate::store::seed::seed_demo_data;

    fn test_state() -> Arc<AppState> {
        let state = Arc::new(AppState::new(Config::default()));
        seed_demo_data(&state.store).unwrap();
        state
    }

    #[tokio::test]
    async fn report_aggregates_completed_bookings_only() {
        let state = test_state();
        let sarah = state.store.users.get("doc-sarah").unwrap().clone();

        let report = get_earnings(State(state), sarah).await;

        // Seeded: bkg-5 and bkg-6 completed at 150 each; bkg-1/bkg-4 upcoming
        assert_eq!(report.0.total_consultations, 2);
        assert_eq!(report.0.total_earnings, 300);
        assert_eq!(report.0.average_per_consultation, 150);
        assert_eq!(report.0.monthly_breakdown.len(), 1);
        assert_eq!(report.0.monthly_breakdown[0].month, "Jan 2024");
        assert_eq!(report.0.monthly_breakdown[0].consultations, 2);
    }

    #[tokio::test]
    async fn payout_history_is_newest_first() {
        let state = test_state();
        let sarah = state.store.users.get("doc-sarah").unwrap().clone();

        let report = get_earnings(State(state), sarah).await;
        assert_eq!(report.0.payout_history.len(), 4);
        for pair in report.0.payout_history.windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
        assert_eq!(report.0.payout_history[0].status, PayoutStatus::Pending);
    }

    #[tokio::test]
    async fn empty_history_yields_zeroed_report() {
        let state = test_state();
        let michael = state.store.users.get("doc-michael").unwrap().clone();
        // doc-michael has one completed booking (bkg-2, fee 120)
        let report = get_earnings(State(state.clone()), michael).await;
        assert_eq!(report.0.total_consultations, 1);
        assert_eq!(report.0.total_earnings, 120);

        let david = state.store.users.get("doc-david").unwrap().clone();
        let empty = get_earnings(State(state), david).await;
        assert_eq!(empty.0.total_consultations, 0);
        assert_eq!(empty.0.average_per_consultation, 0);
        assert!(empty.0.monthly_breakdown.is_empty());
        assert!(empty.0.payout_history.is_empty());
    }
}
