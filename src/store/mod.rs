//! In-memory domain stores.
//!
//! Each collection is an independent concurrent map keyed by record id.
//! The store holds the single authoritative copy of every collection;
//! fetches return it wholesale and mutations locate a record by id and
//! patch it in place. A mutation targeting an unknown id leaves the
//! collection untouched and reports `StoreError::NotFound`.

pub mod models;
pub mod seed;

use dashmap::DashMap;
use thiserror::Error;

use models::*;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    InvalidTransition(String),
    #[error("{0}")]
    Duplicate(String),
}

#[derive(Default)]
pub struct Store {
    pub users: DashMap<String, User>,
    /// Auth sessions keyed by token hash
    pub auth_sessions: DashMap<String, AuthSession>,
    pub doctors: DashMap<String, Doctor>,
    pub bookings: DashMap<String, Booking>,
    pub chat_sessions: DashMap<String, ChatSession>,
    pub consults: DashMap<String, ConsultSession>,
    pub calendar_events: DashMap<String, CalendarEvent>,
    pub blocked_slots: DashMap<String, BlockedSlot>,
    pub payouts: DashMap<String, Payout>,
    pub support_requests: DashMap<String, SupportRequest>,
    pub feedback: DashMap<String, DoctorFeedback>,
    pub blog_posts: DashMap<String, BlogPost>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_by_email(&self, email: &str) -> Option<User> {
        self.users
            .iter()
            .find(|entry| entry.email.eq_ignore_ascii_case(email))
            .map(|entry| entry.clone())
    }

    pub fn has_admin(&self) -> bool {
        self.users.iter().any(|entry| entry.role == Role::Admin)
    }

    /// Completed-booking totals for a doctor: (lifetime, current month).
    pub fn doctor_earnings(&self, doctor_id: &str, now: chrono::NaiveDate) -> (u64, u64) {
        let mut total = 0u64;
        let mut this_month = 0u64;
        for entry in self.bookings.iter() {
            if entry.doctor_id == doctor_id && entry.status == BookingStatus::Completed {
                let fee = entry.consultation_fee as u64;
                total += fee;
                if entry.date.format("%Y-%m").to_string() == now.format("%Y-%m").to_string() {
                    this_month += fee;
                }
            }
        }
        (total, this_month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_booking(id: &str, doctor_id: &str, status: BookingStatus, date: &str) -> Booking {
        Booking {
            id: id.to_string(),
            doctor_id: doctor_id.to_string(),
            doctor_name: "Dr. Sarah Johnson".to_string(),
            specialization: "Cardiology".to_string(),
            patient_id: "p1".to_string(),
            patient_name: "Alice Johnson".to_string(),
            patient_phone: "+1234567890".to_string(),
            date: date.parse::<NaiveDate>().unwrap(),
            time: "10:00 AM".to_string(),
            status,
            kind: ConsultKind::Video,
            consultation_fee: 150,
            notes: None,
            diagnosis: None,
            prescription: None,
            patient_feedback: None,
        }
    }

    #[test]
    fn earnings_count_only_completed_bookings() {
        let store = Store::new();
        store.bookings.insert(
            "b1".to_string(),
            sample_booking("b1", "d1", BookingStatus::Completed, "2024-01-15"),
        );
        store.bookings.insert(
            "b2".to_string(),
            sample_booking("b2", "d1", BookingStatus::Upcoming, "2024-01-22"),
        );
        store.bookings.insert(
            "b3".to_string(),
            sample_booking("b3", "d1", BookingStatus::Completed, "2023-12-10"),
        );
        store.bookings.insert(
            "b4".to_string(),
            sample_booking("b4", "other", BookingStatus::Completed, "2024-01-05"),
        );

        let now = "2024-01-20".parse::<NaiveDate>().unwrap();
        let (total, this_month) = store.doctor_earnings("d1", now);
        assert_eq!(total, 300);
        assert_eq!(this_month, 150);
    }

    #[test]
    fn user_lookup_is_case_insensitive() {
        let store = Store::new();
        seed::seed_demo_data(&store).unwrap();
        assert!(store.user_by_email("SARAH.JOHNSON@CARELINK.LOCAL").is_some());
        assert!(store.user_by_email("nobody@carelink.local").is_none());
    }
}
