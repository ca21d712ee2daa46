//! Demo dataset seeded at startup.
//!
//! Stands in for the production data source until one exists. Records
//! use fixed ids so the demo flows are reproducible across restarts.

use anyhow::Result;
use chrono::{NaiveDate, TimeZone, Utc};
use tracing::info;

use crate::api::auth::hash_password;
use crate::store::models::*;
use crate::store::Store;

/// Password shared by every seeded demo account.
pub const DEMO_PASSWORD: &str = "Carelink#Demo1";

fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid seed date")
}

pub fn seed_demo_data(store: &Store) -> Result<()> {
    info!("Seeding demo dataset...");

    let password_hash =
        hash_password(DEMO_PASSWORD).map_err(|e| anyhow::anyhow!("password hash: {e}"))?;
    let now = Utc::now();

    // Patient accounts
    let patients = [
        ("pat-john", "John Doe", "john.doe@carelink.local", "+1234567890"),
        ("pat-alice", "Alice Johnson", "alice@carelink.local", "+1234567890"),
        ("pat-bob", "Bob Smith", "bob@carelink.local", "+1234567891"),
        ("pat-carol", "Carol Davis", "carol@carelink.local", "+1234567892"),
    ];
    for (id, name, email, phone) in patients {
        store.users.insert(
            id.to_string(),
            User {
                id: id.to_string(),
                email: email.to_string(),
                password_hash: password_hash.clone(),
                name: name.to_string(),
                phone: phone.to_string(),
                role: Role::Patient,
                specialization: None,
                bio: None,
                consultation_fee: None,
                verified: false,
                status: AccountStatus::Active,
                created_at: now,
                last_active: now,
            },
        );
    }

    // Doctor directory + matching doctor accounts
    let doctors = [
        (
            "doc-sarah",
            "Dr. Sarah Johnson",
            "sarah.johnson@carelink.local",
            "+1234567890",
            "Cardiology",
            "15 years",
            4.8f32,
            150u32,
            true,
            DoctorStatus::Approved,
            "2024-01-01",
        ),
        (
            "doc-michael",
            "Dr. Michael Chen",
            "michael.chen@carelink.local",
            "+1234567891",
            "Dermatology",
            "12 years",
            4.9,
            120,
            false,
            DoctorStatus::Pending,
            "2024-01-10",
        ),
        (
            "doc-emily",
            "Dr. Emily Rodriguez",
            "emily.rodriguez@carelink.local",
            "+1234567892",
            "Neurology",
            "18 years",
            4.7,
            180,
            true,
            DoctorStatus::Approved,
            "2023-11-20",
        ),
        (
            "doc-david",
            "Dr. David Kumar",
            "david.kumar@carelink.local",
            "+1234567893",
            "Orthopedics",
            "20 years",
            4.6,
            160,
            true,
            DoctorStatus::Approved,
            "2023-09-05",
        ),
    ];
    for (id, name, email, phone, specialization, experience, rating, fee, online, status, joined) in
        doctors
    {
        let verified = status == DoctorStatus::Approved;
        store.doctors.insert(
            id.to_string(),
            Doctor {
                id: id.to_string(),
                name: name.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
                specialization: specialization.to_string(),
                experience: experience.to_string(),
                rating,
                avatar: format!("https://cdn.carelink.local/avatars/{id}.jpg"),
                is_online: online,
                consultation_fee: fee,
                next_available: Utc
                    .with_ymd_and_hms(2024, 1, 25, 10, 0, 0)
                    .single()
                    .expect("valid seed timestamp"),
                verified,
                status,
                joined_date: date(joined),
                documents: DoctorDocuments {
                    medical_license: format!("license-{id}.pdf"),
                    degrees_certificates: vec![format!("degree-{id}.pdf")],
                    government_id: format!("id-{id}.pdf"),
                },
            },
        );
        store.users.insert(
            id.to_string(),
            User {
                id: id.to_string(),
                email: email.to_string(),
                password_hash: password_hash.clone(),
                name: name.to_string(),
                phone: phone.to_string(),
                role: Role::Doctor,
                specialization: Some(specialization.to_string()),
                bio: Some(format!("Experienced {} specialist", specialization.to_lowercase())),
                consultation_fee: Some(fee),
                verified,
                status: AccountStatus::Active,
                created_at: now,
                last_active: now,
            },
        );
    }

    seed_bookings(store);
    seed_calendar(store);
    seed_payouts(store);
    seed_support(store);
    seed_feedback(store);
    seed_blogs(store);

    info!(
        users = store.users.len(),
        doctors = store.doctors.len(),
        bookings = store.bookings.len(),
        "Demo dataset ready"
    );
    Ok(())
}

fn seed_bookings(store: &Store) {
    let bookings = vec![
        Booking {
            id: "bkg-1".to_string(),
            doctor_id: "doc-sarah".to_string(),
            doctor_name: "Dr. Sarah Johnson".to_string(),
            specialization: "Cardiology".to_string(),
            patient_id: "pat-john".to_string(),
            patient_name: "John Doe".to_string(),
            patient_phone: "+1234567890".to_string(),
            date: date("2024-01-20"),
            time: "10:00 AM".to_string(),
            status: BookingStatus::Upcoming,
            kind: ConsultKind::Video,
            consultation_fee: 150,
            notes: None,
            diagnosis: None,
            prescription: None,
            patient_feedback: None,
        },
        Booking {
            id: "bkg-2".to_string(),
            doctor_id: "doc-michael".to_string(),
            doctor_name: "Dr. Michael Chen".to_string(),
            specialization: "Dermatology".to_string(),
            patient_id: "pat-john".to_string(),
            patient_name: "John Doe".to_string(),
            patient_phone: "+1234567890".to_string(),
            date: date("2024-01-10"),
            time: "2:00 PM".to_string(),
            status: BookingStatus::Completed,
            kind: ConsultKind::Chat,
            consultation_fee: 120,
            notes: Some("Skin condition improving. Continue current medication.".to_string()),
            diagnosis: Some("Contact dermatitis, resolving".to_string()),
            prescription: Some("Hydrocortisone cream 1% - Apply twice daily".to_string()),
            patient_feedback: None,
        },
        Booking {
            id: "bkg-3".to_string(),
            doctor_id: "doc-emily".to_string(),
            doctor_name: "Dr. Emily Rodriguez".to_string(),
            specialization: "Neurology".to_string(),
            patient_id: "pat-john".to_string(),
            patient_name: "John Doe".to_string(),
            patient_phone: "+1234567890".to_string(),
            date: date("2024-01-05"),
            time: "4:00 PM".to_string(),
            status: BookingStatus::Completed,
            kind: ConsultKind::Video,
            consultation_fee: 180,
            notes: Some("Headache symptoms reduced significantly.".to_string()),
            diagnosis: Some("Migraine, responding to treatment".to_string()),
            prescription: Some("Sumatriptan 50mg - As needed for severe headaches".to_string()),
            patient_feedback: None,
        },
        Booking {
            id: "bkg-4".to_string(),
            doctor_id: "doc-sarah".to_string(),
            doctor_name: "Dr. Sarah Johnson".to_string(),
            specialization: "Cardiology".to_string(),
            patient_id: "pat-alice".to_string(),
            patient_name: "Alice Johnson".to_string(),
            patient_phone: "+1234567890".to_string(),
            date: date("2024-01-22"),
            time: "10:00 AM".to_string(),
            status: BookingStatus::Upcoming,
            kind: ConsultKind::Video,
            consultation_fee: 150,
            notes: None,
            diagnosis: None,
            prescription: None,
            patient_feedback: None,
        },
        Booking {
            id: "bkg-5".to_string(),
            doctor_id: "doc-sarah".to_string(),
            doctor_name: "Dr. Sarah Johnson".to_string(),
            specialization: "Cardiology".to_string(),
            patient_id: "pat-bob".to_string(),
            patient_name: "Bob Smith".to_string(),
            patient_phone: "+1234567891".to_string(),
            date: date("2024-01-15"),
            time: "2:00 PM".to_string(),
            status: BookingStatus::Completed,
            kind: ConsultKind::Chat,
            consultation_fee: 150,
            notes: Some("Patient complained of chest pain. ECG normal.".to_string()),
            diagnosis: Some("Anxiety-related chest pain".to_string()),
            prescription: Some("Stress management techniques".to_string()),
            patient_feedback: Some(PatientFeedback {
                rating: 5,
                comment: "Very helpful and understanding doctor!".to_string(),
                date: date("2024-01-15"),
            }),
        },
        Booking {
            id: "bkg-6".to_string(),
            doctor_id: "doc-sarah".to_string(),
            doctor_name: "Dr. Sarah Johnson".to_string(),
            specialization: "Cardiology".to_string(),
            patient_id: "pat-carol".to_string(),
            patient_name: "Carol Davis".to_string(),
            patient_phone: "+1234567892".to_string(),
            date: date("2024-01-10"),
            time: "4:00 PM".to_string(),
            status: BookingStatus::Completed,
            kind: ConsultKind::Video,
            consultation_fee: 150,
            notes: Some("Follow-up consultation for hypertension".to_string()),
            diagnosis: Some("Controlled hypertension".to_string()),
            prescription: Some("Continue current medication".to_string()),
            patient_feedback: Some(PatientFeedback {
                rating: 4,
                comment: "Good consultation, clear explanations".to_string(),
                date: date("2024-01-10"),
            }),
        },
    ];
    for booking in bookings {
        store.bookings.insert(booking.id.clone(), booking);
    }
}

fn seed_calendar(store: &Store) {
    // Booking events mirror the upcoming bookings; doctors may also see
    // entries created outside the booking flow.
    let events = vec![
        CalendarEvent {
            id: "evt-1".to_string(),
            doctor_id: "doc-sarah".to_string(),
            title: "Consultation with Alice Johnson".to_string(),
            date: date("2024-01-22"),
            time: "10:00 AM".to_string(),
            kind: EventKind::Booking,
            patient_name: Some("Alice Johnson".to_string()),
            duration_minutes: 30,
        },
        CalendarEvent {
            id: "evt-2".to_string(),
            doctor_id: "doc-sarah".to_string(),
            title: "Consultation with Bob Smith".to_string(),
            date: date("2024-01-23"),
            time: "2:00 PM".to_string(),
            kind: EventKind::Booking,
            patient_name: Some("Bob Smith".to_string()),
            duration_minutes: 30,
        },
    ];
    for event in events {
        store.calendar_events.insert(event.id.clone(), event);
    }

    store.blocked_slots.insert(
        "blk-1".to_string(),
        BlockedSlot {
            id: "blk-1".to_string(),
            doctor_id: "doc-sarah".to_string(),
            date: date("2024-01-24"),
            start_time: "12:00".to_string(),
            end_time: "14:00".to_string(),
            reason: Some("Lunch break".to_string()),
        },
    );
}

fn seed_payouts(store: &Store) {
    let payouts = vec![
        ("pay-1", 4500, "2024-01-01", PayoutStatus::Paid),
        ("pay-2", 3800, "2023-12-01", PayoutStatus::Paid),
        ("pay-3", 4200, "2023-11-01", PayoutStatus::Paid),
        ("pay-4", 1200, "2024-01-15", PayoutStatus::Pending),
    ];
    for (id, amount, day, status) in payouts {
        store.payouts.insert(
            id.to_string(),
            Payout {
                id: id.to_string(),
                doctor_id: "doc-sarah".to_string(),
                amount,
                date: date(day),
                status,
            },
        );
    }
}

fn seed_support(store: &Store) {
    let requests = vec![
        SupportRequest {
            id: "sup-1".to_string(),
            requester_id: "doc-sarah".to_string(),
            title: "Calendar view improvements".to_string(),
            description: "Would like to see a monthly view with better navigation".to_string(),
            kind: SupportKind::Feature,
            status: SupportStatus::UnderReview,
            created_at: date("2024-01-15"),
            updated_at: date("2024-01-16"),
            response: None,
        },
        SupportRequest {
            id: "sup-2".to_string(),
            requester_id: "doc-sarah".to_string(),
            title: "Export earnings data".to_string(),
            description: "Need ability to export earnings data to CSV".to_string(),
            kind: SupportKind::Feature,
            status: SupportStatus::Resolved,
            created_at: date("2024-01-10"),
            updated_at: date("2024-01-12"),
            response: Some("Feature has been implemented in the earnings section".to_string()),
        },
    ];
    for request in requests {
        store.support_requests.insert(request.id.clone(), request);
    }
}

fn seed_blogs(store: &Store) {
    let posts = vec![
        BlogPost {
            id: "blog-1".to_string(),
            title: "Understanding Heart Health: Prevention and Early Detection".to_string(),
            excerpt: "Learn about the latest advances in cardiovascular medicine and how to \
                      maintain a healthy heart through lifestyle changes."
                .to_string(),
            content: "Full article content would go here...".to_string(),
            author: "Dr. Sarah Johnson".to_string(),
            published_at: date("2024-01-10"),
            read_time: "5 min read".to_string(),
            category: "Cardiology".to_string(),
            image: "https://cdn.carelink.local/blog/heart-health.jpg".to_string(),
            tags: vec![
                "heart health".to_string(),
                "prevention".to_string(),
                "cardiology".to_string(),
            ],
        },
        BlogPost {
            id: "blog-2".to_string(),
            title: "Skin Care Tips for Different Seasons".to_string(),
            excerpt: "Expert dermatologist advice on how to adapt your skincare routine \
                      throughout the year."
                .to_string(),
            content: "Full article content would go here...".to_string(),
            author: "Dr. Michael Chen".to_string(),
            published_at: date("2024-01-08"),
            read_time: "3 min read".to_string(),
            category: "Dermatology".to_string(),
            image: "https://cdn.carelink.local/blog/skin-care.jpg".to_string(),
            tags: vec![
                "skincare".to_string(),
                "dermatology".to_string(),
                "seasons".to_string(),
            ],
        },
        BlogPost {
            id: "blog-3".to_string(),
            title: "Managing Stress and Mental Health in Modern Life".to_string(),
            excerpt: "Practical strategies for maintaining mental wellness in our fast-paced \
                      world."
                .to_string(),
            content: "Full article content would go here...".to_string(),
            author: "Dr. Emily Rodriguez".to_string(),
            published_at: date("2024-01-05"),
            read_time: "7 min read".to_string(),
            category: "Mental Health".to_string(),
            image: "https://cdn.carelink.local/blog/stress-management.jpg".to_string(),
            tags: vec![
                "mental health".to_string(),
                "stress".to_string(),
                "wellness".to_string(),
            ],
        },
    ];
    for post in posts {
        store.blog_posts.insert(post.id.clone(), post);
    }
}

fn seed_feedback(store: &Store) {
    let feedbacks = vec![
        DoctorFeedback {
            id: "fbk-1".to_string(),
            doctor_id: "doc-sarah".to_string(),
            doctor_name: "Dr. Sarah Johnson".to_string(),
            kind: FeedbackKind::Complaint,
            subject: "Long waiting time".to_string(),
            message: "Patients are waiting too long for appointments".to_string(),
            date: date("2024-01-15"),
            status: FeedbackStatus::Open,
            priority: FeedbackPriority::Medium,
        },
        DoctorFeedback {
            id: "fbk-2".to_string(),
            doctor_id: "doc-michael".to_string(),
            doctor_name: "Dr. Michael Chen".to_string(),
            kind: FeedbackKind::Suggestion,
            subject: "Feature request".to_string(),
            message: "Would like to have a calendar integration feature".to_string(),
            date: date("2024-01-18"),
            status: FeedbackStatus::InProgress,
            priority: FeedbackPriority::Low,
        },
    ];
    for feedback in feedbacks {
        store.feedback.insert(feedback.id.clone(), feedback);
    }
}
