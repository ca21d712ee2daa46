//! Health blog models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Editorial article shown on the patient dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub published_at: NaiveDate,
    pub read_time: String,
    pub category: String,
    pub image: String,
    pub tags: Vec<String>,
}
