//! Saved watchlists for tracking topics and offices

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How often a watchlist owner wants to hear about matches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationFrequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

/// Watchlist fields supplied by the citizen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistCreate {
    pub user_email: String,
    pub name: String,
    pub keywords: Vec<String>,
    pub categories: Vec<String>,
    pub government_offices: Vec<String>,
    #[serde(default)]
    pub notification_frequency: NotificationFrequency,
}

/// A stored watchlist. Notifications are not delivered; only the
/// subscription itself is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Watchlist {
    pub id: Uuid,
    pub user_email: String,
    pub name: String,
    pub keywords: Vec<String>,
    pub categories: Vec<String>,
    pub government_offices: Vec<String>,
    pub notification_frequency: NotificationFrequency,
    pub created_at: DateTime<Utc>,
    pub last_notified: Option<DateTime<Utc>>,
}

impl Watchlist {
    pub fn new(input: WatchlistCreate) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_email: input.user_email,
            name: input.name,
            keywords: input.keywords,
            categories: input.categories,
            government_offices: input.government_offices,
            notification_frequency: input.notification_frequency,
            created_at: Utc::now(),
            last_notified: None,
        }
    }
}
