use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::{notify::Notifier, phone, store::InviteStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn InviteStore>,
    pub notifier: Arc<dyn Notifier>,
    /// Origin used when building visit links, e.g. `http://localhost:3000`.
    pub public_base_url: String,
}

/* -------------------------
   API DTOs
--------------------------*/

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// One line of the invite history as the client renders it.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub doctor_id: String,
    pub phone: String,
    pub phone_display: String,
    pub sent_at: DateTime<Utc>,
}

impl From<InviteRow> for HistoryEntry {
    fn from(row: InviteRow) -> Self {
        Self {
            phone_display: phone::format_display(&row.phone),
            doctor_id: row.doctor_id,
            phone: row.phone,
            sent_at: row.sent_at,
        }
    }
}

/* -------------------------
   DB Row Models
--------------------------*/

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InviteRow {
    pub invite_id: Uuid,
    pub doctor_id: String,
    pub phone: String,
    pub sent_at: DateTime<Utc>, // assigned by the db
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_entry_display() {
        let row = InviteRow {
            invite_id: Uuid::new_v4(),
            doctor_id: "dr-jane-doe".into(),
            phone: "5551234567".into(),
            sent_at: Utc::now(),
        };
        let entry = HistoryEntry::from(row);
        assert_eq!(entry.phone_display, "(555) 123-4567");
        assert_eq!(entry.phone, "5551234567");
    }
}
