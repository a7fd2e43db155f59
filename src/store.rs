// src/store.rs

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::models::InviteRow;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("db error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Append-only table of sent invites.
#[async_trait]
pub trait InviteStore: Send + Sync {
    async fn append(&self, doctor_id: &str, phone: &str) -> Result<InviteRow, StoreError>;

    /// Every invite, newest first.
    async fn list_recent(&self) -> Result<Vec<InviteRow>, StoreError>;
}

pub struct PgInviteStore {
    db: PgPool,
}

impl PgInviteStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl InviteStore for PgInviteStore {
    async fn append(&self, doctor_id: &str, phone: &str) -> Result<InviteRow, StoreError> {
        let row = sqlx::query_as::<_, InviteRow>(
            r#"
            INSERT INTO invites (doctor_id, phone)
            VALUES ($1, $2)
            RETURNING
              invite_id,
              doctor_id,
              phone,
              sent_at
            "#,
        )
        .bind(doctor_id)
        .bind(phone)
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    async fn list_recent(&self) -> Result<Vec<InviteRow>, StoreError> {
        let rows = sqlx::query_as::<_, InviteRow>(
            r#"
            SELECT
              invite_id,
              doctor_id,
              phone,
              sent_at
            FROM invites
            ORDER BY sent_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }
}

#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use super::*;

    /// Vec-backed store. Each append is stamped one second after the
    /// previous one so ordering is deterministic.
    #[derive(Default)]
    pub struct MemoryInviteStore {
        pub rows: Mutex<Vec<InviteRow>>,
        pub fail_for: Vec<String>,
    }

    impl MemoryInviteStore {
        pub fn failing_for(phones: &[&str]) -> Self {
            Self {
                rows: Mutex::new(Vec::new()),
                fail_for: phones.iter().map(|p| p.to_string()).collect(),
            }
        }
    }

    #[async_trait]
    impl InviteStore for MemoryInviteStore {
        async fn append(&self, doctor_id: &str, phone: &str) -> Result<InviteRow, StoreError> {
            if self.fail_for.iter().any(|p| p == phone) {
                return Err(StoreError::Db(sqlx::Error::PoolTimedOut));
            }
            let mut rows = self.rows.lock().unwrap();
            let row = InviteRow {
                invite_id: Uuid::new_v4(),
                doctor_id: doctor_id.to_string(),
                phone: phone.to_string(),
                sent_at: Utc::now() + Duration::seconds(rows.len() as i64),
            };
            rows.push(row.clone());
            Ok(row)
        }

        async fn list_recent(&self) -> Result<Vec<InviteRow>, StoreError> {
            let mut rows = self.rows.lock().unwrap().clone();
            rows.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
            Ok(rows)
        }
    }

    #[tokio::test]
    async fn test_memory_store_newest_first() {
        let store = MemoryInviteStore::default();
        store.append("dr-a", "5550000001").await.unwrap();
        store.append("dr-b", "5550000002").await.unwrap();

        let rows = store.list_recent().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].phone, "5550000002");
        assert_eq!(rows[1].doctor_id, "dr-a");
    }
}
