// src/dispatch.rs

use serde::Serialize;

use crate::{
    form::DispatchPlan,
    models::InviteRow,
    notify::{Notifier, NotifyError},
    referral,
    store::{InviteStore, StoreError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailedStage {
    Notify,
    Store,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedInvite {
    pub phone: String,
    pub stage: FailedStage,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct DispatchReport {
    pub sent: Vec<InviteRow>,
    pub failed: Vec<FailedInvite>,
}

#[derive(Debug, thiserror::Error)]
pub enum InviteError {
    #[error(transparent)]
    Notify(#[from] NotifyError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub fn visit_url(base_url: &str, doctor_id: &str, code: &str) -> String {
    format!("{}/visit/{doctor_id}?ref={code}", base_url.trim_end_matches('/'))
}

pub fn sms_text(doctor_name: &str, url: &str) -> String {
    format!("Hi! Dr {doctor_name} has invited you to view their Medoh profile: {url}")
}

pub struct Dispatcher<'a> {
    store: &'a dyn InviteStore,
    notifier: &'a dyn Notifier,
    base_url: &'a str,
}

impl<'a> Dispatcher<'a> {
    pub fn new(store: &'a dyn InviteStore, notifier: &'a dyn Notifier, base_url: &'a str) -> Self {
        Self {
            store,
            notifier,
            base_url,
        }
    }

    /// Text one patient and record it. Nothing is stored if the text
    /// could not be sent.
    pub async fn send_one(
        &self,
        doctor_name: &str,
        doctor_id: &str,
        phone: &str,
    ) -> Result<InviteRow, InviteError> {
        let url = visit_url(self.base_url, doctor_id, &referral::generate());
        self.notifier.send(phone, &sms_text(doctor_name, &url)).await?;
        let row = self.store.append(doctor_id, phone).await?;

        tracing::info!(doctor_id, phone, "invite sent");
        Ok(row)
    }

    /// Work through the plan one number at a time. A failure is recorded
    /// and the next number is still attempted; there is no retry.
    pub async fn run(&self, plan: &DispatchPlan) -> DispatchReport {
        let mut report = DispatchReport::default();

        for phone in &plan.phones {
            match self.send_one(&plan.doctor_name, &plan.doctor_id, phone).await {
                Ok(row) => report.sent.push(row),
                Err(e) => {
                    let stage = match e {
                        InviteError::Notify(_) => FailedStage::Notify,
                        InviteError::Store(_) => FailedStage::Store,
                    };
                    tracing::warn!(doctor_id = %plan.doctor_id, phone = %phone, ?stage, "invite failed: {e}");
                    report.failed.push(FailedInvite {
                        phone: phone.clone(),
                        stage,
                        reason: e.to_string(),
                    });
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        form::InviteMode, notify::testing::RecordingNotifier, store::testing::MemoryInviteStore,
    };

    fn plan(phones: &[&str]) -> DispatchPlan {
        DispatchPlan {
            doctor_name: "Jane Doe".into(),
            doctor_id: "jane-doe".into(),
            mode: InviteMode::Bulk,
            phones: phones.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_visit_url_and_text() {
        let url = visit_url("http://localhost:3000/", "jane-doe", "ab12cd");
        assert_eq!(url, "http://localhost:3000/visit/jane-doe?ref=ab12cd");
        assert_eq!(
            sms_text("Jane Doe", &url),
            "Hi! Dr Jane Doe has invited you to view their Medoh profile: http://localhost:3000/visit/jane-doe?ref=ab12cd"
        );
    }

    #[tokio::test]
    async fn test_bulk_in_order_with_fresh_codes() {
        let store = MemoryInviteStore::default();
        let notifier = RecordingNotifier::default();
        let d = Dispatcher::new(&store, &notifier, "http://localhost:3000");

        let report = d.run(&plan(&["5550000001", "5550000002", "5550000003"])).await;
        assert_eq!(report.sent.len(), 3);
        assert!(report.failed.is_empty());

        let msgs = notifier.messages();
        let phones: Vec<_> = msgs.iter().map(|m| m.phone.as_str()).collect();
        assert_eq!(phones, vec!["5550000001", "5550000002", "5550000003"]);
        for m in &msgs {
            assert!(m.sms_text.contains("/visit/jane-doe?ref="));
        }

        let rows = store.rows.lock().unwrap();
        assert!(rows.iter().all(|r| r.doctor_id == "jane-doe"));
    }

    #[tokio::test]
    async fn test_notify_failure_skips_store_and_continues() {
        let store = MemoryInviteStore::default();
        let notifier = RecordingNotifier::failing_for(&["5550000002"]);
        let d = Dispatcher::new(&store, &notifier, "http://localhost:3000");

        let report = d.run(&plan(&["5550000001", "5550000002", "5550000003"])).await;
        assert_eq!(report.sent.len(), 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].phone, "5550000002");
        assert_eq!(report.failed[0].stage, FailedStage::Notify);

        let stored: Vec<_> = store.rows.lock().unwrap().iter().map(|r| r.phone.clone()).collect();
        assert_eq!(stored, vec!["5550000001", "5550000003"]);
    }

    #[tokio::test]
    async fn test_store_failure_reported_after_text_went_out() {
        let store = MemoryInviteStore::failing_for(&["5550000001"]);
        let notifier = RecordingNotifier::default();
        let d = Dispatcher::new(&store, &notifier, "http://localhost:3000");

        let err = d.send_one("Jane Doe", "jane-doe", "5550000001").await.unwrap_err();
        assert!(matches!(err, InviteError::Store(_)));
        assert_eq!(notifier.messages().len(), 1);
    }
}
