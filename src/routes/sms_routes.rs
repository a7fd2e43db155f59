// src/routes/sms_routes.rs

use axum::{Json, Router, routing::post};

use crate::{
    models::AppState,
    notify::{SmsAck, SmsPayload, log_mock_sms},
};

pub fn router() -> Router<AppState> {
    Router::new().route("/mock-sms", post(mock_sms))
}

/// Stand-in SMS gateway: prints the message and reports success.
pub async fn mock_sms(Json(req): Json<SmsPayload>) -> Json<SmsAck> {
    log_mock_sms(&req.phone, &req.sms_text);
    Json(SmsAck { success: true })
}
