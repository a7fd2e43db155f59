// src/routes/invite_routes.rs

use axum::{
    extract::{Multipart, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{
    csv_import,
    dispatch::{Dispatcher, FailedInvite},
    error::ApiError,
    form::{Confirmation, FormError, InviteForm, InviteMode},
    models::{AppState, DataResponse, HistoryEntry},
    phone,
};

// --------------------------
// Router
// --------------------------

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/invites", get(list_invites).post(send_invites))
        .route("/invites/bulk", post(send_bulk_upload))
        .route("/invites/csv", post(preview_csv))
        .route("/invites/form", post(check_form))
        .route("/phone/format", get(format_phone))
}

// --------------------------
// History
// --------------------------

async fn load_history(state: &AppState) -> Result<Vec<HistoryEntry>, ApiError> {
    let rows = state.store.list_recent().await?;
    Ok(rows.into_iter().map(HistoryEntry::from).collect())
}

pub async fn list_invites(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<HistoryEntry>>>, ApiError> {
    Ok(Json(DataResponse::new(load_history(&state).await?)))
}

// --------------------------
// Send (single or bulk)
// --------------------------

#[derive(Debug, Deserialize)]
pub struct SendInvitesRequest {
    pub doctor_name: String,
    pub phone: Option<String>,
    /// Batch from `/invites/csv`; when non-empty it replaces `phone`.
    pub phones: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct SendInvitesData {
    #[serde(flatten)]
    pub confirmation: Confirmation,
    pub doctor_id: String,
    pub failed: Vec<FailedInvite>,
    /// Refreshed history; absent if the re-read failed after sending.
    pub history: Option<Vec<HistoryEntry>>,
}

pub async fn send_invites(
    State(state): State<AppState>,
    Json(req): Json<SendInvitesRequest>,
) -> Result<Json<DataResponse<SendInvitesData>>, ApiError> {
    let mut form = InviteForm::new();
    form.set_doctor_name(req.doctor_name);
    form.set_phone(req.phone.as_deref().unwrap_or(""));
    form.load_csv(req.phones.unwrap_or_default());

    dispatch_form(&state, form).await
}

pub async fn send_bulk_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<DataResponse<SendInvitesData>>, ApiError> {
    let upload = read_upload(multipart).await?;
    let phones = csv_import::import_phones(upload.file_bytes()?)?;
    if phones.is_empty() {
        return Err(FormError::EmptyBatch.into());
    }

    let mut form = InviteForm::new();
    form.set_doctor_name(upload.doctor_name.unwrap_or_default());
    form.load_csv(phones);

    dispatch_form(&state, form).await
}

async fn dispatch_form(
    state: &AppState,
    mut form: InviteForm,
) -> Result<Json<DataResponse<SendInvitesData>>, ApiError> {
    let plan = form.validate()?;
    form.set_loading(true);

    let dispatcher = Dispatcher::new(
        state.store.as_ref(),
        state.notifier.as_ref(),
        &state.public_base_url,
    );

    let (confirmation, failed) = match plan.mode {
        InviteMode::Single => {
            dispatcher
                .send_one(&plan.doctor_name, &plan.doctor_id, &plan.phones[0])
                .await?;
            (form.confirm(InviteMode::Single, 1), Vec::new())
        }
        InviteMode::Bulk => {
            let report = dispatcher.run(&plan).await;
            tracing::info!(
                doctor_id = %plan.doctor_id,
                sent = report.sent.len(),
                failed = report.failed.len(),
                "bulk invite finished"
            );
            (form.confirm(InviteMode::Bulk, report.sent.len()), report.failed)
        }
    };

    let history = match load_history(state).await {
        Ok(h) => Some(h),
        Err(e) => {
            tracing::warn!("history refresh failed after dispatch: {e:?}");
            None
        }
    };

    Ok(Json(DataResponse::new(SendInvitesData {
        confirmation,
        doctor_id: plan.doctor_id,
        failed,
        history,
    })))
}

// --------------------------
// CSV preview
// --------------------------

#[derive(Debug, Serialize)]
pub struct CsvPreviewData {
    pub phones: Vec<String>,
    pub count: usize,
}

pub async fn preview_csv(multipart: Multipart) -> Result<Json<DataResponse<CsvPreviewData>>, ApiError> {
    let upload = read_upload(multipart).await?;
    let phones = csv_import::import_phones(upload.file_bytes()?)?;

    Ok(Json(DataResponse::new(CsvPreviewData {
        count: phones.len(),
        phones,
    })))
}

struct Upload {
    doctor_name: Option<String>,
    file: Option<Vec<u8>>,
}

impl Upload {
    fn file_bytes(&self) -> Result<&[u8], ApiError> {
        self.file
            .as_deref()
            .ok_or_else(|| ApiError::validation("file is required"))
    }
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, ApiError> {
    let mut upload = Upload {
        doctor_name: None,
        file: None,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest("INVALID_UPLOAD", e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "doctor_name" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest("INVALID_UPLOAD", e.to_string()))?;
                upload.doctor_name = Some(text);
            }
            "file" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest("INVALID_UPLOAD", e.to_string()))?;
                upload.file = Some(bytes.to_vec());
            }
            _ => {}
        }
    }

    Ok(upload)
}

// --------------------------
// Form state
// --------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FormStateRequest {
    pub doctor_name: String,
    pub phone: String,
    pub csv_phones: Vec<String>,
    pub loading: bool,
}

#[derive(Debug, Serialize)]
pub struct FormStateData {
    pub doctor_name_valid: bool,
    pub doctor_id: String,
    pub phone_formatted: String,
    pub phone_valid: bool,
    pub mode: InviteMode,
    pub batch_size: usize,
    pub can_submit: bool,
    pub submit_label: String,
    pub error: Option<String>,
}

pub async fn check_form(Json(req): Json<FormStateRequest>) -> Json<DataResponse<FormStateData>> {
    let mut form = InviteForm::new();
    form.set_doctor_name(req.doctor_name);
    form.set_phone(&req.phone);
    form.load_csv(req.csv_phones);
    form.set_loading(req.loading);

    let error = form.validate().err().map(|e| e.to_string());

    Json(DataResponse::new(FormStateData {
        doctor_name_valid: form.doctor_name_valid(),
        doctor_id: form.doctor_id(),
        phone_formatted: form.phone().to_string(),
        phone_valid: form.phone_valid(),
        mode: form.mode(),
        batch_size: form.csv_phones().len(),
        can_submit: form.can_submit(),
        submit_label: form.submit_label(),
        error,
    }))
}

// --------------------------
// Phone formatting
// --------------------------

#[derive(Debug, Deserialize)]
pub struct FormatQuery {
    pub raw: String,
}

#[derive(Debug, Serialize)]
pub struct FormatData {
    pub as_you_type: String,
    pub display: String,
    pub valid: bool,
}

pub async fn format_phone(Query(q): Query<FormatQuery>) -> Json<DataResponse<FormatData>> {
    Json(DataResponse::new(FormatData {
        as_you_type: phone::format_as_you_type(&q.raw),
        display: phone::format_display(&q.raw),
        valid: phone::is_valid(&q.raw),
    }))
}
