// src/form.rs
//
// Server-side model of the invite form. The browser used to grey out the
// submit button; the API applies the same rules through `validate`.

use serde::Serialize;
use thiserror::Error;

use crate::{phone, slug};

pub const MIN_DOCTOR_NAME_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InviteMode {
    Single,
    Bulk,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("doctor name must be at least 2 letters (letters and spaces only)")]
    InvalidDoctorName,
    #[error("phone number must have exactly 10 digits")]
    InvalidPhone,
    #[error("a send is already in progress")]
    Busy,
    #[error("CSV contains no valid 10-digit phone numbers")]
    EmptyBatch,
}

/// Who to text, after validation.
#[derive(Debug, Clone)]
pub struct DispatchPlan {
    pub doctor_name: String,
    pub doctor_id: String,
    pub mode: InviteMode,
    pub phones: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    pub mode: InviteMode,
    pub headline: String,
    pub message: String,
    pub sent: usize,
    /// Number as the doctor typed it; single mode only.
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct InviteForm {
    doctor_name: String,
    phone: String,
    csv_phones: Vec<String>,
    /// A batch was handed in, even if none of it survived filtering.
    batch_loaded: bool,
    loading: bool,
}

pub fn is_valid_doctor_name(name: &str) -> bool {
    let name = name.trim();
    name.chars().count() >= MIN_DOCTOR_NAME_LEN
        && name.chars().all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
}

impl InviteForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_doctor_name(&mut self, name: impl Into<String>) {
        self.doctor_name = name.into();
    }

    /// Stores the number in as-you-type format, like the input field did.
    pub fn set_phone(&mut self, raw: &str) {
        self.phone = phone::format_as_you_type(raw);
    }

    /// Replace the pending batch. Entries without exactly 10 digits are
    /// dropped, the same rule the CSV importer applies.
    pub fn load_csv(&mut self, phones: Vec<String>) {
        self.batch_loaded = !phones.is_empty();
        self.csv_phones = phones.iter().filter_map(|p| phone::normalize(p)).collect();
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn csv_phones(&self) -> &[String] {
        &self.csv_phones
    }

    pub fn doctor_name_valid(&self) -> bool {
        is_valid_doctor_name(&self.doctor_name)
    }

    pub fn phone_valid(&self) -> bool {
        phone::is_valid(&self.phone)
    }

    pub fn doctor_id(&self) -> String {
        slug::doctor_id(&self.doctor_name)
    }

    /// A loaded CSV batch wins over the single phone field.
    pub fn mode(&self) -> InviteMode {
        if !self.batch_loaded {
            InviteMode::Single
        } else {
            InviteMode::Bulk
        }
    }

    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn submit_label(&self) -> String {
        if self.loading {
            "Sending...".to_string()
        } else if self.mode() == InviteMode::Bulk {
            format!("Send Invites ({})", self.csv_phones.len())
        } else {
            "Send Invite".to_string()
        }
    }

    pub fn validate(&self) -> Result<DispatchPlan, FormError> {
        if self.loading {
            return Err(FormError::Busy);
        }
        if !self.doctor_name_valid() {
            return Err(FormError::InvalidDoctorName);
        }

        let mode = self.mode();
        let phones = match mode {
            InviteMode::Bulk if self.csv_phones.is_empty() => return Err(FormError::EmptyBatch),
            InviteMode::Bulk => self.csv_phones.clone(),
            InviteMode::Single => {
                vec![phone::normalize(&self.phone).ok_or(FormError::InvalidPhone)?]
            }
        };

        Ok(DispatchPlan {
            doctor_name: self.doctor_name.clone(),
            doctor_id: self.doctor_id(),
            mode,
            phones,
        })
    }

    /// Finish a dispatch that delivered `sent` invites: the batch is consumed
    /// and the confirmation for the client is produced.
    pub fn confirm(&mut self, mode: InviteMode, sent: usize) -> Confirmation {
        let confirmation = match mode {
            InviteMode::Single => Confirmation {
                mode,
                headline: "Invite sent!".to_string(),
                message: format!("A link to your profile was sent to {}.", self.phone),
                sent,
                phone: Some(self.phone.clone()),
            },
            InviteMode::Bulk if sent == 0 => Confirmation {
                mode,
                headline: "No invites sent".to_string(),
                message: "None of the uploaded numbers could be invited.".to_string(),
                sent,
                phone: None,
            },
            InviteMode::Bulk => Confirmation {
                mode,
                headline: "Invites sent!".to_string(),
                message: format!(
                    "A link to your profile was sent to {sent} number{}.",
                    if sent == 1 { "" } else { "s" }
                ),
                sent,
                phone: None,
            },
        };

        self.csv_phones.clear();
        self.batch_loaded = false;
        self.loading = false;
        confirmation
    }
}
