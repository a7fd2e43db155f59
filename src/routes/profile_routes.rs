// src/routes/profile_routes.rs

use axum::{
    extract::{Path, Query},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{models::{AppState, DataResponse}, slug};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/doctor-profile/{id}", get(get_profile))
        .route("/visit/{doctor_slug}", get(visit))
}

struct DoctorProfile {
    id: &'static str,
    name: &'static str,
    bio: &'static str,
}

// Mock catalogue until profiles live in the db.
const PROFILES: &[DoctorProfile] = &[
    DoctorProfile {
        id: "dr-tracey-didinger",
        name: "Dr Tracey Didinger",
        bio: "Orthopedic Surgeon specializing in rotator cuff tears and shoulder injuries. Passionate about patient education and clear communication.",
    },
    DoctorProfile {
        id: "dr-jane-doe",
        name: "Dr Jane Doe",
        bio: "Board-certified Family Medicine physician with a focus on holistic patient care and preventive medicine. Dedicated to empowering patients with knowledge and compassion.",
    },
];

#[derive(Debug, Serialize)]
pub struct ProfileData {
    pub id: String,
    pub name: String,
    pub bio: String,
    pub verified: bool,
}

pub async fn get_profile(Path(id): Path<String>) -> Json<DataResponse<ProfileData>> {
    let data = match PROFILES.iter().find(|p| p.id == id) {
        Some(p) => ProfileData {
            id,
            name: p.name.to_string(),
            bio: p.bio.to_string(),
            verified: true,
        },
        None => ProfileData {
            id,
            name: "Unknown Doctor".to_string(),
            bio: "No profile information available.".to_string(),
            verified: false,
        },
    };

    Json(DataResponse::new(data))
}

#[derive(Debug, Deserialize)]
pub struct VisitQuery {
    #[serde(rename = "ref")]
    pub referral: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VisitData {
    pub doctor_slug: String,
    pub heading: String,
    pub referral_code: Option<String>,
}

/// Landing data for the link inside an invite text.
pub async fn visit(
    Path(doctor_slug): Path<String>,
    Query(q): Query<VisitQuery>,
) -> Json<DataResponse<VisitData>> {
    let heading = format!("Welcome to Dr {}'s Medoh Profile", slug::unslug(&doctor_slug));
    let referral_code = q.referral.filter(|r| !r.is_empty());

    Json(DataResponse::new(VisitData {
        doctor_slug,
        heading,
        referral_code,
    }))
}
