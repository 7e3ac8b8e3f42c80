//! Profile HTTP handlers.
//!
//! ```text
//! GET  /profile
//! POST /profile
//! PUT  /profile
//! POST /profile/level-up
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Profile;
use crate::domain::ports::{CreateProfileRequest, UpdateProfileRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request payload for creating the profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileBody {
    #[serde(default)]
    #[schema(example = "ada")]
    pub username: Option<String>,
}

/// Request payload for updating the profile. Absent fields are left as-is.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileBody {
    #[serde(default)]
    pub username: Option<String>,
}

/// Response payload for the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub username: String,
    #[schema(example = 1, minimum = 1)]
    pub level: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(value: Profile) -> Self {
        Self {
            id: value.id().to_string(),
            username: value.username().as_str().to_owned(),
            level: value.level().value(),
            created_at: value.created_at(),
            updated_at: value.updated_at(),
        }
    }
}

/// Fetch the profile.
#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "The profile", body = ProfileResponse),
        (status = 404, description = "No profile yet", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "getProfile"
)]
#[get("/profile")]
pub async fn get_profile(state: web::Data<HttpState>) -> ApiResult<web::Json<ProfileResponse>> {
    let profile = state.profile_query.get().await?;
    Ok(web::Json(ProfileResponse::from(profile)))
}

/// Create the profile at level one.
#[utoipa::path(
    post,
    path = "/profile",
    request_body = CreateProfileBody,
    responses(
        (status = 201, description = "Created profile", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Profile already exists", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "createProfile"
)]
#[post("/profile")]
pub async fn create_profile(
    state: web::Data<HttpState>,
    payload: web::Json<CreateProfileBody>,
) -> ApiResult<HttpResponse> {
    let username = payload.into_inner().username.unwrap_or_default();
    let profile = state
        .profile
        .create(CreateProfileRequest { username })
        .await?;
    Ok(HttpResponse::Created().json(ProfileResponse::from(profile)))
}

/// Update the profile.
#[utoipa::path(
    put,
    path = "/profile",
    request_body = UpdateProfileBody,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "No profile yet", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "updateProfile"
)]
#[put("/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    payload: web::Json<UpdateProfileBody>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let UpdateProfileBody { username } = payload.into_inner();
    let profile = state
        .profile
        .update(UpdateProfileRequest { username })
        .await?;
    Ok(web::Json(ProfileResponse::from(profile)))
}

/// Raise the profile level by one.
#[utoipa::path(
    post,
    path = "/profile/level-up",
    responses(
        (status = 200, description = "Levelled-up profile", body = ProfileResponse),
        (status = 404, description = "No profile yet", body = ErrorSchema),
        (status = 409, description = "Level is already at its maximum", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "levelUpProfile"
)]
#[post("/profile/level-up")]
pub async fn level_up(state: web::Data<HttpState>) -> ApiResult<web::Json<ProfileResponse>> {
    let profile = state.profile.level_up().await?;
    Ok(web::Json(ProfileResponse::from(profile)))
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
