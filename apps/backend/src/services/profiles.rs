use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;
use tracing::info;

use super::{optional_text, required_text};
use crate::db::{degradable_read, require_db};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::profiles::{self, Profile, ProfileCreate, ProfileUpdate};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub profile: Option<Profile>,
    pub degraded: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewProfile {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

/// Partial update. Nullable fields distinguish "absent" (keep) from
/// an explicit `null` (clear).
#[derive(Debug, Default, Deserialize)]
pub struct ProfilePatch {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default, with = "double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub address: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub city: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub country: Option<Option<String>>,
}

pub async fn get(state: &AppState, user_id: &str) -> Result<ProfileView, AppError> {
    let found = degradable_read(state.db(), |conn| profiles::find_for_user(conn, user_id)).await?;
    Ok(match found {
        Some(profile) => ProfileView {
            profile,
            degraded: false,
        },
        None => ProfileView {
            profile: None,
            degraded: true,
        },
    })
}

pub async fn create(
    state: &AppState,
    user_id: &str,
    input: NewProfile,
) -> Result<Profile, AppError> {
    let full_name = required_text(input.full_name, "full_name")?;
    let db = require_db(state)?;

    if profiles::find_for_user(db, user_id).await?.is_some() {
        return Err(AppError::conflict(
            ErrorCode::ProfileExists,
            "A profile already exists for this user",
        ));
    }

    let profile = profiles::create(
        db,
        ProfileCreate {
            user_id: user_id.to_string(),
            full_name,
            phone: optional_text(input.phone),
            address: optional_text(input.address),
            city: optional_text(input.city),
            country: optional_text(input.country),
        },
    )
    .await?;
    info!(user_id, profile_id = %profile.id, "profile created");
    Ok(profile)
}

pub async fn update(
    state: &AppState,
    user_id: &str,
    patch: ProfilePatch,
) -> Result<Profile, AppError> {
    let full_name = match patch.full_name {
        Some(name) => Some(required_text(Some(name), "full_name")?),
        None => None,
    };
    let db = require_db(state)?;

    let dto = ProfileUpdate {
        full_name,
        phone: patch.phone.map(optional_text),
        address: patch.address.map(optional_text),
        city: patch.city.map(optional_text),
        country: patch.country.map(optional_text),
    };
    Ok(profiles::update_for_user(db, user_id, dto).await?)
}

pub async fn delete(state: &AppState, user_id: &str) -> Result<(), AppError> {
    let db = require_db(state)?;
    profiles::delete_for_user(db, user_id).await?;
    info!(user_id, "profile deleted");
    Ok(())
}
