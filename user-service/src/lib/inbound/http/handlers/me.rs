use axum::extract::State;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::UserData;
use crate::domain::auth::models::UpdateProfileCommand;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn get_me(Extension(current): Extension<CurrentUser>) -> Json<UserData> {
    Json(UserData::from(&current.0))
}

pub async fn update_me(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<UserData>, ApiError> {
    let user = state
        .auth_service
        .update_profile(current.0.id, body.into_command())
        .await?;

    Ok(Json(UserData::from(&user)))
}

/// HTTP request body for a partial profile update; absent fields are left
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    address: Option<String>,
}

impl UpdateProfileRequest {
    fn into_command(self) -> UpdateProfileCommand {
        UpdateProfileCommand {
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            address: self.address,
        }
    }
}
