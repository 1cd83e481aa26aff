use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::admin::{ActivityEntry, Admin, AdminProfile, AdminRole, Permissions};

/// Login with either username or email in the identifier field.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 100))]
    pub username: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub admin: AdminView,
}

/// Admin account as exposed over the API. The password hash and lockout
/// bookkeeping never leave the server.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminView {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: AdminRole,
    pub permissions: Permissions,
    pub profile: AdminProfile,
    pub full_name: String,
    pub is_active: bool,
    pub last_login: Option<String>,
    pub created_at: Option<String>,
}

impl From<&Admin> for AdminView {
    fn from(admin: &Admin) -> Self {
        AdminView {
            id: admin
                .id
                .map(|id| id.to_hex())
                .unwrap_or_default(),
            username: admin.username.clone(),
            email: admin.email.clone(),
            role: admin.role,
            permissions: admin.permissions,
            profile: admin.profile.clone(),
            full_name: admin.full_name(),
            is_active: admin.is_active,
            last_login: admin.last_login.clone(),
            created_at: admin.created_at.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 128))]
    pub password: String,

    #[serde(default)]
    pub role: AdminRole,

    /// Omitted means role defaults apply.
    pub permissions: Option<Permissions>,

    #[serde(default)]
    pub profile: AdminProfile,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdminRequest {
    #[validate(email)]
    pub email: Option<String>,
    pub role: Option<AdminRole>,
    pub permissions: Option<Permissions>,
    pub profile: Option<AdminProfile>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, max = 128))]
    pub current_password: String,

    #[validate(length(min = 6, max = 128))]
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(max = 50))]
    pub first_name: Option<String>,
    #[validate(length(max = 50))]
    pub last_name: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(length(max = 500))]
    pub avatar: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogResponse {
    pub activities: Vec<ActivityEntry>,
}
