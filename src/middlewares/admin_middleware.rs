use std::sync::Arc;

use axum::{
    body::Body, extract::State, http::Request, http::StatusCode, middleware::Next,
    response::Response,
};
use bson::oid::ObjectId;

use crate::model::admin::{Admin, Permissions};
use crate::repository::admin_repo::AdminRepository;
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};

/// The authenticated account, attached to request extensions by
/// [`admin_auth`]. Loaded fresh from the database on every request so that
/// deactivation and permission edits take effect immediately.
#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    pub id: ObjectId,
    pub username: String,
    pub permissions: Permissions,
}

impl CurrentAdmin {
    fn from_admin(admin: &Admin, id: ObjectId) -> Self {
        CurrentAdmin {
            id,
            username: admin.username.clone(),
            permissions: admin.permissions,
        }
    }
}

pub struct AdminAuthState {
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
    pub admin_repo: Arc<dyn AdminRepository>,
}

pub async fn admin_auth(
    State(state): State<Arc<AdminAuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = state
        .jwt_utils
        .extract_token_from_header(auth_header)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;
    let claims = state
        .jwt_utils
        .validate_token(&token)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let id = ObjectId::parse_str(&claims.sub).map_err(|_| StatusCode::UNAUTHORIZED)?;
    let admin = state
        .admin_repo
        .get_by_id(id)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    // A token outlives neither deactivation nor deletion
    if !admin.is_active {
        return Err(StatusCode::UNAUTHORIZED);
    }

    req.extensions_mut()
        .insert(CurrentAdmin::from_admin(&admin, id));

    Ok(next.run(req).await)
}
