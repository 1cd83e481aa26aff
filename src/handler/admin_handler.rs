use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
    Extension, Json,
};
use bson::oid::ObjectId;
use serde_json::json;
use validator::Validate;

use crate::dto::admin_dto::{
    ActivityLogResponse, ChangePasswordRequest, CreateAdminRequest, LoginRequest,
    UpdateAdminRequest, UpdateProfileRequest,
};
use crate::handler::{request_context, require_permission};
use crate::middlewares::admin_middleware::CurrentAdmin;
use crate::service::admin_service::{AdminService, AdminServiceImpl};
use crate::util::error::HandlerError;

fn parse_id(id: &str) -> Result<ObjectId, HandlerError> {
    ObjectId::parse_str(id).map_err(|_| HandlerError::bad_request("Invalid admin id"))
}

/// POST /api/admin/login — public.
pub async fn login_handler(
    State(service): State<Arc<AdminServiceImpl>>,
    headers: HeaderMap,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload
        .validate()
        .map_err(|e| HandlerError::validation(format!("Validation error: {}", e)))?;

    let response = service.login(payload, request_context(&headers)).await?;
    Ok(Json(response))
}

/// POST /api/admin/logout — tokens are stateless; this records the activity
/// entry and the client discards its token.
pub async fn logout_handler(
    State(service): State<Arc<AdminServiceImpl>>,
    Extension(admin): Extension<CurrentAdmin>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, HandlerError> {
    service.logout(admin.id, request_context(&headers)).await?;
    Ok(Json(
        json!({ "success": true, "message": "Logged out successfully" }),
    ))
}

/// GET /api/admin/me
pub async fn me_handler(
    State(service): State<Arc<AdminServiceImpl>>,
    Extension(admin): Extension<CurrentAdmin>,
) -> Result<impl IntoResponse, HandlerError> {
    let view = service.get_admin(admin.id).await?;
    Ok(Json(view))
}

/// GET /api/admin/activity — the caller's own activity log, newest first.
pub async fn activity_log_handler(
    State(service): State<Arc<AdminServiceImpl>>,
    Extension(admin): Extension<CurrentAdmin>,
) -> Result<impl IntoResponse, HandlerError> {
    let activities = service.activity_log(admin.id).await?;
    Ok(Json(ActivityLogResponse { activities }))
}

/// PUT /api/admin/password
pub async fn change_password_handler(
    State(service): State<Arc<AdminServiceImpl>>,
    Extension(admin): Extension<CurrentAdmin>,
    headers: HeaderMap,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload
        .validate()
        .map_err(|e| HandlerError::validation(format!("Validation error: {}", e)))?;

    service
        .change_password(admin.id, payload, request_context(&headers))
        .await?;
    Ok(Json(
        json!({ "success": true, "message": "Password updated" }),
    ))
}

/// PUT /api/admin/profile
pub async fn update_profile_handler(
    State(service): State<Arc<AdminServiceImpl>>,
    Extension(admin): Extension<CurrentAdmin>,
    headers: HeaderMap,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload
        .validate()
        .map_err(|e| HandlerError::validation(format!("Validation error: {}", e)))?;

    let view = service
        .update_profile(admin.id, payload, request_context(&headers))
        .await?;
    Ok(Json(view))
}

/// GET /api/admin/dashboard
pub async fn dashboard_handler(
    State(service): State<Arc<AdminServiceImpl>>,
    Extension(admin): Extension<CurrentAdmin>,
) -> Result<impl IntoResponse, HandlerError> {
    require_permission(&admin, |p| p.can_view_analytics, "view analytics")?;
    let stats = service.dashboard_stats().await?;
    Ok(Json(stats))
}

/// GET /api/admin/users
pub async fn list_admins_handler(
    State(service): State<Arc<AdminServiceImpl>>,
    Extension(admin): Extension<CurrentAdmin>,
) -> Result<impl IntoResponse, HandlerError> {
    let admins = service.list_admins(admin.id).await?;
    Ok(Json(json!({ "admins": admins })))
}

/// POST /api/admin/users
pub async fn create_admin_handler(
    State(service): State<Arc<AdminServiceImpl>>,
    Extension(admin): Extension<CurrentAdmin>,
    headers: HeaderMap,
    Json(payload): Json<CreateAdminRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload
        .validate()
        .map_err(|e| HandlerError::validation(format!("Validation error: {}", e)))?;

    let view = service
        .create_admin(admin.id, payload, request_context(&headers))
        .await?;
    Ok(Json(view))
}

/// PUT /api/admin/users/{id}
pub async fn update_admin_handler(
    State(service): State<Arc<AdminServiceImpl>>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<UpdateAdminRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload
        .validate()
        .map_err(|e| HandlerError::validation(format!("Validation error: {}", e)))?;

    let view = service
        .update_admin(admin.id, parse_id(&id)?, payload, request_context(&headers))
        .await?;
    Ok(Json(view))
}

/// DELETE /api/admin/users/{id}
pub async fn delete_admin_handler(
    State(service): State<Arc<AdminServiceImpl>>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, HandlerError> {
    service
        .delete_admin(admin.id, parse_id(&id)?, request_context(&headers))
        .await?;
    Ok(Json(
        json!({ "success": true, "message": "Admin account deleted" }),
    ))
}
