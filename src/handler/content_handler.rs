use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
    Extension, Json,
};
use bson::oid::ObjectId;

use crate::dto::content_dto::{ContentListResponse, ItemRequest, SectionResponse, UpdateSectionRequest};
use crate::handler::{actor, require_permission};
use crate::middlewares::admin_middleware::CurrentAdmin;
use crate::model::content::SectionKey;
use crate::service::content_service::{ContentService, ContentServiceImpl};
use crate::util::error::HandlerError;

fn parse_section(section: &str) -> Result<SectionKey, HandlerError> {
    serde_json::from_value(serde_json::Value::String(section.to_string()))
        .map_err(|_| HandlerError::bad_request(format!("Unknown content section '{}'", section)))
}

fn parse_item_id(id: &str) -> Result<ObjectId, HandlerError> {
    ObjectId::parse_str(id).map_err(|_| HandlerError::bad_request("Invalid item id"))
}

/// GET /api/content — public, active sections only.
pub async fn list_content_handler(
    State(service): State<Arc<ContentServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let content = service.list_public().await?;
    Ok(Json(ContentListResponse { content }))
}

/// GET /api/content/{section} — public, active sections only.
pub async fn get_section_handler(
    State(service): State<Arc<ContentServiceImpl>>,
    Path(section): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let content = service.get_public_section(parse_section(&section)?).await?;
    Ok(Json(content))
}

/// GET /api/content/admin/all — every section, active or not.
pub async fn list_all_content_handler(
    State(service): State<Arc<ContentServiceImpl>>,
    Extension(admin): Extension<CurrentAdmin>,
) -> Result<impl IntoResponse, HandlerError> {
    require_permission(&admin, |p| p.can_manage_content, "manage content")?;
    let content = service.list_all().await?;
    Ok(Json(ContentListResponse { content }))
}

/// PUT /api/content/{section}
pub async fn update_section_handler(
    State(service): State<Arc<ContentServiceImpl>>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(section): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<UpdateSectionRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    require_permission(&admin, |p| p.can_manage_content, "manage content")?;
    let content = service
        .update_section(
            parse_section(&section)?,
            payload.content,
            &actor(&admin, &headers),
        )
        .await?;
    Ok(Json(SectionResponse {
        success: true,
        content,
    }))
}

/// PUT /api/content/{section}/toggle
pub async fn toggle_section_handler(
    State(service): State<Arc<ContentServiceImpl>>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(section): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, HandlerError> {
    require_permission(&admin, |p| p.can_manage_content, "manage content")?;
    let content = service
        .toggle_active(parse_section(&section)?, &actor(&admin, &headers))
        .await?;
    Ok(Json(SectionResponse {
        success: true,
        content,
    }))
}

/// POST /api/content/{section}/items
pub async fn add_item_handler(
    State(service): State<Arc<ContentServiceImpl>>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(section): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<ItemRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    require_permission(&admin, |p| p.can_manage_content, "manage content")?;
    let content = service
        .add_item(
            parse_section(&section)?,
            payload.item,
            &actor(&admin, &headers),
        )
        .await?;
    Ok(Json(SectionResponse {
        success: true,
        content,
    }))
}

/// PUT /api/content/{section}/items/{item_id}
pub async fn update_item_handler(
    State(service): State<Arc<ContentServiceImpl>>,
    Extension(admin): Extension<CurrentAdmin>,
    Path((section, item_id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(payload): Json<ItemRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    require_permission(&admin, |p| p.can_manage_content, "manage content")?;
    let content = service
        .update_item(
            parse_section(&section)?,
            parse_item_id(&item_id)?,
            payload.item,
            &actor(&admin, &headers),
        )
        .await?;
    Ok(Json(SectionResponse {
        success: true,
        content,
    }))
}

/// DELETE /api/content/{section}/items/{item_id}
pub async fn delete_item_handler(
    State(service): State<Arc<ContentServiceImpl>>,
    Extension(admin): Extension<CurrentAdmin>,
    Path((section, item_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, HandlerError> {
    require_permission(&admin, |p| p.can_manage_content, "manage content")?;
    let content = service
        .delete_item(
            parse_section(&section)?,
            parse_item_id(&item_id)?,
            &actor(&admin, &headers),
        )
        .await?;
    Ok(Json(SectionResponse {
        success: true,
        content,
    }))
}
