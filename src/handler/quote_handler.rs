use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::IntoResponse,
    Extension, Json,
};
use bson::oid::ObjectId;
use serde_json::json;
use tracing::info;
use validator::Validate;

use crate::dto::quote_dto::{
    AddNoteRequest, ListQuotesQuery, SubmitQuoteRequest, SubmitQuoteResponse, UpdateQuoteRequest,
};
use crate::handler::{actor, require_permission};
use crate::middlewares::admin_middleware::CurrentAdmin;
use crate::service::quote_service::{QuoteService, QuoteServiceImpl};
use crate::util::error::HandlerError;

fn parse_id(id: &str) -> Result<ObjectId, HandlerError> {
    ObjectId::parse_str(id).map_err(|_| HandlerError::bad_request("Invalid quote id"))
}

/// POST /api/quotes — public submission.
pub async fn submit_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Json(payload): Json<SubmitQuoteRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload
        .validate()
        .map_err(|e| HandlerError::validation(format!("Validation error: {}", e)))?;

    let (quote, whatsapp_url) = service.submit_quote(payload).await?;
    info!("Quote submitted: {:?}", quote.id);

    Ok(Json(SubmitQuoteResponse {
        success: true,
        message: "Quote request submitted successfully. Our team will contact you soon."
            .to_string(),
        quote_id: quote.id.map(|id| id.to_hex()).unwrap_or_default(),
        whatsapp_url,
    }))
}

/// GET /api/quotes — admin listing with filters and pagination.
pub async fn list_quotes_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Extension(admin): Extension<CurrentAdmin>,
    Query(query): Query<ListQuotesQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    require_permission(&admin, |p| p.can_manage_quotes, "manage quotes")?;
    let response = service.list_quotes(query).await?;
    Ok(Json(response))
}

/// GET /api/quotes/stats/summary
pub async fn quote_stats_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Extension(admin): Extension<CurrentAdmin>,
) -> Result<impl IntoResponse, HandlerError> {
    require_permission(&admin, |p| p.can_view_analytics, "view analytics")?;
    let stats = service.stats().await?;
    Ok(Json(stats))
}

/// GET /api/quotes/{id}
pub async fn get_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    require_permission(&admin, |p| p.can_manage_quotes, "manage quotes")?;
    let quote = service.get_quote(parse_id(&id)?).await?;
    Ok(Json(quote))
}

/// PUT /api/quotes/{id}
pub async fn update_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<UpdateQuoteRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    require_permission(&admin, |p| p.can_manage_quotes, "manage quotes")?;
    payload
        .validate()
        .map_err(|e| HandlerError::validation(format!("Validation error: {}", e)))?;

    let quote = service
        .update_quote(parse_id(&id)?, payload, &actor(&admin, &headers))
        .await?;
    Ok(Json(quote))
}

/// POST /api/quotes/{id}/notes
pub async fn add_quote_note_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<AddNoteRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    require_permission(&admin, |p| p.can_manage_quotes, "manage quotes")?;
    payload
        .validate()
        .map_err(|e| HandlerError::validation(format!("Validation error: {}", e)))?;

    let quote = service
        .add_note(parse_id(&id)?, payload.note, &actor(&admin, &headers))
        .await?;
    Ok(Json(quote))
}

/// DELETE /api/quotes/{id}
pub async fn delete_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, HandlerError> {
    require_permission(&admin, |p| p.can_manage_quotes, "manage quotes")?;
    service
        .delete_quote(parse_id(&id)?, &actor(&admin, &headers))
        .await?;
    Ok(Json(json!({ "success": true, "message": "Quote deleted" })))
}

/// GET /api/quotes/{id}/whatsapp — public; the site reopens a stored lead's
/// deep link from here.
pub async fn quote_whatsapp_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let (message, whatsapp_url) = service.whatsapp_link(parse_id(&id)?).await?;
    Ok(Json(json!({
        "success": true,
        "message": message,
        "whatsappUrl": whatsapp_url,
    })))
}
