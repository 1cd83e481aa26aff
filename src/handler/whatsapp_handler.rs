use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use validator::Validate;

use crate::config::WhatsappConfig;
use crate::dto::quote_dto::SubmitQuoteRequest;
use crate::dto::whatsapp_dto::{
    BusinessStatusResponse, GenerateMessageRequest, GenerateMessageResponse, QuickLinksResponse,
    SendQuoteResponse,
};
use crate::service::quote_service::{QuoteService, QuoteServiceImpl, WhatsappSubmit};
use crate::util::error::HandlerError;
use crate::util::whatsapp;
use crate::util::whatsapp::enum_label;

#[derive(Clone)]
pub struct WhatsappState {
    pub config: Arc<WhatsappConfig>,
    pub quote_service: Arc<QuoteServiceImpl>,
}

/// POST /api/whatsapp/send-quote — stores the lead (flagged as sent via
/// WhatsApp) and returns the deep link. A resubmission inside the duplicate
/// window answers 409 with the existing lead's link.
pub async fn send_quote_handler(
    State(state): State<WhatsappState>,
    Json(payload): Json<SubmitQuoteRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload
        .validate()
        .map_err(|e| HandlerError::validation(format!("Validation error: {}", e)))?;

    match state.quote_service.submit_via_whatsapp(payload).await? {
        WhatsappSubmit::Created {
            quote,
            whatsapp_url,
        } => Ok((
            StatusCode::OK,
            Json(SendQuoteResponse {
                success: true,
                message: "Quote request saved. Opening WhatsApp...".to_string(),
                quote_id: quote.id.map(|id| id.to_hex()),
                existing_quote_id: None,
                whatsapp_url,
            }),
        )),
        WhatsappSubmit::Duplicate {
            existing_id,
            whatsapp_url,
        } => Ok((
            StatusCode::CONFLICT,
            Json(SendQuoteResponse {
                success: false,
                message: "A quote request with this phone number was already submitted \
                          in the last 24 hours."
                    .to_string(),
                quote_id: None,
                existing_quote_id: Some(existing_id.to_hex()),
                whatsapp_url,
            }),
        )),
    }
}

/// POST /api/whatsapp/generate-message — public, stateless.
pub async fn generate_message_handler(
    State(state): State<WhatsappState>,
    Json(payload): Json<GenerateMessageRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload
        .validate()
        .map_err(|e| HandlerError::validation(format!("Validation error: {}", e)))?;

    let fields = whatsapp::MessageFields {
        name: payload.name,
        phone: payload.phone,
        email: payload.email,
        location: enum_label(&payload.location),
        property_type: payload.property_type.as_ref().map(enum_label),
        property_size: payload.property_size.as_ref().map(enum_label),
        services: payload.services.iter().map(enum_label).collect(),
        system_size: payload.system_size.as_ref().map(enum_label),
        budget: payload.budget.as_ref().map(enum_label),
        timeline: payload.timeline.as_ref().map(enum_label),
        message: payload.message,
    };

    let message = whatsapp::build_message(&fields, &payload.service_type);
    let whatsapp_url = whatsapp::deep_link(&state.config.number, &message);

    Ok(Json(GenerateMessageResponse {
        success: true,
        message,
        whatsapp_url,
    }))
}

/// GET /api/whatsapp/quick-links — public.
pub async fn quick_links_handler(State(state): State<WhatsappState>) -> impl IntoResponse {
    Json(QuickLinksResponse {
        links: whatsapp::quick_links(&state.config.number),
    })
}

/// GET /api/whatsapp/status — whether staff are inside business hours.
pub async fn business_status_handler() -> impl IntoResponse {
    Json(BusinessStatusResponse {
        available: whatsapp::is_business_hours(Utc::now()),
        hours: "Mon-Sat 9:00-18:00",
        timezone: "Asia/Kolkata",
    })
}
