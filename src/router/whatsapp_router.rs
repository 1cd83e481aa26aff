use axum::{
    routing::{get, post},
    Router,
};

use crate::handler::whatsapp_handler::{
    business_status_handler, generate_message_handler, quick_links_handler, send_quote_handler,
    WhatsappState,
};

/// All WhatsApp routes are public.
pub fn whatsapp_router(state: WhatsappState) -> Router {
    Router::new()
        .route("/api/whatsapp/send-quote", post(send_quote_handler))
        .route("/api/whatsapp/generate-message", post(generate_message_handler))
        .route("/api/whatsapp/quick-links", get(quick_links_handler))
        .route("/api/whatsapp/status", get(business_status_handler))
        .with_state(state)
}
