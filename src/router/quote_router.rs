use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::handler::quote_handler::{
    add_quote_note_handler, delete_quote_handler, get_quote_handler, list_quotes_handler,
    quote_stats_handler, quote_whatsapp_handler, submit_quote_handler, update_quote_handler,
};
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};
use crate::service::quote_service::QuoteServiceImpl;

pub fn quote_router(
    service: Arc<QuoteServiceImpl>,
    admin_auth_state: Arc<AdminAuthState>,
) -> Router {
    // Public routes; the whatsapp link is used by the site itself
    let public = Router::new()
        .route("/api/quotes", post(submit_quote_handler))
        .route("/api/quotes/{id}/whatsapp", get(quote_whatsapp_handler));

    // Admin-protected routes
    let admin = Router::new()
        .route("/api/quotes", get(list_quotes_handler))
        .route("/api/quotes/stats/summary", get(quote_stats_handler))
        .route("/api/quotes/{id}", get(get_quote_handler))
        .route("/api/quotes/{id}", put(update_quote_handler))
        .route("/api/quotes/{id}", delete(delete_quote_handler))
        .route("/api/quotes/{id}/notes", post(add_quote_note_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth));

    public.merge(admin).with_state(service)
}
