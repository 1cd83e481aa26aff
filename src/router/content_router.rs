use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::handler::content_handler::{
    add_item_handler, delete_item_handler, get_section_handler, list_all_content_handler,
    list_content_handler, toggle_section_handler, update_item_handler, update_section_handler,
};
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};
use crate::service::content_service::ContentServiceImpl;

pub fn content_router(
    service: Arc<ContentServiceImpl>,
    admin_auth_state: Arc<AdminAuthState>,
) -> Router {
    // Public routes
    let public = Router::new()
        .route("/api/content", get(list_content_handler))
        .route("/api/content/{section}", get(get_section_handler));

    // Admin-protected routes
    let admin = Router::new()
        .route("/api/content/admin/all", get(list_all_content_handler))
        .route("/api/content/{section}", put(update_section_handler))
        .route("/api/content/{section}/toggle", put(toggle_section_handler))
        .route("/api/content/{section}/items", post(add_item_handler))
        .route(
            "/api/content/{section}/items/{item_id}",
            put(update_item_handler),
        )
        .route(
            "/api/content/{section}/items/{item_id}",
            delete(delete_item_handler),
        )
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth));

    public.merge(admin).with_state(service)
}
