use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::handler::admin_handler::{
    activity_log_handler, change_password_handler, create_admin_handler, dashboard_handler,
    delete_admin_handler, list_admins_handler, login_handler, logout_handler, me_handler,
    update_admin_handler, update_profile_handler,
};
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};
use crate::service::admin_service::AdminServiceImpl;

pub fn admin_router(
    service: Arc<AdminServiceImpl>,
    admin_auth_state: Arc<AdminAuthState>,
) -> Router {
    // Public route
    let public = Router::new().route("/api/admin/login", post(login_handler));

    // Authenticated routes
    let protected = Router::new()
        .route("/api/admin/logout", post(logout_handler))
        .route("/api/admin/me", get(me_handler))
        .route("/api/admin/activity", get(activity_log_handler))
        .route("/api/admin/password", put(change_password_handler))
        .route("/api/admin/profile", put(update_profile_handler))
        .route("/api/admin/dashboard", get(dashboard_handler))
        .route("/api/admin/users", get(list_admins_handler))
        .route("/api/admin/users", post(create_admin_handler))
        .route("/api/admin/users/{id}", put(update_admin_handler))
        .route("/api/admin/users/{id}", delete(delete_admin_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth));

    public.merge(protected).with_state(service)
}
