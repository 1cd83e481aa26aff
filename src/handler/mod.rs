pub mod admin_handler;
pub mod content_handler;
pub mod quote_handler;
pub mod whatsapp_handler;

use axum::http::HeaderMap;

use crate::middlewares::admin_middleware::CurrentAdmin;
use crate::service::admin_service::{Actor, RequestContext};
use crate::util::error::{HandlerError, HandlerErrorKind};

/// Client address and agent for the activity log. Behind a proxy the first
/// x-forwarded-for hop is the caller.
pub(crate) fn request_context(headers: &HeaderMap) -> RequestContext {
    let ip_address = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .unwrap_or("unknown")
        .trim()
        .to_string();
    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();
    RequestContext {
        ip_address,
        user_agent,
    }
}

/// The authenticated admin as the actor of a mutation.
pub(crate) fn actor(admin: &CurrentAdmin, headers: &HeaderMap) -> Actor {
    Actor {
        id: admin.id,
        username: admin.username.clone(),
        context: request_context(headers),
    }
}

/// Permission gate used by admin handlers. `flag` picks the permission bit
/// off the authenticated account.
pub(crate) fn require_permission(
    admin: &CurrentAdmin,
    flag: impl Fn(&crate::model::admin::Permissions) -> bool,
    what: &str,
) -> Result<(), HandlerError> {
    if flag(&admin.permissions) {
        Ok(())
    } else {
        Err(HandlerError::new(
            HandlerErrorKind::Forbidden,
            format!("You do not have permission to {}", what),
        ))
    }
}
