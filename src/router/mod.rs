pub mod admin_router;
pub mod content_router;
pub mod quote_router;
pub mod whatsapp_router;
