pub mod admin_dto;
pub mod content_dto;
pub mod quote_dto;
pub mod whatsapp_dto;
