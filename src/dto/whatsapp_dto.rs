use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::quote_dto::validate_indian_phone;
use crate::model::quote::{
    Budget, Location, PropertySize, PropertyType, ServiceKind, SystemSize, Timeline,
};
use crate::util::whatsapp::QuickLink;

fn default_service_type() -> String {
    "General Inquiry".to_string()
}

/// Ad-hoc message generation from form fields, without storing a lead.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMessageRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(custom(function = "validate_indian_phone"))]
    pub phone: String,

    #[validate(email)]
    pub email: Option<String>,

    pub location: Location,

    pub property_type: Option<PropertyType>,
    pub property_size: Option<PropertySize>,

    #[serde(default)]
    pub services: Vec<ServiceKind>,
    pub system_size: Option<SystemSize>,
    pub budget: Option<Budget>,
    pub timeline: Option<Timeline>,

    #[validate(length(max = 1000))]
    pub message: Option<String>,

    #[serde(default = "default_service_type")]
    pub service_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMessageResponse {
    pub success: bool,
    pub message: String,
    pub whatsapp_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendQuoteResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_quote_id: Option<String>,
    pub whatsapp_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickLinksResponse {
    pub links: Vec<QuickLink>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessStatusResponse {
    pub available: bool,
    pub hours: &'static str,
    pub timezone: &'static str,
}
