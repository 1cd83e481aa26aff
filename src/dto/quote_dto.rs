use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::model::quote::{
    Budget, Location, Priority, PropertySize, PropertyType, Quote, QuoteSource, QuoteStatus,
    ServiceKind, SystemSize, Timeline,
};

/// Indian mobile number: exactly 10 digits, first digit 6-9.
pub fn validate_indian_phone(phone: &str) -> Result<(), ValidationError> {
    let mut chars = phone.chars();
    let first_ok = matches!(chars.next(), Some('6'..='9'));
    if phone.len() == 10 && first_ok && phone.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("indian_phone"))
    }
}

/// Public quote submission. Enumerated fields reject unknown values at
/// deserialization; lengths and formats are checked here.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuoteRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(custom(function = "validate_indian_phone"))]
    pub phone: String,

    #[validate(email)]
    pub email: Option<String>,

    pub location: Location,

    #[validate(length(max = 500))]
    pub address: Option<String>,

    #[serde(default)]
    pub property_type: PropertyType,
    #[serde(default)]
    pub property_size: PropertySize,

    #[serde(default)]
    pub services: Vec<ServiceKind>,
    #[serde(default)]
    pub system_size: SystemSize,
    #[serde(default)]
    pub budget: Budget,
    #[serde(default)]
    pub timeline: Timeline,

    #[validate(length(max = 1000))]
    pub message: Option<String>,

    #[serde(default)]
    pub source: QuoteSource,
}

impl SubmitQuoteRequest {
    pub fn into_quote(self) -> Quote {
        Quote {
            id: None,
            name: self.name,
            phone: self.phone,
            email: self.email,
            location: self.location,
            address: self.address,
            property_type: self.property_type,
            property_size: self.property_size,
            services: self.services,
            system_size: self.system_size,
            budget: self.budget,
            timeline: self.timeline,
            message: self.message,
            source: self.source,
            // Callers cannot pick their own status or priority
            status: QuoteStatus::New,
            priority: Priority::Medium,
            admin_notes: vec![],
            follow_up_date: None,
            last_contact_date: None,
            whatsapp_sent: false,
            whatsapp_message: None,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Query parameters for the admin quote listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuotesQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<QuoteStatus>,
    pub location: Option<Location>,
    pub priority: Option<Priority>,
    pub search: Option<String>,
}

/// Admin edit of a lead. Only these fields are writable; anything else in
/// the request body is ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuoteRequest {
    pub status: Option<QuoteStatus>,
    pub priority: Option<Priority>,
    #[validate(length(max = 100))]
    pub follow_up_date: Option<String>,
    #[validate(length(max = 100))]
    pub last_contact_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddNoteRequest {
    #[validate(length(min = 1, max = 500))]
    pub note: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current: u32,
    pub pages: u32,
    pub total: u64,
    pub limit: u32,
}

impl Pagination {
    pub fn new(current: u32, limit: u32, total: u64) -> Self {
        let pages = if limit == 0 {
            0
        } else {
            total.div_ceil(u64::from(limit)) as u32
        };
        Pagination {
            current,
            pages,
            total,
            limit,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteListResponse {
    pub quotes: Vec<Quote>,
    pub pagination: Pagination,
}

/// Returned to the public caller after a successful submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuoteResponse {
    pub success: bool,
    pub message: String,
    pub quote_id: String,
    pub whatsapp_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_indian_phones_pass() {
        for phone in ["9876543210", "6000000000", "7123456789"] {
            assert!(validate_indian_phone(phone).is_ok(), "{}", phone);
        }
    }

    #[test]
    fn invalid_indian_phones_fail() {
        for phone in ["1234567890", "98765", "98765432101", "98765abcde", ""] {
            assert!(validate_indian_phone(phone).is_err(), "{}", phone);
        }
    }

    #[test]
    fn pagination_rounds_pages_up() {
        let p = Pagination::new(1, 10, 25);
        assert_eq!(p.pages, 3);
        assert_eq!(p.total, 25);

        let exact = Pagination::new(2, 10, 30);
        assert_eq!(exact.pages, 3);

        let empty = Pagination::new(1, 10, 0);
        assert_eq!(empty.pages, 0);
    }

    #[test]
    fn submission_cannot_pick_status_or_priority() {
        let request: SubmitQuoteRequest = serde_json::from_value(serde_json::json!({
            "name": "Ravi Kumar",
            "phone": "9876543210",
            "location": "Chennai",
            "status": "Converted",
            "priority": "Urgent"
        }))
        .unwrap();
        let quote = request.into_quote();
        assert_eq!(quote.status, QuoteStatus::New);
        assert_eq!(quote.priority, Priority::Medium);
    }

    #[test]
    fn unknown_enum_values_are_rejected() {
        let result: Result<SubmitQuoteRequest, _> = serde_json::from_value(serde_json::json!({
            "name": "Ravi Kumar",
            "phone": "9876543210",
            "location": "Mars"
        }));
        assert!(result.is_err());
    }
}
