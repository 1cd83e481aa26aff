//! WhatsApp message templating and deep-link construction.
//!
//! Everything here is pure: the same input fields always produce the same
//! message text and the same URL. Enumerated values equal to "Not Sure" are
//! suppressed rather than printed literally.

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc, Weekday};
use serde::Serialize;

use crate::model::quote::Quote;

const NOT_SURE: &str = "Not Sure";
const WA_BASE: &str = "https://wa.me";

/// Fields feeding the message template, in emission order. Optional fields
/// contribute a line only when present.
#[derive(Debug, Clone, Default)]
pub struct MessageFields {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub location: String,
    pub property_type: Option<String>,
    pub property_size: Option<String>,
    pub services: Vec<String>,
    pub system_size: Option<String>,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub message: Option<String>,
}

impl MessageFields {
    pub fn from_quote(quote: &Quote) -> Self {
        MessageFields {
            name: quote.name.clone(),
            phone: quote.phone.clone(),
            email: quote.email.clone(),
            location: enum_label(&quote.location),
            property_type: Some(enum_label(&quote.property_type)),
            property_size: Some(enum_label(&quote.property_size)),
            services: quote.services.iter().map(enum_label).collect(),
            system_size: Some(enum_label(&quote.system_size)),
            budget: Some(enum_label(&quote.budget)),
            timeline: Some(enum_label(&quote.timeline)),
            message: quote.message.clone(),
        }
    }
}

/// Serializes an enum value to its wire string ("Quote Sent", "1-3 kW", ...).
pub fn enum_label<T: Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

fn keep(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty() && *v != NOT_SURE)
}

/// Builds the outbound message text. `service_type` flavors the opening
/// sentence ("General Inquiry" for the default public flow, "services" for
/// stored leads).
pub fn build_message(fields: &MessageFields, service_type: &str) -> String {
    let mut message = format!(
        "Hi! I'm interested in solar panel {}.\n\n",
        service_type.to_lowercase()
    );

    message.push_str(&format!("Name: {}\n", fields.name));
    message.push_str(&format!("Phone: {}\n", fields.phone));
    if let Some(email) = keep(&fields.email) {
        message.push_str(&format!("Email: {}\n", email));
    }
    message.push_str(&format!("Location: {}\n", fields.location));

    if let Some(property_type) = keep(&fields.property_type) {
        message.push_str(&format!("Property Type: {}\n", property_type));
    }
    if let Some(property_size) = keep(&fields.property_size) {
        message.push_str(&format!("Property Size: {}\n", property_size));
    }
    if !fields.services.is_empty() {
        message.push_str(&format!("Services: {}\n", fields.services.join(", ")));
    }
    if let Some(system_size) = keep(&fields.system_size) {
        message.push_str(&format!("System Size: {}\n", system_size));
    }
    if let Some(budget) = keep(&fields.budget) {
        message.push_str(&format!("Budget: {}\n", budget));
    }
    if let Some(timeline) = keep(&fields.timeline) {
        message.push_str(&format!("Timeline: {}\n", timeline));
    }
    if let Some(text) = keep(&fields.message) {
        message.push_str(&format!("\nMessage: {}\n", text));
    }

    message.push_str("\nPlease provide more details and quote.");
    message
}

/// `https://wa.me/<number>?text=<percent-encoded message>`.
pub fn deep_link(number: &str, message: &str) -> String {
    format!("{}/{}?text={}", WA_BASE, number, urlencoding::encode(message))
}

#[derive(Debug, Clone, Serialize)]
pub struct QuickLink {
    pub key: &'static str,
    pub title: &'static str,
    pub message: &'static str,
    pub url: String,
}

/// Pre-templated deep links for the fixed service categories.
pub fn quick_links(number: &str) -> Vec<QuickLink> {
    const TEMPLATES: [(&str, &str, &str); 7] = [
        (
            "general",
            "General Inquiry",
            "Hi! I'm interested in solar panel installation and services. Please provide more details.",
        ),
        (
            "installation",
            "Solar Panel Installation",
            "Hi! I'm interested in solar panel installation for my property. Please provide details about installation process and pricing.",
        ),
        (
            "maintenance",
            "Solar Panel Maintenance",
            "Hi! I need solar panel maintenance and cleaning services. Please provide details about your maintenance packages.",
        ),
        (
            "repair",
            "Solar Panel Repair",
            "Hi! My solar panel system needs repair. Please provide details about your repair services and emergency support.",
        ),
        (
            "consultation",
            "Solar Consultation",
            "Hi! I need solar energy consultation for my property. Please provide details about site assessment and system design.",
        ),
        (
            "battery",
            "Battery Backup Solutions",
            "Hi! I'm interested in battery backup and inverter solutions for my solar system. Please provide details about available options.",
        ),
        (
            "quote",
            "Get Free Quote",
            "Hi! I'd like to get a free quote for solar panel installation. Please provide details about your services and pricing.",
        ),
    ];

    TEMPLATES
        .iter()
        .map(|(key, title, message)| QuickLink {
            key,
            title,
            message,
            url: deep_link(number, message),
        })
        .collect()
}

/// Business hours: Monday to Saturday, 9:00-18:00 IST.
pub fn is_business_hours(now: DateTime<Utc>) -> bool {
    // IST has no DST, a fixed offset is enough.
    let ist = FixedOffset::east_opt(5 * 3600 + 1800).expect("valid offset");
    let local = now.with_timezone(&ist);
    local.weekday() != Weekday::Sun && (9..18).contains(&local.hour())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn base_fields() -> MessageFields {
        MessageFields {
            name: "Ravi Kumar".to_string(),
            phone: "9876543210".to_string(),
            location: "Chennai".to_string(),
            ..MessageFields::default()
        }
    }

    #[test]
    fn message_is_deterministic() {
        let fields = base_fields();
        let a = build_message(&fields, "General Inquiry");
        let b = build_message(&fields, "General Inquiry");
        assert_eq!(a, b);
    }

    #[test]
    fn minimal_fields_emit_only_required_lines() {
        let message = build_message(&base_fields(), "General Inquiry");
        assert!(message.starts_with("Hi! I'm interested in solar panel general inquiry.\n\n"));
        assert!(message.contains("Name: Ravi Kumar\n"));
        assert!(message.contains("Phone: 9876543210\n"));
        assert!(message.contains("Location: Chennai\n"));
        assert!(!message.contains("Email:"));
        assert!(!message.contains("Budget:"));
        assert!(!message.contains("Services:"));
        assert!(message.ends_with("\nPlease provide more details and quote."));
    }

    #[test]
    fn not_sure_values_are_suppressed() {
        let mut fields = base_fields();
        fields.system_size = Some("Not Sure".to_string());
        fields.budget = Some("Not Sure".to_string());
        fields.timeline = Some("Not Sure".to_string());
        let message = build_message(&fields, "services");
        assert!(!message.contains("Not Sure"));
        assert!(!message.contains("System Size:"));
        assert!(!message.contains("Timeline:"));
    }

    #[test]
    fn present_fields_appear_in_fixed_order() {
        let mut fields = base_fields();
        fields.email = Some("ravi@example.com".to_string());
        fields.property_type = Some("Residential".to_string());
        fields.property_size = Some("Small (1-2 BHK)".to_string());
        fields.services = vec!["Installation".to_string(), "Maintenance".to_string()];
        fields.system_size = Some("3-5 kW".to_string());
        fields.budget = Some("₹1-3 Lakhs".to_string());
        fields.timeline = Some("Immediate".to_string());
        fields.message = Some("Need rooftop install".to_string());

        let message = build_message(&fields, "services");
        let positions: Vec<usize> = [
            "Name:", "Phone:", "Email:", "Location:", "Property Type:", "Property Size:",
            "Services: Installation, Maintenance", "System Size:", "Budget:", "Timeline:",
            "Message:",
        ]
        .iter()
        .map(|needle| message.find(needle).expect(needle))
        .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn deep_link_percent_encodes_the_message() {
        let url = deep_link("919876543210", "Hi! I'm interested");
        assert_eq!(
            url,
            "https://wa.me/919876543210?text=Hi%21%20I%27m%20interested"
        );
    }

    #[test]
    fn quick_links_cover_all_categories() {
        let links = quick_links("919876543210");
        let keys: Vec<&str> = links.iter().map(|l| l.key).collect();
        assert_eq!(
            keys,
            vec![
                "general",
                "installation",
                "maintenance",
                "repair",
                "consultation",
                "battery",
                "quote"
            ]
        );
        assert!(links
            .iter()
            .all(|l| l.url.starts_with("https://wa.me/919876543210?text=")));
    }

    #[test]
    fn sunday_is_outside_business_hours() {
        // 2024-06-02 was a Sunday; noon IST.
        let sunday = Utc.with_ymd_and_hms(2024, 6, 2, 6, 30, 0).unwrap();
        assert!(!is_business_hours(sunday));
        // The Monday after, same time of day.
        let monday = Utc.with_ymd_and_hms(2024, 6, 3, 6, 30, 0).unwrap();
        assert!(is_business_hours(monday));
    }
}
