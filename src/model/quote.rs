use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::parse_timestamp;

/// Cities we currently serve, plus a catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    Chennai,
    Coimbatore,
    Madurai,
    Trichy,
    Salem,
    Tirunelveli,
    Erode,
    Vellore,
    Thoothukudi,
    Dindigul,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PropertyType {
    #[default]
    Residential,
    Commercial,
    Industrial,
    Educational,
    Healthcare,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PropertySize {
    #[default]
    #[serde(rename = "Small (1-2 BHK)")]
    Small,
    #[serde(rename = "Medium (3-4 BHK)")]
    Medium,
    #[serde(rename = "Large (5+ BHK)")]
    Large,
    Commercial,
    Industrial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceKind {
    Installation,
    Maintenance,
    Repair,
    Consultation,
    #[serde(rename = "Battery Backup")]
    BatteryBackup,
    Monitoring,
    Cleaning,
    #[serde(rename = "Warranty Service")]
    WarrantyService,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SystemSize {
    #[serde(rename = "1-3 kW")]
    Kw1To3,
    #[serde(rename = "3-5 kW")]
    Kw3To5,
    #[serde(rename = "5-10 kW")]
    Kw5To10,
    #[serde(rename = "10-20 kW")]
    Kw10To20,
    #[serde(rename = "20+ kW")]
    Kw20Plus,
    #[default]
    #[serde(rename = "Not Sure")]
    NotSure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Budget {
    #[serde(rename = "Under ₹1 Lakh")]
    Under1Lakh,
    #[serde(rename = "₹1-3 Lakhs")]
    Lakhs1To3,
    #[serde(rename = "₹3-5 Lakhs")]
    Lakhs3To5,
    #[serde(rename = "₹5-10 Lakhs")]
    Lakhs5To10,
    #[serde(rename = "₹10+ Lakhs")]
    Lakhs10Plus,
    #[default]
    #[serde(rename = "Not Sure")]
    NotSure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Timeline {
    Immediate,
    #[serde(rename = "Within 1 Month")]
    Within1Month,
    #[serde(rename = "1-3 Months")]
    Months1To3,
    #[serde(rename = "3-6 Months")]
    Months3To6,
    #[serde(rename = "6+ Months")]
    Months6Plus,
    #[default]
    #[serde(rename = "Not Sure")]
    NotSure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QuoteSource {
    #[default]
    Website,
    WhatsApp,
    Phone,
    Referral,
    #[serde(rename = "Social Media")]
    SocialMedia,
    Other,
}

/// Lifecycle state of a quote request. Any status may follow any other;
/// there is deliberately no transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QuoteStatus {
    #[default]
    New,
    Contacted,
    #[serde(rename = "Quote Sent")]
    QuoteSent,
    #[serde(rename = "Follow Up")]
    FollowUp,
    Converted,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

/// Staff note on a quote. Notes are append-only: once added they are never
/// edited or removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminNote {
    pub note: String,
    pub added_by: String,
    pub added_at: String,
}

/// A submitted quote request (lead).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,

    pub location: Location,
    #[serde(default)]
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

    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub source: QuoteSource,

    #[serde(default)]
    pub status: QuoteStatus,
    #[serde(default)]
    pub priority: Priority,

    #[serde(default)]
    pub admin_notes: Vec<AdminNote>,

    #[serde(default)]
    pub follow_up_date: Option<String>,
    #[serde(default)]
    pub last_contact_date: Option<String>,

    #[serde(default)]
    pub whatsapp_sent: bool,
    #[serde(default)]
    pub whatsapp_message: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Quote {
    /// Phone in the +91 display form. Computed on read, never stored.
    pub fn formatted_phone(&self) -> String {
        format!("+91 {}", self.phone)
    }

    /// Whole days since the quote was created.
    pub fn age_in_days(&self, now: DateTime<Utc>) -> i64 {
        self.created_at
            .as_deref()
            .and_then(parse_timestamp)
            .map(|created| (now - created).num_days())
            .unwrap_or(0)
    }

    /// Appends a staff note. Existing notes are never touched.
    pub fn add_note(&mut self, note: String, added_by: String, now: DateTime<Utc>) {
        self.admin_notes.push(AdminNote {
            note,
            added_by,
            added_at: now.to_rfc3339(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_quote() -> Quote {
        Quote {
            id: None,
            name: "Ravi Kumar".to_string(),
            phone: "9876543210".to_string(),
            email: None,
            location: Location::Chennai,
            address: None,
            property_type: PropertyType::default(),
            property_size: PropertySize::default(),
            services: vec![],
            system_size: SystemSize::default(),
            budget: Budget::default(),
            timeline: Timeline::default(),
            message: None,
            source: QuoteSource::default(),
            status: QuoteStatus::default(),
            priority: Priority::default(),
            admin_notes: vec![],
            follow_up_date: None,
            last_contact_date: None,
            whatsapp_sent: false,
            whatsapp_message: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn defaults_match_a_fresh_submission() {
        let quote = sample_quote();
        assert_eq!(quote.status, QuoteStatus::New);
        assert_eq!(quote.priority, Priority::Medium);
        assert_eq!(quote.budget, Budget::NotSure);
        assert_eq!(quote.source, QuoteSource::Website);
    }

    #[test]
    fn formatted_phone_prefixes_country_code() {
        assert_eq!(sample_quote().formatted_phone(), "+91 9876543210");
    }

    #[test]
    fn age_in_days_counts_whole_days() {
        let now = Utc::now();
        let mut quote = sample_quote();
        quote.created_at = Some((now - Duration::days(3)).to_rfc3339());
        assert_eq!(quote.age_in_days(now), 3);
    }

    #[test]
    fn notes_are_appended_in_order() {
        let now = Utc::now();
        let mut quote = sample_quote();
        quote.add_note("called".into(), "admin".into(), now);
        quote.add_note("quoted".into(), "admin".into(), now);
        assert_eq!(quote.admin_notes.len(), 2);
        assert_eq!(quote.admin_notes[0].note, "called");
        assert_eq!(quote.admin_notes[1].note, "quoted");
    }

    #[test]
    fn status_values_serialize_to_display_strings() {
        let json = serde_json::to_string(&QuoteStatus::QuoteSent).unwrap();
        assert_eq!(json, "\"Quote Sent\"");
        let back: QuoteStatus = serde_json::from_str("\"Follow Up\"").unwrap();
        assert_eq!(back, QuoteStatus::FollowUp);
    }
}
