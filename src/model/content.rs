use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The fixed set of website sections. Exactly one content document exists per
/// key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKey {
    Hero,
    About,
    Services,
    Projects,
    Contact,
    Footer,
    Seo,
    Statistics,
    Testimonials,
    Process,
}

impl SectionKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Hero => "hero",
            SectionKey::About => "about",
            SectionKey::Services => "services",
            SectionKey::Projects => "projects",
            SectionKey::Contact => "contact",
            SectionKey::Footer => "footer",
            SectionKey::Seo => "seo",
            SectionKey::Statistics => "statistics",
            SectionKey::Testimonials => "testimonials",
            SectionKey::Process => "process",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct IconFeature {
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StatEntry {
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SeoContent {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub og_title: Option<String>,
    #[serde(default)]
    pub og_description: Option<String>,
    #[serde(default)]
    pub og_image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct HeroContent {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cta_text: Option<String>,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub features: Vec<IconFeature>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AboutContent {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub mission: Option<String>,
    #[serde(default)]
    pub features: Vec<IconFeature>,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItem {
    #[serde(rename = "_id", default = "ObjectId::new")]
    pub id: ObjectId,
    #[serde(default)]
    pub icon: Option<String>,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub whatsapp_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServicesContent {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub items: Vec<ServiceItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectItem {
    #[serde(rename = "_id", default = "ObjectId::new")]
    pub id: ObjectId,
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(default, rename = "type")]
    pub project_type: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub completed_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsContent {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub items: Vec<ProjectItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContactContent {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub whatsapp_number: Option<String>,
    #[serde(default)]
    pub working_hours: Option<String>,
    #[serde(default)]
    pub service_areas: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct QuickLinkEntry {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FooterContent {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
    #[serde(default)]
    pub quick_links: Vec<QuickLinkEntry>,
    #[serde(default)]
    pub copyright: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStep {
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProcessContent {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub steps: Vec<ProcessStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialItem {
    #[serde(rename = "_id", default = "ObjectId::new")]
    pub id: ObjectId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub review: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialsContent {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub items: Vec<TestimonialItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsContent {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
}

/// One independently versioned block of website content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub section: SectionKey,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<SeoContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero: Option<HeroContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<AboutContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<ServicesContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<ProjectsContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<FooterContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process: Option<ProcessContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testimonials: Option<TestimonialsContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<StatisticsContent>,

    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub last_modified_by: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_version() -> u32 {
    1
}

impl Content {
    /// Empty document for a section key.
    pub fn empty(section: SectionKey) -> Self {
        Content {
            id: None,
            section,
            seo: None,
            hero: None,
            about: None,
            services: None,
            projects: None,
            contact: None,
            footer: None,
            process: None,
            testimonials: None,
            statistics: None,
            is_active: true,
            version: 0,
            created_at: None,
            updated_at: None,
            last_modified_by: None,
        }
    }

    /// Stamps a save: bumps the version counter and records who touched it.
    pub fn touch(&mut self, modified_by: &str, now: DateTime<Utc>) {
        self.version += 1;
        self.updated_at = Some(now.to_rfc3339());
        self.last_modified_by = Some(modified_by.to_string());
    }
}

impl ServicesContent {
    pub fn add_item(&mut self, item: ServiceItem) {
        self.items.push(item);
    }

    /// Locates an item by id (linear scan; lists hold tens of items).
    pub fn item_mut(&mut self, id: &ObjectId) -> Option<&mut ServiceItem> {
        self.items.iter_mut().find(|item| &item.id == id)
    }

    /// Removes an item by id, preserving the relative order of the rest.
    pub fn remove_item(&mut self, id: &ObjectId) -> Option<ServiceItem> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        Some(self.items.remove(index))
    }
}

impl ProjectsContent {
    pub fn add_item(&mut self, item: ProjectItem) {
        self.items.push(item);
    }

    pub fn item_mut(&mut self, id: &ObjectId) -> Option<&mut ProjectItem> {
        self.items.iter_mut().find(|item| &item.id == id)
    }

    pub fn remove_item(&mut self, id: &ObjectId) -> Option<ProjectItem> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        Some(self.items.remove(index))
    }
}
