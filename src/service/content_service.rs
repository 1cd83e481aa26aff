use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::Utc;
use tracing::info;

use crate::model::content::{
    Content, ProjectItem, SectionKey, ServiceItem,
};
use crate::repository::admin_repo::AdminRepository;
use crate::repository::content_repo::ContentRepository;
use crate::service::admin_service::{log_actor_activity, Actor};
use crate::util::error::ServiceError;

#[async_trait]
pub trait ContentService: Send + Sync {
    /// Active sections only, for the public site.
    async fn list_public(&self) -> Result<Vec<Content>, ServiceError>;
    async fn list_all(&self) -> Result<Vec<Content>, ServiceError>;
    /// Public lookup: an inactive section is indistinguishable from a
    /// missing one.
    async fn get_public_section(&self, section: SectionKey) -> Result<Content, ServiceError>;
    async fn get_section(&self, section: SectionKey) -> Result<Content, ServiceError>;
    /// Replaces a section's payload. Creates the document on first write;
    /// every save bumps the version and stamps the author.
    async fn update_section(
        &self,
        section: SectionKey,
        payload: serde_json::Value,
        actor: &Actor,
    ) -> Result<Content, ServiceError>;
    async fn toggle_active(&self, section: SectionKey, actor: &Actor)
        -> Result<Content, ServiceError>;
    async fn add_item(
        &self,
        section: SectionKey,
        item: serde_json::Value,
        actor: &Actor,
    ) -> Result<Content, ServiceError>;
    async fn update_item(
        &self,
        section: SectionKey,
        item_id: ObjectId,
        item: serde_json::Value,
        actor: &Actor,
    ) -> Result<Content, ServiceError>;
    async fn delete_item(
        &self,
        section: SectionKey,
        item_id: ObjectId,
        actor: &Actor,
    ) -> Result<Content, ServiceError>;
}

pub struct ContentServiceImpl {
    pub content_repo: Arc<dyn ContentRepository>,
    pub admin_repo: Arc<dyn AdminRepository>,
}

impl ContentServiceImpl {
    pub fn new(content_repo: Arc<dyn ContentRepository>, admin_repo: Arc<dyn AdminRepository>) -> Self {
        ContentServiceImpl {
            content_repo,
            admin_repo,
        }
    }

    async fn load_or_empty(&self, section: SectionKey) -> Result<Content, ServiceError> {
        Ok(self
            .content_repo
            .find_by_section(section)
            .await?
            .unwrap_or_else(|| Content::empty(section)))
    }

    fn parse<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Result<T, ServiceError> {
        serde_json::from_value(value)
            .map_err(|e| ServiceError::InvalidInput(format!("Invalid content payload: {}", e)))
    }
}

#[async_trait]
impl ContentService for ContentServiceImpl {
    async fn list_public(&self) -> Result<Vec<Content>, ServiceError> {
        Ok(self.content_repo.list_active().await?)
    }

    async fn list_all(&self) -> Result<Vec<Content>, ServiceError> {
        Ok(self.content_repo.list_all().await?)
    }

    async fn get_public_section(&self, section: SectionKey) -> Result<Content, ServiceError> {
        let content = self.get_section(section).await?;
        if !content.is_active {
            return Err(ServiceError::NotFound(format!(
                "No content found for section '{}'",
                section.as_str()
            )));
        }
        Ok(content)
    }

    async fn get_section(&self, section: SectionKey) -> Result<Content, ServiceError> {
        self.content_repo
            .find_by_section(section)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "No content found for section '{}'",
                    section.as_str()
                ))
            })
    }

    async fn update_section(
        &self,
        section: SectionKey,
        payload: serde_json::Value,
        actor: &Actor,
    ) -> Result<Content, ServiceError> {
        let mut content = self.load_or_empty(section).await?;

        match section {
            SectionKey::Seo => content.seo = Some(Self::parse(payload)?),
            SectionKey::Hero => content.hero = Some(Self::parse(payload)?),
            SectionKey::About => content.about = Some(Self::parse(payload)?),
            SectionKey::Services => content.services = Some(Self::parse(payload)?),
            SectionKey::Projects => content.projects = Some(Self::parse(payload)?),
            SectionKey::Contact => content.contact = Some(Self::parse(payload)?),
            SectionKey::Footer => content.footer = Some(Self::parse(payload)?),
            SectionKey::Process => content.process = Some(Self::parse(payload)?),
            SectionKey::Testimonials => content.testimonials = Some(Self::parse(payload)?),
            SectionKey::Statistics => content.statistics = Some(Self::parse(payload)?),
        }

        content.touch(&actor.username, Utc::now());
        info!(
            "Section '{}' updated to version {} by {}",
            section.as_str(),
            content.version,
            actor.username
        );
        let saved = self.content_repo.save(content).await?;
        log_actor_activity(
            self.admin_repo.as_ref(),
            actor,
            "content_updated",
            format!("Updated {} section", section.as_str()),
        )
        .await;
        Ok(saved)
    }

    async fn toggle_active(
        &self,
        section: SectionKey,
        actor: &Actor,
    ) -> Result<Content, ServiceError> {
        let mut content = self.get_section(section).await?;
        content.is_active = !content.is_active;
        content.touch(&actor.username, Utc::now());
        let saved = self.content_repo.save(content).await?;
        log_actor_activity(
            self.admin_repo.as_ref(),
            actor,
            "content_toggled",
            format!(
                "Toggled {} section to {}",
                section.as_str(),
                if saved.is_active { "active" } else { "inactive" }
            ),
        )
        .await;
        Ok(saved)
    }

    async fn add_item(
        &self,
        section: SectionKey,
        item: serde_json::Value,
        actor: &Actor,
    ) -> Result<Content, ServiceError> {
        let mut content = self.load_or_empty(section).await?;

        let (action, description) = match section {
            SectionKey::Services => {
                let item: ServiceItem = Self::parse(item)?;
                let description = format!("Added service: {}", item.title);
                content.services.get_or_insert_with(Default::default).add_item(item);
                ("service_added", description)
            }
            SectionKey::Projects => {
                let item: ProjectItem = Self::parse(item)?;
                let description = format!("Added project: {}", item.title);
                content.projects.get_or_insert_with(Default::default).add_item(item);
                ("project_added", description)
            }
            _ => {
                return Err(ServiceError::InvalidInput(format!(
                    "Section '{}' does not hold a list of items",
                    section.as_str()
                )))
            }
        };

        content.touch(&actor.username, Utc::now());
        let saved = self.content_repo.save(content).await?;
        log_actor_activity(self.admin_repo.as_ref(), actor, action, description).await;
        Ok(saved)
    }

    async fn update_item(
        &self,
        section: SectionKey,
        item_id: ObjectId,
        item: serde_json::Value,
        actor: &Actor,
    ) -> Result<Content, ServiceError> {
        let mut content = self.get_section(section).await?;

        let missing = || {
            ServiceError::NotFound(format!(
                "No item {} in section '{}'",
                item_id,
                section.as_str()
            ))
        };

        let (action, description) = match section {
            SectionKey::Services => {
                let mut updated: ServiceItem = Self::parse(item)?;
                updated.id = item_id;
                let description = format!("Updated service: {}", updated.title);
                let services = content.services.as_mut().ok_or_else(missing)?;
                let slot = services.item_mut(&item_id).ok_or_else(missing)?;
                *slot = updated;
                ("service_updated", description)
            }
            SectionKey::Projects => {
                let mut updated: ProjectItem = Self::parse(item)?;
                updated.id = item_id;
                let description = format!("Updated project: {}", updated.title);
                let projects = content.projects.as_mut().ok_or_else(missing)?;
                let slot = projects.item_mut(&item_id).ok_or_else(missing)?;
                *slot = updated;
                ("project_updated", description)
            }
            _ => {
                return Err(ServiceError::InvalidInput(format!(
                    "Section '{}' does not hold a list of items",
                    section.as_str()
                )))
            }
        };

        content.touch(&actor.username, Utc::now());
        let saved = self.content_repo.save(content).await?;
        log_actor_activity(self.admin_repo.as_ref(), actor, action, description).await;
        Ok(saved)
    }

    async fn delete_item(
        &self,
        section: SectionKey,
        item_id: ObjectId,
        actor: &Actor,
    ) -> Result<Content, ServiceError> {
        let mut content = self.get_section(section).await?;

        let missing = || {
            ServiceError::NotFound(format!(
                "No item {} in section '{}'",
                item_id,
                section.as_str()
            ))
        };

        let (action, description) = match section {
            SectionKey::Services => {
                let services = content.services.as_mut().ok_or_else(missing)?;
                let removed = services.remove_item(&item_id).ok_or_else(missing)?;
                ("service_deleted", format!("Deleted service: {}", removed.title))
            }
            SectionKey::Projects => {
                let projects = content.projects.as_mut().ok_or_else(missing)?;
                let removed = projects.remove_item(&item_id).ok_or_else(missing)?;
                ("project_deleted", format!("Deleted project: {}", removed.title))
            }
            _ => {
                return Err(ServiceError::InvalidInput(format!(
                    "Section '{}' does not hold a list of items",
                    section.as_str()
                )))
            }
        };

        content.touch(&actor.username, Utc::now());
        let saved = self.content_repo.save(content).await?;
        log_actor_activity(self.admin_repo.as_ref(), actor, action, description).await;
        Ok(saved)
    }
}
