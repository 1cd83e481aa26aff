use async_trait::async_trait;
use bson::doc;
use futures::stream::TryStreamExt;
use mongodb::options::ReplaceOptions;
use tracing::{error, info};

use crate::model::content::{Content, SectionKey};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

#[async_trait]
pub trait ContentRepository: Send + Sync {
    async fn find_by_section(&self, section: SectionKey) -> RepositoryResult<Option<Content>>;
    async fn list_all(&self) -> RepositoryResult<Vec<Content>>;
    async fn list_active(&self) -> RepositoryResult<Vec<Content>>;
    /// Writes the document for its section, creating it on first save. The
    /// section key is the identity; callers stamp version and author first.
    async fn save(&self, content: Content) -> RepositoryResult<Content>;
}

pub struct MongoContentRepository {
    collection: mongodb::Collection<Content>,
}

impl MongoContentRepository {
    pub fn new(db: &mongodb::Database, collection_name: &str) -> Self {
        MongoContentRepository {
            collection: db.collection::<Content>(collection_name),
        }
    }
}

#[async_trait]
impl ContentRepository for MongoContentRepository {
    #[tracing::instrument(skip(self), fields(section = section.as_str()))]
    async fn find_by_section(&self, section: SectionKey) -> RepositoryResult<Option<Content>> {
        let filter = doc! { "section": section.as_str() };
        Ok(self.collection.find_one(filter, None).await?)
    }

    #[tracing::instrument(skip(self))]
    async fn list_all(&self) -> RepositoryResult<Vec<Content>> {
        let cursor = self.collection.find(None, None).await?;
        Ok(cursor
            .try_collect()
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list content: {}", e)))?)
    }

    #[tracing::instrument(skip(self))]
    async fn list_active(&self) -> RepositoryResult<Vec<Content>> {
        let filter = doc! { "isActive": true };
        let cursor = self.collection.find(filter, None).await?;
        Ok(cursor.try_collect().await.map_err(|e| {
            RepositoryError::database(format!("Failed to list active content: {}", e))
        })?)
    }

    #[tracing::instrument(skip(self, content), fields(section = content.section.as_str()))]
    async fn save(&self, content: Content) -> RepositoryResult<Content> {
        let mut document = content;
        let now = chrono::Utc::now().to_rfc3339();
        if document.created_at.is_none() {
            document.created_at = Some(now.clone());
        }
        document.updated_at = Some(now);
        // _id stays untouched: an existing document keeps its id through the
        // replace, and an upserted one gets a server-assigned id.

        let filter = doc! { "section": document.section.as_str() };
        let options = ReplaceOptions::builder().upsert(true).build();
        match self.collection.replace_one(filter, &document, options).await {
            Ok(_) => {
                info!(
                    "Content saved for section '{}' (version {})",
                    document.section.as_str(),
                    document.version
                );
                Ok(document)
            }
            Err(e) => {
                error!("Failed to save content: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to save content: {}",
                    e
                )))
            }
        }
    }
}
