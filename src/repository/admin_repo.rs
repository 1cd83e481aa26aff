use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::TryStreamExt;
use mongodb::options::FindOptions;
use tracing::{error, info};

use crate::model::admin::Admin;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn create(&self, admin: Admin) -> RepositoryResult<Admin>;
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Admin>;
    /// Matches the identifier against either username or email.
    async fn find_by_username_or_email(&self, identifier: &str)
        -> RepositoryResult<Option<Admin>>;
    /// Full-document save; the login flow persists counter and lock changes
    /// through this.
    async fn update(&self, id: ObjectId, admin: Admin) -> RepositoryResult<Admin>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()>;
    async fn list(&self) -> RepositoryResult<Vec<Admin>>;
    async fn count(&self) -> RepositoryResult<u64>;
}

pub struct MongoAdminRepository {
    collection: mongodb::Collection<Admin>,
}

impl MongoAdminRepository {
    pub fn new(db: &mongodb::Database, collection_name: &str) -> Self {
        MongoAdminRepository {
            collection: db.collection::<Admin>(collection_name),
        }
    }
}

#[async_trait]
impl AdminRepository for MongoAdminRepository {
    #[tracing::instrument(skip(self, admin), fields(username = %admin.username))]
    async fn create(&self, admin: Admin) -> RepositoryResult<Admin> {
        let existing = self
            .find_by_username_or_email(&admin.username)
            .await?
            .or(self.find_by_username_or_email(&admin.email).await?);
        if existing.is_some() {
            return Err(RepositoryError::already_exists(
                "An account with this username or email already exists",
            ));
        }

        let mut new_admin = admin;
        new_admin.id = Some(ObjectId::new());
        let now = chrono::Utc::now().to_rfc3339();
        new_admin.created_at = Some(now.clone());
        new_admin.updated_at = Some(now);

        match self.collection.insert_one(&new_admin, None).await {
            Ok(_) => {
                info!("Admin account created: {}", new_admin.username);
                Ok(new_admin)
            }
            Err(e) => {
                error!("Failed to create admin: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to create admin: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Admin> {
        let filter = doc! { "_id": id };
        match self.collection.find_one(filter, None).await {
            Ok(Some(admin)) => Ok(admin),
            Ok(None) => Err(RepositoryError::not_found(format!(
                "Admin not found for ID: {}",
                id
            ))),
            Err(e) => {
                error!("Failed to fetch admin by ID: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to fetch admin by ID: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self, identifier))]
    async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> RepositoryResult<Option<Admin>> {
        let filter = doc! {
            "$or": [
                { "username": identifier },
                { "email": identifier },
            ],
        };
        Ok(self.collection.find_one(filter, None).await?)
    }

    #[tracing::instrument(skip(self, admin), fields(id = %id))]
    async fn update(&self, id: ObjectId, admin: Admin) -> RepositoryResult<Admin> {
        let filter = doc! { "_id": id };
        let mut document = bson::to_document(&admin)?;
        document.remove("_id");
        document.insert("updatedAt", chrono::Utc::now().to_rfc3339());
        let update = doc! { "$set": document };

        match self.collection.update_one(filter, update, None).await {
            Ok(result) if result.matched_count > 0 => self.get_by_id(id).await,
            Ok(_) => Err(RepositoryError::not_found(format!(
                "No admin found to update for ID: {}",
                id
            ))),
            Err(e) => {
                error!("Failed to update admin: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to update admin: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        let filter = doc! { "_id": id };
        match self.collection.delete_one(filter, None).await {
            Ok(result) if result.deleted_count > 0 => {
                info!("Admin account deleted: {}", id);
                Ok(())
            }
            Ok(_) => Err(RepositoryError::not_found(format!(
                "No admin found to delete for ID: {}",
                id
            ))),
            Err(e) => {
                error!("Failed to delete admin: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to delete admin: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> RepositoryResult<Vec<Admin>> {
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .build();
        let cursor = self.collection.find(None, options).await?;
        Ok(cursor
            .try_collect()
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list admins: {}", e)))?)
    }

    #[tracing::instrument(skip(self))]
    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.collection.count_documents(None, None).await?)
    }
}
