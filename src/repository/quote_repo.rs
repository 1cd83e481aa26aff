use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::stream::TryStreamExt;
use mongodb::options::FindOptions;
use serde::Serialize;
use tracing::{error, info};

use crate::model::quote::{Location, Priority, Quote, QuoteStatus};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

/// Listing filter. Every field is optional; unset fields do not constrain.
#[derive(Debug, Clone, Default)]
pub struct QuoteFilter {
    pub status: Option<QuoteStatus>,
    pub location: Option<Location>,
    pub priority: Option<Priority>,
    /// Case-insensitive substring match over name, phone and email.
    pub search: Option<String>,
}

impl QuoteFilter {
    fn to_document(&self) -> RepositoryResult<Document> {
        let mut filter = Document::new();
        if let Some(status) = &self.status {
            filter.insert("status", bson::to_bson(status)?);
        }
        if let Some(location) = &self.location {
            filter.insert("location", bson::to_bson(location)?);
        }
        if let Some(priority) = &self.priority {
            filter.insert("priority", bson::to_bson(priority)?);
        }
        if let Some(search) = &self.search {
            let pattern = regex_escape(search);
            filter.insert(
                "$or",
                vec![
                    doc! { "name": { "$regex": &pattern, "$options": "i" } },
                    doc! { "phone": { "$regex": &pattern, "$options": "i" } },
                    doc! { "email": { "$regex": &pattern, "$options": "i" } },
                ],
            );
        }
        Ok(filter)
    }
}

/// Escapes regex metacharacters so search input matches literally.
fn regex_escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if "\\.+*?()|[]{}^$".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Per-status counts for the admin dashboard, plus the current calendar
/// month's submission count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteStats {
    pub total: u64,
    pub new: u64,
    pub contacted: u64,
    pub quote_sent: u64,
    pub follow_up: u64,
    pub converted: u64,
    pub closed: u64,
    pub this_month: u64,
}

/// First instant of the current UTC month as an RFC 3339 string, comparable
/// lexicographically against stored `createdAt` values.
pub fn month_start(now: chrono::DateTime<chrono::Utc>) -> String {
    use chrono::Datelike;
    format!("{:04}-{:02}-01T00:00:00+00:00", now.year(), now.month())
}

#[async_trait]
pub trait QuoteRepository: Send + Sync {
    async fn create(&self, quote: Quote) -> RepositoryResult<Quote>;
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Quote>;
    async fn update(&self, id: ObjectId, quote: Quote) -> RepositoryResult<Quote>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()>;
    /// Returns one page of quotes (newest first) and the total match count.
    async fn list(
        &self,
        filter: &QuoteFilter,
        page: u32,
        limit: u32,
    ) -> RepositoryResult<(Vec<Quote>, u64)>;
    /// Most recent quote for this phone number created at or after `since`
    /// (RFC 3339). Drives the duplicate-submission guard.
    async fn find_recent_by_phone(
        &self,
        phone: &str,
        since: &str,
    ) -> RepositoryResult<Option<Quote>>;
    async fn stats(&self) -> RepositoryResult<QuoteStats>;
    async fn recent(&self, limit: i64) -> RepositoryResult<Vec<Quote>>;
}

pub struct MongoQuoteRepository {
    collection: mongodb::Collection<Quote>,
}

impl MongoQuoteRepository {
    pub fn new(db: &mongodb::Database, collection_name: &str) -> Self {
        MongoQuoteRepository {
            collection: db.collection::<Quote>(collection_name),
        }
    }

    async fn count_status(&self, status: QuoteStatus) -> RepositoryResult<u64> {
        let filter = doc! { "status": bson::to_bson(&status)? };
        Ok(self.collection.count_documents(filter, None).await?)
    }
}

#[async_trait]
impl QuoteRepository for MongoQuoteRepository {
    #[tracing::instrument(skip(self, quote), fields(phone = %quote.phone))]
    async fn create(&self, quote: Quote) -> RepositoryResult<Quote> {
        let mut new_quote = quote;
        // Set id manually before inserting
        new_quote.id = Some(ObjectId::new());
        let now = chrono::Utc::now().to_rfc3339();
        new_quote.created_at = Some(now.clone());
        new_quote.updated_at = Some(now);

        match self.collection.insert_one(&new_quote, None).await {
            Ok(_) => {
                info!("Quote created successfully");
                Ok(new_quote)
            }
            Err(e) => {
                error!("Failed to create quote: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to create quote: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Quote> {
        let filter = doc! { "_id": id };
        match self.collection.find_one(filter, None).await {
            Ok(Some(quote)) => Ok(quote),
            Ok(None) => Err(RepositoryError::not_found(format!(
                "Quote not found for ID: {}",
                id
            ))),
            Err(e) => {
                error!("Failed to fetch quote by ID: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to fetch quote by ID: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self, quote), fields(id = %id))]
    async fn update(&self, id: ObjectId, quote: Quote) -> RepositoryResult<Quote> {
        let filter = doc! { "_id": id };
        let mut document = bson::to_document(&quote)?;
        document.remove("_id");
        document.insert("updatedAt", chrono::Utc::now().to_rfc3339());
        let update = doc! { "$set": document };

        match self.collection.update_one(filter, update, None).await {
            // matched_count, not modified_count: a no-op save of identical
            // fields is still a successful update.
            Ok(result) if result.matched_count > 0 => self.get_by_id(id).await,
            Ok(_) => Err(RepositoryError::not_found(format!(
                "No quote found to update for ID: {}",
                id
            ))),
            Err(e) => {
                error!("Failed to update quote: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to update quote: {}",
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
                info!("Quote deleted successfully for ID: {}", id);
                Ok(())
            }
            Ok(_) => Err(RepositoryError::not_found(format!(
                "No quote found to delete for ID: {}",
                id
            ))),
            Err(e) => {
                error!("Failed to delete quote: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to delete quote: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self, filter), fields(page = page, limit = limit))]
    async fn list(
        &self,
        filter: &QuoteFilter,
        page: u32,
        limit: u32,
    ) -> RepositoryResult<(Vec<Quote>, u64)> {
        let filter_doc = filter.to_document()?;
        let total = self
            .collection
            .count_documents(filter_doc.clone(), None)
            .await?;

        let skip = u64::from(page.saturating_sub(1)) * u64::from(limit);
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .skip(skip)
            .limit(i64::from(limit))
            .build();

        let cursor = self.collection.find(filter_doc, options).await?;
        let quotes: Vec<Quote> = cursor.try_collect().await.map_err(|e| {
            error!("Failed to read quote listing: {}", e);
            RepositoryError::database(format!("Failed to read quote listing: {}", e))
        })?;

        info!("Fetched {} of {} matching quotes", quotes.len(), total);
        Ok((quotes, total))
    }

    #[tracing::instrument(skip(self), fields(phone = %phone))]
    async fn find_recent_by_phone(
        &self,
        phone: &str,
        since: &str,
    ) -> RepositoryResult<Option<Quote>> {
        // RFC 3339 UTC strings sort lexicographically in chronological order,
        // so a string $gte is a correct time-window query.
        let filter = doc! {
            "phone": phone,
            "createdAt": { "$gte": since },
        };
        Ok(self.collection.find_one(filter, None).await?)
    }

    #[tracing::instrument(skip(self))]
    async fn stats(&self) -> RepositoryResult<QuoteStats> {
        let total = self.collection.count_documents(None, None).await?;
        let this_month = self
            .collection
            .count_documents(
                doc! { "createdAt": { "$gte": month_start(chrono::Utc::now()) } },
                None,
            )
            .await?;
        Ok(QuoteStats {
            total,
            new: self.count_status(QuoteStatus::New).await?,
            contacted: self.count_status(QuoteStatus::Contacted).await?,
            quote_sent: self.count_status(QuoteStatus::QuoteSent).await?,
            follow_up: self.count_status(QuoteStatus::FollowUp).await?,
            converted: self.count_status(QuoteStatus::Converted).await?,
            closed: self.count_status(QuoteStatus::Closed).await?,
            this_month,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn recent(&self, limit: i64) -> RepositoryResult<Vec<Quote>> {
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .limit(limit)
            .build();
        let cursor = self.collection.find(None, options).await?;
        Ok(cursor.try_collect().await.map_err(|e| {
            RepositoryError::database(format!("Failed to read recent quotes: {}", e))
        })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_produces_empty_document() {
        let filter = QuoteFilter::default();
        assert!(filter.to_document().unwrap().is_empty());
    }

    #[test]
    fn search_matches_name_phone_and_email() {
        let filter = QuoteFilter {
            search: Some("ravi".to_string()),
            ..QuoteFilter::default()
        };
        let doc = filter.to_document().unwrap();
        let or = doc.get_array("$or").unwrap();
        assert_eq!(or.len(), 3);
    }

    #[test]
    fn status_filter_uses_display_string() {
        let filter = QuoteFilter {
            status: Some(QuoteStatus::QuoteSent),
            ..QuoteFilter::default()
        };
        let doc = filter.to_document().unwrap();
        assert_eq!(doc.get_str("status").unwrap(), "Quote Sent");
    }

    #[test]
    fn search_input_is_escaped() {
        assert_eq!(regex_escape("a.b*c"), "a\\.b\\*c");
        assert_eq!(regex_escape("plain"), "plain");
    }

    #[test]
    fn month_start_sorts_before_timestamps_in_the_month() {
        use chrono::TimeZone;
        let now = chrono::Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let start = month_start(now);
        assert_eq!(start, "2024-06-01T00:00:00+00:00");
        assert!(start.as_str() <= now.to_rfc3339().as_str());
        let last_month = chrono::Utc.with_ymd_and_hms(2024, 5, 31, 23, 59, 59).unwrap();
        assert!(last_month.to_rfc3339().as_str() < start.as_str());
    }
}
