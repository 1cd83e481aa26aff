use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::{Duration, Utc};
use tracing::{info, warn};

use crate::config::WhatsappConfig;
use crate::dto::quote_dto::{
    ListQuotesQuery, Pagination, QuoteListResponse, SubmitQuoteRequest, UpdateQuoteRequest,
};
use crate::model::quote::{Quote, QuoteSource};
use crate::repository::admin_repo::AdminRepository;
use crate::repository::quote_repo::{QuoteFilter, QuoteRepository, QuoteStats};
use crate::service::admin_service::{log_actor_activity, Actor};
use crate::util::error::ServiceError;
use crate::util::whatsapp;

/// How long a phone number blocks resubmission.
pub const DUPLICATE_WINDOW_HOURS: i64 = 24;

/// Outcome of the WhatsApp submit flow. A duplicate is not an error here:
/// the caller still gets the existing lead's deep link.
#[derive(Debug, Clone)]
pub enum WhatsappSubmit {
    Created { quote: Quote, whatsapp_url: String },
    Duplicate { existing_id: ObjectId, whatsapp_url: String },
}

#[async_trait]
pub trait QuoteService: Send + Sync {
    /// Public submission with the duplicate guard. Returns the stored quote
    /// and the prebuilt WhatsApp deep link.
    async fn submit_quote(
        &self,
        request: SubmitQuoteRequest,
    ) -> Result<(Quote, String), ServiceError>;
    /// Same guard as [`submit_quote`](QuoteService::submit_quote), but the
    /// lead is flagged as sent via WhatsApp, and a duplicate yields the
    /// existing lead's link instead of rejecting outright.
    async fn submit_via_whatsapp(
        &self,
        request: SubmitQuoteRequest,
    ) -> Result<WhatsappSubmit, ServiceError>;
    async fn get_quote(&self, id: ObjectId) -> Result<Quote, ServiceError>;
    async fn list_quotes(&self, query: ListQuotesQuery) -> Result<QuoteListResponse, ServiceError>;
    async fn update_quote(
        &self,
        id: ObjectId,
        request: UpdateQuoteRequest,
        actor: &Actor,
    ) -> Result<Quote, ServiceError>;
    async fn add_note(
        &self,
        id: ObjectId,
        note: String,
        actor: &Actor,
    ) -> Result<Quote, ServiceError>;
    async fn delete_quote(&self, id: ObjectId, actor: &Actor) -> Result<(), ServiceError>;
    async fn stats(&self) -> Result<QuoteStats, ServiceError>;
    /// Rebuilds the WhatsApp message and link for a stored lead.
    async fn whatsapp_link(&self, id: ObjectId) -> Result<(String, String), ServiceError>;
}

pub struct QuoteServiceImpl {
    pub quote_repo: Arc<dyn QuoteRepository>,
    pub admin_repo: Arc<dyn AdminRepository>,
    pub whatsapp_config: WhatsappConfig,
}

impl QuoteServiceImpl {
    pub fn new(
        quote_repo: Arc<dyn QuoteRepository>,
        admin_repo: Arc<dyn AdminRepository>,
        whatsapp_config: WhatsappConfig,
    ) -> Self {
        QuoteServiceImpl {
            quote_repo,
            admin_repo,
            whatsapp_config,
        }
    }

    async fn find_duplicate(&self, phone: &str) -> Result<Option<Quote>, ServiceError> {
        let since = (Utc::now() - Duration::hours(DUPLICATE_WINDOW_HOURS)).to_rfc3339();
        Ok(self.quote_repo.find_recent_by_phone(phone, &since).await?)
    }
}

#[async_trait]
impl QuoteService for QuoteServiceImpl {
    async fn submit_quote(
        &self,
        request: SubmitQuoteRequest,
    ) -> Result<(Quote, String), ServiceError> {
        info!("New quote submission from {}", request.phone);

        // Read-then-write: two simultaneous submissions of the same phone can
        // both pass this check. Accepted; staff deduplicate by hand.
        if let Some(existing) = self.find_duplicate(&request.phone).await? {
            warn!(
                "Duplicate submission for phone {} (existing quote {:?})",
                request.phone, existing.id
            );
            return Err(ServiceError::Duplicate(
                "A quote request with this phone number was submitted recently. \
                 Our team will contact you soon."
                    .to_string(),
            ));
        }

        let mut quote = request.into_quote();
        let fields = whatsapp::MessageFields::from_quote(&quote);
        let message = whatsapp::build_message(&fields, "services");
        quote.whatsapp_message = Some(message.clone());

        let stored = self.quote_repo.create(quote).await?;
        let url = whatsapp::deep_link(&self.whatsapp_config.number, &message);
        Ok((stored, url))
    }

    async fn submit_via_whatsapp(
        &self,
        request: SubmitQuoteRequest,
    ) -> Result<WhatsappSubmit, ServiceError> {
        if let Some(existing) = self.find_duplicate(&request.phone).await? {
            let existing_id = existing.id.ok_or_else(|| {
                ServiceError::InternalError("Stored quote has no id".to_string())
            })?;
            warn!(
                "Duplicate WhatsApp submission for phone {} (existing quote {})",
                request.phone, existing_id
            );
            let fields = whatsapp::MessageFields::from_quote(&existing);
            let message = whatsapp::build_message(&fields, "services");
            return Ok(WhatsappSubmit::Duplicate {
                existing_id,
                whatsapp_url: whatsapp::deep_link(&self.whatsapp_config.number, &message),
            });
        }

        let mut quote = request.into_quote();
        quote.source = QuoteSource::WhatsApp;
        quote.whatsapp_sent = true;
        let fields = whatsapp::MessageFields::from_quote(&quote);
        let message = whatsapp::build_message(&fields, "services");
        quote.whatsapp_message = Some(message.clone());

        let stored = self.quote_repo.create(quote).await?;
        info!("WhatsApp quote created for {}", stored.phone);
        Ok(WhatsappSubmit::Created {
            quote: stored,
            whatsapp_url: whatsapp::deep_link(&self.whatsapp_config.number, &message),
        })
    }

    async fn get_quote(&self, id: ObjectId) -> Result<Quote, ServiceError> {
        Ok(self.quote_repo.get_by_id(id).await?)
    }

    async fn list_quotes(&self, query: ListQuotesQuery) -> Result<QuoteListResponse, ServiceError> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(10).clamp(1, 100);

        let filter = QuoteFilter {
            status: query.status,
            location: query.location,
            priority: query.priority,
            search: query.search,
        };

        let (quotes, total) = self.quote_repo.list(&filter, page, limit).await?;
        Ok(QuoteListResponse {
            quotes,
            pagination: Pagination::new(page, limit, total),
        })
    }

    async fn update_quote(
        &self,
        id: ObjectId,
        request: UpdateQuoteRequest,
        actor: &Actor,
    ) -> Result<Quote, ServiceError> {
        let mut quote = self.quote_repo.get_by_id(id).await?;

        if let Some(status) = request.status {
            quote.status = status;
        }
        if let Some(priority) = request.priority {
            quote.priority = priority;
        }
        if let Some(follow_up) = request.follow_up_date {
            quote.follow_up_date = Some(follow_up);
        }
        if let Some(last_contact) = request.last_contact_date {
            quote.last_contact_date = Some(last_contact);
        }

        let updated = self.quote_repo.update(id, quote).await?;
        log_actor_activity(
            self.admin_repo.as_ref(),
            actor,
            "quote_updated",
            format!("Updated quote {}", id),
        )
        .await;
        Ok(updated)
    }

    async fn add_note(
        &self,
        id: ObjectId,
        note: String,
        actor: &Actor,
    ) -> Result<Quote, ServiceError> {
        let mut quote = self.quote_repo.get_by_id(id).await?;
        quote.add_note(note, actor.username.clone(), Utc::now());
        let updated = self.quote_repo.update(id, quote).await?;
        log_actor_activity(
            self.admin_repo.as_ref(),
            actor,
            "quote_note_added",
            format!("Added note to quote {}", id),
        )
        .await;
        Ok(updated)
    }

    async fn delete_quote(&self, id: ObjectId, actor: &Actor) -> Result<(), ServiceError> {
        self.quote_repo.delete(id).await?;
        log_actor_activity(
            self.admin_repo.as_ref(),
            actor,
            "quote_deleted",
            format!("Deleted quote {}", id),
        )
        .await;
        Ok(())
    }

    async fn stats(&self) -> Result<QuoteStats, ServiceError> {
        Ok(self.quote_repo.stats().await?)
    }

    async fn whatsapp_link(&self, id: ObjectId) -> Result<(String, String), ServiceError> {
        let quote = self.quote_repo.get_by_id(id).await?;
        let fields = whatsapp::MessageFields::from_quote(&quote);
        let message = whatsapp::build_message(&fields, "services");
        let url = whatsapp::deep_link(&self.whatsapp_config.number, &message);
        Ok((message, url))
    }
}
