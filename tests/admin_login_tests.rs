use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::{Duration, Utc};

use solartn_backend::config::JwtConfig;
use solartn_backend::dto::admin_dto::{ChangePasswordRequest, CreateAdminRequest, LoginRequest};
use solartn_backend::model::admin::{Admin, AdminProfile, AdminRole, Permissions};
use solartn_backend::model::content::{Content, SectionKey};
use solartn_backend::model::quote::Quote;
use solartn_backend::repository::admin_repo::AdminRepository;
use solartn_backend::repository::content_repo::ContentRepository;
use solartn_backend::repository::quote_repo::{QuoteFilter, QuoteRepository, QuoteStats};
use solartn_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use solartn_backend::service::admin_service::{AdminService, AdminServiceImpl, RequestContext};
use solartn_backend::util::error::ServiceError;
use solartn_backend::util::jwt::JwtTokenUtilsImpl;
use solartn_backend::util::password::{PasswordUtils, PasswordUtilsImpl};

struct InMemoryAdminRepo {
    admins: Mutex<HashMap<ObjectId, Admin>>,
}

impl InMemoryAdminRepo {
    fn new() -> Self {
        InMemoryAdminRepo {
            admins: Mutex::new(HashMap::new()),
        }
    }

    fn get(&self, id: ObjectId) -> Admin {
        self.admins.lock().unwrap().get(&id).cloned().unwrap()
    }
}

#[async_trait]
impl AdminRepository for InMemoryAdminRepo {
    async fn create(&self, admin: Admin) -> RepositoryResult<Admin> {
        let mut stored = admin;
        stored.id = Some(stored.id.unwrap_or_else(ObjectId::new));
        let id = stored.id.unwrap();
        self.admins.lock().unwrap().insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Admin> {
        self.admins
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("no such admin"))
    }

    async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> RepositoryResult<Option<Admin>> {
        Ok(self
            .admins
            .lock()
            .unwrap()
            .values()
            .find(|a| a.username == identifier || a.email == identifier)
            .cloned())
    }

    async fn update(&self, id: ObjectId, admin: Admin) -> RepositoryResult<Admin> {
        let mut admins = self.admins.lock().unwrap();
        if !admins.contains_key(&id) {
            return Err(RepositoryError::not_found("no such admin"));
        }
        let mut stored = admin;
        stored.id = Some(id);
        admins.insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        self.admins
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found("no such admin"))
    }

    async fn list(&self) -> RepositoryResult<Vec<Admin>> {
        Ok(self.admins.lock().unwrap().values().cloned().collect())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.admins.lock().unwrap().len() as u64)
    }
}

/// Quote repository stub; the login flow never touches quotes.
struct NoQuotes;

#[async_trait]
impl QuoteRepository for NoQuotes {
    async fn create(&self, _quote: Quote) -> RepositoryResult<Quote> {
        unimplemented!()
    }
    async fn get_by_id(&self, _id: ObjectId) -> RepositoryResult<Quote> {
        unimplemented!()
    }
    async fn update(&self, _id: ObjectId, _quote: Quote) -> RepositoryResult<Quote> {
        unimplemented!()
    }
    async fn delete(&self, _id: ObjectId) -> RepositoryResult<()> {
        unimplemented!()
    }
    async fn list(
        &self,
        _filter: &QuoteFilter,
        _page: u32,
        _limit: u32,
    ) -> RepositoryResult<(Vec<Quote>, u64)> {
        unimplemented!()
    }
    async fn find_recent_by_phone(
        &self,
        _phone: &str,
        _since: &str,
    ) -> RepositoryResult<Option<Quote>> {
        unimplemented!()
    }
    async fn stats(&self) -> RepositoryResult<QuoteStats> {
        Ok(QuoteStats {
            total: 0,
            new: 0,
            contacted: 0,
            quote_sent: 0,
            follow_up: 0,
            converted: 0,
            closed: 0,
            this_month: 0,
        })
    }
    async fn recent(&self, _limit: i64) -> RepositoryResult<Vec<Quote>> {
        Ok(vec![])
    }
}

/// Content repository stub holding a fixed set of sections; the dashboard
/// only ever lists them.
struct FixedSections(Vec<Content>);

#[async_trait]
impl ContentRepository for FixedSections {
    async fn find_by_section(&self, _section: SectionKey) -> RepositoryResult<Option<Content>> {
        unimplemented!()
    }
    async fn list_all(&self) -> RepositoryResult<Vec<Content>> {
        Ok(self.0.clone())
    }
    async fn list_active(&self) -> RepositoryResult<Vec<Content>> {
        Ok(self.0.iter().filter(|c| c.is_active).cloned().collect())
    }
    async fn save(&self, _content: Content) -> RepositoryResult<Content> {
        unimplemented!()
    }
}

fn make_admin(password: &str) -> Admin {
    Admin {
        id: Some(ObjectId::new()),
        username: "admin".to_string(),
        email: "admin@solartn.com".to_string(),
        password_hash: PasswordUtilsImpl::hash_password(password).unwrap(),
        role: AdminRole::SuperAdmin,
        permissions: Permissions::defaults_for(AdminRole::SuperAdmin),
        profile: AdminProfile::default(),
        is_active: true,
        last_login: None,
        login_attempts: 0,
        lock_until: None,
        activity_log: vec![],
        created_at: None,
        updated_at: None,
    }
}

async fn setup(password: &str) -> (AdminServiceImpl, Arc<InMemoryAdminRepo>, ObjectId) {
    let repo = Arc::new(InMemoryAdminRepo::new());
    let admin = repo.create(make_admin(password)).await.unwrap();
    let service = AdminServiceImpl::new(
        repo.clone(),
        Arc::new(NoQuotes),
        Arc::new(FixedSections(vec![])),
        JwtTokenUtilsImpl::new(JwtConfig::default()),
    );
    (service, repo, admin.id.unwrap())
}

fn login(username: &str, password: &str) -> LoginRequest {
    LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn successful_login_returns_token_and_view() {
    let (service, repo, id) = setup("admin123").await;

    let response = service
        .login(login("admin", "admin123"), RequestContext::default())
        .await
        .unwrap();

    assert!(response.success);
    assert!(!response.token.is_empty());
    assert_eq!(response.admin.username, "admin");

    let stored = repo.get(id);
    assert!(stored.last_login.is_some());
    assert_eq!(stored.activity_log.last().unwrap().action, "login");
}

#[tokio::test]
async fn login_accepts_email_as_identifier() {
    let (service, _repo, _id) = setup("admin123").await;
    let response = service
        .login(login("admin@solartn.com", "admin123"), RequestContext::default())
        .await
        .unwrap();
    assert!(response.success);
}

#[tokio::test]
async fn wrong_password_and_unknown_user_are_indistinguishable() {
    let (service, _repo, _id) = setup("admin123").await;

    let wrong_password = service
        .login(login("admin", "nope"), RequestContext::default())
        .await
        .unwrap_err();
    let unknown_user = service
        .login(login("ghost", "nope"), RequestContext::default())
        .await
        .unwrap_err();

    match (&wrong_password, &unknown_user) {
        (ServiceError::Unauthorized(a), ServiceError::Unauthorized(b)) => assert_eq!(a, b),
        other => panic!("expected matching Unauthorized errors, got {:?}", other),
    }
}

#[tokio::test]
async fn fifth_failure_locks_the_account() {
    let (service, repo, id) = setup("admin123").await;

    for _ in 0..5 {
        let err = service
            .login(login("admin", "nope"), RequestContext::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));
    }

    let stored = repo.get(id);
    assert_eq!(stored.login_attempts, 5);
    assert!(stored.is_locked(Utc::now()));

    // Even the correct password is refused while locked
    let err = service
        .login(login("admin", "admin123"), RequestContext::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Locked(_)));
}

#[tokio::test]
async fn expired_lock_allows_login_again() {
    let (service, repo, id) = setup("admin123").await;

    let mut stored = repo.get(id);
    stored.login_attempts = 5;
    stored.lock_until = Some((Utc::now() - Duration::minutes(1)).to_rfc3339());
    repo.update(id, stored).await.unwrap();

    let response = service
        .login(login("admin", "admin123"), RequestContext::default())
        .await
        .unwrap();
    assert!(response.success);

    let stored = repo.get(id);
    assert_eq!(stored.login_attempts, 0);
    assert!(stored.lock_until.is_none());
}

#[tokio::test]
async fn successful_login_resets_the_failure_counter() {
    let (service, repo, id) = setup("admin123").await;

    for _ in 0..3 {
        let _ = service
            .login(login("admin", "nope"), RequestContext::default())
            .await;
    }
    assert_eq!(repo.get(id).login_attempts, 3);

    service
        .login(login("admin", "admin123"), RequestContext::default())
        .await
        .unwrap();
    assert_eq!(repo.get(id).login_attempts, 0);
}

#[tokio::test]
async fn inactive_account_cannot_log_in() {
    let (service, repo, id) = setup("admin123").await;

    let mut stored = repo.get(id);
    stored.is_active = false;
    repo.update(id, stored).await.unwrap();

    let err = service
        .login(login("admin", "admin123"), RequestContext::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Unauthorized(_)));
}

#[tokio::test]
async fn self_deletion_is_rejected() {
    let (service, _repo, id) = setup("admin123").await;
    let err = service
        .delete_admin(id, id, RequestContext::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
}

#[tokio::test]
async fn logout_is_recorded_in_the_activity_log() {
    let (service, repo, id) = setup("admin123").await;

    service
        .login(login("admin", "admin123"), RequestContext::default())
        .await
        .unwrap();
    service.logout(id, RequestContext::default()).await.unwrap();

    let log = repo.get(id).activity_log;
    let actions: Vec<&str> = log.iter().map(|e| e.action.as_str()).collect();
    assert_eq!(actions, vec!["login", "logout"]);
}

#[tokio::test]
async fn creating_an_admin_is_recorded_on_the_actor() {
    let (service, repo, id) = setup("admin123").await;

    let view = service
        .create_admin(
            id,
            CreateAdminRequest {
                username: "editor1".to_string(),
                email: "editor1@solartn.com".to_string(),
                password: "editor123".to_string(),
                role: AdminRole::Editor,
                permissions: None,
                profile: AdminProfile::default(),
            },
            RequestContext::default(),
        )
        .await
        .unwrap();
    assert_eq!(view.username, "editor1");

    let entry = repo.get(id).activity_log.last().cloned().unwrap();
    assert_eq!(entry.action, "admin_created");
    assert_eq!(entry.description, "Created admin user: editor1");
}

#[tokio::test]
async fn password_change_is_recorded_and_takes_effect() {
    let (service, repo, id) = setup("admin123").await;

    service
        .change_password(
            id,
            ChangePasswordRequest {
                current_password: "admin123".to_string(),
                new_password: "brand-new-1".to_string(),
            },
            RequestContext::default(),
        )
        .await
        .unwrap();

    let entry = repo.get(id).activity_log.last().cloned().unwrap();
    assert_eq!(entry.action, "password_changed");

    // The old password no longer works, the new one does
    assert!(service
        .login(login("admin", "admin123"), RequestContext::default())
        .await
        .is_err());
    assert!(service
        .login(login("admin", "brand-new-1"), RequestContext::default())
        .await
        .is_ok());
}

#[tokio::test]
async fn dashboard_breaks_admins_down_by_role_and_counts_sections() {
    let repo = Arc::new(InMemoryAdminRepo::new());
    repo.create(make_admin("admin123")).await.unwrap();
    let mut editor = make_admin("editor123");
    editor.id = Some(ObjectId::new());
    editor.username = "editor1".to_string();
    editor.email = "editor1@solartn.com".to_string();
    editor.role = AdminRole::Editor;
    repo.create(editor).await.unwrap();

    let mut hidden = Content::empty(SectionKey::About);
    hidden.is_active = false;
    let sections = vec![Content::empty(SectionKey::Hero), hidden];

    let service = AdminServiceImpl::new(
        repo.clone(),
        Arc::new(NoQuotes),
        Arc::new(FixedSections(sections)),
        JwtTokenUtilsImpl::new(JwtConfig::default()),
    );

    let stats = service.dashboard_stats().await.unwrap();
    assert_eq!(stats.total_admins, 2);
    assert_eq!(stats.admins_by_role.super_admin, 1);
    assert_eq!(stats.admins_by_role.editor, 1);
    assert_eq!(stats.admins_by_role.admin, 0);
    assert_eq!(stats.content.active, 1);
    assert_eq!(stats.content.inactive, 1);
}
