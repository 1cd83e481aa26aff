use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::AdminUserConfig;
use crate::dto::admin_dto::{
    AdminView, ChangePasswordRequest, CreateAdminRequest, LoginRequest, LoginResponse,
    UpdateAdminRequest, UpdateProfileRequest,
};
use crate::model::admin::{ActivityEntry, Admin, AdminRole, Permissions};
use crate::model::quote::Quote;
use crate::repository::admin_repo::AdminRepository;
use crate::repository::content_repo::ContentRepository;
use crate::repository::quote_repo::{QuoteRepository, QuoteStats};
use crate::util::error::ServiceError;
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};

/// Context of the HTTP request, recorded in the activity log.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub ip_address: String,
    pub user_agent: String,
}

/// The authenticated admin performing a mutation, with the request context
/// needed for the activity-log entry appended on their account.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: ObjectId,
    pub username: String,
    pub context: RequestContext,
}

/// Appends one activity-log entry on the actor's account. Log persistence
/// never fails the operation that triggered it; a lost entry is logged and
/// swallowed.
pub(crate) async fn log_actor_activity(
    repo: &dyn AdminRepository,
    actor: &Actor,
    action: &str,
    description: String,
) {
    let entry = ActivityEntry {
        action: action.to_string(),
        description,
        ip_address: actor.context.ip_address.clone(),
        user_agent: actor.context.user_agent.clone(),
        timestamp: Utc::now().to_rfc3339(),
    };
    match repo.get_by_id(actor.id).await {
        Ok(mut admin) => {
            admin.log_activity(entry);
            if let Err(e) = repo.update(actor.id, admin).await {
                warn!("Failed to persist activity entry for {}: {}", actor.username, e);
            }
        }
        Err(e) => warn!("Failed to load actor {} for activity entry: {}", actor.username, e),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSectionStats {
    pub active: u64,
    pub inactive: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminsByRole {
    pub super_admin: u64,
    pub admin: u64,
    pub editor: u64,
    pub viewer: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub quotes: QuoteStats,
    pub recent_quotes: Vec<Quote>,
    pub total_admins: u64,
    pub admins_by_role: AdminsByRole,
    pub content: ContentSectionStats,
}

#[async_trait]
pub trait AdminService: Send + Sync {
    async fn login(
        &self,
        request: LoginRequest,
        ctx: RequestContext,
    ) -> Result<LoginResponse, ServiceError>;
    /// Stateless token scheme; logout only records the activity entry.
    async fn logout(&self, admin_id: ObjectId, ctx: RequestContext) -> Result<(), ServiceError>;
    async fn get_admin(&self, id: ObjectId) -> Result<AdminView, ServiceError>;
    async fn list_admins(&self, actor_id: ObjectId) -> Result<Vec<AdminView>, ServiceError>;
    async fn create_admin(
        &self,
        actor_id: ObjectId,
        request: CreateAdminRequest,
        ctx: RequestContext,
    ) -> Result<AdminView, ServiceError>;
    async fn update_admin(
        &self,
        actor_id: ObjectId,
        target_id: ObjectId,
        request: UpdateAdminRequest,
        ctx: RequestContext,
    ) -> Result<AdminView, ServiceError>;
    async fn delete_admin(
        &self,
        actor_id: ObjectId,
        target_id: ObjectId,
        ctx: RequestContext,
    ) -> Result<(), ServiceError>;
    async fn change_password(
        &self,
        admin_id: ObjectId,
        request: ChangePasswordRequest,
        ctx: RequestContext,
    ) -> Result<(), ServiceError>;
    async fn update_profile(
        &self,
        admin_id: ObjectId,
        request: UpdateProfileRequest,
        ctx: RequestContext,
    ) -> Result<AdminView, ServiceError>;
    async fn activity_log(&self, admin_id: ObjectId) -> Result<Vec<ActivityEntry>, ServiceError>;
    async fn dashboard_stats(&self) -> Result<DashboardStats, ServiceError>;
    /// Creates the bootstrap super admin when the collection is empty.
    async fn seed_default_admin(&self, config: &AdminUserConfig) -> Result<(), ServiceError>;
}

pub struct AdminServiceImpl {
    pub admin_repo: Arc<dyn AdminRepository>,
    pub quote_repo: Arc<dyn QuoteRepository>,
    pub content_repo: Arc<dyn ContentRepository>,
    pub jwt_utils: JwtTokenUtilsImpl,
}

impl AdminServiceImpl {
    pub fn new(
        admin_repo: Arc<dyn AdminRepository>,
        quote_repo: Arc<dyn QuoteRepository>,
        content_repo: Arc<dyn ContentRepository>,
        jwt_utils: JwtTokenUtilsImpl,
    ) -> Self {
        AdminServiceImpl {
            admin_repo,
            quote_repo,
            content_repo,
            jwt_utils,
        }
    }

    fn invalid_credentials() -> ServiceError {
        // The same message for unknown account, inactive account and wrong
        // password. Callers learn nothing about which one it was.
        ServiceError::Unauthorized("Invalid credentials".to_string())
    }

    async fn require_user_management(&self, actor_id: ObjectId) -> Result<Admin, ServiceError> {
        let actor = self.admin_repo.get_by_id(actor_id).await?;
        if !actor.permissions.can_manage_users {
            return Err(ServiceError::PermissionDenied(
                "You do not have permission to manage admin accounts".to_string(),
            ));
        }
        Ok(actor)
    }

    fn record(&self, admin: &mut Admin, action: &str, description: String, ctx: &RequestContext) {
        admin.log_activity(ActivityEntry {
            action: action.to_string(),
            description,
            ip_address: ctx.ip_address.clone(),
            user_agent: ctx.user_agent.clone(),
            timestamp: Utc::now().to_rfc3339(),
        });
    }
}

#[async_trait]
impl AdminService for AdminServiceImpl {
    async fn login(
        &self,
        request: LoginRequest,
        ctx: RequestContext,
    ) -> Result<LoginResponse, ServiceError> {
        let now = Utc::now();

        let mut admin = match self
            .admin_repo
            .find_by_username_or_email(&request.username)
            .await?
        {
            Some(admin) if admin.is_active => admin,
            _ => {
                warn!("Login attempt for unknown or inactive account");
                return Err(Self::invalid_credentials());
            }
        };

        // The lock is checked before the password so a locked account leaks
        // nothing about whether the password was right.
        if admin.is_locked(now) {
            warn!("Login attempt on locked account: {}", admin.username);
            return Err(ServiceError::Locked(
                "Account is temporarily locked due to too many failed login attempts. \
                 Try again later."
                    .to_string(),
            ));
        }

        let id = admin
            .id
            .ok_or_else(|| ServiceError::InternalError("Stored admin has no id".to_string()))?;

        let verified = PasswordUtilsImpl::verify_password(&request.password, &admin.password_hash)
            .map_err(|e| ServiceError::InternalError(e.to_string()))?;

        if !verified {
            admin.register_failed_login(now);
            self.admin_repo.update(id, admin).await?;
            return Err(Self::invalid_credentials());
        }

        admin.reset_login_attempts();
        admin.last_login = Some(now.to_rfc3339());
        self.record(
            &mut admin,
            "login",
            "Logged in successfully".to_string(),
            &ctx,
        );
        let admin = self.admin_repo.update(id, admin).await?;

        let token = self
            .jwt_utils
            .generate_token(
                &id.to_hex(),
                &admin.username,
                &admin.email,
                admin.role.as_str(),
            )
            .map_err(|e| ServiceError::InternalError(e.to_string()))?;

        info!("Admin logged in: {}", admin.username);
        Ok(LoginResponse {
            success: true,
            token,
            admin: AdminView::from(&admin),
        })
    }

    async fn logout(&self, admin_id: ObjectId, ctx: RequestContext) -> Result<(), ServiceError> {
        let mut admin = self.admin_repo.get_by_id(admin_id).await?;
        self.record(&mut admin, "logout", "Admin logged out".to_string(), &ctx);
        self.admin_repo.update(admin_id, admin).await?;
        Ok(())
    }

    async fn get_admin(&self, id: ObjectId) -> Result<AdminView, ServiceError> {
        let admin = self.admin_repo.get_by_id(id).await?;
        Ok(AdminView::from(&admin))
    }

    async fn list_admins(&self, actor_id: ObjectId) -> Result<Vec<AdminView>, ServiceError> {
        self.require_user_management(actor_id).await?;
        let admins = self.admin_repo.list().await?;
        Ok(admins.iter().map(AdminView::from).collect())
    }

    async fn create_admin(
        &self,
        actor_id: ObjectId,
        request: CreateAdminRequest,
        ctx: RequestContext,
    ) -> Result<AdminView, ServiceError> {
        let mut actor = self.require_user_management(actor_id).await?;

        let password_hash = PasswordUtilsImpl::hash_password(&request.password)
            .map_err(|e| ServiceError::InternalError(e.to_string()))?;

        let permissions = request
            .permissions
            .unwrap_or_else(|| Permissions::defaults_for(request.role));

        let admin = Admin {
            id: None,
            username: request.username,
            email: request.email,
            password_hash,
            role: request.role,
            permissions,
            profile: request.profile,
            is_active: true,
            last_login: None,
            login_attempts: 0,
            lock_until: None,
            activity_log: vec![],
            created_at: None,
            updated_at: None,
        };

        let created = self.admin_repo.create(admin).await?;
        info!(
            "Admin account '{}' created by '{}'",
            created.username, actor.username
        );
        self.record(
            &mut actor,
            "admin_created",
            format!("Created admin user: {}", created.username),
            &ctx,
        );
        self.admin_repo.update(actor_id, actor).await?;
        Ok(AdminView::from(&created))
    }

    async fn update_admin(
        &self,
        actor_id: ObjectId,
        target_id: ObjectId,
        request: UpdateAdminRequest,
        ctx: RequestContext,
    ) -> Result<AdminView, ServiceError> {
        let mut actor = self.require_user_management(actor_id).await?;

        let mut admin = self.admin_repo.get_by_id(target_id).await?;
        if let Some(email) = request.email {
            admin.email = email;
        }
        if let Some(role) = request.role {
            admin.role = role;
            // Role change without explicit permissions resets to role defaults
            if request.permissions.is_none() {
                admin.permissions = Permissions::defaults_for(role);
            }
        }
        if let Some(permissions) = request.permissions {
            admin.permissions = permissions;
        }
        if let Some(profile) = request.profile {
            admin.profile = profile;
        }
        if let Some(is_active) = request.is_active {
            admin.is_active = is_active;
        }

        let updated = self.admin_repo.update(target_id, admin).await?;

        // Self-edits fold the entry into the same document save below;
        // a separate write here would clobber it.
        if actor_id == target_id {
            let mut actor = updated.clone();
            let message = format!("Updated admin user: {}", actor.username);
            self.record(&mut actor, "admin_updated", message, &ctx);
            let saved = self.admin_repo.update(actor_id, actor).await?;
            return Ok(AdminView::from(&saved));
        }

        self.record(
            &mut actor,
            "admin_updated",
            format!("Updated admin user: {}", updated.username),
            &ctx,
        );
        self.admin_repo.update(actor_id, actor).await?;
        Ok(AdminView::from(&updated))
    }

    async fn delete_admin(
        &self,
        actor_id: ObjectId,
        target_id: ObjectId,
        ctx: RequestContext,
    ) -> Result<(), ServiceError> {
        let mut actor = self.require_user_management(actor_id).await?;
        if actor_id == target_id {
            return Err(ServiceError::InvalidInput(
                "You cannot delete your own account".to_string(),
            ));
        }
        let target = self.admin_repo.get_by_id(target_id).await?;
        self.admin_repo.delete(target_id).await?;
        self.record(
            &mut actor,
            "admin_deleted",
            format!("Deleted admin user: {}", target.username),
            &ctx,
        );
        self.admin_repo.update(actor_id, actor).await?;
        Ok(())
    }

    async fn change_password(
        &self,
        admin_id: ObjectId,
        request: ChangePasswordRequest,
        ctx: RequestContext,
    ) -> Result<(), ServiceError> {
        let mut admin = self.admin_repo.get_by_id(admin_id).await?;

        let verified =
            PasswordUtilsImpl::verify_password(&request.current_password, &admin.password_hash)
                .map_err(|e| ServiceError::InternalError(e.to_string()))?;
        if !verified {
            return Err(ServiceError::Unauthorized(
                "Current password is incorrect".to_string(),
            ));
        }

        admin.password_hash = PasswordUtilsImpl::hash_password(&request.new_password)
            .map_err(|e| ServiceError::InternalError(e.to_string()))?;
        self.record(
            &mut admin,
            "password_changed",
            "Admin changed password".to_string(),
            &ctx,
        );
        self.admin_repo.update(admin_id, admin).await?;
        info!("Password changed for admin {}", admin_id);
        Ok(())
    }

    async fn update_profile(
        &self,
        admin_id: ObjectId,
        request: UpdateProfileRequest,
        ctx: RequestContext,
    ) -> Result<AdminView, ServiceError> {
        let mut admin = self.admin_repo.get_by_id(admin_id).await?;

        if let Some(first_name) = request.first_name {
            admin.profile.first_name = Some(first_name);
        }
        if let Some(last_name) = request.last_name {
            admin.profile.last_name = Some(last_name);
        }
        if let Some(phone) = request.phone {
            admin.profile.phone = Some(phone);
        }
        if let Some(avatar) = request.avatar {
            admin.profile.avatar = Some(avatar);
        }

        self.record(
            &mut admin,
            "profile_updated",
            "Updated admin profile".to_string(),
            &ctx,
        );
        let updated = self.admin_repo.update(admin_id, admin).await?;
        Ok(AdminView::from(&updated))
    }

    async fn activity_log(&self, admin_id: ObjectId) -> Result<Vec<ActivityEntry>, ServiceError> {
        let admin = self.admin_repo.get_by_id(admin_id).await?;
        // Newest first for display
        let mut entries = admin.activity_log;
        entries.reverse();
        Ok(entries)
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, ServiceError> {
        let quotes = self.quote_repo.stats().await?;
        let recent_quotes = self.quote_repo.recent(5).await?;

        let admins = self.admin_repo.list().await?;
        let total_admins = admins.len() as u64;
        let count_role = |role: AdminRole| admins.iter().filter(|a| a.role == role).count() as u64;
        let admins_by_role = AdminsByRole {
            super_admin: count_role(AdminRole::SuperAdmin),
            admin: count_role(AdminRole::Admin),
            editor: count_role(AdminRole::Editor),
            viewer: count_role(AdminRole::Viewer),
        };

        let sections = self.content_repo.list_all().await?;
        let active = sections.iter().filter(|c| c.is_active).count() as u64;
        let content = ContentSectionStats {
            active,
            inactive: sections.len() as u64 - active,
        };

        Ok(DashboardStats {
            quotes,
            recent_quotes,
            total_admins,
            admins_by_role,
            content,
        })
    }

    async fn seed_default_admin(&self, config: &AdminUserConfig) -> Result<(), ServiceError> {
        if self.admin_repo.count().await? > 0 {
            return Ok(());
        }

        let password_hash = PasswordUtilsImpl::hash_password(&config.password)
            .map_err(|e| ServiceError::InternalError(e.to_string()))?;

        let admin = Admin {
            id: None,
            username: config.username.clone(),
            email: config.email.clone(),
            password_hash,
            role: AdminRole::SuperAdmin,
            permissions: Permissions::defaults_for(AdminRole::SuperAdmin),
            profile: crate::model::admin::AdminProfile {
                first_name: Some(config.first_name.clone()),
                last_name: Some(config.last_name.clone()),
                phone: None,
                avatar: None,
            },
            is_active: true,
            last_login: None,
            login_attempts: 0,
            lock_until: None,
            activity_log: vec![],
            created_at: None,
            updated_at: None,
        };

        self.admin_repo.create(admin).await?;
        info!("Default super admin account created: {}", config.username);
        Ok(())
    }
}
