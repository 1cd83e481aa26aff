use bson::oid::ObjectId;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::model::parse_timestamp;

/// Failed attempts tolerated before the account is locked.
pub const MAX_LOGIN_ATTEMPTS: u32 = 5;
/// How long a lock lasts once triggered.
pub const LOCK_DURATION_HOURS: i64 = 2;
/// Most recent activity-log entries kept per account.
pub const ACTIVITY_LOG_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    #[default]
    Admin,
    Editor,
    Viewer,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::SuperAdmin => "super_admin",
            AdminRole::Admin => "admin",
            AdminRole::Editor => "editor",
            AdminRole::Viewer => "viewer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    pub can_manage_content: bool,
    pub can_manage_quotes: bool,
    pub can_manage_users: bool,
    pub can_view_analytics: bool,
    pub can_manage_settings: bool,
}

impl Permissions {
    /// Baseline flags for a freshly created account of the given role.
    pub fn defaults_for(role: AdminRole) -> Self {
        match role {
            AdminRole::SuperAdmin => Permissions {
                can_manage_content: true,
                can_manage_quotes: true,
                can_manage_users: true,
                can_view_analytics: true,
                can_manage_settings: true,
            },
            AdminRole::Admin => Permissions {
                can_manage_content: true,
                can_manage_quotes: true,
                can_manage_users: false,
                can_view_analytics: true,
                can_manage_settings: false,
            },
            AdminRole::Editor | AdminRole::Viewer => Permissions {
                can_manage_content: false,
                can_manage_quotes: false,
                can_manage_users: false,
                can_view_analytics: true,
                can_manage_settings: false,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// One entry in the per-account activity log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub action: String,
    pub description: String,
    pub ip_address: String,
    pub user_agent: String,
    pub timestamp: String,
}

/// A back-office account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub username: String,
    pub email: String,
    /// Salted one-way hash; the plaintext is never stored or compared.
    pub password_hash: String,

    #[serde(default)]
    pub role: AdminRole,
    pub permissions: Permissions,
    #[serde(default)]
    pub profile: AdminProfile,

    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub last_login: Option<String>,

    #[serde(default)]
    pub login_attempts: u32,
    #[serde(default)]
    pub lock_until: Option<String>,

    #[serde(default)]
    pub activity_log: Vec<ActivityEntry>,

    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Admin {
    /// Display name: "First Last" when the profile has both, else the username.
    pub fn full_name(&self) -> String {
        match (&self.profile.first_name, &self.profile.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            _ => self.username.clone(),
        }
    }

    /// True iff a lock is set and has not yet expired. Derived, never stored.
    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        self.lock_until
            .as_deref()
            .and_then(parse_timestamp)
            .map(|until| until > now)
            .unwrap_or(false)
    }

    /// Lockout transition for one failed authentication attempt.
    ///
    /// A stale lock expires first: counting restarts at 1 and the lock is
    /// cleared. Otherwise the counter increments, and reaching
    /// `MAX_LOGIN_ATTEMPTS` on an unlocked account sets a lock
    /// `LOCK_DURATION_HOURS` ahead.
    pub fn register_failed_login(&mut self, now: DateTime<Utc>) {
        if let Some(until) = self.lock_until.as_deref().and_then(parse_timestamp) {
            if until <= now {
                self.login_attempts = 1;
                self.lock_until = None;
                return;
            }
        }

        self.login_attempts += 1;
        if self.login_attempts >= MAX_LOGIN_ATTEMPTS && !self.is_locked(now) {
            self.lock_until = Some((now + Duration::hours(LOCK_DURATION_HOURS)).to_rfc3339());
        }
    }

    /// Clears the guard unconditionally, on successful authentication.
    pub fn reset_login_attempts(&mut self) {
        self.login_attempts = 0;
        self.lock_until = None;
    }

    /// Appends an activity-log entry, evicting the oldest entries past the
    /// capacity bound (FIFO).
    pub fn log_activity(&mut self, entry: ActivityEntry) {
        self.activity_log.push(entry);
        if self.activity_log.len() > ACTIVITY_LOG_CAPACITY {
            let excess = self.activity_log.len() - ACTIVITY_LOG_CAPACITY;
            self.activity_log.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_admin() -> Admin {
        Admin {
            id: None,
            username: "admin".to_string(),
            email: "admin@solartn.com".to_string(),
            password_hash: String::new(),
            role: AdminRole::Admin,
            permissions: Permissions::defaults_for(AdminRole::Admin),
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

    #[test]
    fn fifth_failure_locks_for_two_hours() {
        let now = Utc::now();
        let mut admin = sample_admin();
        for _ in 0..4 {
            admin.register_failed_login(now);
            assert!(admin.lock_until.is_none());
        }
        admin.register_failed_login(now);
        assert_eq!(admin.login_attempts, 5);
        assert!(admin.is_locked(now));

        let until = parse_timestamp(admin.lock_until.as_deref().unwrap()).unwrap();
        assert_eq!(until, now + Duration::hours(2));
    }

    #[test]
    fn lock_expires_the_instant_now_passes_it() {
        let now = Utc::now();
        let mut admin = sample_admin();
        admin.login_attempts = 5;
        admin.lock_until = Some(now.to_rfc3339());
        assert!(!admin.is_locked(now));
        assert!(admin.is_locked(now - Duration::seconds(1)));
    }

    #[test]
    fn failure_after_stale_lock_restarts_counting_at_one() {
        let now = Utc::now();
        let mut admin = sample_admin();
        admin.login_attempts = 5;
        admin.lock_until = Some((now - Duration::minutes(1)).to_rfc3339());

        admin.register_failed_login(now);
        assert_eq!(admin.login_attempts, 1);
        assert!(admin.lock_until.is_none());
    }

    #[test]
    fn successful_login_clears_the_guard() {
        let now = Utc::now();
        let mut admin = sample_admin();
        for _ in 0..3 {
            admin.register_failed_login(now);
        }
        admin.reset_login_attempts();
        assert_eq!(admin.login_attempts, 0);
        assert!(admin.lock_until.is_none());
    }

    #[test]
    fn activity_log_keeps_the_most_recent_hundred() {
        let now = Utc::now();
        let mut admin = sample_admin();
        for i in 0..101 {
            admin.log_activity(ActivityEntry {
                action: format!("action_{}", i),
                description: String::new(),
                ip_address: "127.0.0.1".to_string(),
                user_agent: "test".to_string(),
                timestamp: now.to_rfc3339(),
            });
        }
        assert_eq!(admin.activity_log.len(), ACTIVITY_LOG_CAPACITY);
        assert_eq!(admin.activity_log[0].action, "action_1");
        assert_eq!(admin.activity_log[99].action, "action_100");
    }

    #[test]
    fn full_name_falls_back_to_username() {
        let mut admin = sample_admin();
        assert_eq!(admin.full_name(), "admin");
        admin.profile.first_name = Some("Admin".to_string());
        admin.profile.last_name = Some("User".to_string());
        assert_eq!(admin.full_name(), "Admin User");
    }

    #[test]
    fn viewer_defaults_are_read_only() {
        let perms = Permissions::defaults_for(AdminRole::Viewer);
        assert!(!perms.can_manage_content);
        assert!(!perms.can_manage_users);
        assert!(perms.can_view_analytics);
    }
}
