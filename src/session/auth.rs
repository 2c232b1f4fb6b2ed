use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::error::VizResult;

use super::SessionStore;

/// Store key of the signed-in user.
pub const SESSION_KEY: &str = "suburban_user";
/// Store key of the registered users list.
pub const USERS_KEY: &str = "suburban_users";

pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const NAME_TOO_SHORT: &str = "Name must be at least 2 characters";
pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";
pub const DUPLICATE_ACCOUNT: &str = "An account with this email already exists";

struct DemoCredential {
    email: &'static str,
    password: &'static str,
    name: &'static str,
    role: &'static str,
}

const DEMO_CREDENTIALS: [DemoCredential; 2] = [
    DemoCredential {
        email: "admin@suburban.com",
        password: "admin123",
        name: "John Admin",
        role: "Administrator",
    },
    DemoCredential {
        email: "demo@suburban.com",
        password: "demo123",
        name: "Demo User",
        role: "Manager",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub role: String,
}

/// Only `id` and `email` must be strings; other display fields fall back to empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(value) => Ok(value),
        _ => Ok(String::new()),
    }
}

impl User {
    fn issue(email: &str, name: &str, role: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_owned(),
            name: name.to_owned(),
            role: role.to_owned(),
        }
    }
}

/// Result of a login or signup attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuthOutcome {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    #[must_use]
    pub fn failed(message: &str) -> Self {
        Self {
            success: false,
            error: Some(message.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Simulated round-trip delay applied to login and signup.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
        }
    }
}

impl AuthConfig {
    #[must_use]
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    #[must_use]
    pub fn latency(self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

fn default_latency_ms() -> u64 {
    1000
}

/// Client-side demo authentication over a `SessionStore`.
///
/// There is no server: credentials are checked against two built-in demo
/// accounts and signups are appended to a users list in the store.
#[derive(Debug)]
pub struct MockAuth<S> {
    store: S,
    config: AuthConfig,
    user: Option<User>,
}

impl<S: SessionStore> MockAuth<S> {
    #[must_use]
    pub fn new(store: S, config: AuthConfig) -> Self {
        Self {
            store,
            config,
            user: None,
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Loads the persisted session, if any.
    ///
    /// An entry that is not valid JSON, or lacks a string `id` or `email`,
    /// is removed and the user ends up signed out.
    pub fn restore(&mut self) -> VizResult<Option<&User>> {
        self.user = None;
        let Some(raw) = self.store.get(SESSION_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(value) => match serde_json::from_value::<User>(value) {
                Ok(user) => {
                    debug!(email = %user.email, "restored session");
                    self.user = Some(user);
                }
                Err(err) => {
                    warn!(error = %err, "invalid stored user data, clearing session");
                    self.store.remove(SESSION_KEY)?;
                }
            },
            Err(err) => {
                error!(error = %err, "failed to parse stored user");
                self.store.remove(SESSION_KEY)?;
            }
        }
        Ok(self.user.as_ref())
    }

    pub async fn login(&mut self, email: &str, password: &str) -> VizResult<AuthOutcome> {
        self.simulate_latency().await;

        let matched = DEMO_CREDENTIALS
            .iter()
            .find(|cred| cred.email.eq_ignore_ascii_case(email) && cred.password == password);
        let Some(cred) = matched else {
            debug!("login rejected");
            return Ok(AuthOutcome::failed(INVALID_CREDENTIALS));
        };

        let user = User::issue(cred.email, cred.name, cred.role);
        self.persist_session(user)?;
        debug!(email = cred.email, "login succeeded");
        Ok(AuthOutcome::ok())
    }

    pub async fn signup(&mut self, name: &str, email: &str, password: &str) -> VizResult<AuthOutcome> {
        self.simulate_latency().await;

        if name.chars().count() < 2 {
            return Ok(AuthOutcome::failed(NAME_TOO_SHORT));
        }
        if !email.contains('@') {
            return Ok(AuthOutcome::failed(INVALID_EMAIL));
        }
        if password.chars().count() < 6 {
            return Ok(AuthOutcome::failed(PASSWORD_TOO_SHORT));
        }

        let mut users = self.registered_users()?;
        if users
            .iter()
            .any(|user| user.email.to_lowercase() == email.to_lowercase())
        {
            debug!("signup rejected: duplicate email");
            return Ok(AuthOutcome::failed(DUPLICATE_ACCOUNT));
        }

        let user = User::issue(email, name, "User");
        users.push(user.clone());
        self.persist_session(user)?;
        self.store
            .set(USERS_KEY, serde_json::to_string(&users)?)?;
        debug!(users = users.len(), "signup succeeded");
        Ok(AuthOutcome::ok())
    }

    pub fn logout(&mut self) -> VizResult<()> {
        self.user = None;
        self.store.remove(SESSION_KEY)
    }

    /// Registered users; an unreadable list starts fresh.
    fn registered_users(&self) -> VizResult<Vec<User>> {
        let Some(raw) = self.store.get(USERS_KEY)? else {
            return Ok(Vec::new());
        };
        Ok(serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!(error = %err, "discarding malformed users list");
            Vec::new()
        }))
    }

    fn persist_session(&mut self, user: User) -> VizResult<()> {
        self.store.set(SESSION_KEY, serde_json::to_string(&user)?)?;
        self.user = Some(user);
        Ok(())
    }

    async fn simulate_latency(&self) {
        let latency = self.config.latency();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;

    fn auth() -> MockAuth<MemorySessionStore> {
        MockAuth::new(MemorySessionStore::new(), AuthConfig::default().with_latency_ms(0))
    }

    #[test]
    fn restore_without_entry_is_signed_out() {
        let mut auth = auth();
        assert!(auth.restore().expect("restore").is_none());
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn restore_clears_entry_missing_id() {
        let mut store = MemorySessionStore::new();
        store
            .set(SESSION_KEY, r#"{"email":"a@b.c","name":"A"}"#.to_owned())
            .expect("set");
        let mut auth = MockAuth::new(store, AuthConfig::default());
        assert!(auth.restore().expect("restore").is_none());
        assert_eq!(auth.store().get(SESSION_KEY).expect("get"), None);
    }

    #[tokio::test]
    async fn login_is_case_insensitive_on_email() {
        let mut auth = auth();
        let outcome = auth
            .login("Admin@Suburban.com", "admin123")
            .await
            .expect("login");
        assert_eq!(outcome, AuthOutcome::ok());
        let user = auth.user().expect("user");
        assert_eq!(user.role, "Administrator");
        assert!(Uuid::parse_str(&user.id).is_ok());
    }
}
