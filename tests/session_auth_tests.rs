use suburban_viz::session::auth::{
    DUPLICATE_ACCOUNT, INVALID_CREDENTIALS, INVALID_EMAIL, NAME_TOO_SHORT, PASSWORD_TOO_SHORT,
};
use suburban_viz::session::{
    AuthConfig, AuthOutcome, FileSessionStore, MemorySessionStore, MockAuth, SESSION_KEY,
    SessionStore, USERS_KEY, User,
};

fn instant_auth() -> MockAuth<MemorySessionStore> {
    MockAuth::new(MemorySessionStore::new(), AuthConfig::default().with_latency_ms(0))
}

#[tokio::test]
async fn demo_login_succeeds_and_persists_session() {
    let mut auth = instant_auth();
    let outcome = auth
        .login("admin@suburban.com", "admin123")
        .await
        .expect("login");
    assert_eq!(outcome, AuthOutcome::ok());
    assert!(auth.is_authenticated());

    let raw = auth.store().get(SESSION_KEY).expect("get").expect("session");
    let stored: User = serde_json::from_str(&raw).expect("stored user");
    assert_eq!(stored.email, "admin@suburban.com");
    assert_eq!(stored.name, "John Admin");
    assert_eq!(Some(&stored), auth.user());
}

#[tokio::test]
async fn wrong_password_fails_and_persists_nothing() {
    let mut auth = instant_auth();
    let outcome = auth
        .login("admin@suburban.com", "wrong")
        .await
        .expect("login");
    assert_eq!(outcome, AuthOutcome::failed(INVALID_CREDENTIALS));
    assert_eq!(outcome.error.as_deref(), Some("Invalid email or password"));
    assert!(!auth.is_authenticated());
    assert!(auth.store().is_empty());
}

#[tokio::test(start_paused = true)]
async fn login_waits_out_the_configured_latency() {
    let mut auth = MockAuth::new(MemorySessionStore::new(), AuthConfig::default());
    let started = tokio::time::Instant::now();
    let outcome = auth.login("demo@suburban.com", "demo123").await.expect("login");
    assert!(outcome.success);
    assert!(started.elapsed() >= std::time::Duration::from_millis(1000));
    assert_eq!(auth.user().map(|user| user.role.as_str()), Some("Manager"));
}

#[tokio::test]
async fn signup_validates_fields_in_order() {
    let mut auth = instant_auth();
    let cases = [
        ("A", "new@site.com", "secret1", NAME_TOO_SHORT),
        ("Ann", "new-site.com", "secret1", INVALID_EMAIL),
        ("Ann", "new@site.com", "12345", PASSWORD_TOO_SHORT),
        ("A", "bad", "1", NAME_TOO_SHORT),
    ];
    for (name, email, password, expected) in cases {
        let outcome = auth.signup(name, email, password).await.expect("signup");
        assert_eq!(outcome, AuthOutcome::failed(expected), "{name} {email}");
    }
    assert!(auth.store().is_empty());
}

#[tokio::test]
async fn signup_registers_user_and_rejects_duplicates() {
    let mut auth = instant_auth();
    let outcome = auth
        .signup("Ann Guard", "ann@site.com", "secret1")
        .await
        .expect("signup");
    assert!(outcome.success);
    let user = auth.user().expect("user").clone();
    assert_eq!(user.role, "User");

    let users: Vec<User> = serde_json::from_str(
        &auth.store().get(USERS_KEY).expect("get").expect("users"),
    )
    .expect("users list");
    assert_eq!(users, vec![user]);

    let duplicate = auth
        .signup("Ann Again", "ANN@site.com", "secret2")
        .await
        .expect("signup");
    assert_eq!(duplicate, AuthOutcome::failed(DUPLICATE_ACCOUNT));
}

#[tokio::test]
async fn malformed_users_list_starts_fresh() {
    let mut store = MemorySessionStore::new();
    store.set(USERS_KEY, "not json".to_owned()).expect("set");
    let mut auth = MockAuth::new(store, AuthConfig::default().with_latency_ms(0));

    let outcome = auth
        .signup("Ann Guard", "ann@site.com", "secret1")
        .await
        .expect("signup");
    assert!(outcome.success);
    let users: Vec<User> = serde_json::from_str(
        &auth.store().get(USERS_KEY).expect("get").expect("users"),
    )
    .expect("users list");
    assert_eq!(users.len(), 1);
}

#[test]
fn malformed_session_is_cleared_on_restore() {
    for raw in ["{not json", r#"{"name":"No Id"}"#, r#"[1,2,3]"#] {
        let mut store = MemorySessionStore::new();
        store.set(SESSION_KEY, raw.to_owned()).expect("set");
        let mut auth = MockAuth::new(store, AuthConfig::default());

        assert!(auth.restore().expect("restore").is_none(), "{raw}");
        assert!(!auth.is_authenticated());
        assert_eq!(auth.store().get(SESSION_KEY).expect("get"), None);
    }
}

#[test]
fn restore_keeps_session_with_non_string_display_fields() {
    let mut store = MemorySessionStore::new();
    store
        .set(
            SESSION_KEY,
            r#"{"id":"u-1","email":"ops@suburban.com","name":42,"role":null}"#.to_owned(),
        )
        .expect("set");
    let mut auth = MockAuth::new(store, AuthConfig::default());

    let user = auth.restore().expect("restore").expect("user").clone();
    assert_eq!(user.id, "u-1");
    assert_eq!(user.email, "ops@suburban.com");
    assert_eq!(user.name, "");
    assert_eq!(user.role, "");
    assert!(auth.store().get(SESSION_KEY).expect("get").is_some());
}

#[tokio::test]
async fn logout_clears_persisted_session() {
    let mut auth = instant_auth();
    auth.login("demo@suburban.com", "demo123").await.expect("login");
    auth.logout().expect("logout");
    assert!(!auth.is_authenticated());
    assert_eq!(auth.store().get(SESSION_KEY).expect("get"), None);
}

#[tokio::test]
async fn file_store_session_survives_a_new_auth_instance() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("session.json");

    let mut auth = MockAuth::new(
        FileSessionStore::new(&path),
        AuthConfig::default().with_latency_ms(0),
    );
    auth.login("admin@suburban.com", "admin123").await.expect("login");
    let user_id = auth.user().expect("user").id.clone();

    let mut reopened = MockAuth::new(FileSessionStore::new(&path), AuthConfig::default());
    let restored = reopened.restore().expect("restore").expect("user");
    assert_eq!(restored.id, user_id);

    reopened.logout().expect("logout");
    let raw = std::fs::read_to_string(&path).expect("read");
    assert!(!raw.contains(SESSION_KEY));
}

#[test]
fn file_store_reads_missing_file_as_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = FileSessionStore::new(dir.path().join("absent.json"));
    assert_eq!(store.get(SESSION_KEY).expect("get"), None);
    store.remove(SESSION_KEY).expect("remove");
    assert!(!store.path().exists());

    store.set("theme", "dark".to_owned()).expect("set");
    assert_eq!(store.get("theme").expect("get").as_deref(), Some("dark"));
}

#[test]
fn file_store_reads_corrupt_file_as_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("corrupt.json");
    std::fs::write(&path, "{ broken").expect("write");
    let mut store = FileSessionStore::new(&path);
    assert_eq!(store.get(SESSION_KEY).expect("get"), None);

    store.set(USERS_KEY, "[]".to_owned()).expect("set");
    let reopened = FileSessionStore::new(&path);
    assert_eq!(reopened.get(USERS_KEY).expect("get").as_deref(), Some("[]"));
}

#[tokio::test]
async fn corrupt_session_file_is_treated_as_logged_out() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{not json").expect("write");

    let mut auth = MockAuth::new(
        FileSessionStore::new(&path),
        AuthConfig::default().with_latency_ms(0),
    );
    assert!(auth.restore().expect("restore").is_none());
    assert!(!auth.is_authenticated());

    let outcome = auth
        .login("admin@suburban.com", "admin123")
        .await
        .expect("login");
    assert_eq!(outcome, AuthOutcome::ok());
    let reopened = FileSessionStore::new(&path);
    assert!(reopened.get(SESSION_KEY).expect("get").is_some());
}
