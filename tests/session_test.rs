use stockdesk::domain::{LoginResponse, Role};
use stockdesk::router::Tab;
use stockdesk::session::{SessionManager, TOKEN_KEY, USER_KEY};
use stockdesk::store::{KeyValueStore, SqliteStore};
use tempfile::TempDir;

fn admin_login() -> LoginResponse {
    LoginResponse {
        token: "t1".into(),
        user_id: 5,
        username: "alice".into(),
        role: Role::Admin,
    }
}

#[test]
fn session_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.sqlite3");

    {
        let mut session = SessionManager::new(Box::new(SqliteStore::open(&path).unwrap()));
        session.establish(admin_login()).unwrap();
    }

    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("t1"));
    let user: serde_json::Value =
        serde_json::from_str(&store.get(USER_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(user["username"], "alice");
    assert_eq!(user["role"], "ADMIN");

    let mut session = SessionManager::new(Box::new(store));
    let restored = session.restore().unwrap();
    assert_eq!(restored.user.id, 5);
    assert!(session.can_access(Tab::Users));
}

#[test]
fn partial_session_is_logged_out() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.sqlite3");
    SqliteStore::open(&path).unwrap().set(TOKEN_KEY, "t1").unwrap();

    let mut session = SessionManager::new(Box::new(SqliteStore::open(&path).unwrap()));
    assert!(session.restore().is_none());
    assert!(!session.is_logged_in());
    assert!(SqliteStore::open(&path).unwrap().keys().unwrap().is_empty());
}

#[test]
fn logout_clears_both_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.sqlite3");

    let mut session = SessionManager::new(Box::new(SqliteStore::open(&path).unwrap()));
    session.establish(admin_login()).unwrap();
    session.logout();
    // Idempotent
    session.logout();

    assert!(session.current().is_none());
    assert!(!session.can_access(Tab::Products));
    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(store.get(USER_KEY).unwrap(), None);
}
