//! Session store.
//!
//! Holds the credential roster and the current identity, and mirrors both
//! to storage:
//!
//! - `registeredUsers` - the roster, rewritten on every registration
//! - `token` + `userData` - the session, written on login and cleared on logout
//!
//! On construction the roster is loaded (or seeded with the administrator)
//! and a persisted session is restored without re-checking credentials.
//! Each account keeps the id assigned at registration for every later
//! login; the administrator's id is always [`ADMIN_USER_ID`].

mod error;

pub use error::AuthError;

use ewaste_core::{Email, Role, UserId};

use crate::models::session::{SESSION_TOKEN, keys};
use crate::models::user::{ADMIN_USER_ID, Identity, RosterEntry};
use crate::storage::{self, SharedStorage};

/// Authentication state: roster plus current identity.
pub struct SessionStore {
    storage: SharedStorage,
    roster: Vec<RosterEntry>,
    current: Option<Identity>,
}

impl SessionStore {
    /// Load the roster and any persisted session.
    ///
    /// `admin` is the built-in administrator seeded into an empty roster.
    #[must_use]
    pub fn load(storage: SharedStorage, admin: RosterEntry) -> Self {
        let persisted: Option<Vec<RosterEntry>> = storage::load_or_none(&*storage, keys::ROSTER);
        let mut roster = persisted.unwrap_or_else(|| vec![admin.clone()]);

        if assign_missing_ids(&mut roster, &admin.email) {
            storage::persist(&*storage, keys::ROSTER, &roster);
        }

        let current = restore_session(&storage);
        if let Some(identity) = &current {
            tracing::info!(user_id = %identity.id, "Restored persisted session");
        }

        Self {
            storage,
            roster,
            current,
        }
    }

    /// Log in with an exact email and password match.
    ///
    /// Returns `false` on any failure; the current identity is then left as
    /// it was.
    pub fn login(&mut self, email: &str, password: &str) -> bool {
        match self.try_login(email, password) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(error = %e, "Login rejected");
                false
            }
        }
    }

    /// Log in, reporting why a failure happened.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if no roster entry matches
    /// both email and password.
    pub fn try_login(&mut self, email: &str, password: &str) -> Result<&Identity, AuthError> {
        let identity = self
            .roster
            .iter()
            .find(|entry| entry.matches(email, password))
            .and_then(RosterEntry::identity)
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(self.start_session(identity))
    }

    /// Register a new account and log it in.
    ///
    /// Returns `false` if the email is already registered or the input is
    /// invalid; the roster is then unchanged.
    pub fn register(&mut self, name: &str, email: &str, password: &str, role: Role) -> bool {
        match self.try_register(name, email, password, role) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(error = %e, "Registration rejected");
                false
            }
        }
    }

    /// Register a new account and log it in, reporting why a failure happened.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email is malformed,
    /// `AuthError::BlankName` / `AuthError::EmptyPassword` for missing input,
    /// and `AuthError::UserAlreadyExists` if the email is taken (exact,
    /// case-sensitive match).
    pub fn try_register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<&Identity, AuthError> {
        let email = Email::parse(email)?;

        if name.trim().is_empty() {
            return Err(AuthError::BlankName);
        }
        if password.is_empty() {
            return Err(AuthError::EmptyPassword);
        }
        if self.roster.iter().any(|entry| entry.email == email) {
            return Err(AuthError::UserAlreadyExists);
        }

        let identity = Identity {
            id: UserId::generate(),
            name: name.to_owned(),
            email,
            role,
        };
        self.roster.push(RosterEntry {
            id: Some(identity.id.clone()),
            email: identity.email.clone(),
            password: password.to_owned(),
            name: identity.name.clone(),
            role,
        });
        storage::persist(&*self.storage, keys::ROSTER, &self.roster);
        tracing::info!(user_id = %identity.id, %role, "Registered account");

        Ok(self.start_session(identity))
    }

    /// End the current session, in memory and in storage.
    pub fn logout(&mut self) {
        if let Some(identity) = self.current.take() {
            tracing::info!(user_id = %identity.id, "Logged out");
        }
        storage::forget(&*self.storage, keys::TOKEN);
        storage::forget(&*self.storage, keys::CURRENT_USER);
    }

    /// The logged-in identity, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    /// Whether someone is logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Number of registered accounts, administrator included.
    #[must_use]
    pub fn roster_len(&self) -> usize {
        self.roster.len()
    }

    fn start_session(&mut self, identity: Identity) -> &Identity {
        storage::persist(&*self.storage, keys::TOKEN, SESSION_TOKEN);
        storage::persist(&*self.storage, keys::CURRENT_USER, &identity);
        tracing::info!(user_id = %identity.id, "Session started");
        self.current.insert(identity)
    }
}

/// Give every roster entry without an id a stable one.
///
/// The administrator gets [`ADMIN_USER_ID`]; everyone else a fresh id.
/// Returns whether anything changed.
fn assign_missing_ids(roster: &mut [RosterEntry], admin_email: &Email) -> bool {
    let mut changed = false;
    for entry in roster.iter_mut().filter(|entry| entry.id.is_none()) {
        entry.id = Some(if &entry.email == admin_email {
            UserId::new(ADMIN_USER_ID)
        } else {
            UserId::generate()
        });
        changed = true;
    }
    changed
}

/// Restore the persisted identity if both token and identity are present.
///
/// A corrupt identity record clears the session keys.
fn restore_session(storage: &SharedStorage) -> Option<Identity> {
    let token = match storage.get(keys::TOKEN) {
        Ok(token) => token?,
        Err(e) => {
            tracing::warn!(key = keys::TOKEN, error = %e, "Could not read session token");
            return None;
        }
    };
    if token.is_empty() {
        return None;
    }

    match storage::load_json::<Identity>(&**storage, keys::CURRENT_USER) {
        Ok(identity) => identity,
        Err(e) => {
            tracing::warn!(error = %e, "Discarding corrupt persisted identity");
            storage::forget(&**storage, keys::TOKEN);
            storage::forget(&**storage, keys::CURRENT_USER);
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::{MemoryStorage, Storage, StorageError};

    /// Backend whose every operation fails.
    struct Unreadable;

    impl Storage for Unreadable {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(std::io::Error::other("disk gone").into())
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(std::io::Error::other("disk gone").into())
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(std::io::Error::other("disk gone").into())
        }
    }

    fn admin() -> RosterEntry {
        RosterEntry {
            id: Some(UserId::new(ADMIN_USER_ID)),
            email: Email::parse("admin@example.com").unwrap(),
            password: "password".to_owned(),
            name: "Admin User".to_owned(),
            role: Role::Admin,
        }
    }

    fn fresh() -> (Arc<MemoryStorage>, SessionStore) {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::load(storage.clone(), admin());
        (storage, store)
    }

    #[test]
    fn test_seeded_admin_can_log_in() {
        let (_, mut store) = fresh();
        assert_eq!(store.roster_len(), 1);
        assert!(store.login("admin@example.com", "password"));

        let identity = store.current().unwrap();
        assert_eq!(identity.id.as_str(), ADMIN_USER_ID);
        assert!(identity.is_admin());
    }

    #[test]
    fn test_login_persists_session() {
        let (storage, mut store) = fresh();
        assert!(store.login("admin@example.com", "password"));

        assert_eq!(
            storage.get(keys::TOKEN).unwrap().as_deref(),
            Some("\"mock-jwt-token\"")
        );
        let persisted: Identity = storage::load_json(&*storage, keys::CURRENT_USER)
            .unwrap()
            .unwrap();
        assert_eq!(persisted.email.as_str(), "admin@example.com");
    }

    #[test]
    fn test_wrong_password_keeps_identity() {
        let (_, mut store) = fresh();
        assert!(store.login("admin@example.com", "password"));
        let before = store.current().cloned();

        assert!(!store.login("admin@example.com", "wrong"));
        assert_eq!(store.current().cloned(), before);
        assert!(matches!(
            store.try_login("admin@example.com", "wrong"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_register_logs_in_and_persists_roster() {
        let (storage, mut store) = fresh();
        assert!(store.register("Alice", "alice@x.com", "pw", Role::User));

        let identity = store.current().unwrap();
        assert_eq!(identity.name, "Alice");
        assert_eq!(identity.role, Role::User);

        let roster: Vec<RosterEntry> = storage::load_json(&*storage, keys::ROSTER)
            .unwrap()
            .unwrap();
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let (_, mut store) = fresh();
        assert!(store.register("Alice", "alice@x.com", "pw", Role::User));
        assert!(!store.register("Alice2", "alice@x.com", "pw2", Role::User));
        assert_eq!(store.roster_len(), 2);
        assert!(matches!(
            store.try_register("Alice3", "alice@x.com", "pw3", Role::User),
            Err(AuthError::UserAlreadyExists)
        ));
    }

    #[test]
    fn test_email_match_is_case_sensitive() {
        let (_, mut store) = fresh();
        assert!(store.register("Alice", "alice@x.com", "pw", Role::User));
        assert!(store.register("Alice Upper", "Alice@x.com", "pw", Role::User));
        assert_eq!(store.roster_len(), 3);
    }

    #[test]
    fn test_invalid_registration_input() {
        let (_, mut store) = fresh();
        assert!(matches!(
            store.try_register("Alice", "not-an-email", "pw", Role::User),
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(matches!(
            store.try_register(" ", "alice@x.com", "pw", Role::User),
            Err(AuthError::BlankName)
        ));
        assert!(matches!(
            store.try_register("Alice", "alice@x.com", "", Role::User),
            Err(AuthError::EmptyPassword)
        ));
        assert_eq!(store.roster_len(), 1);
    }

    #[test]
    fn test_login_reuses_registration_id() {
        let (_, mut store) = fresh();
        assert!(store.register("Alice", "alice@x.com", "pw", Role::User));
        let registered = store.current().unwrap().id.clone();

        store.logout();
        assert!(store.login("alice@x.com", "pw"));
        let first = store.current().unwrap().id.clone();
        assert!(store.login("alice@x.com", "pw"));
        let second = store.current().unwrap().id.clone();

        assert_eq!(registered, first);
        assert_eq!(first, second);
    }

    #[test]
    fn test_logout_clears_memory_and_storage() {
        let (storage, mut store) = fresh();
        assert!(store.login("admin@example.com", "password"));
        store.logout();

        assert!(!store.is_authenticated());
        assert!(storage.get(keys::TOKEN).unwrap().is_none());
        assert!(storage.get(keys::CURRENT_USER).unwrap().is_none());
    }

    #[test]
    fn test_session_restored_on_load() {
        let (storage, mut store) = fresh();
        assert!(store.register("Alice", "alice@x.com", "pw", Role::User));
        let id = store.current().unwrap().id.clone();

        let reloaded = SessionStore::load(storage, admin());
        assert_eq!(reloaded.current().unwrap().id, id);
        assert_eq!(reloaded.roster_len(), 2);
    }

    #[test]
    fn test_corrupt_identity_is_discarded() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(keys::TOKEN, "\"mock-jwt-token\"").unwrap();
        storage.set(keys::CURRENT_USER, "{broken").unwrap();

        let store = SessionStore::load(storage.clone(), admin());
        assert!(!store.is_authenticated());
        assert!(storage.get(keys::TOKEN).unwrap().is_none());
        assert!(storage.get(keys::CURRENT_USER).unwrap().is_none());
    }

    #[test]
    fn test_unreadable_backend_starts_logged_out() {
        let mut store = SessionStore::load(Arc::new(Unreadable), admin());
        assert!(!store.is_authenticated());
        assert_eq!(store.roster_len(), 1);
        assert!(store.login("admin@example.com", "password"));
    }

    #[test]
    fn test_identity_without_token_is_ignored() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(
                keys::CURRENT_USER,
                r#"{"id":"1","name":"Admin User","email":"admin@example.com","role":"admin"}"#,
            )
            .unwrap();

        let store = SessionStore::load(storage, admin());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_legacy_roster_gets_stable_ids() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(
                keys::ROSTER,
                r#"[
                    {"email":"admin@example.com","password":"password","name":"Admin User","role":"admin"},
                    {"email":"bob@x.com","password":"pw","name":"Bob","role":"user"}
                ]"#,
            )
            .unwrap();

        let mut store = SessionStore::load(storage.clone(), admin());
        assert!(store.login("admin@example.com", "password"));
        assert_eq!(store.current().unwrap().id.as_str(), ADMIN_USER_ID);

        assert!(store.login("bob@x.com", "pw"));
        let bob = store.current().unwrap().id.clone();

        let mut reloaded = SessionStore::load(storage, admin());
        assert!(reloaded.login("bob@x.com", "pw"));
        assert_eq!(reloaded.current().unwrap().id, bob);
    }

    #[test]
    fn test_corrupt_roster_falls_back_to_seed() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(keys::ROSTER, "not json").unwrap();

        let mut store = SessionStore::load(storage, admin());
        assert_eq!(store.roster_len(), 1);
        assert!(store.login("admin@example.com", "password"));
    }
}
