//! Session gate.
//!
//! The console is either signed in or not. The state lives entirely in the
//! key/value store as a `"true"` flag plus the signed-in email; nothing is
//! validated server-side, so the gate only keeps honest callers out of the
//! protected commands.

use chrono::{DateTime, Utc};
use subtle::ConstantTimeEq;
use tracing::{info, warn};

use axura_shared::constants::{KEY_AUTHENTICATED_AT, KEY_IS_AUTHENTICATED, KEY_USER_EMAIL};
use axura_store::{KeyValueStore, StoreError};

use crate::config::Credentials;

/// Source of the current time, injected so tests can pin it.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated {
        email: String,
        /// When the session was opened, if that was recorded.
        since: Option<DateTime<Utc>>,
    },
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

pub struct SessionGate<S, C = SystemClock> {
    store: S,
    credentials: Credentials,
    clock: C,
}

impl<S: KeyValueStore> SessionGate<S> {
    pub fn new(store: S, credentials: Credentials) -> Self {
        Self::with_clock(store, credentials, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> SessionGate<S, C> {
    pub fn with_clock(store: S, credentials: Credentials, clock: C) -> Self {
        Self {
            store,
            credentials,
            clock,
        }
    }

    /// Check a submitted email/password pair against the configured one.
    ///
    /// On a match the session flag, the email and the sign-in time are
    /// persisted and `true` is returned. On a mismatch nothing is written.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<bool, StoreError> {
        let email_ok = constant_time_eq(email, &self.credentials.email);
        let password_ok = constant_time_eq(password, &self.credentials.password);

        if !(email_ok & password_ok) {
            warn!(email, "Rejected login attempt");
            return Ok(false);
        }

        // The flag goes last so a failed write never leaves a session
        // without its email.
        self.store.set(KEY_USER_EMAIL, email)?;
        self.store
            .set(KEY_AUTHENTICATED_AT, &self.clock.now().to_rfc3339())?;
        self.store.set(KEY_IS_AUTHENTICATED, "true")?;

        info!(email, "Signed in");
        Ok(true)
    }

    /// Anything other than a stored `"true"` counts as signed out.
    pub fn is_authenticated(&self) -> Result<bool, StoreError> {
        Ok(self.store.get(KEY_IS_AUTHENTICATED)?.as_deref() == Some("true"))
    }

    /// Clear the session unconditionally.
    pub fn logout(&self) -> Result<(), StoreError> {
        self.store.remove(KEY_IS_AUTHENTICATED)?;
        self.store.remove(KEY_USER_EMAIL)?;
        self.store.remove(KEY_AUTHENTICATED_AT)?;
        info!("Signed out");
        Ok(())
    }

    /// The email to display for the session, falling back to the configured
    /// admin email when none was stored.
    pub fn current_email(&self) -> Result<String, StoreError> {
        Ok(self
            .store
            .get(KEY_USER_EMAIL)?
            .unwrap_or_else(|| self.credentials.email.clone()))
    }

    pub fn state(&self) -> Result<SessionState, StoreError> {
        if !self.is_authenticated()? {
            return Ok(SessionState::Unauthenticated);
        }

        let since = self
            .store
            .get(KEY_AUTHENTICATED_AT)?
            .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Ok(SessionState::Authenticated {
            email: self.current_email()?,
            since,
        })
    }
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    a.len() == b.len() && a.as_bytes().ct_eq(b.as_bytes()).unwrap_u8() == 1
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use axura_store::MemoryStore;

    use super::*;

    /// Fails every write to one key.
    struct FailingStore {
        inner: MemoryStore,
        broken_key: &'static str,
    }

    impl KeyValueStore for FailingStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            if key == self.broken_key {
                return Err(StoreError::Io(std::io::Error::other("disk full")));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<bool, StoreError> {
            self.inner.remove(key)
        }
    }

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap()
    }

    fn gate(store: &MemoryStore) -> SessionGate<&MemoryStore, FixedClock> {
        SessionGate::with_clock(store, Credentials::default(), FixedClock(noon()))
    }

    #[test]
    fn test_cold_start_is_unauthenticated() {
        let store = MemoryStore::new();
        let gate = gate(&store);
        assert!(!gate.is_authenticated().unwrap());
        assert_eq!(gate.state().unwrap(), SessionState::Unauthenticated);
    }

    #[test]
    fn test_correct_credentials_open_a_session() {
        let store = MemoryStore::new();
        let gate = gate(&store);

        assert!(gate.authenticate("admin@axura.com", "admin123").unwrap());
        assert!(gate.is_authenticated().unwrap());
        assert_eq!(
            gate.state().unwrap(),
            SessionState::Authenticated {
                email: "admin@axura.com".into(),
                since: Some(noon()),
            }
        );
    }

    #[test]
    fn test_wrong_credentials_leave_storage_untouched() {
        let store = MemoryStore::new();
        let gate = gate(&store);

        assert!(!gate.authenticate("x", "y").unwrap());
        assert!(!gate.authenticate("admin@axura.com", "admin1234").unwrap());
        assert!(!gate.authenticate("ADMIN@axura.com", "admin123").unwrap());
        assert!(store.is_empty());
        assert!(!gate.is_authenticated().unwrap());
    }

    #[test]
    fn test_failed_attempt_does_not_end_an_existing_session() {
        let store = MemoryStore::new();
        let gate = gate(&store);

        assert!(gate.authenticate("admin@axura.com", "admin123").unwrap());
        assert!(!gate.authenticate("x", "y").unwrap());
        assert!(gate.is_authenticated().unwrap());
    }

    #[test]
    fn test_logout_clears_the_session() {
        let store = MemoryStore::new();
        let gate = gate(&store);

        gate.authenticate("admin@axura.com", "admin123").unwrap();
        gate.logout().unwrap();
        assert!(!gate.is_authenticated().unwrap());
        assert!(store.is_empty());

        // Logging out twice is harmless.
        gate.logout().unwrap();
    }

    #[test]
    fn test_only_the_literal_true_flag_counts() {
        let store = MemoryStore::new();
        store.set(KEY_IS_AUTHENTICATED, "yes").unwrap();
        assert!(!gate(&store).is_authenticated().unwrap());

        store.set(KEY_IS_AUTHENTICATED, "true").unwrap();
        assert!(gate(&store).is_authenticated().unwrap());
    }

    #[test]
    fn test_forged_flag_without_email_falls_back_to_configured_email() {
        let store = MemoryStore::new();
        store.set(KEY_IS_AUTHENTICATED, "true").unwrap();

        let gate = gate(&store);
        assert_eq!(gate.current_email().unwrap(), "admin@axura.com");
        assert_eq!(
            gate.state().unwrap(),
            SessionState::Authenticated {
                email: "admin@axura.com".into(),
                since: None,
            }
        );
    }

    #[test]
    fn test_custom_credentials_replace_the_default_pair() {
        let store = MemoryStore::new();
        let credentials = Credentials {
            email: "ops@axura.com".into(),
            password: "s3cret".into(),
        };
        let gate = SessionGate::new(&store, credentials);

        assert!(!gate.authenticate("admin@axura.com", "admin123").unwrap());
        assert!(gate.authenticate("ops@axura.com", "s3cret").unwrap());
        assert_eq!(gate.current_email().unwrap(), "ops@axura.com");
    }

    #[test]
    fn test_failed_write_does_not_open_a_session() {
        for broken_key in [KEY_USER_EMAIL, KEY_AUTHENTICATED_AT, KEY_IS_AUTHENTICATED] {
            let store = FailingStore {
                inner: MemoryStore::new(),
                broken_key,
            };
            let gate = SessionGate::with_clock(&store, Credentials::default(), FixedClock(noon()));

            assert!(gate.authenticate("admin@axura.com", "admin123").is_err());
            assert!(!gate.is_authenticated().unwrap());
            assert_eq!(gate.state().unwrap(), SessionState::Unauthenticated);
        }
    }
}
