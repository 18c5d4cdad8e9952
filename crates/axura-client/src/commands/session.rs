use axura_shared::AxuraError;
use axura_store::KeyValueStore;

use crate::error::Result;
use crate::session::{Clock, SessionGate, SessionState};

pub fn login<S: KeyValueStore, C: Clock>(
    gate: &SessionGate<S, C>,
    email: &str,
    password: &str,
) -> Result<String> {
    if !gate.authenticate(email, password)? {
        return Err(AxuraError::InvalidCredentials.into());
    }
    Ok(format!("Signed in as {email}"))
}

pub fn logout<S: KeyValueStore, C: Clock>(gate: &SessionGate<S, C>) -> Result<String> {
    gate.logout()?;
    Ok("Signed out".to_string())
}

pub fn whoami<S: KeyValueStore, C: Clock>(gate: &SessionGate<S, C>) -> Result<String> {
    Ok(match gate.state()? {
        SessionState::Unauthenticated => "Not signed in".to_string(),
        SessionState::Authenticated {
            email,
            since: Some(since),
        } => format!("{email} (since {})", since.format("%Y-%m-%d %H:%M UTC")),
        SessionState::Authenticated { email, since: None } => email,
    })
}

#[cfg(test)]
mod tests {
    use axura_store::MemoryStore;

    use crate::config::Credentials;
    use crate::error::ClientError;

    use super::*;

    #[test]
    fn test_login_whoami_logout() {
        let store = MemoryStore::new();
        let gate = SessionGate::new(&store, Credentials::default());

        assert_eq!(whoami(&gate).unwrap(), "Not signed in");

        let out = login(&gate, "admin@axura.com", "admin123").unwrap();
        assert_eq!(out, "Signed in as admin@axura.com");
        assert!(whoami(&gate).unwrap().starts_with("admin@axura.com (since "));

        logout(&gate).unwrap();
        assert_eq!(whoami(&gate).unwrap(), "Not signed in");
    }

    #[test]
    fn test_bad_login_reports_invalid_credentials() {
        let store = MemoryStore::new();
        let gate = SessionGate::new(&store, Credentials::default());

        let err = login(&gate, "admin@axura.com", "wrong").unwrap_err();
        assert!(matches!(err, ClientError::Axura(AxuraError::InvalidCredentials)));
        assert_eq!(err.to_string(), "Invalid email or password");
        assert!(store.is_empty());
    }
}
