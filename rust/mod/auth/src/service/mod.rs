pub mod password;
pub mod token;

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use clanhall_core::ServiceError;
use clanhall_kv::{get_json, set_json, KVError, KVStore};

use crate::model::{Credentials, LoginSuccess, CREDENTIALS_KEY};

use self::password::hash_password;

/// Auth service error type.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password did not match. Deliberately does not say which.
    #[error("invalid credentials")]
    Failed,

    /// The credential record is missing (bootstrap never ran against this store).
    #[error("admin not configured")]
    NotConfigured,

    #[error("{0}")]
    BadRequest(String),

    #[error("storage: {0}")]
    Storage(String),

    #[error("internal: {0}")]
    Internal(String),
}

impl From<KVError> for AuthError {
    fn from(e: KVError) -> Self {
        match e {
            KVError::Unavailable(m) => AuthError::Storage(m),
            KVError::Serialization(m) => AuthError::Internal(m),
        }
    }
}

impl From<AuthError> for ServiceError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Failed => ServiceError::AuthFailed(e.to_string()),
            AuthError::NotConfigured => ServiceError::Internal(e.to_string()),
            AuthError::BadRequest(m) => ServiceError::BadRequest(m),
            AuthError::Storage(m) => ServiceError::StorageUnavailable(m),
            AuthError::Internal(m) => ServiceError::Internal(m),
        }
    }
}

/// Default administrator identity used by [`AuthGate::bootstrap`].
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub default_username: String,
    pub default_password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            default_username: "admin".to_string(),
            default_password: "admin123".to_string(),
        }
    }
}

impl From<&clanhall_core::config::AuthSection> for AuthConfig {
    fn from(section: &clanhall_core::config::AuthSection) -> Self {
        Self {
            default_username: section.default_username.clone(),
            default_password: section.default_password.clone(),
        }
    }
}

/// The auth gate: validates logins against the stored credential record and
/// checks session tokens.
///
/// Obtained only through [`AuthGate::bootstrap`], so a gate in hand means the
/// credential record has been checked (and created if needed).
pub struct AuthGate {
    kv: Arc<dyn KVStore>,
}

impl AuthGate {
    /// Ensure the credential record exists, creating it from `config` if it
    /// is absent, and return the ready gate.
    ///
    /// Idempotent: an existing record (including a rotated one) is never
    /// overwritten. Storage failures are returned, not treated as "absent".
    pub fn bootstrap(kv: Arc<dyn KVStore>, config: &AuthConfig) -> Result<Arc<Self>, AuthError> {
        match kv.get(CREDENTIALS_KEY)? {
            Some(_) => {
                info!("admin credentials already present");
            }
            None => {
                let credentials = Credentials {
                    username: config.default_username.clone(),
                    password_hash: hash_password(&config.default_password),
                };
                set_json(kv.as_ref(), CREDENTIALS_KEY, &credentials)?;
                warn!(
                    "created default admin credentials for '{}'; change the password",
                    credentials.username
                );
            }
        }
        Ok(Arc::new(Self { kv }))
    }

    /// Check a username/password pair. Both must match exactly.
    pub fn login(&self, username: &str, password: &str) -> Result<LoginSuccess, AuthError> {
        let credentials = self.credentials()?;

        let password_hash = hash_password(password);
        if credentials.username != username || credentials.password_hash != password_hash {
            return Err(AuthError::Failed);
        }

        Ok(LoginSuccess {
            token: token::mint_token(username, clanhall_core::now_millis()),
            username: username.to_string(),
        })
    }

    /// Whether `token` is accepted as a session token.
    ///
    /// Only checks that the token decodes. It does not check who it names,
    /// when it was issued, or that `login` ever issued it.
    pub fn authorize(&self, token: &str) -> bool {
        token::is_decodable(token)
    }

    /// Replace the credential record after re-checking the current password.
    pub fn rotate_credentials(
        &self,
        current_password: &str,
        new_username: Option<&str>,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let credentials = self.credentials()?;
        if credentials.password_hash != hash_password(current_password) {
            return Err(AuthError::Failed);
        }

        let username = new_username.unwrap_or(&credentials.username);
        if username.is_empty() {
            return Err(AuthError::BadRequest("username must not be empty".into()));
        }
        if new_password.is_empty() {
            return Err(AuthError::BadRequest("password must not be empty".into()));
        }

        let rotated = Credentials {
            username: username.to_string(),
            password_hash: hash_password(new_password),
        };
        set_json(self.kv.as_ref(), CREDENTIALS_KEY, &rotated)?;
        info!("admin credentials rotated for '{}'", rotated.username);
        Ok(())
    }

    fn credentials(&self) -> Result<Credentials, AuthError> {
        get_json::<Credentials>(self.kv.as_ref(), CREDENTIALS_KEY)?.ok_or(AuthError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use clanhall_kv::{KvConfig, MemoryStore, RedbStore};

    struct BrokenStore;

    impl KVStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, KVError> {
            Err(KVError::Unavailable("disk on fire".into()))
        }
        fn set(&self, _key: &str, _value: &[u8]) -> Result<(), KVError> {
            Err(KVError::Unavailable("disk on fire".into()))
        }
        fn delete(&self, _key: &str) -> Result<(), KVError> {
            Err(KVError::Unavailable("disk on fire".into()))
        }
        fn batch_set(&self, _entries: &[(&str, &[u8])]) -> Result<(), KVError> {
            Err(KVError::Unavailable("disk on fire".into()))
        }
        fn batch_delete(&self, _keys: &[&str]) -> Result<(), KVError> {
            Err(KVError::Unavailable("disk on fire".into()))
        }
        fn scan(&self, _prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError> {
            Err(KVError::Unavailable("disk on fire".into()))
        }
    }

    fn fresh_gate() -> (Arc<AuthGate>, Arc<dyn KVStore>) {
        let kv: Arc<dyn KVStore> = Arc::new(MemoryStore::new());
        let gate = AuthGate::bootstrap(Arc::clone(&kv), &AuthConfig::default()).unwrap();
        (gate, kv)
    }

    #[test]
    fn bootstrap_writes_default_credentials() {
        let (_gate, kv) = fresh_gate();
        let stored: Credentials = get_json(kv.as_ref(), CREDENTIALS_KEY).unwrap().unwrap();
        assert_eq!(stored.username, "admin");
        assert_eq!(stored.password_hash, hash_password("admin123"));

        let raw: serde_json::Value = get_json(kv.as_ref(), CREDENTIALS_KEY).unwrap().unwrap();
        assert!(raw.get("passwordHash").is_some(), "record uses camelCase keys");
    }

    #[test]
    fn bootstrap_is_idempotent_and_keeps_rotated_credentials() {
        let (gate, kv) = fresh_gate();
        gate.rotate_credentials("admin123", Some("chief"), "s3cret").unwrap();

        let gate = AuthGate::bootstrap(Arc::clone(&kv), &AuthConfig::default()).unwrap();
        assert!(matches!(gate.login("admin", "admin123"), Err(AuthError::Failed)));
        assert_eq!(gate.login("chief", "s3cret").unwrap().username, "chief");
    }

    #[test]
    fn bootstrap_persists_in_redb() {
        let dir = tempfile::tempdir().unwrap();
        let config = KvConfig::new(dir.path().join("auth.redb"));
        {
            let kv: Arc<dyn KVStore> = Arc::new(RedbStore::open(&config).unwrap());
            AuthGate::bootstrap(kv, &AuthConfig::default()).unwrap();
        }
        let kv: Arc<dyn KVStore> = Arc::new(RedbStore::open(&config).unwrap());
        assert!(kv.get(CREDENTIALS_KEY).unwrap().is_some());
    }

    #[test]
    fn bootstrap_surfaces_storage_failure() {
        let kv: Arc<dyn KVStore> = Arc::new(BrokenStore);
        let err = AuthGate::bootstrap(kv, &AuthConfig::default()).err().unwrap();
        assert!(matches!(err, AuthError::Storage(_)));
    }

    #[test]
    fn login_with_default_credentials() {
        let (gate, _kv) = fresh_gate();
        let ok = gate.login("admin", "admin123").unwrap();
        assert_eq!(ok.username, "admin");
        assert!(!ok.token.is_empty());

        let raw = base64::engine::general_purpose::STANDARD.decode(&ok.token).unwrap();
        let raw = String::from_utf8(raw).unwrap();
        assert!(raw.starts_with("admin:"));
        assert!(raw["admin:".len()..].parse::<i64>().is_ok());
    }

    #[test]
    fn login_mismatch_is_failed_without_detail() {
        let (gate, _kv) = fresh_gate();
        let wrong_password = gate.login("admin", "nope").unwrap_err();
        let wrong_user = gate.login("root", "admin123").unwrap_err();
        let wrong_case = gate.login("Admin", "admin123").unwrap_err();
        assert!(matches!(wrong_password, AuthError::Failed));
        assert!(matches!(wrong_case, AuthError::Failed));
        assert_eq!(wrong_password.to_string(), wrong_user.to_string());
    }

    #[test]
    fn login_writes_nothing() {
        let (gate, kv) = fresh_gate();
        let before = kv.scan("").unwrap();
        gate.login("admin", "admin123").unwrap();
        let _ = gate.login("admin", "bad");
        assert_eq!(kv.scan("").unwrap(), before);
    }

    #[test]
    fn login_without_record_is_not_configured() {
        let (gate, kv) = fresh_gate();
        kv.delete(CREDENTIALS_KEY).unwrap();
        assert!(matches!(gate.login("admin", "admin123"), Err(AuthError::NotConfigured)));
    }

    #[test]
    fn authorize_accepts_issued_tokens() {
        let (gate, _kv) = fresh_gate();
        let ok = gate.login("admin", "admin123").unwrap();
        assert!(gate.authorize(&ok.token));
    }

    #[test]
    fn authorize_rejects_undecodable_strings() {
        let (gate, _kv) = fresh_gate();
        assert!(!gate.authorize("%%% not base64 %%%"));
        assert!(!gate.authorize(""));
    }

    // Current behavior, not the ideal one: any decodable string passes,
    // even one that names nobody and was never issued.
    #[test]
    fn authorize_accepts_forged_decodable_token() {
        let (gate, _kv) = fresh_gate();
        let forged = base64::engine::general_purpose::STANDARD.encode("nobody:0");
        assert!(gate.authorize(&forged));
        assert!(gate.authorize("aGVsbG8="));
    }

    #[test]
    fn rotation_requires_current_password_and_non_empty_values() {
        let (gate, _kv) = fresh_gate();
        assert!(matches!(
            gate.rotate_credentials("wrong", None, "new"),
            Err(AuthError::Failed)
        ));
        assert!(matches!(
            gate.rotate_credentials("admin123", None, ""),
            Err(AuthError::BadRequest(_))
        ));
        assert!(matches!(
            gate.rotate_credentials("admin123", Some(""), "new"),
            Err(AuthError::BadRequest(_))
        ));

        gate.rotate_credentials("admin123", None, "new-pass").unwrap();
        assert!(gate.login("admin", "admin123").is_err());
        assert!(gate.login("admin", "new-pass").is_ok());
    }

    #[test]
    fn error_mapping_to_service_error() {
        assert_eq!(ServiceError::from(AuthError::Failed).error_code(), "AUTH_FAILED");
        assert_eq!(
            ServiceError::from(AuthError::Storage("x".into())).error_code(),
            "STORAGE_UNAVAILABLE"
        );
        assert_eq!(ServiceError::from(AuthError::NotConfigured).error_code(), "INTERNAL");
        assert_eq!(
            ServiceError::from(AuthError::BadRequest("x".into())).error_code(),
            "BAD_REQUEST"
        );
    }
}
