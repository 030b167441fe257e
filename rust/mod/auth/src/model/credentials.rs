use serde::{Deserialize, Serialize};

/// KV key of the singleton administrator credential record.
pub const CREDENTIALS_KEY: &str = "admin:credentials";

/// The stored administrator identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub username: String,

    /// Lowercase hex SHA-256 of the password.
    pub password_hash: String,
}
