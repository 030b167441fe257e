use serde::{Deserialize, Serialize};

/// Request body for POST /login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login: the session token and the name it was issued to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginSuccess {
    pub token: String,
    pub username: String,
}

/// Response body for POST /login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub username: String,
}

impl From<LoginSuccess> for LoginResponse {
    fn from(s: LoginSuccess) -> Self {
        Self {
            success: true,
            token: s.token,
            username: s.username,
        }
    }
}

/// Request body for POST /verify-token. A missing token is treated as invalid.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyRequest {
    #[serde(default)]
    pub token: Option<String>,
}

/// Request body for POST /change-password.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,

    /// Keep the current username when absent.
    #[serde(default)]
    pub new_username: Option<String>,
}
