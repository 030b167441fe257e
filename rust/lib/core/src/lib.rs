pub mod auth;
pub mod blocking;
pub mod config;
pub mod error;
pub mod extract;
pub mod module;
pub mod types;

pub use auth::{bearer_token, AllowAll, Authenticator, DenyAll};
pub use blocking::run_blocking;
pub use config::{ServerConfig, StorageBackend};
pub use error::ServiceError;
pub use extract::JsonBody;
pub use module::Module;
pub use types::{new_id, now_millis, now_rfc3339};
