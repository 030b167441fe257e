pub mod error;
pub mod json;
pub mod memory;
pub mod redb;
pub mod traits;

pub use error::KVError;
pub use json::{get_json, scan_json, set_json};
pub use memory::MemoryStore;
pub use redb::{KvConfig, RedbStore};
pub use traits::KVStore;
