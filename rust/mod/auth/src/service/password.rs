use sha2::{Digest, Sha256};

/// One-way password hash: lowercase hex SHA-256 of the UTF-8 bytes.
///
/// Credential records written by earlier deployments use exactly this
/// format, so it must not change.
pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    hex_encode(&digest)
}

fn hex_encode(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        s.push_str(&format!("{:02x}", b));
    }
    s
}
