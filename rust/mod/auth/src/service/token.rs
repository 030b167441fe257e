//! Session token encoding.
//!
//! A token is the base64 of `"{username}:{issued_at_millis}"`. Nothing is
//! signed or stored; a token is "valid" when it decodes the way browser
//! `atob` would decode it.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;

/// Standard alphabet, no padding accepted, stray trailing bits ignored.
/// Padding is removed by [`forgiving_decode`] before this engine runs.
const UNPADDED: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

pub fn mint_token(username: &str, issued_at_millis: i64) -> String {
    STANDARD.encode(format!("{}:{}", username, issued_at_millis))
}

/// WHATWG forgiving-base64 decode, the algorithm behind `atob`.
///
/// ASCII whitespace is dropped anywhere. Up to two trailing `=` are removed
/// only when the length is a multiple of four; any other `=` is an error.
fn forgiving_decode(input: &str) -> Option<Vec<u8>> {
    let mut data: String = input
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' '))
        .collect();

    if data.len() % 4 == 0 {
        if data.ends_with("==") {
            data.truncate(data.len() - 2);
        } else if data.ends_with('=') {
            data.truncate(data.len() - 1);
        }
    }
    if data.len() % 4 == 1 || data.contains('=') {
        return None;
    }
    UNPADDED.decode(data.as_bytes()).ok()
}

/// Structural check only: does the token decode? The embedded username and
/// timestamp are not examined. A token with nothing to decode is refused.
pub fn is_decodable(token: &str) -> bool {
    forgiving_decode(token).is_some_and(|bytes| !bytes.is_empty())
}
