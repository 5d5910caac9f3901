//! Session token formatting and parsing.

use std::{fmt, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

/// Session token identifier prefix.
pub const SESSION_TOKEN_PREFIX: &str = "ms";

/// Number of secret bytes encoded in a token.
pub const SESSION_SECRET_BYTES: usize = 32;

const SESSION_SECRET_HEX_CHARS: usize = SESSION_SECRET_BYTES * 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTokenVersion {
    V1,
}

impl SessionTokenVersion {
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl FromStr for SessionTokenVersion {
    type Err = SessionTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(SessionTokenError::UnsupportedVersion),
        }
    }
}

#[derive(Clone)]
pub struct SessionSecret {
    bytes: [u8; SESSION_SECRET_BYTES],
}

impl SessionSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; SESSION_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SESSION_SECRET_BYTES] {
        &self.bytes
    }

    /// Compare without short-circuiting on the first differing byte.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.bytes
            .iter()
            .zip(other.bytes.iter())
            .fold(0_u8, |acc, (left, right)| acc | (left ^ right))
            == 0
    }
}

impl fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionSecret(**redacted**)")
    }
}

impl Drop for SessionSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Clone)]
pub struct ParsedSessionToken {
    pub token_uuid: Uuid,
    pub version: SessionTokenVersion,
    pub secret: SessionSecret,
}

#[derive(Debug, Error)]
pub enum SessionTokenError {
    #[error("session token format is invalid")]
    InvalidFormat,

    #[error("session token uses an unsupported version")]
    UnsupportedVersion,

    #[error("session token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub fn generate_session_secret() -> SessionSecret {
    let mut secret = [0_u8; SESSION_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    SessionSecret::from_bytes(secret)
}

/// Render a token as `ms_v1_<uuid>.<hex secret>`.
#[must_use]
pub fn format_session_token(
    token_uuid: Uuid,
    version: SessionTokenVersion,
    secret: &SessionSecret,
) -> String {
    format!(
        "{SESSION_TOKEN_PREFIX}_{}_{}.{}",
        version.segment(),
        token_uuid.simple(),
        encode_secret_hex(secret.as_bytes())
    )
}

pub fn parse_session_token(token: &str) -> Result<ParsedSessionToken, SessionTokenError> {
    let (prefix_and_id, secret_hex) = token
        .trim()
        .split_once('.')
        .ok_or(SessionTokenError::InvalidFormat)?;

    let mut id_parts = prefix_and_id.splitn(3, '_');

    let prefix = id_parts.next().ok_or(SessionTokenError::InvalidFormat)?;
    let version_segment = id_parts.next().ok_or(SessionTokenError::InvalidFormat)?;
    let token_uuid_segment = id_parts.next().ok_or(SessionTokenError::InvalidFormat)?;

    if prefix != SESSION_TOKEN_PREFIX {
        return Err(SessionTokenError::InvalidFormat);
    }

    let version = SessionTokenVersion::from_str(version_segment)?;

    let token_uuid =
        Uuid::try_parse(token_uuid_segment).map_err(|_| SessionTokenError::InvalidFormat)?;

    let secret = decode_secret_hex(secret_hex).ok_or(SessionTokenError::InvalidSecretEncoding)?;

    Ok(ParsedSessionToken {
        token_uuid,
        version,
        secret: SessionSecret::from_bytes(secret),
    })
}

fn encode_secret_hex(secret: &[u8; SESSION_SECRET_BYTES]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    let mut encoded = String::with_capacity(SESSION_SECRET_HEX_CHARS);

    for byte in secret {
        encoded.push(char::from(HEX[usize::from(byte >> 4)]));
        encoded.push(char::from(HEX[usize::from(byte & 0x0f)]));
    }

    encoded
}

fn decode_secret_hex(secret_hex: &str) -> Option<[u8; SESSION_SECRET_BYTES]> {
    if secret_hex.len() != SESSION_SECRET_HEX_CHARS {
        return None;
    }

    let mut secret = [0_u8; SESSION_SECRET_BYTES];

    for (byte, pair) in secret.iter_mut().zip(secret_hex.as_bytes().chunks_exact(2)) {
        let [hi, lo] = pair else {
            return None;
        };

        *byte = (decode_hex_nibble(*hi)? << 4) | decode_hex_nibble(*lo)?;
    }

    Some(secret)
}

fn decode_hex_nibble(value: u8) -> Option<u8> {
    match value {
        b'0'..=b'9' => Some(value - b'0'),
        b'a'..=b'f' => Some(value - b'a' + 10),
        b'A'..=b'F' => Some(value - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_token_parses_back() {
        let token_uuid = Uuid::nil();
        let secret = SessionSecret::from_bytes([0xAB; SESSION_SECRET_BYTES]);
        let token = format_session_token(token_uuid, SessionTokenVersion::V1, &secret);

        assert!(token.starts_with("ms_v1_"));

        let parsed = parse_session_token(&token).expect("token should parse");

        assert_eq!(parsed.token_uuid, token_uuid);
        assert_eq!(parsed.version, SessionTokenVersion::V1);
        assert!(parsed.secret.matches(&secret));
    }

    #[test]
    fn parse_rejects_invalid_prefix() {
        assert!(parse_session_token("lt_v1_00000000000000000000000000000000.aa").is_err());
    }

    #[test]
    fn parse_rejects_short_secret() {
        let result = parse_session_token("ms_v1_00000000000000000000000000000000.abcd");

        assert!(matches!(
            result,
            Err(SessionTokenError::InvalidSecretEncoding)
        ));
    }

    #[test]
    fn secrets_compare_by_content() {
        let first = SessionSecret::from_bytes([1; SESSION_SECRET_BYTES]);
        let second = SessionSecret::from_bytes([2; SESSION_SECRET_BYTES]);

        assert!(first.matches(&first.clone()));
        assert!(!first.matches(&second));
    }

    #[test]
    fn debug_output_is_redacted() {
        let secret = generate_session_secret();

        assert_eq!(format!("{secret:?}"), "SessionSecret(**redacted**)");
    }
}
