use base64ct::{Base64UrlUnpadded, Encoding};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

const ALG_HS256: &str = "HS256";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionTokenHeader {
    pub alg: String,
    pub typ: String,
}

impl SessionTokenHeader {
    fn hs256() -> Self {
        Self {
            alg: ALG_HS256.to_string(),
            typ: "JWT".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid token format")]
    TokenFormat,
    #[error("invalid base64url encoding")]
    Base64,
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlg(String),
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("invalid signing key")]
    InvalidKey,
    #[error("signing key too short: got {actual} bytes, need at least {minimum}")]
    KeyTooShort { actual: usize, minimum: usize },
    #[error("a signing key is required in production")]
    MissingKey,
    #[error("failed to generate signing key")]
    KeyGeneration,
}

fn b64e_json<T: Serialize>(value: &T) -> Result<String, TokenError> {
    let json = serde_json::to_vec(value)?;
    Ok(Base64UrlUnpadded::encode_string(&json))
}

fn b64d_json<T: for<'de> Deserialize<'de>>(s: &str) -> Result<T, TokenError> {
    let bytes = Base64UrlUnpadded::decode_vec(s).map_err(|_| TokenError::Base64)?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn mac_for(key: &[u8], signing_input: &str) -> Result<HmacSha256, TokenError> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|_| TokenError::InvalidKey)?;
    mac.update(signing_input.as_bytes());
    Ok(mac)
}

/// Create an HS256 signed session token (JWT).
///
/// # Errors
///
/// Returns an error if the header or claims cannot be encoded.
pub fn sign_hs256(key: &[u8], claims: &SessionClaims) -> Result<String, TokenError> {
    let header_b64 = b64e_json(&SessionTokenHeader::hs256())?;
    let claims_b64 = b64e_json(claims)?;
    let signing_input = format!("{header_b64}.{claims_b64}");

    let signature = mac_for(key, &signing_input)?.finalize().into_bytes();
    let signature_b64 = Base64UrlUnpadded::encode_string(&signature);

    Ok(format!("{signing_input}.{signature_b64}"))
}

/// Verify an HS256 session token and return its decoded claims.
///
/// # Errors
///
/// Returns an error if:
/// - the token is malformed or contains invalid base64/json,
/// - the header names an algorithm other than `HS256`,
/// - the signature does not match `key`,
/// - `exp` is not after `now_unix_seconds`.
pub fn verify_hs256(
    token: &str,
    key: &[u8],
    now_unix_seconds: i64,
) -> Result<SessionClaims, TokenError> {
    let mut parts = token.split('.');
    let header_b64 = parts.next().ok_or(TokenError::TokenFormat)?;
    let claims_b64 = parts.next().ok_or(TokenError::TokenFormat)?;
    let sig_b64 = parts.next().ok_or(TokenError::TokenFormat)?;
    if parts.next().is_some() {
        return Err(TokenError::TokenFormat);
    }

    let header: SessionTokenHeader = b64d_json(header_b64)?;
    if header.alg != ALG_HS256 {
        return Err(TokenError::UnsupportedAlg(header.alg));
    }

    let signing_input = format!("{header_b64}.{claims_b64}");
    let signature = Base64UrlUnpadded::decode_vec(sig_b64).map_err(|_| TokenError::Base64)?;
    mac_for(key, &signing_input)?
        .verify_slice(&signature)
        .map_err(|_| TokenError::InvalidSignature)?;

    let claims: SessionClaims = b64d_json(claims_b64)?;
    if claims.exp <= now_unix_seconds {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}
