//! # Wolgate (Authenticated Wake-on-LAN Gateway)
//!
//! `wolgate` is a small HTTP service that wakes one configured machine on the
//! local network by broadcasting a Wake-on-LAN **magic packet**. Access is
//! gated by a single configured username/password pair.
//!
//! ## Authentication
//!
//! Two deployment modes are supported, selected with `--auth-mode`:
//!
//! - **`session`** (default): `POST /login` checks the credentials and sets an
//!   `HttpOnly` cookie holding an HS256-signed token (`sub`, `iat`, `exp`).
//!   Later requests are authenticated by verifying that token offline.
//! - **`basic`**: every protected request carries HTTP Basic credentials.
//!
//! Credentials are compared in constant time. There is no server-side session
//! store: logging out deletes the cookie, but a copied token stays valid until
//! it expires.
//!
//! ## Signing Key
//!
//! Tokens are signed with `WOLGATE_SECRET_KEY` (at least 32 bytes). When the
//! key is missing, production mode refuses to start and development mode
//! generates an ephemeral key, logging a warning because every restart then
//! invalidates all sessions.
//!
//! ## Wake Action
//!
//! `POST /wake` sends `0xFF x 6` followed by the target MAC repeated 16 times
//! as one UDP broadcast datagram (default `255.255.255.255:9`). Failures are
//! reported once to the caller; nothing is retried.

pub mod api;
pub mod auth;
pub mod cli;
pub mod wol;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
