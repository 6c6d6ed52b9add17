#![allow(dead_code)]

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::Response,
    Router,
};
use secrecy::SecretString;
use serde_json::Value;
use std::{
    io,
    sync::{Arc, Mutex},
};
use wolgate::{
    api,
    auth::{AuthConfig, AuthMode, AuthState, Credentials, SessionManager},
    wol::{MacAddress, MagicPacketSender, WakeService},
};

pub const USERNAME: &str = "testuser";
pub const PASSWORD: &str = "testpass";
pub const SECRET_KEY: &[u8] = b"integration-test-signing-key-0123456789";
pub const TARGET: MacAddress = MacAddress::new([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);

/// Records every address it is asked to wake, optionally failing instead.
#[derive(Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<MacAddress>>,
    fail_with: Option<String>,
}

impl RecordingSender {
    pub fn failing(message: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_with: Some(message.to_string()),
        }
    }

    pub fn sent(&self) -> Vec<MacAddress> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

impl MagicPacketSender for RecordingSender {
    fn send(&self, mac: &MacAddress) -> io::Result<()> {
        if let Some(message) = &self.fail_with {
            return Err(io::Error::other(message.clone()));
        }
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(*mac);
        }
        Ok(())
    }
}

pub fn app(
    mode: AuthMode,
    target: Option<MacAddress>,
    sender: Arc<RecordingSender>,
) -> Result<Router> {
    let auth = AuthState::new(
        AuthConfig::new(mode),
        Credentials::new(
            USERNAME.to_string(),
            SecretString::from(PASSWORD.to_string()),
        ),
        SessionManager::new(SECRET_KEY, 3600)?,
    );
    let wake = WakeService::new(target, sender);
    Ok(api::router(Arc::new(auth), Arc::new(wake)))
}

pub async fn body_json(response: Response<Body>) -> Result<Value> {
    let body = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&body)?)
}

pub async fn body_text(response: Response<Body>) -> Result<String> {
    let body = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(String::from_utf8(body.to_vec())?)
}
