//
//  github-rest
//  auth/keyring.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Keyring Token Storage
//!
//! Tokens are kept in the platform keyring (macOS Keychain, Secret Service on
//! Linux, Windows Credential Manager):
//!
//! - **Service**: `ghr`
//! - **Username/Key**: the web host, e.g. `github.com` or `ghe.company.com`
//! - **Password/Value**: the token
//!
//! Keys are normalised with [`web_host`], so `https://api.github.com` and
//! `github.com` share one entry.

use anyhow::Result;
use keyring::Entry;

use crate::config::web_host;

const SERVICE_NAME: &str = crate::APP_NAME;

pub struct KeyringStore {
    service: String,
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringStore {
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    /// The entry key for a host or API base URL.
    pub fn key_for(host: &str) -> String {
        web_host(host)
    }

    pub fn store(&self, host: &str, token: &str) -> Result<()> {
        let entry = Entry::new(&self.service, &Self::key_for(host))?;
        entry.set_password(token)?;
        Ok(())
    }

    pub fn get(&self, host: &str) -> Result<Option<String>> {
        let entry = Entry::new(&self.service, &Self::key_for(host))?;
        match entry.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Removes the host's entry. Removing a missing entry succeeds.
    pub fn delete(&self, host: &str) -> Result<()> {
        let entry = Entry::new(&self.service, &Self::key_for(host))?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Like [`KeyringStore::get`], but a keyring that cannot be reached
    /// counts as empty. Used during token resolution on headless machines.
    pub fn lookup(&self, host: &str) -> Option<String> {
        match self.get(host) {
            Ok(token) => token,
            Err(err) => {
                tracing::debug!(host, error = %err, "keyring unavailable");
                None
            }
        }
    }
}
