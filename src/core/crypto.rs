// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Cryptographic utilities for audit-trail integrity.
//!
//! This module provides the `CryptoSigner` which handles HMAC-based signing
//! of audit records, ensuring that emitted audit entries are tamper-evident.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::core::constants::crypto;

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct CryptoSigner {
    secret: [u8; crypto::SECRET_KEY_LENGTH],
}

impl CryptoSigner {
    /// Create a new signer with a secure random ephemeral key
    pub fn new() -> Self {
        let mut secret = [0u8; crypto::SECRET_KEY_LENGTH];
        rand::rng().fill_bytes(&mut secret);
        Self { secret }
    }

    /// Create a signer with a caller-supplied key. Deterministic signatures
    /// across process restarts require handing the same key back in.
    pub fn from_secret(secret: [u8; crypto::SECRET_KEY_LENGTH]) -> Self {
        Self { secret }
    }

    /// Sign a payload, returning the signature as unpadded url-safe base64
    pub fn sign(&self, payload: &[u8]) -> String {
        // HMAC-SHA256 accepts keys of any length, so a fixed 32-byte key
        // cannot be rejected here.
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC-SHA256 key of fixed length is always accepted");
        mac.update(payload);
        URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
    }

    /// Verify a payload against a base64 signature in constant time
    pub fn verify(&self, payload: &[u8], signature_b64: &str) -> bool {
        let signature = match URL_SAFE_NO_PAD.decode(signature_b64) {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC-SHA256 key of fixed length is always accepted");
        mac.update(payload);
        mac.verify_slice(&signature).is_ok()
    }

    /// Keyless SHA-256 hex digest, used to reference sensitive values in
    /// audit records without reproducing them.
    pub fn digest_hex(payload: &str) -> String {
        hex::encode(Sha256::digest(payload.as_bytes()))
    }
}

impl Default for CryptoSigner {
    fn default() -> Self {
        Self::new()
    }
}
