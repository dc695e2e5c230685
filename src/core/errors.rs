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

//! Domain error types - Secure error handling with no information disclosure.

use thiserror::Error;

/// Main error type for the read dispatch layer.
///
/// The dispatcher performs no local recovery: every variant surfaces to the
/// caller unmodified. Read-service failures in particular pass through
/// without being wrapped or reinterpreted.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// No principal resolvable for the request (HTTP 401)
    #[error("Authentication failed: {0}")]
    Unauthenticated(String),

    /// Principal lacks the required capability for the entity type (HTTP 403)
    #[error("User has no authority to view {entity} resources")]
    Unauthorized { entity: String },

    /// Malformed or unparseable request parameter (HTTP 400)
    #[error("Validation error on parameter `{field}`: {reason}")]
    Validation { field: String, reason: String },

    /// A single-resource read named an id that does not exist (HTTP 404)
    #[error("{entity} with id {id} not found")]
    ResourceNotFound { entity: &'static str, id: u64 },

    /// Opaque failure raised by a read-service collaborator (HTTP 503)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Malformed configuration file or environment (HTTP 500)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Unexpected internal failure (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PlatformError {
    /// Get user-friendly error message.
    ///
    /// Client-fault variants keep their detail; infrastructure variants are
    /// masked so internal state never leaks to the caller.
    pub fn user_message(&self) -> String {
        match self {
            PlatformError::Unauthenticated(reason) => {
                format!("Authentication failed: {}", reason)
            }
            PlatformError::Unauthorized { entity } => {
                format!("User has no authority to view {} resources", entity)
            }
            PlatformError::Validation { field, reason } => {
                format!("Invalid parameter `{}`: {}", field, reason)
            }
            PlatformError::ResourceNotFound { entity, id } => {
                format!("{} with id {} not found", entity, id)
            }
            PlatformError::DataAccess(_) => "Service unavailable".to_string(),
            PlatformError::Configuration(_) => "Internal error".to_string(),
            PlatformError::Internal(_) => "Internal error".to_string(),
        }
    }
}
