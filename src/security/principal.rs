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

//! Authenticated caller identity and capability checks.

use crate::core::constants::permissions;
use crate::core::errors::PlatformError;
use std::collections::HashSet;

/// The authenticated caller: identity plus granted permission set.
///
/// Resolved once per request by a [`SecurityContext`](crate::security::context::SecurityContext)
/// and immutable for the request's duration.
#[derive(Debug, Clone)]
pub struct Principal {
    username: String,
    permissions: HashSet<String>,
}

impl Principal {
    pub fn new(
        username: impl Into<String>,
        permissions: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            username: username.into(),
            permissions: permissions.into_iter().collect(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn has_permission(&self, name: &str) -> bool {
        self.permissions.contains(name)
    }

    /// Require the read capability for a resource entity type.
    ///
    /// Deny is the default: the check passes only if the principal holds the
    /// super grant, the read-everything grant, or the entity-scoped read
    /// grant (`READ_<ENTITY>`). Anything else fails with
    /// `PlatformError::Unauthorized` carrying the entity tag.
    pub fn validate_has_read_permission(&self, entity: &str) -> Result<(), PlatformError> {
        let entity_grant = format!("{}{}", permissions::READ_PREFIX, entity.to_ascii_uppercase());
        if self.has_permission(permissions::ALL_FUNCTIONS)
            || self.has_permission(permissions::ALL_FUNCTIONS_READ)
            || self.has_permission(&entity_grant)
        {
            Ok(())
        } else {
            Err(PlatformError::Unauthorized {
                entity: entity.to_string(),
            })
        }
    }
}
