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

//! Response serialization.
//!
//! Every emitted payload is projected through the resource's fixed field
//! allow-list. A caller-requested projection (`fields=`) can narrow the
//! output further but never widen it past the allow-list.

use crate::api::params::SerializationSettings;
use crate::core::errors::PlatformError;
use crate::core::models::{Page, SavingsAccountData};
use serde_json::{json, Value};

/// Produces the wire payload for a result page or a single record.
pub trait ResponseSerializer: Send + Sync {
    fn serialize(
        &self,
        settings: &SerializationSettings,
        page: &Page<SavingsAccountData>,
        allowed: &[&str],
    ) -> Result<String, PlatformError>;

    fn serialize_one(
        &self,
        settings: &SerializationSettings,
        account: &SavingsAccountData,
        allowed: &[&str],
    ) -> Result<String, PlatformError>;
}

/// serde_json-backed serializer with allow-list projection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToApiJsonSerializer;

impl ToApiJsonSerializer {
    fn project(
        &self,
        account: &SavingsAccountData,
        settings: &SerializationSettings,
        allowed: &[&str],
    ) -> Result<Value, PlatformError> {
        let value = serde_json::to_value(account)
            .map_err(|e| PlatformError::Internal(format!("serialization failed: {}", e)))?;
        let Value::Object(map) = value else {
            return Err(PlatformError::Internal(
                "account did not serialize to an object".to_string(),
            ));
        };
        let projected = map
            .into_iter()
            .filter(|(key, _)| {
                allowed.contains(&key.as_str())
                    && settings.fields().map_or(true, |requested| requested.contains(key))
            })
            .collect();
        Ok(Value::Object(projected))
    }

    fn render(&self, value: &Value, settings: &SerializationSettings) -> Result<String, PlatformError> {
        let rendered = if settings.pretty() {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.map_err(|e| PlatformError::Internal(format!("serialization failed: {}", e)))
    }
}

impl ResponseSerializer for ToApiJsonSerializer {
    fn serialize(
        &self,
        settings: &SerializationSettings,
        page: &Page<SavingsAccountData>,
        allowed: &[&str],
    ) -> Result<String, PlatformError> {
        let items = page
            .items
            .iter()
            .map(|account| self.project(account, settings, allowed))
            .collect::<Result<Vec<_>, _>>()?;
        let body = json!({
            "totalFilteredRecords": page.total_filtered_records,
            "pageItems": items,
        });
        self.render(&body, settings)
    }

    fn serialize_one(
        &self,
        settings: &SerializationSettings,
        account: &SavingsAccountData,
        allowed: &[&str],
    ) -> Result<String, PlatformError> {
        let body = self.project(account, settings, allowed)?;
        self.render(&body, settings)
    }
}
