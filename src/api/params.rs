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

//! Serialization-settings derivation.
//!
//! The raw query string travels with the request untouched; this module
//! turns it into an immutable `SerializationSettings` value. Settings
//! derivation is a pure transform: same query string, same settings.
//! Values are assumed pre-decoded by the transport layer.

use crate::core::constants::query;
use crate::core::errors::PlatformError;
use std::collections::BTreeSet;

/// The raw, unparsed query string of the current request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawQuery(String);

impl RawQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self(query.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate `key=value` pairs. A bare key yields an empty value.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .trim_start_matches('?')
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
    }
}

/// Which fields and format a response should be emitted with.
/// Immutable once constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerializationSettings {
    pretty: bool,
    template: bool,
    fields: Option<BTreeSet<String>>,
}

impl SerializationSettings {
    pub fn new(pretty: bool, template: bool, fields: Option<BTreeSet<String>>) -> Self {
        Self {
            pretty,
            template,
            fields,
        }
    }

    pub fn pretty(&self) -> bool {
        self.pretty
    }

    pub fn template(&self) -> bool {
        self.template
    }

    /// Requested response projection, if the caller asked for one
    pub fn fields(&self) -> Option<&BTreeSet<String>> {
        self.fields.as_ref()
    }
}

/// Derives serialization settings from the raw request context.
pub trait ParameterHelper: Send + Sync {
    fn process(&self, raw: &RawQuery) -> Result<SerializationSettings, PlatformError>;
}

/// Default helper recognizing `prettyPrint`, `template`, and `fields`.
///
/// Keys outside these three belong to the filter surface and are ignored
/// here. Repeated keys keep the last occurrence.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultParameterHelper;

impl ParameterHelper for DefaultParameterHelper {
    fn process(&self, raw: &RawQuery) -> Result<SerializationSettings, PlatformError> {
        let mut pretty = false;
        let mut template = false;
        let mut fields: Option<BTreeSet<String>> = None;

        for (key, value) in raw.pairs() {
            match key {
                query::PRETTY_PRINT => pretty = parse_bool(key, value)?,
                query::TEMPLATE => template = parse_bool(key, value)?,
                query::FIELDS => {
                    let mut requested = BTreeSet::new();
                    for field in value.split(',') {
                        let field = field.trim();
                        if field.is_empty() {
                            return Err(PlatformError::Validation {
                                field: query::FIELDS.to_string(),
                                reason: "must be a comma-separated list of field names"
                                    .to_string(),
                            });
                        }
                        requested.insert(field.to_string());
                    }
                    fields = Some(requested);
                }
                _ => {}
            }
        }

        Ok(SerializationSettings::new(pretty, template, fields))
    }
}

fn parse_bool(field: &str, value: &str) -> Result<bool, PlatformError> {
    match value.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(PlatformError::Validation {
            field: field.to_string(),
            reason: "must be true or false".to_string(),
        }),
    }
}
