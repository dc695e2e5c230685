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

use crate::core::constants::config as env_names;
use crate::core::errors::PlatformError;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub log_format: String, // "json" or "text"
    pub jwt_secret: Option<String>,
    pub expected_audience: Option<Vec<String>>,
}

impl Config {
    pub fn from_env() -> Result<Self, PlatformError> {
        Ok(Self {
            log_level: env::var(env_names::ENV_LOG_LEVEL).unwrap_or_else(|_| "info".to_string()),
            log_format: env::var(env_names::ENV_LOG_FORMAT)
                .unwrap_or_else(|_| "text".to_string()),
            jwt_secret: env::var(env_names::ENV_JWT_SECRET).ok(),
            expected_audience: env::var(env_names::ENV_EXPECTED_AUDIENCE)
                .ok()
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect()),
        })
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, PlatformError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PlatformError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        serde_yaml_ng::from_str(&content)
            .map_err(|e| PlatformError::Configuration(format!("malformed config: {}", e)))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            jwt_secret: None,
            expected_audience: None,
        }
    }
}
