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

//! Search construction.
//!
//! Raw, optionally-absent filter values are coerced into an immutable
//! `SearchParameters` value before any read service is contacted. All type
//! coercion and bounds validation happens here; downstream code never
//! parses. Absent filters stay absent, they are never mapped to sentinels.

use crate::core::constants::{fields, filters, paging};
use crate::core::errors::PlatformError;
use crate::core::models::AccountStatus;
use serde::{Deserialize, Serialize};

/// Raw filter values as handed over by the transport layer.
///
/// Everything is optional and string-typed; nothing here has been validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountFilters {
    pub office_id: Option<String>,
    pub external_id: Option<String>,
    pub status: Option<String>,
    pub currency_code: Option<String>,
    pub offset: Option<String>,
    pub limit: Option<String>,
    pub order_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Requested result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Validated, immutable search specification.
///
/// Constructed once per request via [`SearchParameters::from_filters`] and
/// owned solely by the dispatch call. Fields are private; after construction
/// the value cannot change.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParameters {
    office_id: Option<u64>,
    external_id: Option<String>,
    status: Option<AccountStatus>,
    currency_code: Option<String>,
    offset: u64,
    limit: u64,
    order_by: Option<&'static str>,
    sort_order: Option<SortOrder>,
}

impl SearchParameters {
    /// Coerce and validate raw filters.
    ///
    /// Malformed input fails with `PlatformError::Validation` naming the
    /// offending field. The page limit is clamped to
    /// [`paging::MAX_PAGE_SIZE`] so every constructed search is bounded.
    pub fn from_filters(raw: &AccountFilters) -> Result<Self, PlatformError> {
        let office_id = match raw.office_id.as_deref() {
            None => None,
            Some(value) => Some(parse_positive(value, "officeId")?),
        };

        let external_id = match raw.external_id.as_deref() {
            None => None,
            Some(value) => {
                if value.is_empty() {
                    return Err(invalid("externalId", "must not be empty"));
                }
                if value.len() > filters::MAX_EXTERNAL_ID_LENGTH {
                    return Err(invalid(
                        "externalId",
                        &format!("must be at most {} characters", filters::MAX_EXTERNAL_ID_LENGTH),
                    ));
                }
                Some(value.to_string())
            }
        };

        let status = match raw.status.as_deref() {
            None => None,
            Some(value) => Some(AccountStatus::from_query_value(value).ok_or_else(|| {
                invalid("status", "must be one of submitted, approved, active, closed")
            })?),
        };

        let currency_code = match raw.currency_code.as_deref() {
            None => None,
            Some(value) => {
                let ok = value.len() == filters::CURRENCY_CODE_LENGTH
                    && value.chars().all(|c| c.is_ascii_alphabetic());
                if !ok {
                    return Err(invalid("currencyCode", "must be a 3-letter ISO 4217 code"));
                }
                Some(value.to_ascii_uppercase())
            }
        };

        let offset = match raw.offset.as_deref() {
            None => 0,
            Some(value) => value
                .parse::<u64>()
                .map_err(|_| invalid("offset", "must be a non-negative integer"))?,
        };

        let limit = match raw.limit.as_deref() {
            None => paging::DEFAULT_PAGE_SIZE,
            Some(value) => {
                let limit = parse_positive(value, "limit")?;
                limit.min(paging::MAX_PAGE_SIZE)
            }
        };

        let order_by = match raw.order_by.as_deref() {
            None => None,
            Some(value) => Some(
                fields::SAVINGS_ACCOUNT_SORTABLE
                    .iter()
                    .find(|column| **column == value)
                    .copied()
                    .ok_or_else(|| invalid("orderBy", "is not a sortable column"))?,
            ),
        };

        let sort_order = match raw.sort_order.as_deref() {
            None => None,
            Some(value) => match value.to_ascii_uppercase().as_str() {
                "ASC" => Some(SortOrder::Ascending),
                "DESC" => Some(SortOrder::Descending),
                _ => return Err(invalid("sortOrder", "must be ASC or DESC")),
            },
        };

        Ok(Self {
            office_id,
            external_id,
            status,
            currency_code,
            offset,
            limit,
            order_by,
            sort_order,
        })
    }

    pub fn office_id(&self) -> Option<u64> {
        self.office_id
    }

    pub fn external_id(&self) -> Option<&str> {
        self.external_id.as_deref()
    }

    pub fn status(&self) -> Option<AccountStatus> {
        self.status
    }

    pub fn currency_code(&self) -> Option<&str> {
        self.currency_code.as_deref()
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn order_by(&self) -> Option<&'static str> {
        self.order_by
    }

    pub fn sort_order(&self) -> Option<SortOrder> {
        self.sort_order
    }

    /// Deterministic canonical form of the set filters.
    ///
    /// Used for audit digests, never for display: audit records carry a hash
    /// of this string instead of raw filter values.
    pub fn canonical(&self) -> String {
        let mut parts = Vec::new();
        if let Some(v) = self.office_id {
            parts.push(format!("officeId={}", v));
        }
        if let Some(v) = &self.external_id {
            parts.push(format!("externalId={}", v));
        }
        if let Some(v) = self.status {
            parts.push(format!("status={:?}", v));
        }
        if let Some(v) = &self.currency_code {
            parts.push(format!("currencyCode={}", v));
        }
        parts.push(format!("offset={}", self.offset));
        parts.push(format!("limit={}", self.limit));
        if let Some(v) = self.order_by {
            parts.push(format!("orderBy={}", v));
        }
        if let Some(v) = self.sort_order {
            parts.push(format!("sortOrder={:?}", v));
        }
        parts.join("&")
    }
}

fn parse_positive(value: &str, field: &str) -> Result<u64, PlatformError> {
    match value.parse::<u64>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(invalid(field, "must be a positive integer")),
    }
}

fn invalid(field: &str, reason: &str) -> PlatformError {
    PlatformError::Validation {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
