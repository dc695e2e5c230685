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

//! Domain models for the ledger-gate read layer.
//!
//! This module contains pure data structures representing accounts, result
//! pages, and identifiers. It is designed to be free of I/O side effects.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Newtype wrapper around u64 for type-safe account identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(u64);

impl AccountId {
    /// Create a new AccountId
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the underlying id
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl FromStr for AccountId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(AccountId)
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a savings account
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub enum AccountStatus {
    Submitted,
    Approved,
    Active,
    Closed,
}

impl AccountStatus {
    /// Parse a raw query value, case-insensitively. Returns `None` for
    /// anything outside the known states so the caller can name the field
    /// in its validation error.
    pub fn from_query_value(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "submitted" => Some(AccountStatus::Submitted),
            "approved" => Some(AccountStatus::Approved),
            "active" => Some(AccountStatus::Active),
            "closed" => Some(AccountStatus::Closed),
            _ => None,
        }
    }
}

/// Read model of a savings account as served by list/read endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsAccountData {
    pub id: AccountId,
    pub account_no: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    pub office_id: u64,
    pub office_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    pub product_name: String,
    pub currency_code: String,
    pub status: AccountStatus,
    pub account_balance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activated_on: Option<NaiveDate>,
}

/// An ordered, bounded page of results plus total-count metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(rename = "pageItems")]
    pub items: Vec<T>,
    #[serde(rename = "totalFilteredRecords")]
    pub total_filtered_records: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_filtered_records: u64) -> Self {
        Self {
            items,
            total_filtered_records,
        }
    }

    /// An empty page
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_filtered_records: 0,
        }
    }
}
