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

//! In-memory read service.
//!
//! Reference implementation of [`SavingsAccountReadService`]: filters are
//! applied conjunctively, ordering follows the allow-listed sort column
//! with the account id as tiebreak, and the offset/limit window is applied
//! after counting the full match set.

use crate::core::constants::resources;
use crate::core::errors::PlatformError;
use crate::core::models::{AccountId, Page, SavingsAccountData};
use crate::core::search::{SearchParameters, SortOrder};
use crate::service::traits::SavingsAccountReadService;
use anyhow::Context;
use async_trait::async_trait;
use std::cmp::Ordering;
use std::path::Path;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemorySavingsAccountReadService {
    accounts: RwLock<Vec<SavingsAccountData>>,
}

impl InMemorySavingsAccountReadService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load seed accounts from a YAML fixture file.
    pub fn from_yaml_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read seed file {}", path.display()))?;
        let accounts: Vec<SavingsAccountData> =
            serde_yaml_ng::from_str(&content).context("failed to parse seed accounts")?;
        Ok(Self {
            accounts: RwLock::new(accounts),
        })
    }

    pub async fn add_account(&self, account: SavingsAccountData) {
        self.accounts.write().await.push(account);
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

fn matches(account: &SavingsAccountData, search: &SearchParameters) -> bool {
    if let Some(office_id) = search.office_id() {
        if account.office_id != office_id {
            return false;
        }
    }
    if let Some(external_id) = search.external_id() {
        if account.external_id.as_deref() != Some(external_id) {
            return false;
        }
    }
    if let Some(status) = search.status() {
        if account.status != status {
            return false;
        }
    }
    if let Some(currency_code) = search.currency_code() {
        if account.currency_code != currency_code {
            return false;
        }
    }
    true
}

fn compare(a: &SavingsAccountData, b: &SavingsAccountData, column: &str) -> Ordering {
    let ordering = match column {
        "accountNo" => a.account_no.cmp(&b.account_no),
        "officeId" => a.office_id.cmp(&b.office_id),
        "currencyCode" => a.currency_code.cmp(&b.currency_code),
        "status" => a.status.cmp(&b.status),
        "accountBalance" => a.account_balance.total_cmp(&b.account_balance),
        // "id" and anything unforeseen fall back to the id ordering
        _ => Ordering::Equal,
    };
    ordering.then(a.id.cmp(&b.id))
}

#[async_trait]
impl SavingsAccountReadService for InMemorySavingsAccountReadService {
    async fn retrieve_all(
        &self,
        search: &SearchParameters,
    ) -> Result<Page<SavingsAccountData>, PlatformError> {
        let accounts = self.accounts.read().await;
        let mut matched: Vec<&SavingsAccountData> =
            accounts.iter().filter(|a| matches(a, search)).collect();

        let column = search.order_by().unwrap_or("id");
        matched.sort_by(|a, b| compare(a, b, column));
        if search.sort_order() == Some(SortOrder::Descending) {
            matched.reverse();
        }

        let total = matched.len() as u64;
        let items = matched
            .into_iter()
            .skip(search.offset() as usize)
            .take(search.limit() as usize)
            .cloned()
            .collect();

        Ok(Page::new(items, total))
    }

    async fn retrieve_one(&self, id: AccountId) -> Result<SavingsAccountData, PlatformError> {
        let accounts = self.accounts.read().await;
        accounts
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(PlatformError::ResourceNotFound {
                entity: resources::SAVINGS_ACCOUNT,
                id: id.get(),
            })
    }
}
