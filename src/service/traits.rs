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

//! Read-service seam.

use crate::core::errors::PlatformError;
use crate::core::models::{AccountId, Page, SavingsAccountData};
use crate::core::search::SearchParameters;
use async_trait::async_trait;

/// Data access for savings account reads.
///
/// Implementations own their failure modes; the dispatcher passes every
/// error through to the caller unchanged.
#[async_trait]
pub trait SavingsAccountReadService: Send + Sync {
    /// Retrieve the page of accounts matching a validated search.
    async fn retrieve_all(
        &self,
        search: &SearchParameters,
    ) -> Result<Page<SavingsAccountData>, PlatformError>;

    /// Retrieve a single account by id.
    async fn retrieve_one(&self, id: AccountId) -> Result<SavingsAccountData, PlatformError>;
}
