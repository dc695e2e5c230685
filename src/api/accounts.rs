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

//! Savings accounts resource.
//!
//! The authorized query dispatcher for savings account reads. Every request
//! runs the same gate: resolve the principal, require the read grant for the
//! savings account entity, and only then build the search and touch the
//! read service. A denied request produces an audit record and never
//! reaches the data layer. Downstream failures propagate to the caller
//! unchanged; there are no retries and no partial results.

use crate::api::params::{ParameterHelper, RawQuery};
use crate::api::serializer::ResponseSerializer;
use crate::core::audit::AuditLogger;
use crate::core::constants::{fields, resources};
use crate::core::crypto::CryptoSigner;
use crate::core::errors::PlatformError;
use crate::core::models::AccountId;
use crate::core::search::{AccountFilters, SearchParameters};
use crate::security::context::SecurityContext;
use crate::service::traits::SavingsAccountReadService;
use serde_json::json;
use tracing::{debug, warn};
use uuid::Uuid;

/// Dispatcher for the savings accounts read API.
///
/// Collaborators are injected at construction and held for the dispatcher's
/// lifetime; all per-request state is local to each call, so one instance
/// serves concurrent requests without coordination.
pub struct SavingsAccountsApi<C, R, P, S>
where
    C: SecurityContext,
    R: SavingsAccountReadService,
    P: ParameterHelper,
    S: ResponseSerializer,
{
    context: C,
    read_service: R,
    parameter_helper: P,
    serializer: S,
    audit: AuditLogger,
}

impl<C, R, P, S> SavingsAccountsApi<C, R, P, S>
where
    C: SecurityContext,
    R: SavingsAccountReadService,
    P: ParameterHelper,
    S: ResponseSerializer,
{
    pub fn new(
        context: C,
        read_service: R,
        parameter_helper: P,
        serializer: S,
        signer: CryptoSigner,
    ) -> Self {
        Self {
            context,
            read_service,
            parameter_helper,
            serializer,
            audit: AuditLogger::new(signer),
        }
    }

    /// List savings accounts matching the supplied filters.
    ///
    /// The permission check precedes every other step: when it fails, the
    /// read service sees zero interactions for this request.
    pub async fn retrieve_all(
        &self,
        filters: &AccountFilters,
        query: &RawQuery,
    ) -> Result<String, PlatformError> {
        let request_id = Uuid::new_v4().to_string();

        let principal = self.context.authenticated_user()?;
        self.require_read(&request_id, &principal)?;

        let search = SearchParameters::from_filters(filters)?;
        let page = self.read_service.retrieve_all(&search).await?;
        let settings = self.parameter_helper.process(query)?;

        debug!(
            request_id = %request_id,
            matched = page.total_filtered_records,
            "savings account list dispatched"
        );
        self.audit.log(
            &request_id,
            "ReadDispatch",
            json!({
                "entity": resources::SAVINGS_ACCOUNT,
                "user": principal.username(),
                "decision": "ALLOW",
                "matched": page.total_filtered_records,
                "filters_digest": CryptoSigner::digest_hex(&search.canonical()),
            }),
        );

        self.serializer
            .serialize(&settings, &page, fields::SAVINGS_ACCOUNT_RESPONSE)
    }

    /// Read a single savings account by id through the same permission gate.
    pub async fn retrieve_one(
        &self,
        id: AccountId,
        query: &RawQuery,
    ) -> Result<String, PlatformError> {
        let request_id = Uuid::new_v4().to_string();

        let principal = self.context.authenticated_user()?;
        self.require_read(&request_id, &principal)?;

        let account = self.read_service.retrieve_one(id).await?;
        let settings = self.parameter_helper.process(query)?;

        debug!(request_id = %request_id, account_id = %id, "savings account read dispatched");
        self.audit.log(
            &request_id,
            "ReadDispatch",
            json!({
                "entity": resources::SAVINGS_ACCOUNT,
                "user": principal.username(),
                "decision": "ALLOW",
                "accountId": id.get(),
            }),
        );

        self.serializer
            .serialize_one(&settings, &account, fields::SAVINGS_ACCOUNT_RESPONSE)
    }

    fn require_read(
        &self,
        request_id: &str,
        principal: &crate::security::principal::Principal,
    ) -> Result<(), PlatformError> {
        if let Err(denied) =
            principal.validate_has_read_permission(resources::SAVINGS_ACCOUNT)
        {
            warn!(
                request_id = %request_id,
                user = %principal.username(),
                entity = resources::SAVINGS_ACCOUNT,
                "read permission denied"
            );
            self.audit.log(
                request_id,
                "ReadDispatch",
                json!({
                    "entity": resources::SAVINGS_ACCOUNT,
                    "user": principal.username(),
                    "decision": "DENY",
                }),
            );
            return Err(denied);
        }
        Ok(())
    }
}
