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

//! ledger-gate constants - Single source of truth for all configuration values.
//!
//! This module centralizes permission names, entity tags, paging limits,
//! response field sets, and environment variable names to ensure consistency
//! and maintainability.

/// Resource entity tags used as permission lookup keys
pub mod resources {
    /// Entity tag for savings account resources
    pub const SAVINGS_ACCOUNT: &str = "savingsaccount";
}

/// Permission names granted to principals
pub mod permissions {
    /// Super-user grant covering every operation
    pub const ALL_FUNCTIONS: &str = "ALL_FUNCTIONS";
    /// Grant covering every read operation
    pub const ALL_FUNCTIONS_READ: &str = "ALL_FUNCTIONS_READ";
    /// Prefix for entity-scoped read grants, e.g. `READ_SAVINGSACCOUNT`
    pub const READ_PREFIX: &str = "READ_";
}

/// Paging bounds applied to every list query
pub mod paging {
    /// Page size used when the caller supplies none
    pub const DEFAULT_PAGE_SIZE: u64 = 50;
    /// Hard ceiling on a single page; larger requests are clamped
    pub const MAX_PAGE_SIZE: u64 = 200;
}

/// Response field sets and sortable columns, per resource type
pub mod fields {
    /// Field names permitted in a serialized savings account response.
    /// The serializer never emits a field outside this set.
    pub const SAVINGS_ACCOUNT_RESPONSE: &[&str] = &[
        "id",
        "accountNo",
        "externalId",
        "officeId",
        "officeName",
        "clientName",
        "productName",
        "currencyCode",
        "status",
        "accountBalance",
        "activatedOn",
    ];

    /// Columns a list query may be ordered by. Caller-supplied sort keys
    /// outside this set are rejected before they reach the data layer.
    pub const SAVINGS_ACCOUNT_SORTABLE: &[&str] = &[
        "id",
        "accountNo",
        "officeId",
        "currencyCode",
        "status",
        "accountBalance",
    ];
}

/// Query string parameter names recognized by the parameter helper
pub mod query {
    pub const PRETTY_PRINT: &str = "prettyPrint";
    pub const TEMPLATE: &str = "template";
    pub const FIELDS: &str = "fields";
}

/// Filter bounds enforced during search construction
pub mod filters {
    /// Maximum accepted length of an external id filter value
    pub const MAX_EXTERNAL_ID_LENGTH: usize = 100;
    /// Exact length of an ISO 4217 currency code
    pub const CURRENCY_CODE_LENGTH: usize = 3;
}

/// Cryptographic constants
pub mod crypto {
    /// HMAC-SHA256 secret key length in bytes
    pub const SECRET_KEY_LENGTH: usize = 32;
}

/// Configuration Environment Variables
pub mod config {
    pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
    pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
    pub const ENV_JWT_SECRET: &str = "LEDGER_GATE_JWT_SECRET";
    pub const ENV_EXPECTED_AUDIENCE: &str = "LEDGER_GATE_EXPECTED_AUDIENCE";
}
