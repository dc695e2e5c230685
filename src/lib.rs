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

//! ledger-gate: a permission-gated query dispatch layer for ledger read APIs.
//!
//! This library provides the core logic of the ledger-gate read dispatcher:
//! every list/read request is authenticated, authorized against the resource
//! entity it targets, and only then translated into a bounded search and
//! delegated to a read service. Denied requests never reach the data layer.

pub mod api;
pub mod config;
pub mod core;
pub mod security;
pub mod service;
pub mod utils;
