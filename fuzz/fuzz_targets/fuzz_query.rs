// Copyright 2026 BadCompany
// Licensed under the Apache License, Version 2.0

#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;

use ledger_gate::api::params::{DefaultParameterHelper, ParameterHelper, RawQuery};
use ledger_gate::core::search::{AccountFilters, SearchParameters};

/// Structured input for filter fuzzing using the arbitrary crate.
/// Optional fields exercise both the set and unset paths of every filter.
#[derive(Debug, Arbitrary)]
struct FuzzQueryInput {
    query: String,
    office_id: Option<String>,
    external_id: Option<String>,
    status: Option<String>,
    currency_code: Option<String>,
    offset: Option<String>,
    limit: Option<String>,
    order_by: Option<String>,
    sort_order: Option<String>,
}

fuzz_target!(|data: &[u8]| {
    let mut unstructured = Unstructured::new(data);

    if let Ok(input) = FuzzQueryInput::arbitrary(&mut unstructured) {
        // Settings derivation must never panic, whatever the query string
        let _ = DefaultParameterHelper.process(&RawQuery::new(input.query));

        // Search construction must either validate or reject, never panic
        let raw = AccountFilters {
            office_id: input.office_id,
            external_id: input.external_id,
            status: input.status,
            currency_code: input.currency_code,
            offset: input.offset,
            limit: input.limit,
            order_by: input.order_by,
            sort_order: input.sort_order,
        };
        if let Ok(search) = SearchParameters::from_filters(&raw) {
            // Constructed searches are bounded and canonicalizable
            assert!(search.limit() >= 1);
            let _ = search.canonical();
        }
    }

    // Also fuzz the raw pair splitter directly
    if let Ok(text) = std::str::from_utf8(data) {
        for (_k, _v) in RawQuery::new(text).pairs() {}
    }
});
