//! Integration tests for the savings accounts read dispatcher
//! Covers:
//! - Authorization gating (denied requests never touch the read service)
//! - Happy-path delegation (exactly one fetch, exactly one serialization)
//! - Settings derivation independence from filter content
//! - Pass-through of read-service failures

use ledger_gate::api::accounts::SavingsAccountsApi;
use ledger_gate::api::params::{
    DefaultParameterHelper, ParameterHelper, RawQuery, SerializationSettings,
};
use ledger_gate::api::serializer::{ResponseSerializer, ToApiJsonSerializer};
use ledger_gate::core::constants::fields;
use ledger_gate::core::crypto::CryptoSigner;
use ledger_gate::core::errors::PlatformError;
use ledger_gate::core::models::{AccountId, AccountStatus, Page, SavingsAccountData};
use ledger_gate::core::search::{AccountFilters, SearchParameters};
use ledger_gate::security::context::{JwtSecurityContext, SecurityContext};
use ledger_gate::security::principal::Principal;
use ledger_gate::service::memory::InMemorySavingsAccountReadService;
use ledger_gate::service::traits::SavingsAccountReadService;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// --- Helpers ---

/// Context double: yields a fixed principal, or Unauthenticated when none.
struct StubContext {
    principal: Option<Principal>,
}

impl SecurityContext for StubContext {
    fn authenticated_user(&self) -> Result<Principal, PlatformError> {
        self.principal
            .clone()
            .ok_or_else(|| PlatformError::Unauthenticated("no principal".to_string()))
    }
}

fn context_with(grants: &[&str]) -> StubContext {
    StubContext {
        principal: Some(Principal::new(
            "mifos",
            grants.iter().map(|g| g.to_string()),
        )),
    }
}

/// Read-service double recording every interaction.
struct RecordingReadService {
    calls: Arc<AtomicUsize>,
    last_search: Arc<Mutex<Option<SearchParameters>>>,
    page: Page<SavingsAccountData>,
}

#[async_trait]
impl SavingsAccountReadService for RecordingReadService {
    async fn retrieve_all(
        &self,
        search: &SearchParameters,
    ) -> Result<Page<SavingsAccountData>, PlatformError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_search.lock().unwrap() = Some(search.clone());
        Ok(self.page.clone())
    }

    async fn retrieve_one(&self, id: AccountId) -> Result<SavingsAccountData, PlatformError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.page
            .items
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(PlatformError::ResourceNotFound {
                entity: "savingsaccount",
                id: id.get(),
            })
    }
}

/// Read-service double that always fails.
struct FailingReadService {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl SavingsAccountReadService for FailingReadService {
    async fn retrieve_all(
        &self,
        _search: &SearchParameters,
    ) -> Result<Page<SavingsAccountData>, PlatformError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(PlatformError::DataAccess(
            "connection pool exhausted".to_string(),
        ))
    }

    async fn retrieve_one(&self, _id: AccountId) -> Result<SavingsAccountData, PlatformError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(PlatformError::DataAccess(
            "connection pool exhausted".to_string(),
        ))
    }
}

/// Parameter-helper double returning fixed settings and counting calls.
struct CountingParameterHelper {
    calls: Arc<AtomicUsize>,
    settings: SerializationSettings,
}

impl ParameterHelper for CountingParameterHelper {
    fn process(&self, _raw: &RawQuery) -> Result<SerializationSettings, PlatformError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.settings.clone())
    }
}

/// Serializer double recording the settings and allow-list it was handed.
struct RecordingSerializer {
    calls: Arc<AtomicUsize>,
    last_settings: Arc<Mutex<Option<SerializationSettings>>>,
    last_allowed: Arc<Mutex<Option<Vec<String>>>>,
}

impl RecordingSerializer {
    fn record(&self, settings: &SerializationSettings, allowed: &[&str]) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_settings.lock().unwrap() = Some(settings.clone());
        *self.last_allowed.lock().unwrap() =
            Some(allowed.iter().map(|s| s.to_string()).collect());
    }
}

impl ResponseSerializer for RecordingSerializer {
    fn serialize(
        &self,
        settings: &SerializationSettings,
        _page: &Page<SavingsAccountData>,
        allowed: &[&str],
    ) -> Result<String, PlatformError> {
        self.record(settings, allowed);
        Ok("serialized".to_string())
    }

    fn serialize_one(
        &self,
        settings: &SerializationSettings,
        _account: &SavingsAccountData,
        allowed: &[&str],
    ) -> Result<String, PlatformError> {
        self.record(settings, allowed);
        Ok("serialized".to_string())
    }
}

struct Doubles {
    read_calls: Arc<AtomicUsize>,
    last_search: Arc<Mutex<Option<SearchParameters>>>,
    helper_calls: Arc<AtomicUsize>,
    serializer_calls: Arc<AtomicUsize>,
    last_settings: Arc<Mutex<Option<SerializationSettings>>>,
    last_allowed: Arc<Mutex<Option<Vec<String>>>>,
}

fn account(id: u64) -> SavingsAccountData {
    SavingsAccountData {
        id: AccountId::new(id),
        account_no: format!("{:09}", id),
        external_id: Some("02041981".to_string()),
        office_id: 1,
        office_name: "Head Office".to_string(),
        client_name: None,
        product_name: "Basic Savings".to_string(),
        currency_code: "USD".to_string(),
        status: AccountStatus::Active,
        account_balance: 500.0,
        activated_on: None,
    }
}

/// Wire a dispatcher from doubles, returning the shared observation handles.
fn dispatcher_with(
    context: StubContext,
) -> (
    SavingsAccountsApi<StubContext, RecordingReadService, CountingParameterHelper, RecordingSerializer>,
    Doubles,
) {
    let doubles = Doubles {
        read_calls: Arc::new(AtomicUsize::new(0)),
        last_search: Arc::new(Mutex::new(None)),
        helper_calls: Arc::new(AtomicUsize::new(0)),
        serializer_calls: Arc::new(AtomicUsize::new(0)),
        last_settings: Arc::new(Mutex::new(None)),
        last_allowed: Arc::new(Mutex::new(None)),
    };
    let api = SavingsAccountsApi::new(
        context,
        RecordingReadService {
            calls: doubles.read_calls.clone(),
            last_search: doubles.last_search.clone(),
            page: Page::new(vec![account(1)], 1),
        },
        CountingParameterHelper {
            calls: doubles.helper_calls.clone(),
            settings: SerializationSettings::default(),
        },
        RecordingSerializer {
            calls: doubles.serializer_calls.clone(),
            last_settings: doubles.last_settings.clone(),
            last_allowed: doubles.last_allowed.clone(),
        },
        CryptoSigner::new(),
    );
    (api, doubles)
}

fn external_id_filters() -> AccountFilters {
    AccountFilters {
        external_id: Some("02041981".to_string()),
        ..AccountFilters::default()
    }
}

// --- Tests ---

#[tokio::test]
async fn retrieve_all_has_permission() {
    let (api, doubles) = dispatcher_with(context_with(&["READ_SAVINGSACCOUNT"]));

    let out = api
        .retrieve_all(&external_id_filters(), &RawQuery::new(""))
        .await
        .unwrap();

    assert_eq!(out, "serialized");
    assert_eq!(doubles.read_calls.load(Ordering::SeqCst), 1);
    let search = doubles.last_search.lock().unwrap().clone().unwrap();
    assert_eq!(search.external_id(), Some("02041981"));
    assert_eq!(search.office_id(), None);

    assert_eq!(doubles.serializer_calls.load(Ordering::SeqCst), 1);
    let allowed = doubles.last_allowed.lock().unwrap().clone().unwrap();
    assert_eq!(allowed, fields::SAVINGS_ACCOUNT_RESPONSE.to_vec());
    let settings = doubles.last_settings.lock().unwrap().clone().unwrap();
    assert_eq!(settings, SerializationSettings::default());
}

#[tokio::test]
async fn retrieve_all_has_no_permission() {
    let (api, doubles) = dispatcher_with(context_with(&[]));

    let err = api
        .retrieve_all(&external_id_filters(), &RawQuery::new(""))
        .await
        .unwrap_err();

    match err {
        PlatformError::Unauthorized { entity } => assert_eq!(entity, "savingsaccount"),
        other => panic!("expected Unauthorized, got {:?}", other),
    }
    // No interaction with any downstream collaborator
    assert_eq!(doubles.read_calls.load(Ordering::SeqCst), 0);
    assert_eq!(doubles.helper_calls.load(Ordering::SeqCst), 0);
    assert_eq!(doubles.serializer_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unauthenticated_request_never_reaches_the_read_service() {
    let (api, doubles) = dispatcher_with(StubContext { principal: None });

    let err = api
        .retrieve_all(&AccountFilters::default(), &RawQuery::new(""))
        .await
        .unwrap_err();

    assert!(matches!(err, PlatformError::Unauthenticated(_)));
    assert_eq!(doubles.read_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn authorization_precedes_filter_validation() {
    // Malformed filters plus a missing grant: the caller sees the denial,
    // proving the permission check runs before anything touches the input.
    let (api, doubles) = dispatcher_with(context_with(&[]));

    let raw = AccountFilters {
        office_id: Some("not-a-number".to_string()),
        ..AccountFilters::default()
    };
    let err = api.retrieve_all(&raw, &RawQuery::new("")).await.unwrap_err();

    assert!(matches!(err, PlatformError::Unauthorized { .. }));
    assert_eq!(doubles.read_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn malformed_filters_fail_before_the_read_service() {
    let (api, doubles) = dispatcher_with(context_with(&["ALL_FUNCTIONS_READ"]));

    let raw = AccountFilters {
        office_id: Some("not-a-number".to_string()),
        ..AccountFilters::default()
    };
    let err = api.retrieve_all(&raw, &RawQuery::new("")).await.unwrap_err();

    match err {
        PlatformError::Validation { field, .. } => assert_eq!(field, "officeId"),
        other => panic!("expected Validation, got {:?}", other),
    }
    assert_eq!(doubles.read_calls.load(Ordering::SeqCst), 0);
    assert_eq!(doubles.serializer_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn settings_derivation_is_independent_of_filters() {
    let (api, doubles) = dispatcher_with(context_with(&["ALL_FUNCTIONS"]));
    api.retrieve_all(&AccountFilters::default(), &RawQuery::new(""))
        .await
        .unwrap();
    assert_eq!(doubles.helper_calls.load(Ordering::SeqCst), 1);

    let (api, doubles) = dispatcher_with(context_with(&["ALL_FUNCTIONS"]));
    api.retrieve_all(&external_id_filters(), &RawQuery::new(""))
        .await
        .unwrap();
    assert_eq!(doubles.helper_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn read_service_errors_pass_through_unchanged() {
    let calls = Arc::new(AtomicUsize::new(0));
    let serializer_calls = Arc::new(AtomicUsize::new(0));
    let api = SavingsAccountsApi::new(
        context_with(&["READ_SAVINGSACCOUNT"]),
        FailingReadService {
            calls: calls.clone(),
        },
        CountingParameterHelper {
            calls: Arc::new(AtomicUsize::new(0)),
            settings: SerializationSettings::default(),
        },
        RecordingSerializer {
            calls: serializer_calls.clone(),
            last_settings: Arc::new(Mutex::new(None)),
            last_allowed: Arc::new(Mutex::new(None)),
        },
        CryptoSigner::new(),
    );

    let err = api
        .retrieve_all(&AccountFilters::default(), &RawQuery::new(""))
        .await
        .unwrap_err();

    match err {
        PlatformError::DataAccess(message) => {
            assert_eq!(message, "connection pool exhausted");
        }
        other => panic!("expected DataAccess, got {:?}", other),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(serializer_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn retrieve_one_runs_the_same_gate() {
    let (api, doubles) = dispatcher_with(context_with(&[]));
    let err = api
        .retrieve_one(AccountId::new(1), &RawQuery::new(""))
        .await
        .unwrap_err();
    assert!(matches!(err, PlatformError::Unauthorized { .. }));
    assert_eq!(doubles.read_calls.load(Ordering::SeqCst), 0);

    let (api, doubles) = dispatcher_with(context_with(&["READ_SAVINGSACCOUNT"]));
    let out = api
        .retrieve_one(AccountId::new(1), &RawQuery::new(""))
        .await
        .unwrap();
    assert_eq!(out, "serialized");
    assert_eq!(doubles.read_calls.load(Ordering::SeqCst), 1);
    assert_eq!(doubles.serializer_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn retrieve_one_not_found_passes_through() {
    let (api, _doubles) = dispatcher_with(context_with(&["READ_SAVINGSACCOUNT"]));
    let err = api
        .retrieve_one(AccountId::new(404), &RawQuery::new(""))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PlatformError::ResourceNotFound { id: 404, .. }
    ));
}

// --- Full stack (production collaborators end to end) ---

fn bearer_for(permissions: &[&str]) -> String {
    let exp = (ledger_gate::utils::time::now() as usize) + 3600;
    let claims = serde_json::json!({
        "sub": "mifos",
        "exp": exp,
        "permissions": permissions,
    });
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(b"integration-secret"),
    )
    .unwrap()
}

#[tokio::test]
async fn full_stack_list_with_projection() {
    ledger_gate::utils::logging::init_tracing(&ledger_gate::config::Config::default());
    let service = InMemorySavingsAccountReadService::new();
    service.add_account(account(1)).await;
    let mut second = account(2);
    second.external_id = Some("99999999".to_string());
    second.currency_code = "EUR".to_string();
    service.add_account(second).await;

    let token = bearer_for(&["READ_SAVINGSACCOUNT"]);
    let api = SavingsAccountsApi::new(
        JwtSecurityContext::new(Some("integration-secret".to_string()), None, Some(&token)),
        service,
        DefaultParameterHelper,
        ToApiJsonSerializer,
        CryptoSigner::new(),
    );

    let filters = AccountFilters {
        currency_code: Some("USD".to_string()),
        ..AccountFilters::default()
    };
    let payload = api
        .retrieve_all(&filters, &RawQuery::new("fields=id,accountNo,externalId"))
        .await
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
    assert_eq!(value["totalFilteredRecords"], 1);
    let item = &value["pageItems"][0];
    assert_eq!(item["accountNo"], "000000001");
    assert_eq!(item["externalId"], "02041981");
    // Projection dropped everything not requested
    assert!(item.get("currencyCode").is_none());
}

#[tokio::test]
async fn full_stack_denies_without_grant() {
    let service = InMemorySavingsAccountReadService::new();
    service.add_account(account(1)).await;

    let token = bearer_for(&["READ_LOANACCOUNT"]);
    let api = SavingsAccountsApi::new(
        JwtSecurityContext::new(Some("integration-secret".to_string()), None, Some(&token)),
        service,
        DefaultParameterHelper,
        ToApiJsonSerializer,
        CryptoSigner::new(),
    );

    let err = api
        .retrieve_all(&AccountFilters::default(), &RawQuery::new(""))
        .await
        .unwrap_err();
    assert!(matches!(err, PlatformError::Unauthorized { .. }));
}
