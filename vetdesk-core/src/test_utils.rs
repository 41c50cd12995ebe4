//! Test helpers: in-memory list source, recording notifier and registration
//! doubles.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::{oneshot, watch};
use vetdesk_api::{
    AddressLookup, ApiError, CepAddress, ListQuery, ListResult, ListSource, Resource,
    TutorRegistrar, TutorWithPetRequest,
};

use crate::notify::{Notification, NotificationLevel, Notifier};

// ===== TestRecord =====

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TestRecord {
    pub id: String,
}

impl Resource for TestRecord {
    const LIST_PATH: &'static str = "test/records";
    const ITEM_PATH: &'static str = "test/record";
    const ITEMS_KEY: &'static str = "records";
    const LABEL: &'static str = "registros";
    const NOUN: &'static str = "registro";
    const DELETED_MESSAGE: &'static str = "Registro excluído com sucesso!";

    fn id(&self) -> &str {
        &self.id
    }
}

/// `r1 ..= rN`.
pub fn records(n: usize) -> Vec<TestRecord> {
    (1..=n)
        .map(|i| TestRecord {
            id: format!("r{i}"),
        })
        .collect()
}

pub fn server_error(message: Option<&str>) -> ApiError {
    ApiError::Server {
        endpoint: TestRecord::LIST_PATH.to_string(),
        status: 500,
        raw_message: message.map(str::to_string),
    }
}

// ===== Log capture =====

static CAPTURED: Mutex<Vec<(log::Level, String)>> = Mutex::new(Vec::new());

struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        CAPTURED
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

/// Route `log` records of this test binary into memory. Idempotent.
pub fn capture_logs() {
    static LOGGER: CaptureLogger = CaptureLogger;
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Trace);
    }
}

/// Captured records whose text contains `needle`.
pub fn logged(needle: &str) -> Vec<(log::Level, String)> {
    CAPTURED
        .lock()
        .unwrap()
        .iter()
        .filter(|(_, line)| line.contains(needle))
        .cloned()
        .collect()
}

// ===== MockListSource =====

type PageResult = vetdesk_api::Result<ListResult<TestRecord>>;

/// Serves pages out of a `Vec`, filtering by substring on `id`.
///
/// The next fetch can be made to fail (`fail_next`) or to hang until the
/// test releases it (`gate_next`).
pub struct MockListSource {
    records: Mutex<Vec<TestRecord>>,
    queries: Mutex<Vec<ListQuery>>,
    failures: Mutex<VecDeque<ApiError>>,
    gates: Mutex<VecDeque<oneshot::Receiver<PageResult>>>,
    fetches: watch::Sender<usize>,
}

/// Releases a gated fetch.
pub struct Gate(oneshot::Sender<PageResult>);

impl Gate {
    pub fn release(self, page: ListResult<TestRecord>) {
        let _ = self.0.send(Ok(page));
    }
}

impl MockListSource {
    pub fn with_records(records: Vec<TestRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            queries: Mutex::new(Vec::new()),
            failures: Mutex::new(VecDeque::new()),
            gates: Mutex::new(VecDeque::new()),
            fetches: watch::channel(0).0,
        }
    }

    pub fn fail_next(&self, error: ApiError) {
        self.failures.lock().unwrap().push_back(error);
    }

    pub fn gate_next(&self) -> Gate {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push_back(rx);
        Gate(tx)
    }

    pub fn fetch_count(&self) -> usize {
        *self.fetches.borrow()
    }

    pub fn last_query(&self) -> Option<ListQuery> {
        self.queries.lock().unwrap().last().cloned()
    }

    /// Wait until `n` fetches have started.
    pub async fn wait_for_fetches(&self, n: usize) {
        let mut rx = self.fetches.subscribe();
        rx.wait_for(|count| *count >= n).await.unwrap();
    }

    fn page(&self, query: &ListQuery) -> ListResult<TestRecord> {
        let records = self.records.lock().unwrap();
        let matching: Vec<_> = records
            .iter()
            .filter(|r| query.search.as_deref().is_none_or(|s| r.id.contains(s)))
            .cloned()
            .collect();
        let size = query.page_size as usize;
        let start = (query.page as usize - 1) * size;
        let items = matching.iter().skip(start).take(size).cloned().collect();
        ListResult::new(items, matching.len() as u64)
    }
}

#[async_trait]
impl ListSource<TestRecord> for MockListSource {
    async fn fetch_page(&self, query: &ListQuery) -> PageResult {
        self.queries.lock().unwrap().push(query.clone());
        let failure = self.failures.lock().unwrap().pop_front();
        let gate = self.gates.lock().unwrap().pop_front();
        self.fetches.send_modify(|c| *c += 1);

        if let Some(gate) = gate {
            return gate.await.unwrap();
        }
        match failure {
            Some(e) => Err(e),
            None => Ok(self.page(query)),
        }
    }

    async fn delete(&self, id: &str) -> vetdesk_api::Result<()> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(ApiError::NotFound {
                endpoint: format!("{}/{id}", TestRecord::ITEM_PATH),
                raw_message: None,
            });
        }
        Ok(())
    }
}

// ===== RecordingNotifier =====

#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.all().into_iter().map(|n| n.message).collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.all()
            .into_iter()
            .filter(|n| n.level == NotificationLevel::Error)
            .map(|n| n.message)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

// ===== MockAddressLookup =====

pub enum LookupAnswer {
    Found(CepAddress),
    NotFound,
    Fails,
}

pub struct MockAddressLookup {
    answer: Mutex<LookupAnswer>,
    calls: Mutex<Vec<String>>,
}

impl MockAddressLookup {
    pub fn new(answer: LookupAnswer) -> Self {
        Self {
            answer: Mutex::new(answer),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn found() -> Self {
        Self::new(LookupAnswer::Found(paulista()))
    }

    pub fn set_answer(&self, answer: LookupAnswer) {
        *self.answer.lock().unwrap() = answer;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

pub fn paulista() -> CepAddress {
    CepAddress {
        cep: "01310100".to_string(),
        street: "Avenida Paulista".to_string(),
        neighborhood: "Bela Vista".to_string(),
        city: "São Paulo".to_string(),
        uf: "SP".to_string(),
    }
}

#[async_trait]
impl AddressLookup for MockAddressLookup {
    async fn lookup_cep(&self, cep: &str) -> vetdesk_api::Result<Option<CepAddress>> {
        self.calls.lock().unwrap().push(cep.to_string());
        match &*self.answer.lock().unwrap() {
            LookupAnswer::Found(addr) => Ok(Some(addr.clone())),
            LookupAnswer::NotFound => Ok(None),
            LookupAnswer::Fails => Err(ApiError::Network {
                endpoint: "viacep".to_string(),
                detail: "connection refused".to_string(),
            }),
        }
    }
}

// ===== MockRegistrar =====

#[derive(Default)]
pub struct MockRegistrar {
    received: Mutex<Vec<TutorWithPetRequest>>,
    reject_with: Mutex<Option<String>>,
}

impl MockRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject_with(&self, message: &str) {
        *self.reject_with.lock().unwrap() = Some(message.to_string());
    }

    pub fn received(&self) -> Vec<TutorWithPetRequest> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl TutorRegistrar for MockRegistrar {
    async fn register_tutor_with_pet(&self, request: &TutorWithPetRequest) -> vetdesk_api::Result<()> {
        if let Some(message) = self.reject_with.lock().unwrap().clone() {
            return Err(ApiError::Rejected {
                endpoint: vetdesk_api::TUTOR_WITH_PET_PATH.to_string(),
                status: 409,
                raw_message: Some(message),
            });
        }
        self.received.lock().unwrap().push(request.clone());
        Ok(())
    }
}
