//! In-memory collection whose responses can be held back, failed or hung.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::oneshot;

use clinic_admin::controller::{ControllerOptions, ListController};
use clinic_admin::domain::mutation::MutationIntent;
use clinic_admin::domain::page::PageRequest;
use clinic_admin::domain::resource::{EnvelopeMode, JsonRow, ResourceKind, ResourceSpec};
use clinic_admin::domain::types::PageLimit;
use clinic_admin::dto::api::{ListEnvelope, MutationEnvelope};
use clinic_admin::remote::errors::{RemoteError, RemoteResult};
use clinic_admin::remote::{CollectionReader, CollectionWriter};

pub type Controller = ListController<JsonRow, ScriptedCollection>;

/// Rows are `{"id": n}` for `n` in `1..=total`.
#[derive(Default)]
pub struct ScriptedCollection {
    total: AtomicUsize,
    failing: AtomicBool,
    hanging: AtomicBool,
    reject_mutations: AtomicBool,
    gates: Mutex<HashMap<usize, oneshot::Receiver<()>>>,
    requests: Mutex<Vec<PageRequest>>,
    mutations: Mutex<Vec<MutationIntent>>,
}

impl ScriptedCollection {
    pub fn new(total: usize) -> Self {
        Self {
            total: AtomicUsize::new(total),
            ..Self::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// List calls never answer.
    pub fn set_hanging(&self, hanging: bool) {
        self.hanging.store(hanging, Ordering::SeqCst);
    }

    pub fn reject_mutations(&self) {
        self.reject_mutations.store(true, Ordering::SeqCst);
    }

    /// The next list call for `page` waits until the returned sender fires.
    pub fn gate(&self, page: usize) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(page, rx);
        tx
    }

    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn mutations(&self) -> Vec<MutationIntent> {
        self.mutations.lock().unwrap().clone()
    }

    /// Yields until `n` list calls have been received.
    pub async fn wait_for_requests(&self, n: usize) {
        while self.request_count() < n {
            tokio::task::yield_now().await;
        }
    }

    fn rows(&self, request: &PageRequest, total: usize) -> Vec<Value> {
        let start = request.offset() + 1;
        let end = (request.offset() + request.limit.get()).min(total);
        (start..=end).map(|id| json!({ "id": id })).collect()
    }
}

#[async_trait]
impl CollectionReader for ScriptedCollection {
    async fn list(
        &self,
        resource: &ResourceSpec,
        request: &PageRequest,
    ) -> RemoteResult<ListEnvelope> {
        self.requests.lock().unwrap().push(request.clone());

        let gate = self.gates.lock().unwrap().remove(&request.page.get());
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if self.hanging.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(RemoteError::Network("connection refused".to_string()));
        }

        let total = self.total.load(Ordering::SeqCst);
        Ok(match resource.envelope {
            EnvelopeMode::Paged => ListEnvelope::paged(self.rows(request, total), total),
            EnvelopeMode::Bare => {
                ListEnvelope::bare((1..=total).map(|id| json!({ "id": id })).collect())
            }
        })
    }
}

#[async_trait]
impl CollectionWriter for ScriptedCollection {
    async fn mutate(
        &self,
        _resource: &ResourceSpec,
        intent: &MutationIntent,
    ) -> RemoteResult<MutationEnvelope> {
        self.mutations.lock().unwrap().push(intent.clone());
        if self.reject_mutations.load(Ordering::SeqCst) {
            return Ok(MutationEnvelope::rejected("Record is in use"));
        }
        match intent {
            MutationIntent::Create(_) => {
                self.total.fetch_add(1, Ordering::SeqCst);
            }
            MutationIntent::Delete(_) => {
                self.total.fetch_sub(1, Ordering::SeqCst);
            }
            MutationIntent::Update(..) | MutationIntent::ToggleStatus(_) => {}
        }
        Ok(MutationEnvelope::ok())
    }
}

pub fn options(limit: usize) -> ControllerOptions {
    ControllerOptions {
        default_limit: PageLimit::new(limit).unwrap(),
        request_timeout: Duration::from_secs(5),
        ..ControllerOptions::default()
    }
}

pub fn controller(
    kind: ResourceKind,
    collection: std::sync::Arc<ScriptedCollection>,
    limit: usize,
) -> Controller {
    ListController::new(kind.spec(), collection, options(limit))
}

pub fn ids(controller: &Controller) -> Vec<i64> {
    controller
        .state()
        .rows
        .iter()
        .filter_map(|row| row.get("id").and_then(Value::as_i64))
        .collect()
}
