//! Generic paginated list controller, one instance per management screen.
//!
//! A controller owns the displayed page of a remote collection and keeps it
//! consistent with navigation, filters and mutations. Every fetch is tagged
//! with a sequence number taken under the state lock; a response may only
//! write state if its number is still the latest issued, so a slow earlier
//! request can never overwrite a newer page. The lock is never held across
//! an `.await`.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::mutation::{MutationBody, MutationIntent};
use crate::domain::page::Filters;
use crate::domain::resource::{ResourceSpec, Row};
use crate::domain::types::{PageLimit, PageNumber, RowId};
use crate::dto::list::{FetchPhase, ListView};
use crate::remote::errors::{RemoteError, RemoteResult};
use crate::remote::normalize::normalize;
use crate::remote::{CollectionReader, CollectionWriter};

pub mod state;

pub use state::{ControllerOptions, ControllerState, DEFAULT_PAGE_SIZES, FetchOutcome};

struct Shared<T> {
    resource: ResourceSpec,
    options: ControllerOptions,
    state: Mutex<ControllerState<T>>,
}

/// Cheap-to-clone handle; clones share the same state.
pub struct ListController<T, C> {
    shared: Arc<Shared<T>>,
    collection: Arc<C>,
    _row: PhantomData<fn() -> T>,
}

impl<T, C> Clone for ListController<T, C> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            collection: Arc::clone(&self.collection),
            _row: PhantomData,
        }
    }
}

impl<T, C> ListController<T, C>
where
    T: Row,
    C: CollectionReader + CollectionWriter,
{
    /// Creates an idle controller on page 1 with the default limit and no
    /// filters. Nothing is fetched until the first navigation or `refetch`.
    pub fn new(resource: ResourceSpec, collection: Arc<C>, options: ControllerOptions) -> Self {
        let state = ControllerState::new(options.default_limit);
        Self {
            shared: Arc::new(Shared {
                resource,
                options,
                state: Mutex::new(state),
            }),
            collection,
            _row: PhantomData,
        }
    }

    pub fn resource(&self) -> &ResourceSpec {
        &self.shared.resource
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.shared.options
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState<T>> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the full state.
    pub fn state(&self) -> ControllerState<T> {
        self.lock().clone()
    }

    /// Snapshot ready for rendering.
    pub fn view(&self) -> ListView<T> {
        self.lock().view()
    }

    pub fn page(&self) -> PageNumber {
        self.lock().page
    }

    pub fn limit(&self) -> PageLimit {
        self.lock().limit
    }

    pub fn filters(&self) -> Filters {
        self.lock().filters.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Screen unmounted: in-flight fetches must no longer touch state.
    pub fn close(&self) {
        self.lock().closed = true;
        log::debug!("Closed controller for {}", self.shared.resource.name);
    }

    /// Moves to page `n`. Out-of-range pages are ignored.
    pub async fn set_page(&self, n: usize) -> FetchOutcome {
        {
            let mut state = self.lock();
            if !state.window().contains(n) {
                return FetchOutcome::Rejected;
            }
            match PageNumber::new(n) {
                Ok(page) => state.page = page,
                Err(_) => return FetchOutcome::Rejected,
            }
        }
        self.fetch().await
    }

    pub async fn next_page(&self) -> FetchOutcome {
        let page = self.page().get();
        self.set_page(page + 1).await
    }

    /// Steps back one page, or to the last page when the current one is
    /// past the end after the total shrank.
    pub async fn previous_page(&self) -> FetchOutcome {
        let target = {
            let state = self.lock();
            state
                .page
                .get()
                .saturating_sub(1)
                .min(state.window().total_pages)
        };
        self.set_page(target).await
    }

    /// Changes the page size and returns to page 1.
    pub async fn set_limit(&self, limit: usize) -> FetchOutcome {
        if !self.shared.options.allows(limit) {
            return FetchOutcome::Rejected;
        }
        let Ok(limit) = PageLimit::new(limit) else {
            return FetchOutcome::Rejected;
        };
        {
            let mut state = self.lock();
            state.limit = limit;
            state.page = PageNumber::FIRST;
        }
        self.fetch().await
    }

    /// Merges `patch` into the filters and returns to page 1.
    pub async fn set_filters(&self, patch: Filters) -> FetchOutcome {
        {
            let mut state = self.lock();
            state.filters.merge(patch);
            state.page = PageNumber::FIRST;
        }
        self.fetch().await
    }

    pub async fn clear_filters(&self) -> FetchOutcome {
        {
            let mut state = self.lock();
            state.filters = Filters::new();
            state.page = PageNumber::FIRST;
        }
        self.fetch().await
    }

    /// Re-issues the current `(page, limit, filters)`.
    pub async fn refetch(&self) -> FetchOutcome {
        self.fetch().await
    }

    pub async fn create(&self, body: MutationBody) -> RemoteResult<FetchOutcome> {
        self.mutate(MutationIntent::Create(body)).await
    }

    pub async fn update(&self, id: RowId, body: MutationBody) -> RemoteResult<FetchOutcome> {
        self.mutate(MutationIntent::Update(id, body)).await
    }

    pub async fn remove(&self, id: RowId) -> RemoteResult<FetchOutcome> {
        self.mutate(MutationIntent::Delete(id)).await
    }

    pub async fn toggle_status(&self, id: RowId) -> RemoteResult<FetchOutcome> {
        self.mutate(MutationIntent::ToggleStatus(id)).await
    }

    async fn bounded<F, R>(&self, call: F) -> RemoteResult<R>
    where
        F: Future<Output = RemoteResult<R>>,
    {
        tokio::time::timeout(self.shared.options.request_timeout, call)
            .await
            .unwrap_or(Err(RemoteError::Timeout))
    }

    async fn fetch(&self) -> FetchOutcome {
        let (sequence, request) = {
            let mut state = self.lock();
            if state.closed {
                return FetchOutcome::Abandoned;
            }
            state.issued += 1;
            state.phase = FetchPhase::Loading;
            (state.issued, state.request())
        };

        let resource = &self.shared.resource;
        let result = self
            .bounded(self.collection.list(resource, &request))
            .await
            .and_then(|envelope| normalize::<T>(envelope, resource.envelope, &request));

        let mut state = self.lock();
        if state.closed {
            log::debug!("Dropping {} fetch #{sequence}: controller closed", resource.name);
            return FetchOutcome::Abandoned;
        }
        if state.issued != sequence {
            log::debug!(
                "Dropping stale {} fetch #{sequence}, latest is #{}",
                resource.name,
                state.issued
            );
            return FetchOutcome::Stale;
        }

        match result {
            Ok(page) => {
                state.rows = page.rows;
                state.total = page.total;
                state.phase = FetchPhase::Loaded;
                state.last_error = None;
                FetchOutcome::Applied
            }
            Err(err) => {
                log::error!(
                    "Failed to load {} page {} (limit {}): {err}",
                    resource.name,
                    request.page,
                    request.limit
                );
                let info = err.info();
                state.fail_empty(info.clone());
                FetchOutcome::Failed(info)
            }
        }
    }

    async fn mutate(&self, intent: MutationIntent) -> RemoteResult<FetchOutcome> {
        let resource = &self.shared.resource;
        let result = self
            .bounded(self.collection.mutate(resource, &intent))
            .await
            .and_then(|envelope| {
                if envelope.is_success() {
                    Ok(())
                } else {
                    Err(RemoteError::Application(
                        envelope
                            .message
                            .unwrap_or_else(|| format!("{} failed", intent.action())),
                    ))
                }
            });

        if let Err(err) = result {
            log::error!(
                "Failed to {} {}{}: {err}",
                intent.action(),
                resource.name,
                intent
                    .target()
                    .map(|id| format!(" #{id}"))
                    .unwrap_or_default()
            );
            let mut state = self.lock();
            if !state.closed {
                state.last_error = Some(err.info());
            }
            return Err(err);
        }

        log::info!("Applied {} on {}", intent.action(), resource.name);

        if matches!(intent, MutationIntent::Create(_)) && self.shared.options.reset_page_on_create {
            self.lock().page = PageNumber::FIRST;
        }
        Ok(self.fetch().await)
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::resource::{JsonRow, ResourceKind};
    use crate::dto::api::{ListEnvelope, MutationEnvelope};
    use crate::remote::mock::MockCollection;
    use serde_json::json;

    fn rows(ids: std::ops::RangeInclusive<i64>) -> Vec<serde_json::Value> {
        ids.map(|id| json!({ "id": id })).collect()
    }

    fn controller(mock: MockCollection) -> ListController<JsonRow, MockCollection> {
        let options = ControllerOptions {
            default_limit: PageLimit::new(5).unwrap(),
            ..ControllerOptions::default()
        };
        ListController::new(ResourceKind::Clinics.spec(), Arc::new(mock), options)
    }

    #[tokio::test]
    async fn update_refetches_current_page_once() {
        let mut mock = MockCollection::new();
        mock.expect_list()
            .withf(|_, request| request.page.get() == 1)
            .times(1)
            .returning(|_, _| Ok(ListEnvelope::paged(rows(1..=5), 12)));
        // One call for the navigation, exactly one more after the update.
        mock.expect_list()
            .withf(|_, request| request.page.get() == 3 && request.limit.get() == 5)
            .times(2)
            .returning(|_, _| Ok(ListEnvelope::paged(rows(11..=12), 12)));
        mock.expect_mutate()
            .withf(|_, intent| {
                matches!(intent, MutationIntent::Update(id, _) if id.as_str() == "11")
            })
            .times(1)
            .returning(|_, _| Ok(MutationEnvelope::ok()));

        let controller = controller(mock);
        assert_eq!(controller.refetch().await, FetchOutcome::Applied);
        assert_eq!(controller.set_page(3).await, FetchOutcome::Applied);

        let outcome = controller
            .update(RowId::from(11), MutationBody::Json(json!({"name": "East"})))
            .await
            .unwrap();

        assert_eq!(outcome, FetchOutcome::Applied);
        assert_eq!(controller.page().get(), 3);
    }

    #[tokio::test]
    async fn rejected_mutation_keeps_rows_and_skips_refetch() {
        let mut mock = MockCollection::new();
        mock.expect_list()
            .times(1)
            .returning(|_, _| Ok(ListEnvelope::paged(rows(1..=5), 5)));
        mock.expect_mutate()
            .times(1)
            .returning(|_, _| Ok(MutationEnvelope::rejected("Clinic has upcoming appointments")));

        let controller = controller(mock);
        controller.refetch().await;

        let err = controller.remove(RowId::from(2)).await.unwrap_err();

        assert!(matches!(
            err,
            RemoteError::Application(ref m) if m == "Clinic has upcoming appointments"
        ));
        let state = controller.state();
        assert_eq!(state.rows.len(), 5);
        assert_eq!(state.phase, FetchPhase::Loaded);
        assert_eq!(
            state.last_error.map(|e| e.message),
            Some("Clinic has upcoming appointments".to_string())
        );
    }

    #[tokio::test]
    async fn create_can_reset_to_first_page() {
        let calls = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let mut mock = MockCollection::new();
        let counter = Arc::clone(&calls);
        mock.expect_list().times(3).returning(move |_, request| {
            let total = if counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst) < 2 {
                20
            } else {
                21
            };
            let first = (request.page.get() as i64 - 1) * 5 + 1;
            Ok(ListEnvelope::paged(rows(first..=first + 4), total))
        });
        mock.expect_mutate()
            .times(1)
            .returning(|_, _| Ok(MutationEnvelope::ok()));

        let options = ControllerOptions {
            default_limit: PageLimit::new(5).unwrap(),
            reset_page_on_create: true,
            ..ControllerOptions::default()
        };
        let controller: ListController<JsonRow, MockCollection> =
            ListController::new(ResourceKind::Doctors.spec(), Arc::new(mock), options);
        controller.refetch().await;
        assert_eq!(controller.set_page(2).await, FetchOutcome::Applied);

        let outcome = controller.create(MutationBody::Json(json!({}))).await.unwrap();

        assert_eq!(outcome, FetchOutcome::Applied);
        assert_eq!(controller.page(), PageNumber::FIRST);
        assert_eq!(controller.state().total, 21);
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 3);
    }
}
