//! Debounced search submission
//!
//! Each keystroke re-arms a timer; only when the user stops typing for the
//! configured delay is the latest term submitted, exactly once.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::task::JoinHandle;
use vetdesk_api::Resource;

use super::list::PaginatedResourceList;

/// Quiet period before a search is submitted.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

type SubmitFn = Arc<dyn Fn(String) -> BoxFuture<'static, ()> + Send + Sync>;

/// Armed timer: its generation and the task waiting on it.
type Pending = Option<(u64, JoinHandle<()>)>;

/// Cancellable single-shot timer around a submit action.
///
/// Must be used inside a tokio runtime. Dropping it cancels a pending timer.
pub struct SearchDebouncer {
    delay: Duration,
    submit: SubmitFn,
    pending: Arc<Mutex<Pending>>,
    generation: AtomicU64,
}

fn lock(slot: &Mutex<Pending>) -> MutexGuard<'_, Pending> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SearchDebouncer {
    pub fn new<F>(delay: Duration, submit: F) -> Self
    where
        F: Fn(String) -> BoxFuture<'static, ()> + Send + Sync + 'static,
    {
        Self {
            delay,
            submit: Arc::new(submit),
            pending: Arc::new(Mutex::new(None)),
            generation: AtomicU64::new(0),
        }
    }

    /// Cancel any armed timer and arm a new one for `term`.
    pub fn input(&self, term: impl Into<String>) {
        let term = term.into();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        // Held across the spawn so the new task cannot fire before it is stored.
        let mut pending = lock(&self.pending);
        if let Some((_, previous)) = pending.take() {
            previous.abort();
        }

        let slot = Arc::clone(&self.pending);
        let submit = Arc::clone(&self.submit);
        let delay = self.delay;
        let deadline = tokio::time::Instant::now() + delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            {
                let mut pending = lock(&slot);
                match pending.as_ref() {
                    Some((armed, _)) if *armed == generation => {
                        pending.take();
                    }
                    _ => return,
                }
            }
            log::debug!("[search] Submitting \"{term}\" after {}ms", delay.as_millis());
            submit(term).await;
        });
        *pending = Some((generation, handle));
    }

    /// Disarm without submitting.
    pub fn cancel(&self) {
        if let Some((_, handle)) = lock(&self.pending).take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        lock(&self.pending).is_some()
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// A list whose search box submits on its own after a quiet period.
pub struct DebouncedSearch<R: Resource> {
    list: Arc<PaginatedResourceList<R>>,
    debouncer: SearchDebouncer,
}

impl<R: Resource> DebouncedSearch<R> {
    pub fn new(list: Arc<PaginatedResourceList<R>>, delay: Duration) -> Self {
        let target = Arc::clone(&list);
        let debouncer = SearchDebouncer::new(delay, move |term| {
            let list = Arc::clone(&target);
            async move {
                list.set_search_term(term);
                list.submit_search().await;
            }
            .boxed()
        });
        Self { list, debouncer }
    }

    pub fn list(&self) -> &Arc<PaginatedResourceList<R>> {
        &self.list
    }

    /// A keystroke: the pending text changes now, the fetch comes later.
    pub fn input(&self, term: impl Into<String>) {
        let term = term.into();
        self.list.set_search_term(term.clone());
        self.debouncer.input(term);
    }

    /// Explicit submit (Enter): skip the wait.
    pub async fn submit_now(&self) {
        self.debouncer.cancel();
        self.list.submit_search().await;
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockListSource, RecordingNotifier, TestRecord, records};

    fn recording_debouncer(delay: Duration) -> (SearchDebouncer, Arc<Mutex<Vec<String>>>) {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&fired);
        let debouncer = SearchDebouncer::new(delay, move |term| {
            let sink = Arc::clone(&sink);
            async move {
                sink.lock().unwrap().push(term);
            }
            .boxed()
        });
        (debouncer, fired)
    }

    /// Let spawned tasks observe the advanced clock.
    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_with_latest_term() {
        let (debouncer, fired) = recording_debouncer(DEFAULT_SEARCH_DEBOUNCE);

        debouncer.input("r");
        tokio::time::advance(Duration::from_millis(200)).await;
        debouncer.input("re");
        tokio::time::advance(Duration::from_millis(200)).await;
        debouncer.input("rex");
        settle().await;
        assert!(fired.lock().unwrap().is_empty());
        assert!(debouncer.is_pending());

        tokio::time::advance(Duration::from_millis(500)).await;
        settle().await;

        assert_eq!(*fired.lock().unwrap(), vec!["rex".to_string()]);
        assert!(!debouncer.is_pending());

        tokio::time::advance(Duration::from_secs(5)).await;
        settle().await;
        assert_eq!(fired.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn does_not_fire_before_delay() {
        let (debouncer, fired) = recording_debouncer(DEFAULT_SEARCH_DEBOUNCE);

        debouncer.input("mimi");
        tokio::time::advance(Duration::from_millis(499)).await;
        settle().await;
        assert!(fired.lock().unwrap().is_empty());

        tokio::time::advance(Duration::from_millis(1)).await;
        settle().await;
        assert_eq!(fired.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_disarms() {
        let (debouncer, fired) = recording_debouncer(DEFAULT_SEARCH_DEBOUNCE);

        debouncer.input("rex");
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;
        assert!(fired.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_disarms() {
        let (debouncer, fired) = recording_debouncer(DEFAULT_SEARCH_DEBOUNCE);

        debouncer.input("rex");
        drop(debouncer);

        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;
        assert!(fired.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn debounced_search_submits_to_list_from_page_one() {
        let source = Arc::new(MockListSource::with_records(records(23)));
        let notifier = Arc::new(RecordingNotifier::new());
        let list: Arc<PaginatedResourceList<TestRecord>> =
            Arc::new(PaginatedResourceList::new(source.clone(), notifier, 10));
        list.mount().await;
        list.change_page(2).await;
        let search = DebouncedSearch::new(Arc::clone(&list), DEFAULT_SEARCH_DEBOUNCE);

        search.input("r2");
        assert_eq!(list.snapshot().search_term, "r2");
        let fetches = source.fetch_count();

        tokio::time::advance(Duration::from_millis(500)).await;
        source.wait_for_fetches(fetches + 1).await;
        settle().await;

        let s = list.snapshot();
        assert_eq!(s.current_page, 1);
        assert_eq!(s.applied_search.as_deref(), Some("r2"));
        // r2, r20..r23
        assert_eq!(s.total_count, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn explicit_submit_cancels_pending_timer() {
        let source = Arc::new(MockListSource::with_records(records(23)));
        let notifier = Arc::new(RecordingNotifier::new());
        let list: Arc<PaginatedResourceList<TestRecord>> =
            Arc::new(PaginatedResourceList::new(source.clone(), notifier, 10));
        let search = DebouncedSearch::new(Arc::clone(&list), DEFAULT_SEARCH_DEBOUNCE);

        search.input("r1");
        search.submit_now().await;
        let fetches = source.fetch_count();
        assert!(!search.is_pending());

        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;
        assert_eq!(source.fetch_count(), fetches);
    }
}
