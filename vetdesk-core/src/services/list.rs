//! Paginated, searchable resource list
//!
//! Owns the observable state of one admin list view and the rules for
//! moving through it: page changes, search submission, refresh and
//! delete-then-refresh. Fetch failures are reported through the
//! [`Notifier`] and never escape.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use vetdesk_api::{ApiError, ListQuery, ListSource, Resource, normalize_search, total_pages};

use crate::error::{CoreError, CoreResult};
use crate::notify::{Notification, Notifier};
use crate::pagination::PageControls;

/// Text shown when a page comes back empty.
pub const EMPTY_LIST_MESSAGE: &str = "Nenhum registro encontrado";

/// Observable state of a list view.
#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot<R> {
    /// Rows of the page on screen, in server order.
    pub items: Vec<R>,
    pub total_count: u64,
    /// `true` while the latest requested load is in flight.
    pub is_loading: bool,
    pub current_page: u32,
    pub total_pages: u32,
    pub page_size: u32,
    /// Text in the search box, not yet submitted.
    pub search_term: String,
    /// Search of the last requested load.
    pub applied_search: Option<String>,
}

impl<R> ListSnapshot<R> {
    fn initial(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            is_loading: false,
            current_page: 1,
            total_pages: 1,
            page_size,
            search_term: String::new(),
            applied_search: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn controls(&self) -> PageControls {
        PageControls::new(self.current_page, self.total_pages)
    }

    /// Query that reproduces what is on screen.
    pub fn current_query(&self) -> ListQuery {
        ListQuery::new(
            self.current_page,
            self.page_size,
            self.applied_search.as_deref(),
        )
    }
}

/// How a `load` ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The page replaced the visible rows.
    Applied,
    /// The fetch failed; previous rows stay and one notification was sent.
    Failed,
    /// A newer load was issued meanwhile; this result was dropped.
    Superseded,
}

pub struct PaginatedResourceList<R: Resource> {
    source: Arc<dyn ListSource<R>>,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<ListSnapshot<R>>,
    /// Tag of the most recently issued load.
    latest: AtomicU64,
}

impl<R: Resource> PaginatedResourceList<R> {
    pub fn new(
        source: Arc<dyn ListSource<R>>,
        notifier: Arc<dyn Notifier>,
        page_size: u32,
    ) -> Self {
        let (state, _) = watch::channel(ListSnapshot::initial(page_size.max(1)));
        Self {
            source,
            notifier,
            state,
            latest: AtomicU64::new(0),
        }
    }

    /// Receive every state change.
    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot<R>> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> ListSnapshot<R> {
        self.state.borrow().clone()
    }

    pub fn controls(&self) -> PageControls {
        self.state.borrow().controls()
    }

    fn page_size(&self) -> u32 {
        self.state.borrow().page_size
    }

    /// Fetch `query` and publish it, unless a newer load overtakes it.
    ///
    /// Previous rows stay visible while the request is in flight.
    pub async fn load(&self, query: ListQuery) -> LoadOutcome {
        let tag = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|s| {
            s.is_loading = true;
            s.current_page = query.page;
            s.applied_search.clone_from(&query.search);
        });

        let result = self.source.fetch_page(&query).await;

        if self.latest.load(Ordering::SeqCst) != tag {
            log::debug!(
                "[{}] Dropping result of page {} (load #{tag} superseded)",
                R::LIST_PATH,
                query.page
            );
            return LoadOutcome::Superseded;
        }

        match result {
            Ok(page) => {
                let pages = total_pages(page.total_count, query.page_size);
                self.state.send_modify(|s| {
                    s.items = page.items;
                    s.total_count = page.total_count;
                    s.total_pages = pages;
                    s.is_loading = false;
                });
                LoadOutcome::Applied
            }
            Err(e) => {
                log::debug!("[{}] Load failed: {e}", R::LIST_PATH);
                self.notifier
                    .notify(Notification::error(with_server_message(
                        &format!("Erro ao carregar {}", R::LABEL),
                        &e,
                    )));
                self.state.send_modify(|s| s.is_loading = false);
                LoadOutcome::Failed
            }
        }
    }

    /// First load of the view: page 1, no search.
    pub async fn mount(&self) -> LoadOutcome {
        self.state.send_modify(|s| s.search_term.clear());
        self.load(ListQuery::first_page(self.page_size())).await
    }

    /// Go to `page`, keeping the applied search.
    ///
    /// Out-of-range pages are ignored: `None`, no fetch, no state change.
    pub async fn change_page(&self, page: u32) -> Option<LoadOutcome> {
        let query = {
            let s = self.state.borrow();
            if page < 1 || page > s.total_pages {
                log::debug!(
                    "[{}] Ignoring page {page} (1..={})",
                    R::LIST_PATH,
                    s.total_pages
                );
                return None;
            }
            s.current_query().with_page(page)
        };
        Some(self.load(query).await)
    }

    /// Update the pending search text. Nothing is fetched.
    pub fn set_search_term(&self, term: impl Into<String>) {
        let term = term.into();
        self.state.send_if_modified(|s| {
            if s.search_term == term {
                false
            } else {
                s.search_term = term;
                true
            }
        });
    }

    /// Apply the pending search text from page 1.
    pub async fn submit_search(&self) -> LoadOutcome {
        let query = {
            let s = self.state.borrow();
            ListQuery {
                page: 1,
                page_size: s.page_size,
                search: normalize_search(Some(&s.search_term)),
            }
        };
        self.load(query).await
    }

    /// Reload what is on screen.
    pub async fn refresh(&self) -> LoadOutcome {
        let query = self.state.borrow().current_query();
        self.load(query).await
    }

    /// Delete one row, then reload the current page (not page 1).
    ///
    /// The caller is responsible for asking for confirmation first. A failed
    /// delete is notified once and nothing is reloaded.
    pub async fn delete_and_refresh(&self, id: &str) -> CoreResult<LoadOutcome> {
        if let Err(e) = self.source.delete(id).await {
            log::debug!("[{}] Delete of {id} failed: {e}", R::LIST_PATH);
            self.notifier.notify(Notification::error(with_server_message(
                &format!("Erro ao excluir {}", R::NOUN),
                &e,
            )));
            return Err(CoreError::Api(e));
        }

        log::info!("[{}] Deleted {id}", R::LIST_PATH);
        self.notifier
            .notify(Notification::success(R::DELETED_MESSAGE));
        Ok(self.refresh().await)
    }
}

/// `"<base>: <server message>"`, or just `base` when the server said nothing.
fn with_server_message(base: &str, e: &ApiError) -> String {
    match e.server_message().map(str::trim).filter(|m| !m.is_empty()) {
        Some(msg) => format!("{base}: {msg}"),
        None => base.to_string(),
    }
}
