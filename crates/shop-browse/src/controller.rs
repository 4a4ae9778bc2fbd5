//! Browse controller: turns filter changes into catalog queries.

use crate::debounce::{Debouncer, DEFAULT_DEBOUNCE};
use crate::state::{BrowseState, LoadStatus};
use shop_commerce::catalog::{CategoryIndex, Product};
use shop_commerce::search::{BrowseQuery, Pagination, ProductPage, SortOption, DEFAULT_PER_PAGE};
use shop_data::{CatalogSource, FetchError};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Browse settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowseConfig {
    /// Products per page.
    pub per_page: u32,
    /// Quiet period before search input is queried.
    pub debounce: Duration,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// Something that changed the view, reported by [`BrowseController::next_event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseEvent {
    /// The debounced search term changed and a query was issued.
    SearchApplied(String),
    /// The category list was (re)loaded with this many labels.
    CategoriesLoaded(usize),
    /// The latest query succeeded.
    ProductsLoaded { page: u32, total: u32 },
    /// The latest query failed.
    Failed(String),
}

/// Completion messages sent back by spawned fetch tasks.
#[derive(Debug)]
enum Message {
    Categories {
        generation: u64,
        result: Result<Vec<String>, FetchError>,
    },
    Products {
        generation: u64,
        result: Result<ProductPage, FetchError>,
    },
}

/// Owns the browse filters and the product listing they produce.
///
/// Every filter change is applied synchronously; the fetch it triggers runs
/// as a spawned task and reports back through [`next_event`]. Issuing a query
/// aborts the one in flight and bumps a generation counter, and any result
/// tagged with an older generation is dropped, so only the most recently
/// issued query can update the listing.
///
/// Methods that issue queries must be called from within a tokio runtime.
///
/// [`next_event`]: BrowseController::next_event
pub struct BrowseController {
    source: Arc<dyn CatalogSource>,
    per_page: u32,
    state: BrowseState,
    categories: CategoryIndex,
    debouncer: Debouncer<String>,

    status: LoadStatus,
    products: Vec<Product>,
    total: u32,
    last_query: Option<BrowseQuery>,
    awaiting_reset: bool,

    generation: u64,
    in_flight: Option<JoinHandle<()>>,
    category_generation: u64,
    category_task: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<Message>,
    rx: mpsc::UnboundedReceiver<Message>,
}

impl std::fmt::Debug for BrowseController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowseController")
            .field("state", &self.state)
            .field("status", &self.status)
            .field("total", &self.total)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl BrowseController {
    pub fn new(source: Arc<dyn CatalogSource>, config: BrowseConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source,
            per_page: config.per_page.max(1),
            state: BrowseState::default(),
            categories: CategoryIndex::default(),
            debouncer: Debouncer::new(config.debounce),
            status: LoadStatus::Idle,
            products: Vec::new(),
            total: 0,
            last_query: None,
            awaiting_reset: false,
            generation: 0,
            in_flight: None,
            category_generation: 0,
            category_task: None,
            tx,
            rx,
        }
    }

    // === Accessors ===

    pub fn state(&self) -> &BrowseState {
        &self.state
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Products of the latest successful query.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Total matching products reported by the latest successful query.
    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn categories(&self) -> &CategoryIndex {
        &self.categories
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.state.page, self.per_page, self.total)
    }

    /// "Showing X of Y products".
    pub fn summary(&self) -> String {
        format!("Showing {} of {} products", self.products.len(), self.total)
    }

    /// Check if a search is waiting out the debounce delay or a fetch is running.
    pub fn is_busy(&self) -> bool {
        self.debouncer.is_pending() || self.in_flight.is_some() || self.category_task.is_some()
    }

    // === Transitions ===

    /// Load the category list and the first page.
    pub fn load(&mut self) {
        self.load_categories();
        self.awaiting_reset = true;
        self.issue_query();
    }

    /// Reset every filter and redo the initial load.
    pub fn retry(&mut self) {
        tracing::debug!("retrying with default filters");
        self.debouncer.cancel();
        self.state.reset();
        self.load();
    }

    /// Record raw search input. The query runs once the input settles.
    pub fn set_search_input(&mut self, input: impl Into<String>) {
        let input = input.into();
        self.state.search_input = input.clone();
        self.debouncer.push(input);
    }

    /// Select a category by display label; empty selects all.
    pub fn set_category(&mut self, label: impl Into<String>) {
        let label = label.into();
        if label == self.state.category {
            return;
        }
        self.state.category = label;
        self.reset_and_query();
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        if sort == self.state.sort {
            return;
        }
        self.state.sort = sort;
        self.reset_and_query();
    }

    /// Jump to `page`, clamped to the known page range.
    ///
    /// Ignored while the query issued by a load or a filter change is still
    /// running, since the page range of the new listing is not known yet.
    pub fn set_page(&mut self, page: u32) {
        if self.awaiting_reset {
            tracing::debug!(page, "page change ignored until the listing reloads");
            return;
        }
        let last = self.pagination().total_pages.max(1);
        let page = page.clamp(1, last);
        if page == self.state.page {
            return;
        }
        self.state.page = page;
        self.issue_query();
    }

    /// Go to the next page; no-op on the last page.
    pub fn next_page(&mut self) {
        if self.pagination().has_next {
            self.set_page(self.state.page + 1);
        }
    }

    /// Go to the previous page; no-op on the first page.
    pub fn prev_page(&mut self) {
        if self.pagination().has_prev {
            self.set_page(self.state.page - 1);
        }
    }

    /// Wait for the next change to the view.
    ///
    /// Returns `None` once nothing is pending: no debounced input and no
    /// fetch in flight.
    pub async fn next_event(&mut self) -> Option<BrowseEvent> {
        loop {
            if !self.is_busy() {
                return None;
            }

            let message = tokio::select! {
                term = self.debouncer.settled() => {
                    if self.apply_search_term(term) {
                        return Some(BrowseEvent::SearchApplied(self.state.search_term.clone()));
                    }
                    continue;
                }
                message = self.rx.recv() => message,
            };

            // The controller holds a sender, so the channel never closes.
            let Some(message) = message else {
                return None;
            };
            if let Some(event) = self.handle(message) {
                return Some(event);
            }
        }
    }

    fn apply_search_term(&mut self, term: String) -> bool {
        let term = term.trim().to_string();
        if term == self.state.search_term {
            return false;
        }
        self.state.search_term = term;
        self.reset_and_query();
        true
    }

    fn reset_and_query(&mut self) {
        self.state.page = 1;
        self.awaiting_reset = true;
        self.issue_query();
    }

    fn build_query(&self) -> BrowseQuery {
        let category_slug = if self.state.category.is_empty() {
            String::new()
        } else {
            self.categories.resolve(&self.state.category)
        };

        BrowseQuery::new()
            .with_search(self.state.search_term.clone())
            .with_category(category_slug)
            .with_sort(self.state.sort)
            .with_pagination(self.state.page, self.per_page)
    }

    fn issue_query(&mut self) {
        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }

        self.generation += 1;
        let generation = self.generation;
        let query = self.build_query();
        tracing::debug!(
            generation,
            search = %query.search_term,
            category = %query.category_slug,
            sort = %query.sort,
            page = query.page,
            "issuing product query"
        );

        self.status = LoadStatus::Loading;
        self.last_query = Some(query.clone());

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let result = source.list_products(&query).await;
            let _ = tx.send(Message::Products { generation, result });
        }));
    }

    fn load_categories(&mut self) {
        if let Some(previous) = self.category_task.take() {
            previous.abort();
        }

        self.category_generation += 1;
        let generation = self.category_generation;
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        self.category_task = Some(tokio::spawn(async move {
            let result = source.list_categories().await;
            let _ = tx.send(Message::Categories { generation, result });
        }));
    }

    /// Re-issue the listing when a category picked before the index loaded
    /// was queried under a slug that the index now maps differently.
    fn requery_if_slug_changed(&mut self) {
        if self.state.category.is_empty() || !self.state.search_term.is_empty() {
            return;
        }
        let slug = self.categories.resolve(&self.state.category);
        let queried = self.last_query.as_ref().map(|q| q.category_slug.as_str());
        if queried == Some(slug.as_str()) {
            return;
        }
        tracing::debug!(label = %self.state.category, slug = %slug, "category resolved, re-querying");
        self.issue_query();
    }

    fn handle(&mut self, message: Message) -> Option<BrowseEvent> {
        match message {
            Message::Products { generation, result } => {
                if generation != self.generation {
                    tracing::debug!(generation, current = self.generation, "discarding stale result");
                    return None;
                }
                self.in_flight = None;
                self.awaiting_reset = false;

                match result {
                    Ok(page) => {
                        self.products = page.products;
                        self.total = page.total;
                        self.status = LoadStatus::Ready;
                        Some(BrowseEvent::ProductsLoaded {
                            page: self.state.page,
                            total: self.total,
                        })
                    }
                    Err(e) => {
                        let message = e.to_string();
                        tracing::debug!(error = %message, "product query failed");
                        self.products.clear();
                        self.total = 0;
                        self.status = LoadStatus::Failed(message.clone());
                        Some(BrowseEvent::Failed(message))
                    }
                }
            }
            Message::Categories { generation, result } => {
                if generation != self.category_generation {
                    tracing::debug!(generation, "discarding stale category list");
                    return None;
                }
                self.category_task = None;

                self.categories = match result {
                    Ok(slugs) => CategoryIndex::from_slugs(slugs),
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to load categories");
                        CategoryIndex::default()
                    }
                };
                self.requery_if_slug_changed();
                Some(BrowseEvent::CategoriesLoaded(self.categories.len()))
            }
        }
    }
}

impl Drop for BrowseController {
    fn drop(&mut self) {
        for task in [self.in_flight.take(), self.category_task.take()]
            .into_iter()
            .flatten()
        {
            task.abort();
        }
    }
}
