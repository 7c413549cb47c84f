//! Recipe list, category filter and detail view state.
//!
//! `RecipeBrowser` owns the only copy of the UI state and mediates between
//! the remote service, the local snapshot and whatever front-end drives it.
//!
//! # Overlapping requests
//! Operations take `&self` and release the state lock while a request is in
//! flight, so two searches can be outstanding at once. Each request that can
//! replace the recipe list takes a ticket from a counter; when its response
//! arrives it is applied only if no newer ticket has been issued since.
//! Older responses are dropped as [`Outcome::Superseded`] without a notice.
//! Detail requests use a separate counter, which `close_detail` also
//! advances so a late response cannot reopen a closed detail view.

use log::{debug, error, info, warn};
use std::fmt;
use tokio::sync::Mutex;

use crate::cache::LocalCache;
use crate::error::RecipeError;
use crate::model::{Category, RecipeDetail, RecipeSummary, SearchOutcome};
use crate::providers::RecipeService;

const DEFAULT_RANDOM_COUNT: u32 = 30;
const DEFAULT_SEARCH_COUNT: u32 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// User-facing message produced instead of a state change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            NoticeLevel::Info => write!(f, "{}", self.message),
            NoticeLevel::Error => write!(f, "Error: {}", self.message),
        }
    }
}

/// What an operation did to the state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// State changed (and the list, if touched, was persisted)
    Updated,
    /// State untouched; the notice explains why
    Notified(Notice),
    /// A newer request was issued before this one finished; nothing applied
    Superseded,
}

impl Outcome {
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Outcome::Notified(notice) => Some(notice),
            _ => None,
        }
    }
}

/// Snapshot of everything a front-end needs to render
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowserState {
    pub recipes: Vec<RecipeSummary>,
    pub active_category: Option<Category>,
    pub selected_detail: Option<RecipeDetail>,
    pub detail_visible: bool,
}

#[derive(Default)]
struct Inner {
    view: BrowserState,
    list_ticket: u64,
    detail_ticket: u64,
}

pub struct RecipeBrowser {
    service: Box<dyn RecipeService>,
    cache: LocalCache,
    random_count: u32,
    search_count: u32,
    inner: Mutex<Inner>,
}

impl RecipeBrowser {
    pub fn new(service: Box<dyn RecipeService>, cache: LocalCache) -> Self {
        Self {
            service,
            cache,
            random_count: DEFAULT_RANDOM_COUNT,
            search_count: DEFAULT_SEARCH_COUNT,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn with_page_sizes(mut self, random_count: u32, search_count: u32) -> Self {
        self.random_count = random_count;
        self.search_count = search_count;
        self
    }

    pub fn cache(&self) -> &LocalCache {
        &self.cache
    }

    pub async fn state(&self) -> BrowserState {
        self.inner.lock().await.view.clone()
    }

    pub async fn recipes(&self) -> Vec<RecipeSummary> {
        self.inner.lock().await.view.recipes.clone()
    }

    /// Show the saved list right away, then replace it with a fresh random one.
    ///
    /// The random fetch always runs, even when a snapshot was restored.
    pub async fn initialize(&self) -> Outcome {
        let restored = self.cache.load().await;
        if !restored.is_empty() {
            info!("Restored {} recipes from the last session", restored.len());
            self.inner.lock().await.view.recipes = restored;
        }
        self.load_random().await
    }

    pub async fn load_random(&self) -> Outcome {
        let ticket = self.begin_list_request().await;
        debug!(
            "Requesting {} random recipes from {} (ticket {})",
            self.random_count,
            self.service.service_name(),
            ticket
        );

        match self.service.fetch_random(self.random_count).await {
            Ok(recipes) => self.apply_list(ticket, recipes).await,
            Err(e) => {
                self.list_failure(ticket, "Could not load random recipes", e)
                    .await
            }
        }
    }

    pub async fn search(&self, keyword: &str) -> Outcome {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Outcome::Notified(Notice::info("Type a keyword to search for recipes"));
        }

        let ticket = self.begin_list_request().await;
        debug!(
            "Searching {} for '{}' (ticket {})",
            self.service.service_name(),
            keyword,
            ticket
        );

        match self
            .service
            .search_by_keyword(keyword, self.search_count)
            .await
        {
            Ok(SearchOutcome::Found(recipes)) => self.apply_list(ticket, recipes).await,
            Ok(SearchOutcome::Empty) => {
                let notice =
                    Notice::info(format!("No recipes found for the keyword: {}", keyword));
                self.list_notice(ticket, notice).await
            }
            Err(e) => self.list_failure(ticket, "Could not search recipes", e).await,
        }
    }

    /// Filter by cuisine. The category is active while its request is in flight;
    /// a successful result resets it like any other list replacement.
    pub async fn select_category(&self, category: Category) -> Outcome {
        let ticket = {
            let mut inner = self.inner.lock().await;
            inner.view.active_category = Some(category);
            inner.list_ticket += 1;
            inner.list_ticket
        };
        debug!(
            "Searching {} for {} cuisine (ticket {})",
            self.service.service_name(),
            category.cuisine(),
            ticket
        );

        match self
            .service
            .search_by_cuisine(category, self.search_count)
            .await
        {
            Ok(SearchOutcome::Found(recipes)) => self.apply_list(ticket, recipes).await,
            Ok(SearchOutcome::Empty) => {
                let notice = Notice::info(format!("No typical dishes found for {}", category));
                self.list_notice(ticket, notice).await
            }
            Err(e) => {
                self.list_failure(ticket, "Could not load typical dishes", e)
                    .await
            }
        }
    }

    /// Same as [`select_category`](Self::select_category) for a button label such as "Mexicana".
    pub async fn select_category_label(&self, label: &str) -> Outcome {
        match label.parse::<Category>() {
            Ok(category) => self.select_category(category).await,
            Err(e) => {
                warn!("{}", e);
                Outcome::Notified(Notice::error(e.to_string()))
            }
        }
    }

    /// Drop the category filter and go back to a random list.
    pub async fn clear(&self) -> Outcome {
        self.inner.lock().await.view.active_category = None;
        self.load_random().await
    }

    /// Fetch the full recipe and show it. Every call fetches again.
    pub async fn open_detail(&self, id: u64) -> Outcome {
        let ticket = {
            let mut inner = self.inner.lock().await;
            inner.detail_ticket += 1;
            inner.detail_ticket
        };

        let result = self.service.fetch_detail(id).await;

        let mut inner = self.inner.lock().await;
        if inner.detail_ticket != ticket {
            debug!("Discarding superseded detail response for recipe {}", id);
            return Outcome::Superseded;
        }
        match result {
            Ok(detail) => {
                info!("Showing recipe {} ({})", detail.id, detail.title);
                inner.view.selected_detail = Some(detail);
                inner.view.detail_visible = true;
                Outcome::Updated
            }
            Err(e) => {
                error!(
                    "Failed to fetch recipe {} from {}: {}",
                    id,
                    self.service.service_name(),
                    e
                );
                Outcome::Notified(Notice::error("Could not load the recipe details"))
            }
        }
    }

    pub async fn close_detail(&self) {
        let mut inner = self.inner.lock().await;
        inner.view.detail_visible = false;
        inner.view.selected_detail = None;
        inner.detail_ticket += 1;
    }

    async fn begin_list_request(&self) -> u64 {
        let mut inner = self.inner.lock().await;
        inner.list_ticket += 1;
        inner.list_ticket
    }

    /// Replace the list and persist it while still holding the lock, so the
    /// snapshot on disk always matches the list in memory.
    async fn apply_list(&self, ticket: u64, recipes: Vec<RecipeSummary>) -> Outcome {
        let mut inner = self.inner.lock().await;
        if inner.list_ticket != ticket {
            debug!("Discarding superseded response (ticket {})", ticket);
            return Outcome::Superseded;
        }

        info!("Showing {} recipes", recipes.len());
        inner.view.recipes = recipes;
        inner.view.active_category = None;

        if let Err(e) = self.cache.save(&inner.view.recipes).await {
            warn!(
                "Failed to persist recipe list to {}: {}",
                self.cache.path().display(),
                e
            );
        }
        Outcome::Updated
    }

    async fn list_notice(&self, ticket: u64, notice: Notice) -> Outcome {
        if self.inner.lock().await.list_ticket != ticket {
            debug!("Dropping notice for superseded request (ticket {})", ticket);
            return Outcome::Superseded;
        }
        info!("{}", notice.message);
        Outcome::Notified(notice)
    }

    async fn list_failure(&self, ticket: u64, message: &str, err: RecipeError) -> Outcome {
        error!("{} ({}): {}", message, self.service.service_name(), err);
        self.list_notice(ticket, Notice::error(message)).await
    }
}
