//! Infinite-scroll style listing over a [`RecipeSource`].

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::pagination::{Completion, FeedState, Paginator};
use crate::{FilterSet, RecipeCard, Result, SearchPage};

/// Anything that can answer recipe searches and follow pagination cursors.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// First page of results for `filters`.
    async fn search(&self, filters: &FilterSet) -> Result<SearchPage>;

    /// Page addressed by an opaque next-page URL.
    async fn follow(&self, cursor: &str) -> Result<SearchPage>;
}

#[async_trait]
impl<T: RecipeSource + ?Sized> RecipeSource for &T {
    async fn search(&self, filters: &FilterSet) -> Result<SearchPage> {
        (**self).search(filters).await
    }

    async fn follow(&self, cursor: &str) -> Result<SearchPage> {
        (**self).follow(cursor).await
    }
}

/// A listing session: the first page plus on-demand follow-up pages.
///
/// Pages are appended strictly in request order; `&mut self` on the loading
/// methods keeps at most one request in flight.
#[derive(Debug)]
pub struct RecipeFeed<S> {
    source: S,
    paginator: Paginator,
    pages_loaded: usize,
}

impl<S: RecipeSource> RecipeFeed<S> {
    /// Feed with no session started.
    pub fn new(source: S) -> Self {
        Self {
            source,
            paginator: Paginator::default(),
            pages_loaded: 0,
        }
    }

    /// Issue the first request for `filters` and seed the cursor.
    ///
    /// Starting again abandons the previous session.
    pub async fn start(&mut self, filters: &FilterSet) -> Result<Vec<RecipeCard>> {
        self.paginator.reset(None);
        self.pages_loaded = 0;

        let (cards, next) = self.source.search(filters).await?.into_parts();
        debug!(
            "first page: {} recipes, more available: {}",
            cards.len(),
            next.is_some()
        );
        self.paginator.reset(next);
        self.pages_loaded = 1;
        Ok(cards)
    }

    /// Fetch the next page.
    ///
    /// Returns `Ok(None)` without any request when there is no cursor or the
    /// feed is exhausted. On failure the cursor is kept and the error is
    /// returned; calling again retries the same page.
    pub async fn load_more(&mut self) -> Result<Option<Vec<RecipeCard>>> {
        let Some(ticket) = self.paginator.begin_load() else {
            return Ok(None);
        };

        match self.source.follow(&ticket.url).await {
            Ok(page) => {
                let (cards, next) = page.into_parts();
                match self.paginator.complete(&ticket, next) {
                    Completion::Applied(state) => {
                        self.pages_loaded += 1;
                        debug!("page {}: {} recipes, {state:?}", self.pages_loaded, cards.len());
                        Ok(Some(cards))
                    },
                    Completion::Stale => Ok(None),
                }
            },
            Err(err) => {
                warn!("failed to load next page: {err}");
                self.paginator.fail(&ticket);
                Err(err)
            },
        }
    }

    /// Current pagination state.
    pub const fn state(&self) -> FeedState {
        self.paginator.state()
    }

    /// Whether the last page has been reached.
    pub fn is_exhausted(&self) -> bool {
        self.state() == FeedState::Exhausted
    }

    /// Number of pages appended in this session.
    pub const fn pages_loaded(&self) -> usize {
        self.pages_loaded
    }

    /// Underlying source.
    pub const fn source(&self) -> &S {
        &self.source
    }
}
