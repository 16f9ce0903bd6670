//! The feed controller: user actions in, render calls out.
//!
//! [`FeedController`] owns the session's [`QueryState`] and drives one
//! fetch-and-render cycle per user action. Presentation goes through the
//! [`FeedView`] trait; the controller never touches a terminal (or any other
//! surface) directly, so the whole load path is testable with a recording
//! double.
//!
//! # Failure policy
//!
//! Nothing propagates past [`FeedController::load`]. Transport errors and
//! non-success statuses are logged, surfaced as one toast plus a degraded
//! notice on reset loads, and swallowed. An empty result list is not an
//! error; it gets its own notice and hides the load-more control.

use std::fmt;
use tracing::{error, info, instrument};

use crate::api::ArticleProvider;
use crate::models::ArticleRecord;
use crate::query::QueryState;

/// Placeholder cards shown while a reset load is in flight.
pub const SKELETON_COUNT: usize = 6;

/// Notice shown when a reset load returns nothing.
pub const NO_RESULTS_NOTICE: &str = "No articles found.";

/// Notice shown when a reset load fails.
pub const ERROR_NOTICE: &str = "Error loading news. Please try again.";

/// Toast shown on any failed load.
pub const FETCH_FAILED_TOAST: &str = "Failed to load news. Check your connection and try again.";

/// Rendering surface the controller draws on.
///
/// Implementations must not re-enter the controller; every method is a
/// one-way presentation command.
pub trait FeedView {
    /// Remove all rendered cards and notices.
    fn clear(&mut self);
    /// Show `count` placeholder cards while a load is in flight.
    fn show_skeletons(&mut self, count: usize);
    /// Append one rendered card after any existing content.
    fn append_card(&mut self, record: &ArticleRecord);
    /// Show a textual notice in place of results.
    fn show_notice(&mut self, message: &str);
    /// Show or hide the load-more control.
    fn set_load_more_visible(&mut self, visible: bool);
    /// Display a transient notification.
    fn toast(&mut self, message: &str);
    /// Mark the active nav category, or clear the marker with `None`.
    /// At most one category is marked at a time.
    fn set_active_nav(&mut self, category: Option<&str>);
}

/// Drives fetch-and-render cycles against a provider and a view.
pub struct FeedController<P, V> {
    state: QueryState,
    provider: P,
    view: V,
}

impl<P, V> fmt::Debug for FeedController<P, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedController")
            .field("state", &self.state)
            .finish()
    }
}

impl<P, V> FeedController<P, V>
where
    P: ArticleProvider,
    V: FeedView,
{
    /// Start a session on the sectionless front page at page 1.
    pub fn new(provider: P, view: V, page_size: u32) -> Self {
        Self {
            state: QueryState::new(page_size),
            provider,
            view,
        }
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Nav selection: switch to the category, mark it active, reset load.
    pub async fn select_category(&mut self, id: &str) {
        info!(category = id, "Category selected");
        self.state.select_category(id);
        self.view.set_active_nav(Some(id));
        self.load(true).await;
    }

    /// Search submission. Blank text (after trimming) is ignored entirely;
    /// otherwise the query is stored, the nav marker cleared, and a reset
    /// load runs.
    pub async fn submit_search(&mut self, text: &str) {
        if !self.state.submit_search(text) {
            return;
        }
        info!(query = %self.state.query, "Search submitted");
        self.view.set_active_nav(None);
        self.load(true).await;
    }

    /// Load-more: advance one page and append to existing results.
    pub async fn load_more(&mut self) {
        self.state.advance_page();
        self.load(false).await;
    }

    /// Fetch one page and render it.
    ///
    /// `reset` replaces the current results (nav click, new search, initial
    /// load); a non-reset load appends (load-more). The load-more control is
    /// revealed only when the provider returned a full page, the heuristic
    /// for "there may be another page".
    #[instrument(level = "info", skip(self), fields(page = self.state.page, reset))]
    pub async fn load(&mut self, reset: bool) {
        if reset {
            self.view.clear();
            self.view.show_skeletons(SKELETON_COUNT);
        }

        let results = match self.provider.fetch_page(&self.state).await {
            Ok(results) => results,
            Err(e) => {
                error!(error = %e, "Failed to load articles");
                if reset {
                    self.view.clear();
                    self.view.show_notice(ERROR_NOTICE);
                }
                self.view.toast(FETCH_FAILED_TOAST);
                self.view.set_load_more_visible(false);
                return;
            }
        };

        if results.is_empty() {
            info!("No articles returned");
            if reset {
                self.view.clear();
                self.view.show_notice(NO_RESULTS_NOTICE);
            }
            self.view.set_load_more_visible(false);
            return;
        }

        if reset {
            self.view.clear();
        }
        // Provider-supplied order, no re-sorting.
        for result in &results {
            self.view.append_card(&ArticleRecord::from_result(result));
        }

        let full_page = results.len() as u32 == self.state.page_size;
        self.view.set_load_more_visible(full_page);
        info!(count = results.len(), full_page, "Rendered articles");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SearchResult;
    use crate::query::Mode;
    use std::collections::VecDeque;
    use std::error::Error;
    use std::sync::Mutex;

    #[derive(Debug, PartialEq)]
    enum ViewEvent {
        Clear,
        Skeletons(usize),
        Card(String),
        Notice(String),
        LoadMore(bool),
        Toast(String),
        ActiveNav(Option<String>),
    }

    #[derive(Default)]
    struct RecordingView {
        events: Vec<ViewEvent>,
    }

    impl FeedView for RecordingView {
        fn clear(&mut self) {
            self.events.push(ViewEvent::Clear);
        }
        fn show_skeletons(&mut self, count: usize) {
            self.events.push(ViewEvent::Skeletons(count));
        }
        fn append_card(&mut self, record: &ArticleRecord) {
            self.events.push(ViewEvent::Card(record.title.clone()));
        }
        fn show_notice(&mut self, message: &str) {
            self.events.push(ViewEvent::Notice(message.to_string()));
        }
        fn set_load_more_visible(&mut self, visible: bool) {
            self.events.push(ViewEvent::LoadMore(visible));
        }
        fn toast(&mut self, message: &str) {
            self.events.push(ViewEvent::Toast(message.to_string()));
        }
        fn set_active_nav(&mut self, category: Option<&str>) {
            self.events
                .push(ViewEvent::ActiveNav(category.map(str::to_string)));
        }
    }

    /// Serves queued pages in order; an exhausted queue serves empty pages.
    struct PagedProvider {
        pages: Mutex<VecDeque<Vec<SearchResult>>>,
    }

    impl PagedProvider {
        fn new(pages: Vec<Vec<SearchResult>>) -> Self {
            Self {
                pages: Mutex::new(pages.into()),
            }
        }
    }

    impl ArticleProvider for PagedProvider {
        async fn fetch_page(
            &self,
            _state: &QueryState,
        ) -> Result<Vec<SearchResult>, Box<dyn Error>> {
            Ok(self.pages.lock().unwrap().pop_front().unwrap_or_default())
        }
    }

    struct FailingProvider;

    impl ArticleProvider for FailingProvider {
        async fn fetch_page(
            &self,
            _state: &QueryState,
        ) -> Result<Vec<SearchResult>, Box<dyn Error>> {
            Err("connection refused".into())
        }
    }

    fn titled(title: &str) -> SearchResult {
        SearchResult {
            web_title: Some(title.to_string()),
            ..SearchResult::default()
        }
    }

    fn page_of(count: usize) -> Vec<SearchResult> {
        (0..count).map(|i| titled(&format!("story {i}"))).collect()
    }

    const TEST_PAGE_SIZE: u32 = 3;

    #[tokio::test]
    async fn test_reset_load_shows_skeletons_then_cards() {
        let provider = PagedProvider::new(vec![page_of(2)]);
        let mut feed = FeedController::new(provider, RecordingView::default(), TEST_PAGE_SIZE);
        feed.load(true).await;

        let events = &feed.view().events;
        assert_eq!(events[0], ViewEvent::Clear);
        assert_eq!(events[1], ViewEvent::Skeletons(SKELETON_COUNT));
        assert_eq!(events[2], ViewEvent::Clear);
        assert_eq!(events[3], ViewEvent::Card("story 0".to_string()));
        assert_eq!(events[4], ViewEvent::Card("story 1".to_string()));
    }

    #[tokio::test]
    async fn test_full_page_reveals_load_more_short_page_hides_it() {
        let provider = PagedProvider::new(vec![
            page_of(TEST_PAGE_SIZE as usize),
            page_of(TEST_PAGE_SIZE as usize - 1),
        ]);
        let mut feed = FeedController::new(provider, RecordingView::default(), TEST_PAGE_SIZE);

        feed.load(true).await;
        assert!(feed.view().events.contains(&ViewEvent::LoadMore(true)));

        feed.load_more().await;
        assert_eq!(
            feed.view().events.last(),
            Some(&ViewEvent::LoadMore(false))
        );
    }

    #[tokio::test]
    async fn test_append_load_does_not_clear_existing_cards() {
        let provider = PagedProvider::new(vec![page_of(3), page_of(3)]);
        let mut feed = FeedController::new(provider, RecordingView::default(), TEST_PAGE_SIZE);
        feed.load(true).await;
        let events_after_reset = feed.view().events.len();

        feed.load_more().await;
        let appended = &feed.view().events[events_after_reset..];
        assert!(!appended.contains(&ViewEvent::Clear));
        assert!(appended.contains(&ViewEvent::Card("story 0".to_string())));
    }

    #[tokio::test]
    async fn test_empty_reset_load_shows_no_results_notice() {
        let provider = PagedProvider::new(vec![]);
        let mut feed = FeedController::new(provider, RecordingView::default(), TEST_PAGE_SIZE);
        feed.load(true).await;

        let events = &feed.view().events;
        assert!(events.contains(&ViewEvent::Notice(NO_RESULTS_NOTICE.to_string())));
        assert_eq!(events.last(), Some(&ViewEvent::LoadMore(false)));
        assert!(!events.iter().any(|e| matches!(e, ViewEvent::Card(_))));
    }

    #[tokio::test]
    async fn test_empty_append_load_hides_load_more_without_notice() {
        let provider = PagedProvider::new(vec![page_of(TEST_PAGE_SIZE as usize)]);
        let mut feed = FeedController::new(provider, RecordingView::default(), TEST_PAGE_SIZE);
        feed.load(true).await;
        let events_after_reset = feed.view().events.len();

        feed.load_more().await;
        let appended = &feed.view().events[events_after_reset..];
        assert_eq!(appended, &[ViewEvent::LoadMore(false)]);
    }

    #[tokio::test]
    async fn test_failed_reset_load_shows_error_notice_and_toast() {
        let mut feed =
            FeedController::new(FailingProvider, RecordingView::default(), TEST_PAGE_SIZE);
        feed.load(true).await;

        let events = &feed.view().events;
        assert!(events.contains(&ViewEvent::Notice(ERROR_NOTICE.to_string())));
        assert!(events.contains(&ViewEvent::Toast(FETCH_FAILED_TOAST.to_string())));
        assert_eq!(events.last(), Some(&ViewEvent::LoadMore(false)));
    }

    #[tokio::test]
    async fn test_failed_append_load_keeps_existing_cards() {
        let mut feed =
            FeedController::new(FailingProvider, RecordingView::default(), TEST_PAGE_SIZE);
        feed.load(false).await;

        let events = &feed.view().events;
        assert!(!events.contains(&ViewEvent::Clear));
        assert!(!events
            .iter()
            .any(|e| matches!(e, ViewEvent::Notice(_))));
        assert!(events.contains(&ViewEvent::Toast(FETCH_FAILED_TOAST.to_string())));
    }

    #[tokio::test]
    async fn test_select_category_marks_nav_and_resets_page() {
        let provider = PagedProvider::new(vec![page_of(3), page_of(3)]);
        let mut feed = FeedController::new(provider, RecordingView::default(), TEST_PAGE_SIZE);
        feed.load_more().await;
        assert_eq!(feed.state().page, 2);

        feed.select_category("technology").await;
        assert_eq!(feed.state().mode, Mode::Category);
        assert_eq!(feed.state().category, "technology");
        assert_eq!(feed.state().page, 1);
        assert!(feed
            .view()
            .events
            .contains(&ViewEvent::ActiveNav(Some("technology".to_string()))));
    }

    #[tokio::test]
    async fn test_submit_search_clears_nav_marker() {
        let provider = PagedProvider::new(vec![page_of(3), page_of(3)]);
        let mut feed = FeedController::new(provider, RecordingView::default(), TEST_PAGE_SIZE);
        feed.select_category("world").await;

        feed.submit_search("  climate  ").await;
        assert_eq!(feed.state().mode, Mode::Search);
        assert_eq!(feed.state().query, "climate");
        assert_eq!(feed.state().page, 1);
        assert_eq!(
            feed.view().events.iter().rev().find_map(|e| match e {
                ViewEvent::ActiveNav(nav) => Some(nav.clone()),
                _ => None,
            }),
            Some(None)
        );
    }

    #[tokio::test]
    async fn test_blank_search_is_ignored() {
        let provider = PagedProvider::new(vec![page_of(3)]);
        let mut feed = FeedController::new(provider, RecordingView::default(), TEST_PAGE_SIZE);

        feed.submit_search("   ").await;
        assert!(feed.view().events.is_empty());
        assert_eq!(feed.state().mode, Mode::Category);
        assert_eq!(feed.state().page, 1);
    }

    #[tokio::test]
    async fn test_load_more_increments_page() {
        let provider = PagedProvider::new(vec![page_of(3), page_of(3)]);
        let mut feed = FeedController::new(provider, RecordingView::default(), TEST_PAGE_SIZE);
        feed.load(true).await;
        feed.load_more().await;
        assert_eq!(feed.state().page, 2);
    }
}
