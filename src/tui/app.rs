// TUI application state
//
// App glues the synchronous gallery core to the async world: it owns the
// loader, the sentinel and the scroll state, holds the outcome channel
// sender, and spawns fetch tasks when the sentinel says so.
//
// prepare_frame() is the one drive point. The event loop calls it every
// iteration before drawing: sync the scroll dimensions, point the sentinel
// at the current last item, observe, and start a fetch if the verdict says
// to. Scroll input, appended pages and phase changes all funnel through
// the next prepare_frame, so there is no separate wiring per trigger - and
// a viewport taller than one page fills itself, because the freshly
// appended last item is already visible at the next observation.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;

use super::scroll::ScrollState;
use super::theme::ThemeKind;
use crate::config::Config;
use crate::gallery::{FetchOutcome, PageLoader, ScrollSentinel, Verdict};
use crate::logging::LogBuffer;
use crate::source::{spawn_fetch, ListingSource};

/// Spinner animation frames shown while a page is in flight
pub const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];

/// Main application state for the TUI
pub struct App {
    /// Pagination state and the accumulated items
    pub loader: PageLoader,

    /// Watches the last item for the load-more trigger
    pub sentinel: ScrollSentinel,

    /// Viewport position over the item list
    pub scroll: ScrollState,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Whether the logs strip is visible
    pub show_logs: bool,

    /// Whether the help view is visible
    pub show_help: bool,

    /// Current color theme
    pub theme: ThemeKind,

    /// Log buffer for the logs strip
    pub log_buffer: LogBuffer,

    /// When the app started (for uptime display)
    pub start_time: Instant,

    /// Animation frame counter for the spinner
    animation_frame: usize,

    /// Where pages come from
    source: Arc<dyn ListingSource>,

    /// Sender handed to each fetch task
    outcome_tx: mpsc::Sender<FetchOutcome>,
}

impl App {
    pub fn new(
        source: Arc<dyn ListingSource>,
        outcome_tx: mpsc::Sender<FetchOutcome>,
        config: &Config,
        log_buffer: LogBuffer,
    ) -> Self {
        Self {
            loader: PageLoader::new(config.page_size),
            sentinel: ScrollSentinel::new(),
            scroll: ScrollState::new(),
            should_quit: false,
            show_logs: false,
            show_help: false,
            theme: ThemeKind::from_name(&config.theme).unwrap_or_default(),
            log_buffer,
            start_time: Instant::now(),
            animation_frame: 0,
            source,
            outcome_tx,
        }
    }

    /// Load the first page. Called once when the session starts; the
    /// sentinel can't do this because an empty gallery has no last item.
    pub fn kick_off(&mut self) {
        tracing::info!("starting gallery session against {}", self.source.name());
        self.start_fetch();
    }

    /// Per-iteration drive: sync dimensions, re-observe, maybe fetch.
    pub fn prepare_frame(&mut self, viewport_rows: usize) {
        self.scroll
            .update_dimensions(self.loader.items().len(), viewport_rows);

        // Keep the marker on the current last item; re-attach only when
        // an append (or the initial page) actually moved it.
        let last = self.loader.items().len().checked_sub(1);
        if self.sentinel.marker() != last {
            self.sentinel.attach(last);
        }

        let verdict = self
            .sentinel
            .observe(self.scroll.visible_range(), self.loader.phase());
        if verdict == Verdict::LoadNext {
            self.start_fetch();
        }
    }

    /// Apply a finished fetch. The next prepare_frame picks up whatever
    /// follows (another fetch, the end marker, the failure banner).
    pub fn on_outcome(&mut self, outcome: FetchOutcome) {
        self.loader.complete(outcome);
    }

    /// Manual retry of a failed page ('r' key). A no-op in any other phase,
    /// so holding the key down can't queue extra requests.
    pub fn request_retry(&mut self) {
        if let Some(request) = self.loader.retry() {
            tracing::info!("retrying page {}", request.page);
            spawn_fetch(self.source.clone(), request, self.outcome_tx.clone());
        }
    }

    fn start_fetch(&mut self) {
        if let Some(request) = self.loader.begin() {
            spawn_fetch(self.source.clone(), request, self.outcome_tx.clone());
        }
    }

    // Input routing

    pub fn scroll_up(&mut self) {
        self.scroll.scroll_up();
    }

    pub fn scroll_down(&mut self) {
        self.scroll.scroll_down();
    }

    pub fn page_up(&mut self) {
        self.scroll.page_up();
    }

    pub fn page_down(&mut self) {
        self.scroll.page_down();
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll.scroll_to_top();
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll.scroll_to_bottom();
    }

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Cycle to the next theme
    pub fn next_theme(&mut self) {
        self.theme = self.theme.next();
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    // Display helpers

    /// Label of the active listing source for the status bar
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Advance the spinner one frame (driven by the tick interval)
    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    /// Current spinner character
    pub fn spinner_char(&self) -> char {
        SPINNER[self.animation_frame % SPINNER.len()]
    }

    /// Get uptime as a formatted string
    pub fn uptime(&self) -> String {
        let elapsed = self.start_time.elapsed();
        let seconds = elapsed.as_secs();
        let hours = seconds / 3600;
        let minutes = (seconds % 3600) / 60;
        let secs = seconds % 60;

        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::{FetchPhase, Item};
    use anyhow::{bail, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::task::yield_now;
    use tokio::time::timeout;

    /// Scripted source: serves fixed pages and records every request.
    struct ScriptedSource {
        pages: Vec<Vec<Item>>,
        calls: Mutex<Vec<u32>>,
        fail_page: Option<u32>,
        tripped: AtomicBool,
    }

    impl ScriptedSource {
        fn new(pages: Vec<Vec<Item>>) -> Self {
            Self {
                pages,
                calls: Mutex::new(Vec::new()),
                fail_page: None,
                tripped: AtomicBool::new(false),
            }
        }

        fn failing_once_on(pages: Vec<Vec<Item>>, fail_page: u32) -> Self {
            Self {
                fail_page: Some(fail_page),
                ..Self::new(pages)
            }
        }

        fn calls(&self) -> Vec<u32> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ListingSource for ScriptedSource {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn fetch_page(&self, page: u32, _limit: u32) -> Result<Vec<Item>> {
            self.calls.lock().unwrap().push(page);
            if self.fail_page == Some(page) && !self.tripped.swap(true, Ordering::Relaxed) {
                bail!("scripted failure");
            }
            Ok(self
                .pages
                .get((page - 1) as usize)
                .cloned()
                .unwrap_or_default())
        }
    }

    fn items(prefix: &str, count: usize) -> Vec<Item> {
        (0..count)
            .map(|i| Item {
                id: format!("{prefix}{i}"),
                author: "Test Author".to_string(),
                width: 4000,
                height: 3000,
                source_url: "https://unsplash.com/photos/x".to_string(),
                download_url: "https://picsum.photos/id/0/4000/3000".to_string(),
            })
            .collect()
    }

    fn build_app(source: ScriptedSource) -> (Arc<ScriptedSource>, App, mpsc::Receiver<FetchOutcome>) {
        let source = Arc::new(source);
        let (tx, rx) = mpsc::channel(8);
        let app = App::new(source.clone(), tx, &Config::default(), LogBuffer::new());
        (source, app, rx)
    }

    /// Pump outcomes until no fetch task reports within the window.
    async fn drain(app: &mut App, rx: &mut mpsc::Receiver<FetchOutcome>, viewport: usize) {
        while let Ok(Some(outcome)) = timeout(Duration::from_millis(250), rx.recv()).await {
            app.on_outcome(outcome);
            app.prepare_frame(viewport);
        }
    }

    #[tokio::test]
    async fn test_tall_viewport_loads_until_exhaustion_in_order() {
        // Two real pages then the empty page; viewport taller than all of it
        let (source, mut app, mut rx) =
            build_app(ScriptedSource::new(vec![items("a", 30), items("b", 30)]));

        app.kick_off();
        drain(&mut app, &mut rx, 100).await;

        assert_eq!(app.loader.items().len(), 60);
        assert_eq!(app.loader.next_page(), 3);
        assert_eq!(*app.loader.phase(), FetchPhase::Exhausted);
        // Every page requested exactly once, in order
        assert_eq!(source.calls(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_short_viewport_waits_for_scroll() {
        let (source, mut app, mut rx) =
            build_app(ScriptedSource::new(vec![items("a", 30), items("b", 30)]));

        app.kick_off();
        let outcome = rx.recv().await.unwrap();
        app.on_outcome(outcome);

        // 10 visible rows: item 29 is below the fold, nothing fires
        app.prepare_frame(10);
        app.prepare_frame(10);
        assert_eq!(source.calls(), vec![1]);
        assert!(app.loader.phase().is_idle());

        // Scroll to the bottom - the marker enters the viewport
        app.scroll_to_bottom();
        app.prepare_frame(10);
        yield_now().await; // the spawned fetch task only runs once this task yields
        assert_eq!(source.calls(), vec![1, 2]);
        assert!(app.loader.phase().is_loading());
    }

    #[tokio::test]
    async fn test_repeated_observations_do_not_stack_requests() {
        let (source, mut app, mut rx) =
            build_app(ScriptedSource::new(vec![items("a", 30), items("b", 30)]));

        app.kick_off();
        let outcome = rx.recv().await.unwrap();
        app.on_outcome(outcome);

        // Fires page 2...
        app.prepare_frame(100);
        yield_now().await; // the spawned fetch task only runs once this task yields
        // ...and every further observation while it's in flight is dropped
        for _ in 0..5 {
            app.prepare_frame(100);
        }
        assert_eq!(source.calls(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_sentinel_follows_the_last_item() {
        let (_, mut app, mut rx) =
            build_app(ScriptedSource::new(vec![items("a", 30), items("b", 30)]));

        app.kick_off();
        assert_eq!(app.sentinel.marker(), None); // nothing rendered yet

        let outcome = rx.recv().await.unwrap();
        app.on_outcome(outcome);
        app.prepare_frame(10);
        assert_eq!(app.sentinel.marker(), Some(29));

        app.scroll_to_bottom();
        app.prepare_frame(10); // fires page 2
        let outcome = rx.recv().await.unwrap();
        app.on_outcome(outcome);
        app.prepare_frame(10);
        // One marker, pointing at the new last item
        assert_eq!(app.sentinel.marker(), Some(59));
    }

    #[tokio::test]
    async fn test_failed_page_needs_manual_retry() {
        let (source, mut app, mut rx) = build_app(ScriptedSource::failing_once_on(
            vec![items("a", 30), items("b", 30)],
            2,
        ));

        app.kick_off();
        let outcome = rx.recv().await.unwrap();
        app.on_outcome(outcome);

        app.prepare_frame(100); // fires page 2, which fails
        let outcome = rx.recv().await.unwrap();
        app.on_outcome(outcome);
        assert!(app.loader.phase().error().is_some());
        assert_eq!(app.loader.items().len(), 30); // first page intact

        // Scrolling around does not re-request
        for _ in 0..5 {
            app.prepare_frame(100);
        }
        assert_eq!(source.calls(), vec![1, 2]);

        // Retry requests the same page and recovers
        app.request_retry();
        let outcome = rx.recv().await.unwrap();
        app.on_outcome(outcome);
        assert_eq!(source.calls(), vec![1, 2, 2]);
        assert_eq!(app.loader.items().len(), 60);
        assert!(app.loader.phase().is_idle());
    }

    #[tokio::test]
    async fn test_retry_is_a_noop_outside_failed() {
        let (source, mut app, mut rx) =
            build_app(ScriptedSource::new(vec![items("a", 30)]));

        app.request_retry(); // idle - nothing happens
        assert_eq!(source.calls(), Vec::<u32>::new());

        app.kick_off();
        app.request_retry(); // loading - nothing happens
        drain(&mut app, &mut rx, 100).await;
        app.request_retry(); // exhausted - nothing happens
        assert_eq!(source.calls(), vec![1, 2]);
    }
}
