//! Paged image browser.
//!
//! [`ImageBrowser`] is a sans-IO controller: navigation methods return a
//! [`PendingFetch`] ticket describing the request to send, and the caller
//! hands the result back through [`ImageBrowser::complete`]. Each ticket
//! carries a generation number; only the most recently issued generation
//! is applied, so responses that arrive out of order are discarded.
//!
//! [`session::BrowserSession`] pairs the controller with a
//! [`source::PageSource`] for the interactive CLI.

use std::collections::HashMap;

use imagelingo_core::{Connection, ImageRecord, PageCursor, PageDirection, PageRequest};

pub mod selection;
pub mod session;
pub mod source;

pub use selection::SelectionSet;
pub use session::BrowserSession;
pub use source::{HttpPageSource, PageSource, SourceError};

/// Whether a fetch is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserState {
    Idle,
    Loading,
}

/// A request the caller must submit to the image page action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    pub generation: u64,
    pub request: PageRequest,
}

/// What [`ImageBrowser::complete`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page replaced the displayed images.
    Applied,
    /// A newer fetch was issued after this one; the result was dropped.
    Stale,
    /// The current fetch failed; the previous page is still shown.
    Failed,
}

/// Controller state for the paged image table.
#[derive(Debug, Clone)]
pub struct ImageBrowser {
    state: BrowserState,
    cursor: PageCursor,
    has_more: bool,
    has_prev: bool,
    images: Vec<ImageRecord>,
    selection: SelectionSet,
    generation: u64,
    page_size: u32,
    last_error: Option<String>,
}

impl Default for ImageBrowser {
    fn default() -> Self {
        Self::with_page_size(PageRequest::DEFAULT_PAGE_SIZE)
    }
}

impl ImageBrowser {
    /// Create a browser requesting `page_size` images per fetch.
    #[must_use]
    pub const fn with_page_size(page_size: u32) -> Self {
        Self {
            state: BrowserState::Idle,
            cursor: PageCursor {
                start: String::new(),
                end: String::new(),
            },
            has_more: true,
            has_prev: true,
            images: Vec::new(),
            selection: SelectionSet::new(),
            generation: 0,
            page_size,
            last_error: None,
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Initial fetch: first page, no cursor.
    pub fn start(&mut self) -> PendingFetch {
        self.fetch_images(None, PageDirection::Next)
    }

    /// Issue a fetch from `cursor` in `direction`.
    ///
    /// An empty cursor is sent as `null`.
    pub fn fetch_images(
        &mut self,
        cursor: Option<String>,
        direction: PageDirection,
    ) -> PendingFetch {
        self.generation += 1;
        self.state = BrowserState::Loading;

        let request = PageRequest {
            direction,
            num: self.page_size,
            cursor: cursor.filter(|c| !c.is_empty()),
        };

        tracing::debug!(
            generation = self.generation,
            direction = %direction,
            cursor = ?request.cursor,
            "Fetching image page"
        );

        PendingFetch {
            generation: self.generation,
            request,
        }
    }

    /// Fetch the page after the current one, unless there is none.
    pub fn next_page(&mut self) -> Option<PendingFetch> {
        if !self.has_more {
            tracing::info!("No more pages to load");
            return None;
        }
        let cursor = self.cursor.end.clone();
        Some(self.fetch_images(Some(cursor), PageDirection::Next))
    }

    /// Fetch the page before the current one, unless there is none.
    pub fn prev_page(&mut self) -> Option<PendingFetch> {
        if !self.has_prev {
            tracing::info!("No previous pages to load");
            return None;
        }
        let cursor = self.cursor.start.clone();
        Some(self.fetch_images(Some(cursor), PageDirection::Prev))
    }

    /// Apply the result of the fetch issued as `generation`.
    pub fn complete<E: std::fmt::Display>(
        &mut self,
        generation: u64,
        result: Result<Connection<ImageRecord>, E>,
    ) -> FetchOutcome {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "Discarding stale image page"
            );
            return FetchOutcome::Stale;
        }

        self.state = BrowserState::Idle;

        match result {
            Ok(page) => {
                self.cursor = PageCursor::from_page_info(&page.page_info);
                self.has_more = page.page_info.has_next_page;
                self.has_prev = page.page_info.has_previous_page;
                self.images = dedup_by_id(page.into_nodes());
                self.selection.clear();
                self.last_error = None;
                FetchOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(generation, error = %e, "Image page fetch failed");
                self.last_error = Some(e.to_string());
                FetchOutcome::Failed
            }
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Toggle selection of an image. Returns true if it is now selected.
    pub fn toggle_selection(&mut self, id: &str) -> bool {
        self.selection.toggle(id)
    }

    /// Bulk translate trigger.
    ///
    /// Only surfaces the selected identifiers; returns `None` when nothing
    /// is selected.
    #[must_use]
    pub fn translate_selected(&self) -> Option<Vec<String>> {
        if self.selection.is_empty() {
            return None;
        }
        let ids = self.selection.ids().to_vec();
        tracing::info!(count = ids.len(), "Translate requested for selected images");
        Some(ids)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.state, BrowserState::Loading)
    }

    #[must_use]
    pub const fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.has_prev
    }

    #[must_use]
    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    #[must_use]
    pub const fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

/// Collapse records sharing an id.
///
/// Keeps the position of the first occurrence and the value of the last.
fn dedup_by_id(nodes: Vec<ImageRecord>) -> Vec<ImageRecord> {
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(nodes.len());
    let mut out: Vec<ImageRecord> = Vec::with_capacity(nodes.len());

    for node in nodes {
        if let Some(slot) = positions.get(&node.id).and_then(|&pos| out.get_mut(pos)) {
            *slot = node;
        } else {
            positions.insert(node.id.clone(), out.len());
            out.push(node);
        }
    }

    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use imagelingo_core::{Edge, ImageSource, PageInfo};

    use super::*;

    fn image(id: &str, url: &str) -> ImageRecord {
        ImageRecord {
            id: id.to_string(),
            image: Some(ImageSource {
                url: url.to_string(),
                alt_text: None,
            }),
            typename: "MediaImage".to_string(),
            src: Some(url.to_string()),
        }
    }

    fn page(
        nodes: Vec<ImageRecord>,
        start: &str,
        end: &str,
        has_next: bool,
        has_prev: bool,
    ) -> Connection<ImageRecord> {
        Connection {
            edges: nodes.into_iter().map(Edge::new).collect(),
            page_info: PageInfo {
                has_next_page: has_next,
                has_previous_page: has_prev,
                start_cursor: Some(start.to_string()),
                end_cursor: Some(end.to_string()),
            },
        }
    }

    fn ok(conn: Connection<ImageRecord>) -> Result<Connection<ImageRecord>, String> {
        Ok(conn)
    }

    #[test]
    fn test_initial_state() {
        let browser = ImageBrowser::default();
        assert!(!browser.is_loading());
        assert!(browser.has_more());
        assert!(browser.has_prev());
        assert_eq!(browser.cursor(), &PageCursor::default());
        assert!(browser.images().is_empty());
    }

    #[test]
    fn test_start_requests_first_page() {
        let mut browser = ImageBrowser::default();
        let pending = browser.start();

        assert_eq!(pending.generation, 1);
        assert_eq!(pending.request.direction, PageDirection::Next);
        assert_eq!(pending.request.num, 5);
        assert_eq!(pending.request.cursor, None);
        assert!(browser.is_loading());
        assert_eq!(
            serde_json::to_string(&pending.request).unwrap(),
            r#"{"type":"next","num":5,"cursor":null}"#
        );
    }

    #[test]
    fn test_complete_updates_cursor_and_flags() {
        let mut browser = ImageBrowser::default();
        let pending = browser.start();

        let outcome = browser.complete(
            pending.generation,
            ok(page(vec![image("1", "u1"), image("2", "u2")], "s1", "e1", true, false)),
        );

        assert_eq!(outcome, FetchOutcome::Applied);
        assert!(!browser.is_loading());
        assert_eq!(browser.cursor().start, "s1");
        assert_eq!(browser.cursor().end, "e1");
        assert!(browser.has_more());
        assert!(!browser.has_prev());
        assert_eq!(browser.images().len(), 2);
    }

    #[test]
    fn test_next_page_uses_end_cursor() {
        let mut browser = ImageBrowser::default();
        let pending = browser.start();
        browser.complete(
            pending.generation,
            ok(page(vec![image("1", "u1")], "s1", "e1", true, true)),
        );

        let next = browser.next_page().unwrap();
        assert_eq!(next.request.direction, PageDirection::Next);
        assert_eq!(next.request.cursor.as_deref(), Some("e1"));

        let prev = browser.prev_page().unwrap();
        assert_eq!(prev.request.direction, PageDirection::Prev);
        assert_eq!(prev.request.cursor.as_deref(), Some("s1"));
    }

    #[test]
    fn test_next_page_guard_when_no_more() {
        let mut browser = ImageBrowser::default();
        let pending = browser.start();
        browser.complete(
            pending.generation,
            ok(page(vec![image("1", "u1")], "s1", "e1", false, false)),
        );

        let generation = browser.generation();
        assert!(browser.next_page().is_none());
        assert!(browser.prev_page().is_none());
        assert_eq!(browser.generation(), generation);
        assert!(!browser.is_loading());
    }

    #[test]
    fn test_dedup_first_position_last_value() {
        let mut browser = ImageBrowser::default();
        let pending = browser.start();
        browser.complete(
            pending.generation,
            ok(page(
                vec![image("a", "old"), image("b", "b"), image("a", "new")],
                "s",
                "e",
                true,
                false,
            )),
        );

        let ids: Vec<&str> = browser.images().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(browser.images()[0].url(), Some("new"));
    }

    #[test]
    fn test_pages_replace() {
        let mut browser = ImageBrowser::default();
        let first = browser.start();
        browser.complete(
            first.generation,
            ok(page(vec![image("1", "u1"), image("2", "u2")], "s1", "e1", true, false)),
        );

        let next = browser.next_page().unwrap();
        browser.complete(
            next.generation,
            ok(page(vec![image("3", "u3")], "s2", "e2", false, true)),
        );

        let ids: Vec<&str> = browser.images().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["3"]);
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut browser = ImageBrowser::default();
        let first = browser.start();
        browser.complete(
            first.generation,
            ok(page(vec![image("1", "u1")], "s1", "e1", true, true)),
        );

        let slow = browser.next_page().unwrap();
        let fast = browser.prev_page().unwrap();

        assert_eq!(
            browser.complete(
                fast.generation,
                ok(page(vec![image("0", "u0")], "s0", "e0", true, false)),
            ),
            FetchOutcome::Applied
        );
        assert_eq!(
            browser.complete(
                slow.generation,
                ok(page(vec![image("2", "u2")], "s2", "e2", true, true)),
            ),
            FetchOutcome::Stale
        );

        assert_eq!(browser.images()[0].id, "0");
        assert_eq!(browser.cursor().start, "s0");
        assert!(!browser.has_prev());
    }

    #[test]
    fn test_failure_keeps_previous_page() {
        let mut browser = ImageBrowser::default();
        let first = browser.start();
        browser.complete(
            first.generation,
            ok(page(vec![image("1", "u1")], "s1", "e1", true, false)),
        );

        let next = browser.next_page().unwrap();
        let outcome = browser.complete::<&str>(next.generation, Err("connection refused"));

        assert_eq!(outcome, FetchOutcome::Failed);
        assert!(!browser.is_loading());
        assert_eq!(browser.last_error(), Some("connection refused"));
        assert_eq!(browser.images()[0].id, "1");
        assert_eq!(browser.cursor().end, "e1");

        // Retry still possible from the same cursor
        let retry = browser.next_page().unwrap();
        assert_eq!(retry.request.cursor.as_deref(), Some("e1"));
    }

    #[test]
    fn test_selection_resets_on_new_page() {
        let mut browser = ImageBrowser::default();
        let first = browser.start();
        browser.complete(
            first.generation,
            ok(page(vec![image("1", "u1")], "s1", "e1", true, false)),
        );

        assert!(browser.toggle_selection("1"));
        assert_eq!(browser.translate_selected(), Some(vec!["1".to_string()]));

        let next = browser.next_page().unwrap();
        browser.complete(
            next.generation,
            ok(page(vec![image("2", "u2")], "s2", "e2", false, true)),
        );

        assert!(browser.selection().is_empty());
        assert_eq!(browser.translate_selected(), None);
    }

    #[test]
    fn test_translate_with_nothing_selected() {
        let browser = ImageBrowser::default();
        assert_eq!(browser.translate_selected(), None);
    }
}
