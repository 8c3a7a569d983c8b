//! Drives an [`ImageBrowser`] against a [`PageSource`].

use super::{FetchOutcome, ImageBrowser, PageSource, PendingFetch};

/// A browser plus the source that answers its fetches.
///
/// Fetches run one at a time, in the order they are issued.
#[derive(Debug)]
pub struct BrowserSession<S> {
    browser: ImageBrowser,
    source: S,
}

impl<S: PageSource> BrowserSession<S> {
    pub const fn new(browser: ImageBrowser, source: S) -> Self {
        Self { browser, source }
    }

    /// Load the first page.
    pub async fn start(&mut self) -> FetchOutcome {
        let pending = self.browser.start();
        self.run(pending).await
    }

    /// Load the next page. `None` if there is no next page.
    pub async fn next_page(&mut self) -> Option<FetchOutcome> {
        let pending = self.browser.next_page()?;
        Some(self.run(pending).await)
    }

    /// Load the previous page. `None` if there is no previous page.
    pub async fn prev_page(&mut self) -> Option<FetchOutcome> {
        let pending = self.browser.prev_page()?;
        Some(self.run(pending).await)
    }

    async fn run(&mut self, pending: PendingFetch) -> FetchOutcome {
        let result = self.source.fetch_page(&pending.request).await;
        self.browser.complete(pending.generation, result)
    }

    pub const fn browser(&self) -> &ImageBrowser {
        &self.browser
    }

    pub const fn browser_mut(&mut self) -> &mut ImageBrowser {
        &mut self.browser
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use async_trait::async_trait;
    use imagelingo_core::{
        Connection, Edge, ImageRecord, PageDirection, PageInfo, PageRequest,
    };

    use super::*;
    use crate::browser::SourceError;

    /// Serves canned pages and counts calls.
    struct ScriptedSource {
        pages: Mutex<Vec<Connection<ImageRecord>>>,
        calls: AtomicUsize,
        requests: Mutex<Vec<PageRequest>>,
    }

    impl ScriptedSource {
        fn new(mut pages: Vec<Connection<ImageRecord>>) -> Self {
            pages.reverse();
            Self {
                pages: Mutex::new(pages),
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PageSource for ScriptedSource {
        async fn fetch_page(
            &self,
            request: &PageRequest,
        ) -> Result<Connection<ImageRecord>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request.clone());
            self.pages.lock().unwrap().pop().ok_or(SourceError::Status {
                status: 500,
                body: "no more scripted pages".to_string(),
            })
        }
    }

    fn page(ids: &[&str], has_next: bool, has_prev: bool) -> Connection<ImageRecord> {
        Connection {
            edges: ids
                .iter()
                .map(|id| {
                    Edge::new(ImageRecord {
                        id: (*id).to_string(),
                        image: None,
                        typename: "MediaImage".to_string(),
                        src: None,
                    })
                })
                .collect(),
            page_info: PageInfo {
                has_next_page: has_next,
                has_previous_page: has_prev,
                start_cursor: ids.first().map(|id| format!("start-{id}")),
                end_cursor: ids.last().map(|id| format!("end-{id}")),
            },
        }
    }

    #[tokio::test]
    async fn test_next_guard_issues_no_fetch() {
        let source = ScriptedSource::new(vec![page(&["1"], false, false)]);
        let mut session = BrowserSession::new(ImageBrowser::default(), source);

        assert_eq!(session.start().await, FetchOutcome::Applied);
        assert_eq!(session.source.calls(), 1);

        assert!(session.next_page().await.is_none());
        assert!(session.prev_page().await.is_none());
        assert_eq!(session.source.calls(), 1);
    }

    #[tokio::test]
    async fn test_walks_forward_and_back() {
        let source = ScriptedSource::new(vec![
            page(&["1", "2"], true, false),
            page(&["3", "4"], false, true),
            page(&["1", "2"], true, false),
        ]);
        let mut session = BrowserSession::new(ImageBrowser::default(), source);

        session.start().await;
        assert_eq!(session.next_page().await, Some(FetchOutcome::Applied));
        assert_eq!(session.browser().cursor().end, "end-4");
        assert_eq!(session.browser().cursor().start, "start-3");

        assert_eq!(session.prev_page().await, Some(FetchOutcome::Applied));
        assert_eq!(session.browser().images()[0].id, "1");

        let requests = session.source.requests.lock().unwrap().clone();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].cursor, None);
        assert_eq!(requests[1].direction, PageDirection::Next);
        assert_eq!(requests[1].cursor.as_deref(), Some("end-2"));
        assert_eq!(requests[2].direction, PageDirection::Prev);
        assert_eq!(requests[2].cursor.as_deref(), Some("start-3"));
    }

    #[tokio::test]
    async fn test_failed_fetch_is_recorded() {
        let source = ScriptedSource::new(vec![page(&["1"], true, false)]);
        let mut session = BrowserSession::new(ImageBrowser::default(), source);

        session.start().await;
        assert_eq!(session.next_page().await, Some(FetchOutcome::Failed));
        assert!(session.browser().last_error().is_some());
        assert_eq!(session.browser().images()[0].id, "1");
    }
}
