use std::sync::Arc;

use async_trait::async_trait;
use content_api::ContentProvider;
use shared::{
    domain::{Language, LayoutKind},
    error::FetchError,
    protocol::{WikiDocument, ERROR_PATH, INDEX_PATH},
};
use tokio::{
    sync::{broadcast, watch, Mutex},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

pub mod theme;

/// Widget handed to the display surface; at most one is mounted at a time,
/// replacing whatever the surface held before.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageView {
    Index {
        markdown: String,
    },
    Article {
        /// Absolute URL of the article on the public website.
        url: String,
        markdown: String,
    },
    Failure {
        requested_path: String,
        markdown: String,
    },
}

/// Rendering collaborator the overlay mounts widgets into.
///
/// `load` completing is the signal that the loading indicator can be hidden.
/// The overlay runs `load` inside its abortable fetch task, so a superseded
/// load is cancelled by dropping the future.
#[async_trait]
pub trait DisplaySurface: Send + Sync {
    async fn load(&self, view: PageView) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayStatus {
    Idle,
    Loading,
    Displayed,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayEvent {
    LoadingShown,
    LoadingHidden,
    PageDisplayed { path: String },
    LoadFailed { requested_path: String, message: String },
}

/// Navigable overlay over a remote hierarchical document store.
///
/// Owns the current path, fetches on navigation, cancels superseded work and
/// routes each result to the display surface as an index, article or failure
/// view. Reusable until `dispose`.
pub struct WikiOverlay {
    api: Arc<dyn ContentProvider>,
    display: Arc<dyn DisplaySurface>,
    language: watch::Receiver<Language>,
    inner: Mutex<OverlayState>,
    events: broadcast::Sender<OverlayEvent>,
}

struct OverlayState {
    path: String,
    document: Option<WikiDocument>,
    status: OverlayStatus,
    visible: bool,
    display_refresh_required: bool,
    // Monotonic request generation; continuations carrying an older value
    // are stale and must not touch state.
    generation: u64,
    fetch_task: Option<JoinHandle<()>>,
}

impl WikiOverlay {
    pub fn new(
        api: Arc<dyn ContentProvider>,
        display: Arc<dyn DisplaySurface>,
        language: watch::Receiver<Language>,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            api,
            display,
            language,
            inner: Mutex::new(OverlayState {
                path: INDEX_PATH.to_string(),
                document: None,
                status: OverlayStatus::Idle,
                visible: false,
                display_refresh_required: true,
                generation: 0,
                fetch_task: None,
            }),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<OverlayEvent> {
        self.events.subscribe()
    }

    pub async fn current_path(&self) -> String {
        self.inner.lock().await.path.clone()
    }

    pub async fn status(&self) -> OverlayStatus {
        self.inner.lock().await.status
    }

    pub async fn document(&self) -> Option<WikiDocument> {
        self.inner.lock().await.document.clone()
    }

    /// Navigates to `page_path` and makes the overlay visible. An empty or
    /// all-separator path addresses the index page.
    pub async fn show_page(self: &Arc<Self>, page_path: &str) {
        let trimmed = page_path.trim_matches('/');
        let path = if trimmed.is_empty() { INDEX_PATH } else { trimmed };

        let trigger = {
            let mut state = self.inner.lock().await;
            let changed = state.path != path;
            state.path = path.to_string();
            if state.visible {
                changed
            } else {
                state.visible = true;
                if state.display_refresh_required {
                    state.display_refresh_required = false;
                    true
                } else {
                    changed
                }
            }
        };

        if trigger {
            self.process_current_path().await;
        }
    }

    /// Makes the overlay visible at its current path, re-resolving it if a
    /// refresh became due while hidden.
    pub async fn show(self: &Arc<Self>) {
        let trigger = {
            let mut state = self.inner.lock().await;
            if state.visible {
                false
            } else {
                state.visible = true;
                if state.display_refresh_required {
                    state.display_refresh_required = false;
                    true
                } else {
                    false
                }
            }
        };

        if trigger {
            self.process_current_path().await;
        }
    }

    /// Hides the overlay. In-flight fetches keep running and update cached
    /// state for the next show.
    pub async fn hide(&self) {
        let mut state = self.inner.lock().await;
        state.visible = false;
        state.display_refresh_required = true;
    }

    /// Navigates to the parent of the current path; single-segment paths
    /// navigate back to the index.
    pub async fn show_parent_page(self: &Arc<Self>) {
        let parent = {
            let state = self.inner.lock().await;
            parent_path(&state.path)
        };
        self.show_page(&parent).await;
    }

    /// Cancels any in-flight fetch or display load. Idempotent.
    pub async fn dispose(&self) {
        let mut state = self.inner.lock().await;
        if let Some(task) = state.fetch_task.take() {
            task.abort();
        }
        // Invalidate any continuation that raced the abort.
        state.generation += 1;
    }

    async fn process_current_path(self: &Arc<Self>) {
        let mut state = self.inner.lock().await;
        let path = state.path.clone();

        // The path can change as a result of a redirect to a newer location
        // of the same page; the correct document is already loaded then.
        if state.document.as_ref().is_some_and(|doc| doc.path == path) {
            return;
        }
        if path == ERROR_PATH {
            return;
        }

        if let Some(task) = state.fetch_task.take() {
            task.abort();
        }
        state.generation += 1;
        let generation = state.generation;
        state.status = OverlayStatus::Loading;

        let (fetch_path, language) = split_language(&path, *self.language.borrow());

        let _ = self.events.send(OverlayEvent::LoadingShown);

        let overlay = Arc::clone(self);
        state.fetch_task = Some(tokio::spawn(async move {
            debug!(path = %fetch_path, language = language.culture_code(), "fetching wiki page");
            match overlay.api.fetch(&fetch_path, language).await {
                Ok(doc) => overlay.complete_fetch(generation, doc).await,
                Err(err) if err.is_cancelled() => {}
                Err(err) => overlay.fail_fetch(generation, path, err).await,
            }
        }));
    }

    async fn complete_fetch(&self, generation: u64, doc: WikiDocument) {
        let view = {
            let mut state = self.inner.lock().await;
            if state.generation != generation {
                return;
            }
            // The canonical path becomes authoritative after a redirect.
            state.path = doc.path.clone();
            state.document = Some(doc.clone());
            match doc.layout_kind() {
                LayoutKind::Index => PageView::Index {
                    markdown: doc.markdown,
                },
                LayoutKind::Article => PageView::Article {
                    url: format!("{}/wiki/{}/", self.api.website_root_url(), doc.path),
                    markdown: doc.markdown,
                },
            }
        };

        let load_result = self.display.load(view).await;

        let path = {
            let mut state = self.inner.lock().await;
            if state.generation != generation {
                return;
            }
            state.status = OverlayStatus::Displayed;
            state.path.clone()
        };

        match load_result {
            Ok(()) => {
                info!(path = %path, "wiki page displayed");
                let _ = self
                    .events
                    .send(OverlayEvent::PageDisplayed { path });
            }
            Err(err) => {
                warn!(path = %path, error = %err, "display surface failed to load page view");
            }
        }
        let _ = self.events.send(OverlayEvent::LoadingHidden);
    }

    async fn fail_fetch(&self, generation: u64, requested_path: String, err: FetchError) {
        warn!(path = %requested_path, error = %err, "wiki page fetch failed");

        let view = {
            let mut state = self.inner.lock().await;
            if state.generation != generation {
                return;
            }
            state.document = None;
            state.path = ERROR_PATH.to_string();
            PageView::Failure {
                requested_path: requested_path.clone(),
                markdown: failure_markdown(&requested_path),
            }
        };

        let load_result = self.display.load(view).await;

        {
            let mut state = self.inner.lock().await;
            if state.generation != generation {
                return;
            }
            state.status = OverlayStatus::Error;
        }

        if let Err(load_err) = load_result {
            warn!(error = %load_err, "display surface failed to load failure view");
        }
        let _ = self.events.send(OverlayEvent::LoadFailed {
            requested_path,
            message: err.to_string(),
        });
        let _ = self.events.send(OverlayEvent::LoadingHidden);
    }
}

/// Splits an optional leading culture-code segment off a path. Unrecognised
/// prefixes are treated as part of the page path and fetched with the
/// ambient language.
fn split_language(path: &str, ambient: Language) -> (String, Language) {
    if let Some((first, rest)) = path.split_once('/') {
        if let Some(language) = Language::from_culture_code(first) {
            return (rest.to_string(), language);
        }
    }
    (path.to_string(), ambient)
}

fn parent_path(path: &str) -> String {
    match path.rsplit_once('/') {
        Some((parent, _)) => parent.to_string(),
        None => String::new(),
    }
}

fn failure_markdown(requested_path: &str) -> String {
    format!(
        "Something went wrong when trying to fetch page \"{requested_path}\".\n\n[Return to the main page]({INDEX_PATH})."
    )
}

#[cfg(test)]
mod tests;
