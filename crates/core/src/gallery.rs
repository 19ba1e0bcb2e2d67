//! Gallery session: the consumer-side cursor/jump state machine.
//!
//! UI-agnostic driver for an infinite-scroll grid. The embedding layer
//! renders `items()`, reports the scroll trigger via [`GallerySession::poll_more`],
//! performs the fetch it is handed, and feeds the outcome back through
//! [`GallerySession::complete`]. Filter switches and jumps discard the
//! accumulated view and reseed the cursor; every issued request carries a
//! generation number so a response that raced a reset is discarded instead
//! of being merged into the wrong view.

use crate::paginator::{GalleryEntry, PageResult};
use crate::session::User;

/// What the session is currently showing. One enum, so "my favorites" and
/// "another user's favorites" cannot be active at the same time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewFilter {
    /// The whole catalog, paged.
    All,
    /// The session user's favorites, exhaustive.
    OwnFavorites,
    /// Another user's favorites, exhaustive.
    UserFavorites(String),
}

/// A fetch the embedding layer must perform on the session's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Resume offset, as the decimal cursor string the server expects.
    pub cursor: String,
    pub limit: usize,
    /// Target username in a favorites-only fetch.
    pub fav_user: Option<String>,
    /// Stamp this back into [`GallerySession::complete`].
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Idle,
    Loading,
    Failed(String),
}

/// An optimistic favorite flip awaiting the server's verdict.
///
/// Created by [`GallerySession::begin_toggle`]; hand it back to
/// [`GallerySession::resolve_toggle`] with the outcome to commit or roll
/// back.
#[derive(Debug, Clone)]
pub struct PendingToggle {
    id: String,
    previous: bool,
}

/// Accumulating infinite-scroll session for one signed-in user.
pub struct GallerySession {
    user: User,
    page_size: usize,
    filter: ViewFilter,
    cursor: Option<String>,
    items: Vec<GalleryEntry>,
    phase: Phase,
    generation: u64,
    total: Option<usize>,
}

impl GallerySession {
    pub fn new(user: User, page_size: usize) -> Self {
        Self {
            user,
            page_size,
            filter: ViewFilter::All,
            cursor: Some("0".to_string()),
            items: Vec::new(),
            phase: Phase::Idle,
            generation: 0,
            total: None,
        }
    }

    pub fn items(&self) -> &[GalleryEntry] {
        &self.items
    }

    pub fn filter(&self) -> &ViewFilter {
        &self.filter
    }

    /// `false` once the server reported end-of-list for the current view.
    pub fn has_more(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// The user-facing message while in the failed state.
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Total catalog size as last reported by the server.
    pub fn total(&self) -> Option<usize> {
        self.total
    }

    /// The infinite-scroll trigger: the last rendered item became visible.
    ///
    /// Issues a fetch exactly when the session is idle and the cursor is
    /// not exhausted. While a fetch is in flight (or after a failure, until
    /// [`GallerySession::retry`]) this returns `None`, so a repeated
    /// trigger cannot start a duplicate request for the same position.
    pub fn poll_more(&mut self) -> Option<FetchRequest> {
        if self.phase != Phase::Idle {
            return None;
        }
        let cursor = self.cursor.clone()?;
        self.issue(cursor)
    }

    /// Feed back the outcome of a fetch.
    ///
    /// A `generation` older than the session's current one belongs to a
    /// view that no longer exists (filter change or jump raced the
    /// response); it is dropped without touching state.
    pub fn complete(&mut self, generation: u64, outcome: Result<PageResult, String>) {
        if generation != self.generation || self.phase != Phase::Loading {
            return;
        }

        match outcome {
            Ok(page) => {
                self.items.extend(page.items);
                self.cursor = page.next_cursor;
                self.total = Some(page.total);
                self.phase = Phase::Idle;
            }
            Err(message) => {
                // Prior items stay on screen; the trigger re-arms via retry().
                self.phase = Phase::Failed(message);
            }
        }
    }

    /// Leave the failed state and re-issue the fetch that failed. No
    /// automatic retries happen without this call.
    pub fn retry(&mut self) -> Option<FetchRequest> {
        if matches!(self.phase, Phase::Failed(_)) {
            self.phase = Phase::Idle;
        }
        self.poll_more()
    }

    /// Switch the view. A no-op when the filter is unchanged; otherwise the
    /// accumulated items are discarded (never merged across filters), the
    /// cursor reseeds to zero, and one fetch is issued immediately.
    pub fn set_filter(&mut self, filter: ViewFilter) -> Option<FetchRequest> {
        if filter == self.filter {
            return None;
        }
        self.filter = filter;
        self.reset_and_issue(0)
    }

    /// Random-access jump to a catalog index. Only meaningful in the
    /// unfiltered view: the favorites response is exhaustive and has no
    /// cursor to resume from, so jumps are ignored there. Jumps past the
    /// known total are ignored too.
    pub fn jump_to_index(&mut self, index: usize) -> Option<FetchRequest> {
        if self.filter != ViewFilter::All {
            return None;
        }
        if let Some(total) = self.total {
            if index >= total {
                return None;
            }
        }
        self.reset_and_issue(index)
    }

    /// Jump to a one-based page number.
    pub fn jump_to_page(&mut self, page: usize) -> Option<FetchRequest> {
        if page == 0 {
            return None;
        }
        self.jump_to_index((page - 1) * self.page_size)
    }

    /// Optimistically flip an item's favorite flag, remembering the prior
    /// state for rollback. Returns `None` for ids not in the view.
    pub fn begin_toggle(&mut self, id: &str) -> Option<PendingToggle> {
        let item = self.items.iter_mut().find(|i| i.entry.name == id)?;
        let previous = item.is_favorited;
        item.is_favorited = !previous;
        Some(PendingToggle {
            id: id.to_string(),
            previous,
        })
    }

    /// Commit or roll back a pending toggle.
    ///
    /// On success the server's answer wins (it may disagree with the
    /// optimistic flip if another session toggled concurrently). In the
    /// own-favorites view a committed unfavorite removes the item. On
    /// failure the remembered state is restored; the view never keeps a
    /// state the server refused.
    pub fn resolve_toggle(&mut self, pending: PendingToggle, outcome: Result<bool, String>) {
        match outcome {
            Ok(is_favorited) => {
                if let Some(item) = self.items.iter_mut().find(|i| i.entry.name == pending.id) {
                    item.is_favorited = is_favorited;
                }
                if self.filter == ViewFilter::OwnFavorites && !is_favorited {
                    self.items.retain(|i| i.entry.name != pending.id);
                }
            }
            Err(_) => {
                if let Some(item) = self.items.iter_mut().find(|i| i.entry.name == pending.id) {
                    item.is_favorited = pending.previous;
                }
            }
        }
    }

    fn fav_user(&self) -> Option<String> {
        match &self.filter {
            ViewFilter::All => None,
            ViewFilter::OwnFavorites => Some(self.user.username.clone()),
            ViewFilter::UserFavorites(username) => Some(username.clone()),
        }
    }

    fn reset_and_issue(&mut self, offset: usize) -> Option<FetchRequest> {
        self.items.clear();
        self.total = None;
        self.cursor = Some(offset.to_string());
        self.phase = Phase::Idle;
        self.issue(offset.to_string())
    }

    fn issue(&mut self, cursor: String) -> Option<FetchRequest> {
        self.generation += 1;
        self.phase = Phase::Loading;
        Some(FetchRequest {
            cursor,
            limit: self.page_size,
            fav_user: self.fav_user(),
            generation: self.generation,
        })
    }
}
