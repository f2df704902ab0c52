//! Incremental feed list: snapshot, render plans and list callbacks.
//!
//! The diffing core is pure: [`plan`] maps `(previous, next)` to a
//! [`RenderPlan`]. [`FeedList`] wraps it with the state a list screen
//! keeps between updates (snapshot, page size, refresh flag) and the
//! callbacks a list raises (refresh, load more, selection, scroll).

use broadsheet_types::config::FeedConfig;

// -----------------------------------------------------------------------
// Render plan
// -----------------------------------------------------------------------

/// Re-render status of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowChange {
    /// Same item as before at this position; the row can be reused.
    Unchanged,
    /// A different item now occupies this position.
    Changed,
    /// Position did not exist in the previous sequence.
    Inserted,
}

/// What to render after the last row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Footer {
    None,
    /// More data may exist; a loading-more placeholder.
    LoadingMore,
    /// Terminal "no more results" marker.
    NoMore,
}

/// Rendering description for one list update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    /// One entry per row of the new sequence.
    pub rows: Vec<RowChange>,
    /// Rows of the previous sequence past the end of the new one.
    pub removed: usize,
    pub footer: Footer,
    /// Rows to materialize per rendering page.
    pub page_size: usize,
}

impl RenderPlan {
    /// Indices of rows that must be recomputed.
    pub fn dirty_rows(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, c)| **c != RowChange::Unchanged)
            .map(|(i, _)| i)
            .collect()
    }

    /// Whether every row can be reused as-is.
    pub fn rows_unchanged(&self) -> bool {
        self.removed == 0 && self.rows.iter().all(|c| *c == RowChange::Unchanged)
    }
}

/// Page size after a sequence change: roughly the size of the latest
/// delta, never below one.
///
/// The extra `- 1` is long-standing list behavior and is kept as is.
pub fn page_size_for(old_len: usize, new_len: usize) -> usize {
    new_len.saturating_sub(old_len).saturating_sub(1).max(1)
}

/// Footer for a sequence of `len` items.
///
/// The loading placeholder waits for the first content, so an empty list
/// that may still grow shows nothing.
pub fn footer_for(len: usize, has_more: bool) -> Footer {
    if !has_more {
        Footer::NoMore
    } else if len == 0 {
        Footer::None
    } else {
        Footer::LoadingMore
    }
}

/// Per-row change status of `next` against `prev`.
pub fn diff_rows<T>(prev: &[T], next: &[T], has_changed: impl Fn(&T, &T) -> bool) -> Vec<RowChange> {
    next.iter()
        .enumerate()
        .map(|(i, item)| match prev.get(i) {
            Some(old) if has_changed(old, item) => RowChange::Changed,
            Some(_) => RowChange::Unchanged,
            None => RowChange::Inserted,
        })
        .collect()
}

/// Full render plan for moving from `prev` to `next`.
pub fn plan<T>(
    prev: &[T],
    next: &[T],
    has_more: bool,
    has_changed: impl Fn(&T, &T) -> bool,
) -> RenderPlan {
    RenderPlan {
        rows: diff_rows(prev, next, has_changed),
        removed: prev.len().saturating_sub(next.len()),
        footer: footer_for(next.len(), has_more),
        page_size: page_size_for(prev.len(), next.len()),
    }
}

// -----------------------------------------------------------------------
// Callbacks
// -----------------------------------------------------------------------

/// A feed item that can name the load-more cursor.
pub trait FeedEntry {
    /// Key identifying this item as the tail of a page.
    fn key(&self) -> &str;
}

/// One scroll sample, forwarded to listeners unmodified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSample {
    /// Offset along the scroll axis.
    pub offset: f32,
    pub viewport_height: f32,
    pub content_height: f32,
}

impl ScrollSample {
    /// Distance between the bottom of the viewport and the end of content.
    pub fn distance_to_end(&self) -> f32 {
        self.content_height - (self.offset + self.viewport_height)
    }
}

/// Receiver of list events. Every method defaults to doing nothing.
pub trait FeedListener<T> {
    /// Pull-to-refresh: restart from the top.
    fn on_refresh(&mut self) {}
    /// Infinite scroll: fetch the page after `cursor`.
    fn on_load_more(&mut self, _cursor: Option<&str>) {}
    fn on_item_press(&mut self, _item: &T) {}
    fn on_scroll(&mut self, _sample: &ScrollSample) {}
    fn on_scroll_begin(&mut self) {}
    fn on_scroll_end(&mut self) {}
}

/// State of the pull-to-refresh control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshControl {
    pub refreshing: bool,
}

// -----------------------------------------------------------------------
// FeedList
// -----------------------------------------------------------------------

/// A paginated feed list.
///
/// Rows are compared with `row_has_changed`, which defaults to `!=`;
/// feeds of shared pointers can pass an identity comparison instead.
pub struct FeedList<T> {
    items: Vec<T>,
    page_size: usize,
    has_more: bool,
    refreshing: bool,
    row_has_changed: fn(&T, &T) -> bool,
    end_reached_threshold: f32,
    /// Content height at which end-reached last fired.
    end_reached_at: Option<f32>,
}

impl<T: Clone + PartialEq> FeedList<T> {
    pub fn new(config: &FeedConfig) -> Self {
        Self::with_comparator(config, |a, b| a != b)
    }
}

impl<T: Clone> FeedList<T> {
    pub fn with_comparator(config: &FeedConfig, row_has_changed: fn(&T, &T) -> bool) -> Self {
        Self {
            items: Vec::new(),
            page_size: config.initial_page_size.max(1),
            has_more: true,
            refreshing: false,
            row_has_changed,
            end_reached_threshold: config.end_reached_threshold,
            end_reached_at: None,
        }
    }

    /// Take a new snapshot of the feed.
    ///
    /// Returns `None` when nothing visible changed (same rows, same
    /// refresh and has-more flags), so the caller can skip rendering.
    pub fn update(&mut self, next: &[T], refreshing: bool, has_more: bool) -> Option<RenderPlan> {
        let flags_changed = refreshing != self.refreshing || has_more != self.has_more;
        self.refreshing = refreshing;
        self.has_more = has_more;

        let cmp = self.row_has_changed;
        let mut plan = plan(&self.items, next, has_more, cmp);

        if plan.rows_unchanged() && plan.rows.len() == self.items.len() {
            if !flags_changed {
                return None;
            }
            // Only the footer or refresh control moved; keep the page size.
            plan.page_size = self.page_size;
            return Some(plan);
        }

        log::debug!(
            "feed list {} -> {} rows, page size {}",
            self.items.len(),
            next.len(),
            plan.page_size
        );
        self.page_size = plan.page_size;
        self.items = next.to_vec();
        Some(plan)
    }

    /// Pull-to-refresh or initial load: `next` replaces the feed.
    pub fn replace(&mut self, next: Vec<T>, has_more: bool) -> Option<RenderPlan> {
        let refreshing = self.refreshing;
        self.update(&next, refreshing, has_more)
    }

    /// Load more: `batch` extends the current feed at the tail.
    pub fn append(&mut self, batch: &[T], has_more: bool) -> Option<RenderPlan> {
        let mut next = self.items.clone();
        next.extend_from_slice(batch);
        let refreshing = self.refreshing;
        self.update(&next, refreshing, has_more)
    }

    /// Mirror the external refresh-pending flag.
    pub fn set_refreshing(&mut self, refreshing: bool) {
        self.refreshing = refreshing;
    }

    pub fn refresh_control(&self) -> RefreshControl {
        RefreshControl {
            refreshing: self.refreshing,
        }
    }

    /// The user pulled to refresh.
    pub fn trigger_refresh(&self, listener: &mut dyn FeedListener<T>) {
        listener.on_refresh();
    }

    /// The user tapped row `index`. Returns false for a stale index.
    pub fn select(&self, index: usize, listener: &mut dyn FeedListener<T>) -> bool {
        match self.items.get(index) {
            Some(item) => {
                listener.on_item_press(item);
                true
            }
            None => false,
        }
    }

    pub fn scroll_begin(&self, listener: &mut dyn FeedListener<T>) {
        listener.on_scroll_begin();
    }

    pub fn scroll_end(&self, listener: &mut dyn FeedListener<T>) {
        listener.on_scroll_end();
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn footer(&self) -> Footer {
        footer_for(self.items.len(), self.has_more)
    }
}

impl<T: Clone + FeedEntry> FeedList<T> {
    /// Key of the last item, used as the load-more cursor.
    pub fn tail_cursor(&self) -> Option<&str> {
        self.items.last().map(FeedEntry::key)
    }

    /// Forward a scroll sample, then raise end-reached when the viewport
    /// is within the threshold of the end.
    ///
    /// End-reached fires at most once per content height, so repeated
    /// samples near the bottom do not request the same page twice.
    /// Returns whether it fired.
    pub fn on_scroll(&mut self, sample: ScrollSample, listener: &mut dyn FeedListener<T>) -> bool {
        listener.on_scroll(&sample);

        if sample.distance_to_end() >= self.end_reached_threshold {
            return false;
        }
        if self.end_reached_at == Some(sample.content_height) {
            return false;
        }
        self.end_reached_at = Some(sample.content_height);
        listener.on_load_more(self.tail_cursor());
        true
    }

    /// Ask for the page after the current tail.
    pub fn load_more(&self, listener: &mut dyn FeedListener<T>) {
        listener.on_load_more(self.tail_cursor());
    }
}
