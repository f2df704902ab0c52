//! Feed list engine and scroll-driven overlay for Broadsheet.
//!
//! [`FeedList`] keeps the rendered snapshot of a paginated feed and turns
//! every new sequence into a [`RenderPlan`]: which rows changed, which
//! footer to show and how many rows to materialize per page.
//! [`ScrollDirectionTracker`] turns scroll samples into show/hide signals
//! for an [`Overlay`] whose fades are driven by [`animation::Tween`].

pub mod animation;
pub mod list;
pub mod overlay;
pub mod scroll;

pub use list::{
    FeedEntry, FeedList, FeedListener, Footer, RefreshControl, RenderPlan, RowChange,
    ScrollSample, diff_rows, footer_for, page_size_for, plan,
};
pub use overlay::Overlay;
pub use scroll::{OverlaySignal, ScrollDirectionTracker};
