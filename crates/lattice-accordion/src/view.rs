//! The seams between the accordion controller and its hosting list view.
//!
//! The host owns a pool of recyclable row views and rebinds them to different
//! rows as the user scrolls. The controller never holds a view across a
//! callback; it addresses views by [`ViewId`] and asks the host to resolve
//! them whenever it needs one.

use slotmap::new_key_type;

use crate::row::RowId;
use crate::transition::TransitionId;

new_key_type! {
    /// Handle to a row view in the host's view pool.
    ///
    /// Hosts typically store their views in a `SlotMap<ViewId, _>` and hand
    /// out the keys.
    pub struct ViewId;
}

/// A recyclable row view that can show or hide its expanded-only content.
pub trait RowView {
    /// The view's locally tracked expanded flag.
    fn is_expanded(&self) -> bool;

    /// Switch to the expanded or collapsed presentation immediately.
    fn set_expanded(&mut self, expanded: bool);

    /// Start animating the expanded-only content in (`true`) or out (`false`)
    /// and update the local flag.
    ///
    /// When the animation ends the host must report it through
    /// [`AccordionController::content_finished`](crate::AccordionController::content_finished)
    /// with the same `ticket`.
    fn animate_content(&mut self, expanded: bool, ticket: TransitionId);
}

/// The list view hosting accordion rows.
pub trait HostList {
    /// The row view type held in the host's pool.
    type View: RowView;

    /// The row currently bound to `view`, or `None` if the view is not showing
    /// any row.
    fn row_for_view(&self, view: ViewId) -> Option<RowId>;

    /// The view currently showing `row`, if the row is on screen.
    fn view_for_row(&self, row: RowId) -> Option<ViewId>;

    /// Mutable access to a pooled view.
    fn view_mut(&mut self, view: ViewId) -> Option<&mut Self::View>;

    /// Start batching row height changes.
    fn begin_layout_transaction(&mut self);

    /// Re-query row heights and animate to the new layout.
    ///
    /// When the animation ends the host must report it through
    /// [`AccordionController::layout_finished`](crate::AccordionController::layout_finished)
    /// with the same `ticket`.
    fn end_layout_transaction(&mut self, ticket: TransitionId);

    /// Re-query row heights without animating.
    fn invalidate_layout(&mut self) {}

    /// Clear the selection highlight of `row`.
    fn deselect_row(&mut self, row: RowId, animated: bool);
}
