//! The accordion controller.
//!
//! [`AccordionController`] turns row toggles into expansion-state changes and
//! drives the matching animations on the host list and its row views. It also
//! re-synchronizes recycled views from the expansion state every time the host
//! is about to display one.
//!
//! # Host Protocol
//!
//! The host list calls into the controller at four points:
//!
//! - [`on_will_display`](AccordionController::on_will_display) right before a
//!   (possibly recycled) view is shown for a row
//! - [`on_row_selected`](AccordionController::on_row_selected) when the user
//!   activates a row
//! - [`layout_finished`](AccordionController::layout_finished) when the height
//!   animation started by [`HostList::end_layout_transaction`] ends
//! - [`content_finished`](AccordionController::content_finished) when the
//!   content animation started by [`RowView::animate_content`] ends
//!
//! Its row-height callback should return the expanded height for rows where
//! [`is_expanded`](AccordionController::is_expanded) is `true`.
//!
//! # Phase Ordering
//!
//! An animated expand adds the row to the state inside a layout transaction
//! and only reveals the content once the layout has finished. An animated
//! collapse hides the content first and only removes the row (shrinking it)
//! once the content animation has finished. Each step waits for the ticket of
//! the previous one, so the two phases of one row never overlap.

use crate::config::{AccordionConfig, ReentrancyPolicy};
use crate::logging::targets;
use crate::row::RowId;
use crate::signal::Signal;
use crate::state::ExpansionState;
use crate::thread_check::ThreadAffinity;
use crate::transition::{
    RowPhase, Transition, TransitionDirection, TransitionId, TransitionPhase, TransitionTable,
};
use crate::view::{HostList, RowView, ViewId};

/// Coordinates row expansion with a recycling list view.
///
/// # Signals
///
/// - `expanded(RowId)`: Emitted when a row reaches the expanded state
/// - `collapsed(RowId)`: Emitted when a row reaches the collapsed state
/// - `state_reset(())`: Emitted when the expansion state is cleared
///
/// # Example
///
/// ```ignore
/// use lattice_accordion::AccordionController;
///
/// let mut accordion = AccordionController::new();
/// accordion.expanded.connect(|row| println!("expanded {row}"));
///
/// // From the list view's callbacks:
/// accordion.on_will_display(&mut list, view, row);
/// accordion.on_row_selected(&mut list, view, row);
/// ```
#[derive(Debug)]
pub struct AccordionController {
    state: ExpansionState,
    transitions: TransitionTable,
    config: AccordionConfig,
    affinity: ThreadAffinity,

    /// Emitted when a row reaches the expanded state.
    pub expanded: Signal<RowId>,
    /// Emitted when a row reaches the collapsed state.
    pub collapsed: Signal<RowId>,
    /// Emitted when the expansion state is cleared.
    pub state_reset: Signal<()>,
}

impl Default for AccordionController {
    fn default() -> Self {
        Self::new()
    }
}

impl AccordionController {
    /// Creates a controller with the default configuration.
    ///
    /// The controller is bound to the calling thread.
    pub fn new() -> Self {
        Self::with_config(AccordionConfig::default())
    }

    /// Creates a controller with the given configuration.
    pub fn with_config(config: AccordionConfig) -> Self {
        Self {
            state: ExpansionState::new(),
            transitions: TransitionTable::default(),
            config,
            affinity: ThreadAffinity::current(),
            expanded: Signal::new(),
            collapsed: Signal::new(),
            state_reset: Signal::new(),
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Gets the configuration.
    pub fn config(&self) -> &AccordionConfig {
        &self.config
    }

    /// Replaces the configuration. In-flight transitions are unaffected.
    pub fn set_config(&mut self, config: AccordionConfig) {
        self.config = config;
    }

    // =========================================================================
    // State inspection
    // =========================================================================

    /// The expansion state.
    pub fn state(&self) -> &ExpansionState {
        &self.state
    }

    /// Returns whether `row` is expanded. Hosts use this to pick row heights.
    pub fn is_expanded(&self, row: RowId) -> bool {
        self.state.contains(row)
    }

    /// The expanded rows, in the order they were expanded.
    pub fn expanded_rows(&self) -> impl ExactSizeIterator<Item = RowId> + '_ {
        self.state.iter()
    }

    /// The four-state phase of `row`.
    pub fn row_phase(&self, row: RowId) -> RowPhase {
        match self.transitions.for_row(row) {
            Some(t) => match t.direction {
                TransitionDirection::Expanding => RowPhase::Expanding,
                TransitionDirection::Collapsing => RowPhase::Collapsing,
            },
            None if self.state.contains(row) => RowPhase::Expanded,
            None => RowPhase::Collapsed,
        }
    }

    /// Returns `true` while an animated transition is running for `row`.
    pub fn is_transitioning(&self, row: RowId) -> bool {
        self.transitions.id_for_row(row).is_some()
    }

    /// The in-flight transition of `row`, if any.
    pub fn pending_transition(&self, row: RowId) -> Option<&Transition> {
        self.transitions.for_row(row)
    }

    /// Number of animated transitions currently running.
    pub fn in_flight_count(&self) -> usize {
        self.transitions.len()
    }

    // =========================================================================
    // Toggling
    // =========================================================================

    /// Toggles the row currently shown by `view`.
    ///
    /// Expands if the view reports itself collapsed, collapses otherwise. Does
    /// nothing if the view is not bound to a row. When a running transition is
    /// superseded under [`ReentrancyPolicy::LastWriteWins`], the direction is
    /// taken from the expansion state instead, since the view's flag may not
    /// have caught up with the abandoned transition.
    #[tracing::instrument(skip_all, target = "lattice_accordion::controller", level = "trace")]
    pub fn toggle<H: HostList>(&mut self, host: &mut H, view: ViewId, animated: bool) {
        self.affinity.debug_assert_same_thread();

        let Some(row) = host.row_for_view(view) else {
            tracing::trace!(
                target: targets::CONTROLLER,
                ?view,
                "view not bound to a row, ignoring toggle"
            );
            return;
        };

        let mut superseded = false;
        if let Some(ticket) = self.transitions.id_for_row(row) {
            match self.config.reentrancy {
                ReentrancyPolicy::Ignore => {
                    tracing::debug!(
                        target: targets::CONTROLLER,
                        %row,
                        "transition in flight, toggle ignored"
                    );
                    return;
                }
                ReentrancyPolicy::Queue => {
                    if self.transitions.queue_toggle(ticket, animated) {
                        tracing::debug!(
                            target: targets::CONTROLLER,
                            %row,
                            "transition in flight, toggle queued"
                        );
                    } else {
                        tracing::debug!(
                            target: targets::CONTROLLER,
                            %row,
                            "toggle already queued, dropping"
                        );
                    }
                    return;
                }
                ReentrancyPolicy::LastWriteWins => {
                    tracing::debug!(
                        target: targets::CONTROLLER,
                        %row,
                        "superseding in-flight transition"
                    );
                    self.transitions.finish(ticket);
                    superseded = true;
                }
            }
        }

        let Some(view_expanded) = host.view_mut(view).map(|v| v.is_expanded()) else {
            return;
        };
        let currently_expanded = if superseded {
            self.state.contains(row)
        } else {
            view_expanded
        };

        if currently_expanded {
            self.collapse(host, view, row, animated);
        } else {
            self.expand(host, view, row, animated);
        }
    }

    fn expand<H: HostList>(&mut self, host: &mut H, view: ViewId, row: RowId, animated: bool) {
        if !animated {
            self.state.add(row);
            if let Some(v) = host.view_mut(view) {
                v.set_expanded(true);
            }
            host.invalidate_layout();
            self.expanded.emit(row);
            return;
        }

        let ticket = self.transitions.start(
            row,
            TransitionDirection::Expanding,
            TransitionPhase::AwaitingLayout,
        );
        tracing::debug!(target: targets::CONTROLLER, %row, ?ticket, "expanding row");

        host.begin_layout_transaction();
        self.state.add(row);
        host.end_layout_transaction(ticket);
    }

    fn collapse<H: HostList>(&mut self, host: &mut H, view: ViewId, row: RowId, animated: bool) {
        if !animated {
            self.state.remove(row);
            if let Some(v) = host.view_mut(view) {
                v.set_expanded(false);
            }
            host.invalidate_layout();
            self.collapsed.emit(row);
            return;
        }

        let ticket = self.transitions.start(
            row,
            TransitionDirection::Collapsing,
            TransitionPhase::AwaitingContent,
        );
        tracing::debug!(target: targets::CONTROLLER, %row, ?ticket, "collapsing row");

        match host.view_mut(view) {
            Some(v) => v.animate_content(false, ticket),
            None => self.shrink(host, ticket, row),
        }
    }

    /// Removes the row inside a layout transaction, the second collapse phase.
    fn shrink<H: HostList>(&mut self, host: &mut H, ticket: TransitionId, row: RowId) {
        self.transitions.set_phase(ticket, TransitionPhase::AwaitingLayout);
        host.begin_layout_transaction();
        self.state.remove(row);
        // The row may have been re-displayed in another view while its
        // content was hiding; that view was synced as expanded.
        Self::resync_visible(host, row, false);
        host.end_layout_transaction(ticket);
    }

    // =========================================================================
    // Host callbacks
    // =========================================================================

    /// Synchronizes a view about to be displayed for `row`.
    ///
    /// Must be called by the host before showing any row view. Recycled views
    /// still carry the flag of the row they last showed; this resets it from
    /// the expansion state without animating.
    pub fn on_will_display<H: HostList>(&mut self, host: &mut H, view: ViewId, row: RowId) {
        self.affinity.debug_assert_same_thread();

        let expanded = self.state.contains(row);
        if let Some(v) = host.view_mut(view) {
            if v.is_expanded() != expanded {
                tracing::trace!(
                    target: targets::CONTROLLER,
                    %row,
                    expanded,
                    "resyncing recycled view"
                );
            }
            v.set_expanded(expanded);
        }
    }

    /// Handles row activation: toggles the row and clears its selection.
    pub fn on_row_selected<H: HostList>(&mut self, host: &mut H, view: ViewId, row: RowId) {
        self.toggle(host, view, self.config.animate_selection);
        host.deselect_row(row, self.config.deselect_animated);
    }

    /// Reports that the layout pass for `ticket` has finished.
    ///
    /// Stale or unexpected tickets are ignored.
    pub fn layout_finished<H: HostList>(&mut self, host: &mut H, ticket: TransitionId) {
        self.affinity.debug_assert_same_thread();

        let Some(transition) = self.transitions.get(ticket) else {
            tracing::trace!(target: targets::CONTROLLER, ?ticket, "stale layout ticket");
            return;
        };
        if transition.phase != TransitionPhase::AwaitingLayout {
            tracing::trace!(target: targets::CONTROLLER, ?ticket, "ticket not awaiting layout");
            return;
        }
        let (row, direction) = (transition.row, transition.direction);

        match direction {
            TransitionDirection::Expanding => {
                let shown = host.view_for_row(row);
                match shown.and_then(|view| host.view_mut(view)) {
                    Some(v) => {
                        v.animate_content(true, ticket);
                        self.transitions.set_phase(ticket, TransitionPhase::AwaitingContent);
                    }
                    // Scrolled away; on_will_display shows it expanded later.
                    None => self.complete(host, ticket),
                }
            }
            TransitionDirection::Collapsing => self.complete(host, ticket),
        }
    }

    /// Reports that the content animation for `ticket` has finished.
    ///
    /// Stale or unexpected tickets are ignored.
    pub fn content_finished<H: HostList>(&mut self, host: &mut H, ticket: TransitionId) {
        self.affinity.debug_assert_same_thread();

        let Some(transition) = self.transitions.get(ticket) else {
            tracing::trace!(target: targets::CONTROLLER, ?ticket, "stale content ticket");
            return;
        };
        if transition.phase != TransitionPhase::AwaitingContent {
            tracing::trace!(target: targets::CONTROLLER, ?ticket, "ticket not awaiting content");
            return;
        }
        let (row, direction) = (transition.row, transition.direction);

        match direction {
            TransitionDirection::Expanding => self.complete(host, ticket),
            TransitionDirection::Collapsing => self.shrink(host, ticket, row),
        }
    }

    fn complete<H: HostList>(&mut self, host: &mut H, ticket: TransitionId) {
        let Some(transition) = self.transitions.finish(ticket) else {
            return;
        };
        let row = transition.row;
        tracing::debug!(
            target: targets::CONTROLLER,
            %row,
            direction = ?transition.direction,
            "transition complete"
        );
        Self::resync_visible(host, row, self.state.contains(row));

        match transition.direction {
            TransitionDirection::Expanding => self.expanded.emit(row),
            TransitionDirection::Collapsing => self.collapsed.emit(row),
        }

        if let Some(animated) = transition.queued_toggle {
            tracing::debug!(target: targets::CONTROLLER, %row, "replaying queued toggle");
            match host.view_for_row(row) {
                Some(view) => self.toggle(host, view, animated),
                None => self.apply_immediately(host, row, !transition.direction.target_expanded()),
            }
        }
    }

    // =========================================================================
    // Cancellation and bulk operations
    // =========================================================================

    /// Finishes the in-flight transition of `row` at once, without animation.
    ///
    /// An expanding row ends expanded and a collapsing row ends collapsed; the
    /// pending ticket becomes stale and any queued toggle is dropped. Returns
    /// `false` if no transition was running.
    pub fn cancel_transition<H: HostList>(&mut self, host: &mut H, row: RowId) -> bool {
        self.affinity.debug_assert_same_thread();

        let Some(transition) = self
            .transitions
            .id_for_row(row)
            .and_then(|ticket| self.transitions.finish(ticket))
        else {
            return false;
        };

        tracing::debug!(
            target: targets::CONTROLLER,
            %row,
            direction = ?transition.direction,
            "transition cancelled"
        );
        self.apply_immediately(host, row, transition.direction.target_expanded());
        true
    }

    /// Expands every row in `rows` without animation.
    ///
    /// Rows that are mid-transition are finished first.
    pub fn expand_all<H, I>(&mut self, host: &mut H, rows: I)
    where
        H: HostList,
        I: IntoIterator<Item = RowId>,
    {
        self.affinity.debug_assert_same_thread();

        for row in rows {
            if let Some(ticket) = self.transitions.id_for_row(row) {
                self.transitions.finish(ticket);
            }
            if self.state.add(row) {
                self.expanded.emit(row);
            }
            Self::sync_visible(host, row, true);
        }
        host.invalidate_layout();
    }

    /// Collapses every row without animation and abandons all transitions.
    pub fn collapse_all<H: HostList>(&mut self, host: &mut H) {
        self.affinity.debug_assert_same_thread();

        self.transitions.clear();
        let rows: Vec<RowId> = self.state.iter().collect();
        self.state.reset();
        for row in rows {
            Self::sync_visible(host, row, false);
            self.collapsed.emit(row);
        }
        host.invalidate_layout();
    }

    /// Clears the expansion state and abandons all transitions.
    ///
    /// Pending tickets become stale. Visible views are left alone; the host
    /// is expected to reload, which re-syncs every view through
    /// [`on_will_display`](Self::on_will_display).
    pub fn reset(&mut self) {
        self.affinity.debug_assert_same_thread();

        let abandoned = self.transitions.clear();
        self.state.reset();
        tracing::debug!(target: targets::CONTROLLER, abandoned, "expansion state reset");
        self.state_reset.emit(());
    }

    /// Notifies the controller that rows were inserted, removed or reordered.
    ///
    /// Stored row positions can no longer be trusted, so the state is reset.
    pub fn rows_changed(&mut self) {
        tracing::debug!(target: targets::CONTROLLER, "row structure changed");
        self.reset();
    }

    /// Replaces the expansion state with `rows`, e.g. after a full reload.
    ///
    /// Duplicates are dropped and no per-row signals are emitted. All
    /// transitions are abandoned.
    pub fn restore_expanded<I: IntoIterator<Item = RowId>>(&mut self, rows: I) {
        self.affinity.debug_assert_same_thread();

        self.transitions.clear();
        self.state = rows.into_iter().collect();
        tracing::debug!(
            target: targets::CONTROLLER,
            count = self.state.len(),
            "expansion state restored"
        );
    }

    /// Moves `row` straight to its durable state, syncing the visible view.
    fn apply_immediately<H: HostList>(&mut self, host: &mut H, row: RowId, expand: bool) {
        if expand {
            self.state.add(row);
        } else {
            self.state.remove(row);
        }
        Self::sync_visible(host, row, expand);
        host.invalidate_layout();

        if expand {
            self.expanded.emit(row);
        } else {
            self.collapsed.emit(row);
        }
    }

    /// Syncs the view showing `row` to `expanded`, only if it disagrees.
    fn resync_visible<H: HostList>(host: &mut H, row: RowId, expanded: bool) {
        if let Some(v) = host.view_for_row(row).and_then(|view| host.view_mut(view)) {
            if v.is_expanded() != expanded {
                tracing::trace!(
                    target: targets::CONTROLLER,
                    %row,
                    expanded,
                    "view out of step with expansion state"
                );
                v.set_expanded(expanded);
            }
        }
    }

    fn sync_visible<H: HostList>(host: &mut H, row: RowId, expanded: bool) {
        if let Some(v) = host.view_for_row(row).and_then(|view| host.view_mut(view)) {
            v.set_expanded(expanded);
        }
    }
}
