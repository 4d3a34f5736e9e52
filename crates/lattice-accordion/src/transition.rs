//! In-flight expand/collapse transitions.
//!
//! An animated toggle runs in two phases that must not overlap. Expanding
//! waits for the host's layout pass, then reveals the row content; collapsing
//! hides the content first, then waits for the layout pass that shrinks the
//! row. Each transition is identified by a [`TransitionId`] ticket that the
//! host hands back when a phase finishes. Tickets of finished or abandoned
//! transitions are stale and resolve to nothing.

use std::collections::HashMap;

use slotmap::{SlotMap, new_key_type};

use crate::row::RowId;

new_key_type! {
    /// Ticket identifying one animated transition.
    pub struct TransitionId;
}

/// Which way a transition is going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDirection {
    /// Collapsed to expanded.
    Expanding,
    /// Expanded to collapsed.
    Collapsing,
}

impl TransitionDirection {
    /// Whether the row ends up expanded.
    #[inline]
    pub fn target_expanded(self) -> bool {
        matches!(self, TransitionDirection::Expanding)
    }
}

/// The completion a transition is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    /// Waiting for the host's row-height layout pass.
    AwaitingLayout,
    /// Waiting for the row view's content animation.
    AwaitingContent,
}

/// Observable state of a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowPhase {
    /// Not expanded and not animating.
    #[default]
    Collapsed,
    /// Animating towards expanded.
    Expanding,
    /// Expanded and not animating.
    Expanded,
    /// Animating towards collapsed.
    Collapsing,
}

impl RowPhase {
    /// Returns `true` for the transient phases.
    pub fn is_transitioning(self) -> bool {
        matches!(self, RowPhase::Expanding | RowPhase::Collapsing)
    }
}

/// Record of one in-flight transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The row being transitioned.
    pub row: RowId,
    /// Direction of travel.
    pub direction: TransitionDirection,
    /// The completion currently awaited.
    pub phase: TransitionPhase,
    /// A toggle deferred until this transition ends, with its `animated` flag.
    pub queued_toggle: Option<bool>,
}

/// Table of in-flight transitions, at most one per row.
#[derive(Debug, Default)]
pub(crate) struct TransitionTable {
    transitions: SlotMap<TransitionId, Transition>,
    by_row: HashMap<RowId, TransitionId>,
}

impl TransitionTable {
    /// Register a new transition for `row`, replacing any existing one.
    pub fn start(
        &mut self,
        row: RowId,
        direction: TransitionDirection,
        phase: TransitionPhase,
    ) -> TransitionId {
        if let Some(previous) = self.by_row.remove(&row) {
            self.transitions.remove(previous);
        }
        let id = self.transitions.insert(Transition {
            row,
            direction,
            phase,
            queued_toggle: None,
        });
        self.by_row.insert(row, id);
        id
    }

    pub fn get(&self, id: TransitionId) -> Option<&Transition> {
        self.transitions.get(id)
    }

    pub fn id_for_row(&self, row: RowId) -> Option<TransitionId> {
        self.by_row.get(&row).copied()
    }

    pub fn for_row(&self, row: RowId) -> Option<&Transition> {
        self.id_for_row(row).and_then(|id| self.transitions.get(id))
    }

    pub fn set_phase(&mut self, id: TransitionId, phase: TransitionPhase) {
        if let Some(transition) = self.transitions.get_mut(id) {
            transition.phase = phase;
        }
    }

    /// Remember a toggle to replay later. Returns `false` if one is already
    /// queued or the ticket is stale.
    pub fn queue_toggle(&mut self, id: TransitionId, animated: bool) -> bool {
        match self.transitions.get_mut(id) {
            Some(transition) if transition.queued_toggle.is_none() => {
                transition.queued_toggle = Some(animated);
                true
            }
            _ => false,
        }
    }

    /// Remove a transition, making its ticket stale.
    pub fn finish(&mut self, id: TransitionId) -> Option<Transition> {
        let transition = self.transitions.remove(id)?;
        self.by_row.remove(&transition.row);
        Some(transition)
    }

    /// Drop every transition. Returns how many were in flight.
    pub fn clear(&mut self) -> usize {
        let count = self.transitions.len();
        self.transitions.clear();
        self.by_row.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }
}
