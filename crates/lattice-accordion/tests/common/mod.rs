//! A recycling list host for exercising the accordion controller.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use lattice_accordion::{HostList, RowId, RowView, TransitionId, ViewId};
use slotmap::SlotMap;

/// Everything the host and its views were asked to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    BeginLayout,
    EndLayout(TransitionId),
    InvalidateLayout,
    Deselect(RowId, bool),
    SetExpanded(ViewId, bool),
    AnimateContent(ViewId, bool, TransitionId),
}

pub type EventLog = Rc<RefCell<Vec<HostEvent>>>;

pub struct MockRowView {
    id: ViewId,
    expanded: bool,
    log: EventLog,
}

impl RowView for MockRowView {
    fn is_expanded(&self) -> bool {
        self.expanded
    }

    fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
        self.log.borrow_mut().push(HostEvent::SetExpanded(self.id, expanded));
    }

    fn animate_content(&mut self, expanded: bool, ticket: TransitionId) {
        self.expanded = expanded;
        self.log
            .borrow_mut()
            .push(HostEvent::AnimateContent(self.id, expanded, ticket));
    }
}

#[derive(Default)]
pub struct MockList {
    views: SlotMap<ViewId, MockRowView>,
    bindings: HashMap<ViewId, RowId>,
    pub log: EventLog,
    pub in_layout_transaction: bool,
}

impl MockList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an unbound view in the pool.
    pub fn spawn_view(&mut self) -> ViewId {
        let log = self.log.clone();
        self.views.insert_with_key(|id| MockRowView {
            id,
            expanded: false,
            log,
        })
    }

    /// Binds (or rebinds, when recycling) `view` to `row`.
    pub fn bind(&mut self, view: ViewId, row: RowId) {
        self.bindings.retain(|_, bound| *bound != row);
        self.bindings.insert(view, row);
    }

    /// Detaches `view` from any row, as when it scrolls off screen.
    pub fn unbind(&mut self, view: ViewId) {
        self.bindings.remove(&view);
    }

    pub fn view_flag(&self, view: ViewId) -> bool {
        self.views[view].expanded
    }

    /// Forces a view's local flag without logging, to simulate stale state.
    pub fn force_flag(&mut self, view: ViewId, expanded: bool) {
        self.views[view].expanded = expanded;
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.log.borrow().clone()
    }

    pub fn clear_events(&self) {
        self.log.borrow_mut().clear();
    }

    /// The tickets handed to `end_layout_transaction`, in order.
    pub fn layout_tickets(&self) -> Vec<TransitionId> {
        self.log
            .borrow()
            .iter()
            .filter_map(|e| match e {
                HostEvent::EndLayout(t) => Some(*t),
                _ => None,
            })
            .collect()
    }

    /// The content animations requested, in order.
    pub fn content_animations(&self) -> Vec<(ViewId, bool, TransitionId)> {
        self.log
            .borrow()
            .iter()
            .filter_map(|e| match e {
                HostEvent::AnimateContent(v, expanded, t) => Some((*v, *expanded, *t)),
                _ => None,
            })
            .collect()
    }
}

impl HostList for MockList {
    type View = MockRowView;

    fn row_for_view(&self, view: ViewId) -> Option<RowId> {
        self.bindings.get(&view).copied()
    }

    fn view_for_row(&self, row: RowId) -> Option<ViewId> {
        self.bindings
            .iter()
            .find(|(_, bound)| **bound == row)
            .map(|(view, _)| *view)
    }

    fn view_mut(&mut self, view: ViewId) -> Option<&mut MockRowView> {
        self.views.get_mut(view)
    }

    fn begin_layout_transaction(&mut self) {
        assert!(!self.in_layout_transaction, "nested layout transaction");
        self.in_layout_transaction = true;
        self.log.borrow_mut().push(HostEvent::BeginLayout);
    }

    fn end_layout_transaction(&mut self, ticket: TransitionId) {
        assert!(self.in_layout_transaction, "end without begin");
        self.in_layout_transaction = false;
        self.log.borrow_mut().push(HostEvent::EndLayout(ticket));
    }

    fn invalidate_layout(&mut self) {
        self.log.borrow_mut().push(HostEvent::InvalidateLayout);
    }

    fn deselect_row(&mut self, row: RowId, animated: bool) {
        self.log.borrow_mut().push(HostEvent::Deselect(row, animated));
    }
}

/// Routes `tracing` output to the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("lattice_accordion=trace"))
        .with_test_writer()
        .try_init();
}
