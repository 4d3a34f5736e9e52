//! Toggles that arrive while a row is still animating.

mod common;

use common::MockList;
use lattice_accordion::{AccordionConfig, AccordionController, ReentrancyPolicy, RowId, RowPhase};

fn controller(policy: ReentrancyPolicy) -> AccordionController {
    AccordionController::with_config(AccordionConfig::default().with_reentrancy(policy))
}

#[test]
fn test_ignore_drops_second_toggle() {
    let mut list = MockList::new();
    let mut accordion = controller(ReentrancyPolicy::Ignore);
    let view = list.spawn_view();
    list.bind(view, RowId::flat(0));

    accordion.toggle(&mut list, view, true);
    accordion.toggle(&mut list, view, true);

    assert_eq!(list.layout_tickets().len(), 1);
    let ticket = list.layout_tickets()[0];
    accordion.layout_finished(&mut list, ticket);
    accordion.content_finished(&mut list, ticket);

    assert_eq!(accordion.row_phase(RowId::flat(0)), RowPhase::Expanded);
    assert_eq!(list.content_animations().len(), 1);
}

#[test]
fn test_queue_replays_after_completion() {
    let mut list = MockList::new();
    let mut accordion = controller(ReentrancyPolicy::Queue);
    let row = RowId::flat(1);
    let view = list.spawn_view();
    list.bind(view, row);

    accordion.toggle(&mut list, view, true);
    accordion.toggle(&mut list, view, true);
    // A third toggle while one is queued is dropped.
    accordion.toggle(&mut list, view, false);
    assert_eq!(accordion.pending_transition(row).unwrap().queued_toggle, Some(true));

    let expand = list.layout_tickets()[0];
    accordion.layout_finished(&mut list, expand);
    accordion.content_finished(&mut list, expand);

    // The queued toggle started an animated collapse.
    assert_eq!(accordion.row_phase(row), RowPhase::Collapsing);
    let animations = list.content_animations();
    assert_eq!(animations.len(), 2);
    let (_, expanded, collapse) = animations[1];
    assert!(!expanded);
    assert_ne!(collapse, expand);

    accordion.content_finished(&mut list, collapse);
    accordion.layout_finished(&mut list, collapse);
    assert_eq!(accordion.row_phase(row), RowPhase::Collapsed);
}

#[test]
fn test_queue_applies_immediately_when_row_offscreen() {
    let mut list = MockList::new();
    let mut accordion = controller(ReentrancyPolicy::Queue);
    let row = RowId::flat(2);
    let view = list.spawn_view();
    list.bind(view, row);

    accordion.toggle(&mut list, view, true);
    accordion.toggle(&mut list, view, true);
    let ticket = list.layout_tickets()[0];

    list.unbind(view);
    accordion.layout_finished(&mut list, ticket);

    assert_eq!(accordion.row_phase(row), RowPhase::Collapsed);
    assert_eq!(accordion.in_flight_count(), 0);
}

#[test]
fn test_last_write_wins_supersedes_ticket() {
    let mut list = MockList::new();
    let mut accordion = controller(ReentrancyPolicy::LastWriteWins);
    let row = RowId::flat(3);
    let view = list.spawn_view();
    list.bind(view, row);

    accordion.toggle(&mut list, view, true);
    let first = list.layout_tickets()[0];
    assert!(!list.view_flag(view), "content not revealed yet");

    // The row is already a member, so the new toggle collapses it even though
    // the view flag still reads collapsed.
    accordion.toggle(&mut list, view, true);
    assert_eq!(accordion.row_phase(row), RowPhase::Collapsing);
    let animations = list.content_animations();
    assert_eq!(animations.len(), 1);
    let (_, expanded, second) = animations[0];
    assert!(!expanded);
    assert_ne!(second, first);

    accordion.layout_finished(&mut list, first);
    assert_eq!(accordion.row_phase(row), RowPhase::Collapsing, "superseded ticket is stale");

    accordion.content_finished(&mut list, second);
    accordion.layout_finished(&mut list, second);
    assert_eq!(accordion.row_phase(row), RowPhase::Collapsed);
    assert!(accordion.state().is_empty());
    assert!(!list.view_flag(view));
}

#[test]
fn test_last_write_wins_reverses_collapse_awaiting_layout() {
    let mut list = MockList::new();
    let mut accordion = controller(ReentrancyPolicy::LastWriteWins);
    let row = RowId::flat(4);
    let view = list.spawn_view();
    list.bind(view, row);
    accordion.restore_expanded([row]);
    accordion.on_will_display(&mut list, view, row);

    accordion.toggle(&mut list, view, true);
    let collapse = list.content_animations()[0].2;
    accordion.content_finished(&mut list, collapse);
    assert!(!accordion.is_expanded(row));

    // Membership is already gone, so the superseding toggle expands.
    accordion.toggle(&mut list, view, true);
    assert_eq!(accordion.row_phase(row), RowPhase::Expanding);
    assert!(accordion.is_expanded(row));

    let expand = *list.layout_tickets().last().unwrap();
    assert_ne!(expand, collapse);
    accordion.layout_finished(&mut list, expand);
    accordion.content_finished(&mut list, expand);
    assert_eq!(accordion.row_phase(row), RowPhase::Expanded);
    assert!(list.view_flag(view));
}

#[test]
fn test_other_rows_are_independent() {
    let mut list = MockList::new();
    let mut accordion = controller(ReentrancyPolicy::Ignore);
    let a = list.spawn_view();
    let b = list.spawn_view();
    list.bind(a, RowId::flat(0));
    list.bind(b, RowId::flat(1));

    accordion.toggle(&mut list, a, true);
    accordion.toggle(&mut list, b, true);
    assert_eq!(accordion.in_flight_count(), 2);

    let tickets = list.layout_tickets();
    accordion.layout_finished(&mut list, tickets[1]);
    accordion.content_finished(&mut list, tickets[1]);
    assert_eq!(accordion.row_phase(RowId::flat(1)), RowPhase::Expanded);
    assert_eq!(accordion.row_phase(RowId::flat(0)), RowPhase::Expanding);
}

#[test]
fn test_selection_respects_config() {
    let mut list = MockList::new();
    let mut accordion = AccordionController::with_config(AccordionConfig {
        animate_selection: false,
        deselect_animated: false,
        ..AccordionConfig::default()
    });
    let row = RowId::new(1, 4);
    let view = list.spawn_view();
    list.bind(view, row);

    accordion.on_row_selected(&mut list, view, row);

    assert!(accordion.is_expanded(row));
    assert_eq!(accordion.in_flight_count(), 0);
    assert!(list.events().contains(&common::HostEvent::Deselect(row, false)));
}
