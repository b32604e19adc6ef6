// SPDX-License-Identifier: MPL-2.0
use super::*;
use crate::domain::paging::{Direction, PageBounds, PageSize};
use crate::error::FetchError;

fn controller_at(offset: usize, len: usize, total: usize) -> LightboxController {
    LightboxController::new(PageSize::new(24), PageBounds::new(offset, len, total))
}

fn expect_crossing(transition: Transition) -> FetchRequest {
    match transition {
        Transition::BoundaryCrossing(request) => request,
        other => panic!("expected boundary crossing, got {other:?}"),
    }
}

// -----------------------------------------------------------------------------
// Opening and closing
// -----------------------------------------------------------------------------

#[test]
fn open_translates_local_to_global() {
    let mut controller = controller_at(20, 24, 100);

    let transition = controller.open_lightbox(3);

    assert_eq!(
        transition,
        Transition::Opened {
            global_index: 23,
            local_index: 3
        }
    );
    let snapshot = controller.snapshot();
    assert!(snapshot.is_open);
    assert_eq!(snapshot.global_index, Some(23));
    assert_eq!(snapshot.local_index, Some(3));
    assert!(!snapshot.is_page_transitioning);
}

#[test]
fn open_past_page_end_is_ignored() {
    let mut controller = controller_at(0, 10, 10);

    assert_eq!(
        controller.open_lightbox(10),
        Transition::Ignored(IgnoreReason::OutOfPage { local_index: 10 })
    );
    assert!(!controller.is_open());
}

#[test]
fn closed_controller_ignores_navigation() {
    let mut controller = controller_at(0, 24, 100);

    assert_eq!(controller.next(), Transition::Ignored(IgnoreReason::NotOpen));
    assert_eq!(controller.prev(), Transition::Ignored(IgnoreReason::NotOpen));
    assert_eq!(
        controller.close_lightbox(),
        Transition::Ignored(IgnoreReason::NotOpen)
    );
    assert_eq!(controller.snapshot(), LightboxSnapshot::default());
}

#[test]
fn close_clears_open_state() {
    let mut controller = controller_at(0, 24, 100);
    controller.open_lightbox(5);

    assert_eq!(
        controller.close_lightbox(),
        Transition::Closed {
            had_pending_fetch: false
        }
    );
    assert!(!controller.snapshot().is_open);
    assert_eq!(controller.snapshot().global_index, None);
}

// -----------------------------------------------------------------------------
// In-page navigation
// -----------------------------------------------------------------------------

#[test]
fn next_and_prev_within_page_are_synchronous() {
    let mut controller = controller_at(0, 24, 100);
    controller.open_lightbox(5);

    assert_eq!(
        controller.next(),
        Transition::Moved {
            from: 5,
            to: 6,
            local_index: 6
        }
    );
    assert_eq!(
        controller.prev(),
        Transition::Moved {
            from: 6,
            to: 5,
            local_index: 5
        }
    );
    assert!(!controller.is_page_transitioning());
}

#[test]
fn prev_at_global_zero_is_a_no_op() {
    let mut controller = controller_at(0, 24, 100);
    controller.open_lightbox(0);

    assert_eq!(controller.prev(), Transition::Ignored(IgnoreReason::AtStart));
    assert_eq!(controller.snapshot().global_index, Some(0));
    assert!(!controller.is_page_transitioning());
}

#[test]
fn next_at_last_item_is_a_no_op() {
    let mut controller = controller_at(96, 4, 100);
    controller.open_lightbox(3);

    assert_eq!(controller.next(), Transition::Ignored(IgnoreReason::AtEnd));
    assert_eq!(controller.snapshot().global_index, Some(99));
}

// -----------------------------------------------------------------------------
// Boundary crossings
// -----------------------------------------------------------------------------

#[test]
fn next_past_page_end_requests_exactly_one_fetch() {
    let mut controller = controller_at(0, 24, 100);
    controller.open_lightbox(23);

    let request = expect_crossing(controller.next());
    assert_eq!(request.target_global_index, 24);
    assert_eq!(request.direction, Direction::Forward);
    assert_eq!(request.offset, 24);
    assert_eq!(request.size, 24);
    assert!(controller.is_page_transitioning());

    // Further presses target later items on the same page: no new request.
    for _ in 0..3 {
        assert_eq!(controller.next().fetch_request(), None);
    }
    assert_eq!(controller.live_ticket(), Some(request.ticket));
    assert_eq!(controller.snapshot().global_index, Some(27));
}

#[test]
fn pending_snapshot_keeps_showing_origin() {
    let mut controller = controller_at(0, 24, 100);
    controller.open_lightbox(23);
    controller.next();

    let snapshot = controller.snapshot();
    assert!(snapshot.is_page_transitioning);
    assert_eq!(snapshot.global_index, Some(24));
    assert_eq!(snapshot.local_index, None);
    assert_eq!(snapshot.displayed_local_index, Some(23));
}

#[test]
fn second_next_while_pending_coalesces_to_latest_target() {
    let mut controller = controller_at(0, 24, 100);
    controller.open_lightbox(23);
    let first = expect_crossing(controller.next());

    let second = controller.next();

    assert_eq!(
        second,
        Transition::Coalesced {
            target_global_index: 25,
            request: None
        }
    );
    assert_eq!(controller.live_ticket(), Some(first.ticket));

    let resolution = controller.resolve_fetch(first.ticket, PageBounds::new(24, 24, 100));
    assert_eq!(
        resolution,
        FetchResolution::Applied {
            global_index: 25,
            local_index: 1,
            clamped_from: None
        }
    );
}

#[test]
fn successful_fetch_clears_transition_flag() {
    let mut controller = controller_at(0, 24, 100);
    controller.open_lightbox(23);
    let request = expect_crossing(controller.next());

    let resolution = controller.resolve_fetch(request.ticket, PageBounds::new(24, 24, 100));

    assert!(resolution.installs_page());
    let snapshot = controller.snapshot();
    assert!(!snapshot.is_page_transitioning);
    assert_eq!(snapshot.global_index, Some(24));
    assert_eq!(snapshot.local_index, Some(0));
    assert_eq!(controller.window(), PageBounds::new(24, 24, 100));
}

#[test]
fn prev_past_page_start_fetches_previous_page() {
    let mut controller = controller_at(24, 24, 100);
    controller.open_lightbox(0);

    let request = expect_crossing(controller.prev());
    assert_eq!(request.target_global_index, 23);
    assert_eq!(request.direction, Direction::Backward);
    assert_eq!(request.offset, 0);

    controller.resolve_fetch(request.ticket, PageBounds::new(0, 24, 100));
    assert_eq!(controller.snapshot().local_index, Some(23));
}

#[test]
fn stepping_back_onto_loaded_page_abandons_fetch() {
    let mut controller = controller_at(0, 24, 100);
    controller.open_lightbox(23);
    let request = expect_crossing(controller.next());

    assert_eq!(
        controller.prev(),
        Transition::Moved {
            from: 23,
            to: 23,
            local_index: 23
        }
    );
    assert!(!controller.is_page_transitioning());

    // The abandoned request completes later and is dropped.
    assert_eq!(
        controller.resolve_fetch(request.ticket, PageBounds::new(24, 24, 100)),
        FetchResolution::Discarded
    );
    assert_eq!(controller.window(), PageBounds::new(0, 24, 100));
}

#[test]
fn coalescing_across_pages_supersedes_the_in_flight_request() {
    let mut controller = LightboxController::new(PageSize::new(2), PageBounds::new(0, 2, 10));
    controller.open_lightbox(1);
    let first = expect_crossing(controller.next()); // target 2, page 2
    controller.next(); // target 3, same page

    let Transition::Coalesced {
        target_global_index,
        request: Some(second),
    } = controller.next()
    else {
        panic!("target 4 needs page 4");
    };
    assert_eq!(target_global_index, 4);
    assert_eq!(second.offset, 4);
    assert_ne!(first.ticket, second.ticket);

    assert_eq!(
        controller.resolve_fetch(first.ticket, PageBounds::new(2, 2, 10)),
        FetchResolution::Discarded
    );
    assert!(controller.is_page_transitioning());

    assert_eq!(
        controller.resolve_fetch(second.ticket, PageBounds::new(4, 2, 10)),
        FetchResolution::Applied {
            global_index: 4,
            local_index: 0,
            clamped_from: None
        }
    );
}

// -----------------------------------------------------------------------------
// Failure and close during fetch
// -----------------------------------------------------------------------------

#[test]
fn rejected_fetch_reverts_to_pre_crossing_index() {
    let mut controller = controller_at(0, 24, 100);
    controller.open_lightbox(23);
    let request = expect_crossing(controller.next());
    controller.next();

    let resolution =
        controller.reject_fetch(request.ticket, FetchError::Network("timeout".into()));

    assert_eq!(
        resolution,
        FetchResolution::Reverted {
            global_index: 23,
            error: FetchError::Network("timeout".into())
        }
    );
    assert_eq!(controller.state(), LightboxState::Open { global_index: 23 });
    assert!(!controller.is_page_transitioning());
}

#[test]
fn failure_is_not_retried() {
    let mut controller = controller_at(0, 24, 100);
    controller.open_lightbox(23);
    let request = expect_crossing(controller.next());
    controller.reject_fetch(request.ticket, FetchError::Cancelled);

    assert_eq!(controller.live_ticket(), None);

    // A fresh press starts a fresh request with a new ticket.
    let retry = expect_crossing(controller.next());
    assert_ne!(retry.ticket, request.ticket);
}

#[test]
fn close_during_fetch_discards_the_result() {
    let mut controller = controller_at(0, 24, 100);
    controller.open_lightbox(23);
    let request = expect_crossing(controller.next());

    assert_eq!(
        controller.close_lightbox(),
        Transition::Closed {
            had_pending_fetch: true
        }
    );
    assert_eq!(
        controller.resolve_fetch(request.ticket, PageBounds::new(24, 24, 100)),
        FetchResolution::Discarded
    );
    assert_eq!(
        controller.reject_fetch(request.ticket, FetchError::Cancelled),
        FetchResolution::Discarded
    );
    assert!(!controller.is_open());
}

#[test]
fn reopen_then_old_completion_is_discarded() {
    let mut controller = controller_at(0, 24, 100);
    controller.open_lightbox(23);
    let request = expect_crossing(controller.next());
    controller.close_lightbox();
    controller.open_lightbox(2);

    assert_eq!(
        controller.resolve_fetch(request.ticket, PageBounds::new(24, 24, 100)),
        FetchResolution::Discarded
    );
    assert_eq!(controller.snapshot().global_index, Some(2));
}

#[test]
fn page_that_misses_the_target_reverts() {
    let mut controller = controller_at(0, 24, 100);
    controller.open_lightbox(23);
    let request = expect_crossing(controller.next());

    let resolution = controller.resolve_fetch(request.ticket, PageBounds::new(48, 24, 100));

    assert!(matches!(
        resolution,
        FetchResolution::Reverted {
            global_index: 23,
            error: FetchError::Rejected(_)
        }
    ));
    assert!(!resolution.installs_page());
}

// -----------------------------------------------------------------------------
// Dataset shrinking under the viewer
// -----------------------------------------------------------------------------

#[test]
fn shrunk_dataset_clamps_onto_fetched_page() {
    let mut controller = controller_at(0, 24, 100);
    controller.open_lightbox(23);
    let request = expect_crossing(controller.next());
    controller.next();
    controller.next(); // target 26

    let resolution = controller.resolve_fetch(request.ticket, PageBounds::new(24, 1, 25));

    assert_eq!(
        resolution,
        FetchResolution::Applied {
            global_index: 24,
            local_index: 0,
            clamped_from: Some(26)
        }
    );
}

#[test]
fn shrunk_dataset_settles_on_loaded_page() {
    let mut controller = controller_at(0, 24, 100);
    controller.open_lightbox(23);
    let request = expect_crossing(controller.next());

    let resolution = controller.resolve_fetch(request.ticket, PageBounds::new(24, 0, 20));

    assert_eq!(
        resolution,
        FetchResolution::Settled {
            global_index: 19,
            local_index: 19,
            clamped_from: 24
        }
    );
    assert!(!resolution.installs_page());
    assert_eq!(controller.window(), PageBounds::new(0, 20, 20));
}

#[test]
fn shrunk_dataset_refetches_page_holding_clamped_index() {
    let mut controller = controller_at(48, 24, 100);
    controller.open_lightbox(23); // global 71
    let request = expect_crossing(controller.next()); // page 72

    // Everything from index 30 on was deleted.
    let resolution = controller.resolve_fetch(request.ticket, PageBounds::new(72, 0, 30));

    let FetchResolution::Refetch(refetch) = resolution else {
        panic!("expected refetch, got {resolution:?}");
    };
    assert_eq!(refetch.target_global_index, 29);
    assert_eq!(refetch.offset, 24);
    assert_eq!(refetch.direction, Direction::Backward);
    assert!(controller.is_page_transitioning());

    controller.resolve_fetch(refetch.ticket, PageBounds::new(24, 6, 30));
    assert_eq!(controller.snapshot().global_index, Some(29));
    assert_eq!(controller.snapshot().local_index, Some(5));
}

#[test]
fn empty_dataset_closes_viewer() {
    let mut controller = controller_at(0, 24, 100);
    controller.open_lightbox(23);
    let request = expect_crossing(controller.next());

    let resolution = controller.resolve_fetch(request.ticket, PageBounds::new(24, 0, 0));

    assert_eq!(resolution, FetchResolution::ClosedEmpty);
    assert!(resolution.installs_page());
    assert!(!controller.is_open());
}

// -----------------------------------------------------------------------------
// Host page replacement
// -----------------------------------------------------------------------------

#[test]
fn sync_page_while_closed_only_moves_window() {
    let mut controller = controller_at(0, 24, 100);

    assert_eq!(
        controller.sync_page(PageBounds::new(48, 24, 100)),
        Transition::Ignored(IgnoreReason::NotOpen)
    );
    assert_eq!(controller.window().offset, 48);
    assert_eq!(
        controller.open_lightbox(0),
        Transition::Opened {
            global_index: 48,
            local_index: 0
        }
    );
}

#[test]
fn sync_page_that_still_holds_index_resyncs() {
    let mut controller = controller_at(0, 24, 100);
    controller.open_lightbox(10);

    assert_eq!(
        controller.sync_page(PageBounds::new(0, 24, 90)),
        Transition::Resynced {
            global_index: 10,
            local_index: 10,
            clamped_from: None
        }
    );
}

#[test]
fn sync_page_away_from_open_index_requests_it_back() {
    let mut controller = controller_at(0, 24, 100);
    controller.open_lightbox(10);

    let request = expect_crossing(controller.sync_page(PageBounds::new(48, 24, 100)));

    assert_eq!(request.target_global_index, 10);
    assert_eq!(request.offset, 0);
    assert_eq!(request.direction, Direction::Backward);

    // Nothing on the new page is the item the viewer was showing.
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.global_index, Some(10));
    assert_eq!(snapshot.displayed_local_index, None);
    assert!(snapshot.is_page_transitioning);

    // On failure the viewer falls back onto the page now loaded.
    let resolution = controller.reject_fetch(request.ticket, FetchError::Cancelled);
    assert_eq!(
        resolution,
        FetchResolution::Reverted {
            global_index: 48,
            error: FetchError::Cancelled
        }
    );
}

#[test]
fn sync_page_containing_pending_target_applies_it() {
    let mut controller = controller_at(0, 24, 100);
    controller.open_lightbox(23);
    let request = expect_crossing(controller.next());

    assert_eq!(
        controller.sync_page(PageBounds::new(24, 24, 100)),
        Transition::Resynced {
            global_index: 24,
            local_index: 0,
            clamped_from: None
        }
    );
    assert_eq!(
        controller.resolve_fetch(request.ticket, PageBounds::new(24, 24, 100)),
        FetchResolution::Discarded
    );
}

#[test]
fn sync_page_with_fewer_items_clamps_open_index() {
    let mut controller = controller_at(0, 24, 24);
    controller.open_lightbox(23);

    assert_eq!(
        controller.sync_page(PageBounds::new(0, 23, 23)),
        Transition::Resynced {
            global_index: 22,
            local_index: 22,
            clamped_from: Some(23)
        }
    );
}

#[test]
fn sync_page_to_empty_dataset_closes() {
    let mut controller = controller_at(0, 24, 24);
    controller.open_lightbox(4);

    assert_eq!(
        controller.sync_page(PageBounds::new(0, 0, 0)),
        Transition::Closed {
            had_pending_fetch: false
        }
    );
}
