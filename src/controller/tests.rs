// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dexview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dexview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use rstest::rstest;

use super::{
    AppEvent, EventReceiver, EventSender, ListingMode, PageController, PageOutcome, PageView,
};
use crate::model::fixtures::{details_of, numbered_details};
use crate::model::{EntryName, PageLabel, DEFAULT_PAGE_SIZE};
use crate::remote::StaticCatalog;
use crate::ui::StatusKind;

fn controller(catalog: StaticCatalog) -> (PageController<StaticCatalog>, EventReceiver) {
    let (events, rx) = EventSender::channel();
    (PageController::new(Arc::new(catalog), DEFAULT_PAGE_SIZE, events), rx)
}

fn drain(rx: &mut EventReceiver) -> Vec<AppEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn entry_names(view: &PageView) -> Vec<&str> {
    view.entries.iter().map(|entry| entry.name.as_str()).collect()
}

fn rendered(outcome: PageOutcome) -> PageView {
    outcome.into_view().expect("rendered page")
}

#[tokio::test]
async fn first_catalog_page_is_offset_zero_in_order() {
    let (controller, mut rx) = controller(StaticCatalog::new(numbered_details(600)));
    assert_eq!(controller.fetch_total_count().await.unwrap(), 600);

    let view = rendered(controller.load_current_page().await.unwrap());
    let expected = (1..=24).map(|id| format!("entry-{id:04}")).collect::<Vec<_>>();
    assert_eq!(entry_names(&view), expected);
    assert_eq!(view.mode, ListingMode::Catalog);
    assert_eq!(view.pagination.total_pages(), 25);
    assert_eq!(view.pagination.current_page(), 1);
    assert_eq!(view.item_count, 600);

    let events = drain(&mut rx);
    assert_eq!(events, vec![AppEvent::PageLoaded(view)]);
}

#[rstest]
#[case(0, 1)]
#[case(1, 1)]
#[case(7, 7)]
#[case(25, 25)]
#[case(26, 25)]
#[case(1000, 25)]
#[tokio::test]
async fn go_to_page_clamps_into_range(#[case] requested: usize, #[case] expected: usize) {
    let (controller, _rx) = controller(StaticCatalog::new(numbered_details(600)));
    controller.fetch_total_count().await.unwrap();

    let view = rendered(controller.go_to_page(requested).await.unwrap());
    assert_eq!(controller.current_page(), expected);
    assert_eq!(view.pagination.current_page(), expected);
    assert_eq!(view.entries.len(), 24);
}

#[tokio::test]
async fn last_page_holds_the_remainder() {
    let (controller, _rx) = controller(StaticCatalog::new(numbered_details(601)));
    controller.fetch_total_count().await.unwrap();

    let view = rendered(controller.go_to_page(26).await.unwrap());
    assert_eq!(entry_names(&view), vec!["entry-0601"]);
    assert_eq!(view.pagination.target_of(PageLabel::Next), Some(26));
}

#[tokio::test]
async fn search_filters_by_case_insensitive_substring() {
    let (controller, _rx) =
        controller(StaticCatalog::new(details_of(&["charmander", "charizard", "pikachu"])));

    let view = rendered(controller.set_search_term("  CHAR ").await.unwrap());
    assert_eq!(entry_names(&view), vec!["charmander", "charizard"]);
    assert_eq!(view.mode, ListingMode::Filtered);
    assert_eq!(view.term.as_deref(), Some("char"));
    assert_eq!(view.item_count, 2);

    let filter = controller.filter();
    assert!(filter.active);
    assert_eq!(
        filter.matched_names,
        vec![EntryName::new("charmander").unwrap(), EntryName::new("charizard").unwrap()]
    );

    let calls = controller.source().calls();
    assert_eq!(calls.list_all, 1);
    assert_eq!(calls.list_page, 0);
    assert_eq!(calls.get_by_name, 2);
}

#[tokio::test]
async fn later_searches_reuse_the_cached_index() {
    let (controller, _rx) =
        controller(StaticCatalog::new(details_of(&["charmander", "charizard", "pikachu"])));

    controller.set_search_term("char").await.unwrap();
    let view = rendered(controller.set_search_term("pika").await.unwrap());
    assert_eq!(entry_names(&view), vec!["pikachu"]);
    controller.set_search_term("zard").await.unwrap();

    assert_eq!(controller.source().calls().list_all, 1);
    assert!(controller.cached_index().is_some());
}

#[tokio::test]
async fn concurrent_searches_share_one_index_fetch_and_latest_wins() {
    let catalog = StaticCatalog::new(details_of(&["charmander", "charizard", "pikachu"]))
        .with_index_latency(Duration::from_millis(20));
    let (controller, mut rx) = controller(catalog);

    let (first, second) = tokio::join!(
        controller.set_search_term("char"),
        controller.set_search_term("pika")
    );

    assert_eq!(first.unwrap(), PageOutcome::Superseded);
    let view = rendered(second.unwrap());
    assert_eq!(entry_names(&view), vec!["pikachu"]);
    assert_eq!(controller.source().calls().list_all, 1);
    assert_eq!(controller.filter().normalized_term, "pika");

    let loaded = drain(&mut rx)
        .into_iter()
        .filter(|event| matches!(event, AppEvent::PageLoaded(_)))
        .count();
    assert_eq!(loaded, 1);
}

#[tokio::test]
async fn stale_page_load_is_discarded() {
    let catalog =
        StaticCatalog::new(numbered_details(100)).with_latency(Duration::from_millis(10));
    let (controller, mut rx) = controller(catalog);
    controller.fetch_total_count().await.unwrap();

    let (older, newer) = tokio::join!(controller.go_to_page(2), controller.go_to_page(3));

    assert_eq!(older.unwrap(), PageOutcome::Superseded);
    let view = rendered(newer.unwrap());
    assert_eq!(view.pagination.current_page(), 3);
    assert_eq!(view.entries[0].name.as_str(), "entry-0049");

    let events = drain(&mut rx);
    assert_eq!(events, vec![AppEvent::PageLoaded(view)]);
}

#[tokio::test]
async fn zero_matches_yield_a_single_empty_page() {
    let (controller, _rx) =
        controller(StaticCatalog::new(details_of(&["charmander", "charizard", "pikachu"])));

    let view = rendered(controller.set_search_term("zzz").await.unwrap());
    assert!(view.entries.is_empty());
    assert_eq!(view.pagination.total_pages(), 1);
    assert_eq!(
        view.pagination.labels(),
        vec!["First", "Previous", "1", "Next", "Last"]
    );
    let view = rendered(controller.go_to_page(4).await.unwrap());
    assert_eq!(view.pagination.current_page(), 1);
}

#[tokio::test]
async fn one_failing_detail_fails_the_whole_page() {
    let catalog = StaticCatalog::new(numbered_details(30));
    catalog.fail_detail(&EntryName::new("entry-0005").unwrap());
    let (controller, mut rx) = controller(catalog);

    let err = controller.load_current_page().await.unwrap_err();
    assert_eq!(err.page, 1);
    assert!(!err.source.is_not_found());

    let events = drain(&mut rx);
    assert_eq!(events.len(), 2);
    assert!(matches!(&events[0], AppEvent::PageFailed { page: 1, .. }));
    assert!(matches!(&events[1], AppEvent::Status(notice) if notice.kind == StatusKind::Error));
}

#[tokio::test]
async fn failing_listing_is_reported_not_swallowed() {
    let catalog = StaticCatalog::new(numbered_details(30));
    catalog.set_fail_listings(true);
    let (controller, mut rx) = controller(catalog);

    assert!(controller.fetch_total_count().await.is_err());
    assert!(controller.load_current_page().await.is_err());
    assert!(controller.set_search_term("entry").await.is_err());
    assert!(controller.cached_index().is_none());

    let failures = drain(&mut rx)
        .into_iter()
        .filter(|event| matches!(event, AppEvent::PageFailed { .. }))
        .count();
    assert_eq!(failures, 2);
}

#[tokio::test]
async fn clearing_search_returns_to_catalog_page_one() {
    let (controller, _rx) = controller(StaticCatalog::new(numbered_details(100)));
    controller.fetch_total_count().await.unwrap();

    let view = rendered(controller.set_search_term("entry-00").await.unwrap());
    assert_eq!(view.item_count, 99);
    assert_eq!(view.pagination.total_pages(), 5);
    controller.go_to_page(3).await.unwrap();
    assert_eq!(controller.current_page(), 3);

    let view = rendered(controller.set_search_term("   ").await.unwrap());
    assert_eq!(view.mode, ListingMode::Catalog);
    assert_eq!(view.pagination.current_page(), 1);
    assert!(!controller.filter().active);

    let view = rendered(controller.set_search_term("entry-00").await.unwrap());
    assert_eq!(view.pagination.current_page(), 1);
}

#[tokio::test]
async fn unknown_total_count_is_filled_by_the_first_listing() {
    let (controller, _rx) = controller(StaticCatalog::new(numbered_details(100)));
    assert_eq!(controller.total_count(), None);

    let view = rendered(controller.load_current_page().await.unwrap());
    assert_eq!(controller.total_count(), Some(100));
    assert_eq!(view.pagination.total_pages(), 5);
}

#[tokio::test]
async fn unknown_total_count_is_filled_by_the_index() {
    let (controller, _rx) = controller(StaticCatalog::new(numbered_details(100)));

    controller.set_search_term("entry-01").await.unwrap();
    assert_eq!(controller.total_count(), Some(100));
}

#[tokio::test]
async fn page_past_the_end_is_clamped_once_the_listing_reveals_the_size() {
    let (controller, mut rx) = controller(StaticCatalog::new(numbered_details(100)));
    assert_eq!(controller.total_count(), None);

    let view = rendered(controller.go_to_page(1000).await.unwrap());
    assert_eq!(controller.current_page(), 5);
    assert_eq!(view.pagination.current_page(), 5);
    assert_eq!(entry_names(&view), vec!["entry-0097", "entry-0098", "entry-0099", "entry-0100"]);
    assert_eq!(controller.source().calls().list_page, 2);
    assert_eq!(drain(&mut rx), vec![AppEvent::PageLoaded(view)]);
}

#[tokio::test]
async fn search_survives_a_page_change_during_the_index_load() {
    let catalog =
        StaticCatalog::new(numbered_details(100)).with_index_latency(Duration::from_millis(50));
    let (controller, mut rx) = controller(catalog);

    let (search, _) = tokio::join!(controller.set_search_term("entry-000"), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        controller.go_to_page(2).await
    });

    let view = rendered(search.unwrap());
    assert_eq!(view.mode, ListingMode::Filtered);
    assert_eq!(view.item_count, 9);
    assert_eq!(view.pagination.current_page(), 1);

    let filter = controller.filter();
    assert!(filter.active);
    assert_eq!(filter.normalized_term, "entry-000");
    assert_eq!(controller.current_page(), 1);

    let last_loaded = drain(&mut rx).into_iter().rev().find_map(|event| match event {
        AppEvent::PageLoaded(view) => Some(view),
        _ => None,
    });
    assert_eq!(last_loaded, Some(view));
}

#[tokio::test]
async fn tokens_taken_at_issue_time_decide_which_search_wins() {
    let (controller, mut rx) =
        controller(StaticCatalog::new(details_of(&["charmander", "charizard", "pikachu"])));
    let older = controller.begin_search();
    let newer = controller.begin_search();

    let view = rendered(controller.set_search_term_with(newer, "ch").await.unwrap());
    assert_eq!(entry_names(&view), vec!["charmander", "charizard"]);

    let outcome = controller.set_search_term_with(older, "c").await.unwrap();
    assert_eq!(outcome, PageOutcome::Superseded);
    assert_eq!(controller.filter().normalized_term, "ch");
    assert_eq!(drain(&mut rx), vec![AppEvent::PageLoaded(view)]);
}

#[tokio::test]
async fn page_tokens_taken_at_issue_time_decide_which_page_wins() {
    let (controller, mut rx) = controller(StaticCatalog::new(numbered_details(100)));
    controller.fetch_total_count().await.unwrap();
    let older = controller.begin_request();
    let newer = controller.begin_request();

    let view = rendered(controller.go_to_page_with(newer, 3).await.unwrap());
    let outcome = controller.go_to_page_with(older, 2).await.unwrap();

    assert_eq!(outcome, PageOutcome::Superseded);
    assert_eq!(controller.current_page(), 3);
    assert_eq!(drain(&mut rx), vec![AppEvent::PageLoaded(view)]);
}

fn reverse_latency_catalog(count: usize) -> StaticCatalog {
    (1..=count).fold(StaticCatalog::new(numbered_details(count)), |catalog, id| {
        let name = EntryName::new(format!("entry-{id:04}")).unwrap();
        let latency = Duration::from_millis(5 * (count - id) as u64);
        catalog.with_detail_latency(name, latency)
    })
}

#[rstest]
#[case::catalog("")]
#[case::filtered("entry-000")]
#[tokio::test]
async fn pages_keep_listing_order_when_details_arrive_out_of_order(#[case] term: &str) {
    let (controller, _rx) = controller(reverse_latency_catalog(6));

    let view = rendered(controller.set_search_term(term).await.unwrap());
    assert_eq!(
        entry_names(&view),
        vec!["entry-0001", "entry-0002", "entry-0003", "entry-0004", "entry-0005", "entry-0006"]
    );
}
