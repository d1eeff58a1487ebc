// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dexview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dexview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Runs the PokeAPI client against a local server that serves PokeAPI-shaped JSON.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use dexview::controller::{EventSender, ListingMode, PageController};
use dexview::model::{CatalogIndexEntry, EntryName, PageSize};
use dexview::remote::{CatalogError, CatalogSource, ClientConfig, PokeApiClient};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::{json, Value};

const SPECIES: &[(u32, &str, &[&str], &str)] = &[
    (1, "bulbasaur", &["grass", "poison"], "overgrow"),
    (4, "charmander", &["fire"], "blaze"),
    (6, "charizard", &["fire", "flying"], "blaze"),
    (25, "pikachu", &["electric"], "static"),
];

#[derive(Clone)]
struct FakeApi {
    base: String,
    detail_hits: Arc<AtomicUsize>,
}

#[derive(Deserialize)]
struct ListQuery {
    limit: Option<usize>,
    offset: Option<usize>,
}

async fn list_species(State(api): State<FakeApi>, Query(query): Query<ListQuery>) -> Json<Value> {
    let offset = query.offset.unwrap_or(0);
    let limit = query.limit.unwrap_or(20);
    let results = SPECIES
        .iter()
        .skip(offset)
        .take(limit)
        .map(|(id, name, _, _)| json!({ "name": name, "url": format!("{}/{id}", api.base) }))
        .collect::<Vec<_>>();
    Json(json!({ "count": SPECIES.len(), "results": results }))
}

async fn species_detail(
    State(api): State<FakeApi>,
    Path(key): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    api.detail_hits.fetch_add(1, Ordering::SeqCst);
    let (id, name, types, ability) = SPECIES
        .iter()
        .find(|(id, name, _, _)| *name == key || id.to_string() == key)
        .ok_or(StatusCode::NOT_FOUND)?;

    let types = types
        .iter()
        .enumerate()
        .rev()
        .map(|(idx, kind)| json!({ "slot": idx + 1, "type": { "name": kind, "url": "" } }))
        .collect::<Vec<_>>();
    Ok(Json(json!({
        "id": id,
        "name": name,
        "height": 7,
        "weight": 69,
        "sprites": {
            "front_default": format!("https://img.invalid/sprite/{id}.png"),
            "other": { "official-artwork": { "front_default": format!("https://img.invalid/art/{id}.png") } }
        },
        "types": types,
        "abilities": [{ "ability": { "name": ability, "url": "" } }],
    })))
}

async fn broken() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn spawn_fake_api() -> FakeApi {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0))
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let api = FakeApi {
        base: format!("http://{addr}/api/v2/pokemon"),
        detail_hits: Arc::new(AtomicUsize::new(0)),
    };

    let router = Router::new()
        .route("/api/v2/pokemon", get(list_species))
        .route("/api/v2/pokemon/{key}", get(species_detail))
        .route("/broken", get(broken))
        .with_state(api.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    api
}

fn client(api_url: &str) -> PokeApiClient {
    PokeApiClient::new(ClientConfig {
        api_url: api_url.to_owned(),
        ..ClientConfig::default()
    })
    .expect("client")
}

fn name(value: &str) -> EntryName {
    EntryName::new(value).expect("entry name")
}

#[tokio::test]
async fn lists_a_page_with_total_count() {
    let api = spawn_fake_api().await;
    let listing = client(&api.base).list_page(1, 2).await.expect("list page");

    assert_eq!(listing.count, 4);
    assert_eq!(
        listing.items,
        vec![
            CatalogIndexEntry::new(name("charmander"), format!("{}/4", api.base)),
            CatalogIndexEntry::new(name("charizard"), format!("{}/6", api.base)),
        ]
    );
}

#[tokio::test]
async fn lists_the_whole_index() {
    let api = spawn_fake_api().await;
    let listing = client(&api.base).list_all().await.expect("list all");
    let names = listing.items.iter().map(|e| e.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["bulbasaur", "charmander", "charizard", "pikachu"]);
}

#[tokio::test]
async fn fetches_detail_by_name() {
    let api = spawn_fake_api().await;
    let detail = client(&api.base)
        .get_by_name(&name("Bulbasaur"))
        .await
        .expect("detail");

    assert_eq!(detail.id, 1);
    assert_eq!(detail.name, name("bulbasaur"));
    assert_eq!(detail.types, vec!["grass", "poison"]);
    assert_eq!(detail.abilities, vec!["overgrow"]);
    assert_eq!(detail.artwork_url.as_deref(), Some("https://img.invalid/art/1.png"));
    assert_eq!(detail.height_metres(), 0.7);
}

#[tokio::test]
async fn unknown_name_is_not_found() {
    let api = spawn_fake_api().await;
    let err = client(&api.base)
        .get_by_name(&name("missingno-typo"))
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "unexpected error: {err}");
}

#[tokio::test]
async fn follows_listing_references() {
    let api = spawn_fake_api().await;
    let entry = CatalogIndexEntry::new(name("pikachu"), format!("{}/25", api.base));
    let detail = client(&api.base).get_by_ref(&entry).await.expect("detail");
    assert_eq!(detail.id, 25);
    assert_eq!(api.detail_hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn listing_failure_reports_the_status() {
    let api = spawn_fake_api().await;
    let broken = api.base.replace("/api/v2/pokemon", "/broken");
    let err = client(&broken).list_page(0, 1).await.unwrap_err();
    match err {
        CatalogError::Status { status, .. } => assert_eq!(status.as_u16(), 500),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn controller_pages_and_filters_over_http() {
    let api = spawn_fake_api().await;
    let page_size = PageSize::new(3).expect("page size");
    let controller = PageController::new(
        Arc::new(client(&api.base)),
        page_size,
        EventSender::disconnected(),
    );

    assert_eq!(controller.fetch_total_count().await.expect("count"), 4);
    let view = controller
        .go_to_page(2)
        .await
        .expect("page 2")
        .into_view()
        .expect("rendered");
    assert_eq!(view.mode, ListingMode::Catalog);
    assert_eq!(view.pagination.total_pages(), 2);
    let names = view.entries.iter().map(|e| e.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["pikachu"]);

    let view = controller
        .set_search_term("CHAR")
        .await
        .expect("search")
        .into_view()
        .expect("rendered");
    let names = view.entries.iter().map(|e| e.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["charmander", "charizard"]);
    assert_eq!(view.pagination.current_page(), 1);
}
