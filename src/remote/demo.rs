// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dexview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dexview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! An in-memory catalog.
//!
//! Backs `--demo` (a browsable offline catalog of the first 151 species) and doubles as the
//! fake source for controller tests: it counts calls, can add latency, and can be told to fail.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use super::{CatalogError, CatalogSource};
use crate::model::{CatalogIndexEntry, CatalogListing, EntryDetail, EntryName};

const DEMO_NAMES: [&str; 151] = [
    "bulbasaur", "ivysaur", "venusaur", "charmander", "charmeleon", "charizard", "squirtle",
    "wartortle", "blastoise", "caterpie", "metapod", "butterfree", "weedle", "kakuna",
    "beedrill", "pidgey", "pidgeotto", "pidgeot", "rattata", "raticate", "spearow", "fearow",
    "ekans", "arbok", "pikachu", "raichu", "sandshrew", "sandslash", "nidoran-f", "nidorina",
    "nidoqueen", "nidoran-m", "nidorino", "nidoking", "clefairy", "clefable", "vulpix",
    "ninetales", "jigglypuff", "wigglytuff", "zubat", "golbat", "oddish", "gloom", "vileplume",
    "paras", "parasect", "venonat", "venomoth", "diglett", "dugtrio", "meowth", "persian",
    "psyduck", "golduck", "mankey", "primeape", "growlithe", "arcanine", "poliwag",
    "poliwhirl", "poliwrath", "abra", "kadabra", "alakazam", "machop", "machoke", "machamp",
    "bellsprout", "weepinbell", "victreebel", "tentacool", "tentacruel", "geodude", "graveler",
    "golem", "ponyta", "rapidash", "slowpoke", "slowbro", "magnemite", "magneton", "farfetchd",
    "doduo", "dodrio", "seel", "dewgong", "grimer", "muk", "shellder", "cloyster", "gastly",
    "haunter", "gengar", "onix", "drowzee", "hypno", "krabby", "kingler", "voltorb",
    "electrode", "exeggcute", "exeggutor", "cubone", "marowak", "hitmonlee", "hitmonchan",
    "lickitung", "koffing", "weezing", "rhyhorn", "rhydon", "chansey", "tangela", "kangaskhan",
    "horsea", "seadra", "goldeen", "seaking", "staryu", "starmie", "mr-mime", "scyther", "jynx",
    "electabuzz", "magmar", "pinsir", "tauros", "magikarp", "gyarados", "lapras", "ditto",
    "eevee", "vaporeon", "jolteon", "flareon", "porygon", "omanyte", "omastar", "kabuto",
    "kabutops", "aerodactyl", "snorlax", "articuno", "zapdos", "moltres", "dratini",
    "dragonair", "dragonite", "mewtwo", "mew",
];

const DEMO_TYPES: [&str; 9] = [
    "grass", "fire", "water", "bug", "normal", "electric", "ground", "psychic", "rock",
];

const DEMO_ABILITIES: [&str; 6] = [
    "overgrow", "blaze", "torrent", "shield-dust", "keen-eye", "static",
];

const OFFICIAL_ARTWORK_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";

/// Number of calls a [`StaticCatalog`] has served, per operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub list_page: usize,
    pub list_all: usize,
    pub get_by_name: usize,
}

#[derive(Debug, Default)]
struct Counters {
    list_page: AtomicUsize,
    list_all: AtomicUsize,
    get_by_name: AtomicUsize,
}

#[derive(Debug)]
pub struct StaticCatalog {
    index: Vec<CatalogIndexEntry>,
    details: HashMap<EntryName, EntryDetail>,
    latency: Duration,
    index_latency: Duration,
    detail_latency: HashMap<EntryName, Duration>,
    fail_listings: AtomicBool,
    failing_details: Mutex<HashSet<EntryName>>,
    counters: Counters,
}

impl StaticCatalog {
    /// A catalog holding `details`, listed in the given order.
    pub fn new(details: Vec<EntryDetail>) -> Self {
        let index = details
            .iter()
            .map(|detail| {
                CatalogIndexEntry::new(detail.name.clone(), format!("demo://pokemon/{}", detail.id))
            })
            .collect();
        let details = details
            .into_iter()
            .map(|detail| (detail.name.clone(), detail))
            .collect();

        Self {
            index,
            details,
            latency: Duration::ZERO,
            index_latency: Duration::ZERO,
            detail_latency: HashMap::new(),
            fail_listings: AtomicBool::new(false),
            failing_details: Mutex::new(HashSet::new()),
            counters: Counters::default(),
        }
    }

    /// The offline catalog used by `--demo`.
    pub fn demo() -> Self {
        let details = DEMO_NAMES
            .iter()
            .enumerate()
            .filter_map(|(idx, name)| Some(demo_detail(idx, EntryName::new(name).ok()?)))
            .collect();
        Self::new(details)
    }

    /// Delays every call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Delays full-index listings by `latency` (on top of the per-call latency).
    pub fn with_index_latency(mut self, latency: Duration) -> Self {
        self.index_latency = latency;
        self
    }

    /// Delays detail lookups of `name` by `latency` (on top of the per-call latency).
    pub fn with_detail_latency(mut self, name: EntryName, latency: Duration) -> Self {
        self.detail_latency.insert(name, latency);
        self
    }

    pub fn set_fail_listings(&self, fail: bool) {
        self.fail_listings.store(fail, Ordering::SeqCst);
    }

    pub fn fail_detail(&self, name: &EntryName) {
        self.failing_details
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.clone());
    }

    pub fn calls(&self) -> CallCounts {
        CallCounts {
            list_page: self.counters.list_page.load(Ordering::SeqCst),
            list_all: self.counters.list_all.load(Ordering::SeqCst),
            get_by_name: self.counters.get_by_name.load(Ordering::SeqCst),
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    async fn delay(&self, extra: Duration) {
        let total = self.latency + extra;
        if !total.is_zero() {
            tokio::time::sleep(total).await;
        }
    }

    fn check_listings(&self) -> Result<(), CatalogError> {
        if self.fail_listings.load(Ordering::SeqCst) {
            return Err(CatalogError::Unavailable("catalog listing unavailable".to_owned()));
        }
        Ok(())
    }
}

impl CatalogSource for StaticCatalog {
    async fn list_page(&self, offset: usize, limit: usize) -> Result<CatalogListing, CatalogError> {
        self.counters.list_page.fetch_add(1, Ordering::SeqCst);
        self.delay(Duration::ZERO).await;
        self.check_listings()?;

        let items = self.index.iter().skip(offset).take(limit).cloned().collect();
        Ok(CatalogListing {
            items,
            count: self.index.len(),
        })
    }

    async fn list_all(&self) -> Result<CatalogListing, CatalogError> {
        self.counters.list_all.fetch_add(1, Ordering::SeqCst);
        self.delay(self.index_latency).await;
        self.check_listings()?;

        Ok(CatalogListing {
            items: self.index.clone(),
            count: self.index.len(),
        })
    }

    async fn get_by_name(&self, name: &EntryName) -> Result<EntryDetail, CatalogError> {
        self.counters.get_by_name.fetch_add(1, Ordering::SeqCst);
        self.delay(self.detail_latency.get(name).copied().unwrap_or_default()).await;

        let failing = self
            .failing_details
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(name);
        if failing {
            return Err(CatalogError::Unavailable(format!("detail for {name} unavailable")));
        }

        self.details
            .get(name)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound {
                name: name.to_string(),
            })
    }
}

fn demo_detail(idx: usize, name: EntryName) -> EntryDetail {
    let id = idx as u32 + 1;
    let mut types = vec![DEMO_TYPES[idx % DEMO_TYPES.len()].to_owned()];
    if idx % 3 == 0 {
        types.push(DEMO_TYPES[(idx / 3 + 4) % DEMO_TYPES.len()].to_owned());
        types.dedup();
    }

    EntryDetail {
        id,
        name,
        artwork_url: Some(format!("{OFFICIAL_ARTWORK_BASE}/{id}.png")),
        types,
        height: 3 + (id * 7) % 40,
        weight: 20 + (id * 37) % 1200,
        abilities: vec![DEMO_ABILITIES[idx % DEMO_ABILITIES.len()].to_owned()],
    }
}

#[cfg(test)]
mod tests {
    use super::StaticCatalog;
    use crate::model::EntryName;
    use crate::remote::CatalogSource;

    #[tokio::test]
    async fn demo_catalog_lists_pages_in_order() {
        let catalog = StaticCatalog::demo();
        assert_eq!(catalog.len(), 151);

        let page = catalog.list_page(24, 3).await.unwrap();
        let names = page.items.iter().map(|e| e.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["pikachu", "raichu", "sandshrew"]);
        assert_eq!(page.count, 151);
    }

    #[tokio::test]
    async fn unknown_name_is_not_found_and_counted() {
        let catalog = StaticCatalog::demo();
        let err = catalog
            .get_by_name(&EntryName::new("missingno-typo").unwrap())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(catalog.calls().get_by_name, 1);
    }

    #[tokio::test]
    async fn injected_failures_surface_as_errors() {
        let catalog = StaticCatalog::demo();
        catalog.set_fail_listings(true);
        assert!(catalog.list_all().await.is_err());

        let pikachu = EntryName::new("pikachu").unwrap();
        catalog.fail_detail(&pikachu);
        let err = catalog.get_by_name(&pikachu).await.unwrap_err();
        assert!(!err.is_not_found());
    }
}
