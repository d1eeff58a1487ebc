// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dexview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dexview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! PokeAPI JSON payloads and their conversion into model types.

use serde::Deserialize;

use super::CatalogError;
use crate::model::{CatalogIndexEntry, CatalogListing, EntryDetail, EntryName};

#[derive(Debug, Deserialize)]
pub(crate) struct ListingPayload {
    pub(crate) count: usize,
    #[serde(default)]
    pub(crate) results: Vec<NamedResource>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NamedResource {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PokemonPayload {
    id: u32,
    name: String,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    weight: u32,
    #[serde(default)]
    sprites: SpritesPayload,
    #[serde(default)]
    types: Vec<TypeSlot>,
    #[serde(default)]
    abilities: Vec<AbilitySlot>,
}

#[derive(Debug, Default, Deserialize)]
struct SpritesPayload {
    front_default: Option<String>,
    #[serde(default)]
    other: OtherSprites,
}

#[derive(Debug, Default, Deserialize)]
struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    official_artwork: Option<ArtworkPayload>,
}

#[derive(Debug, Deserialize)]
struct ArtworkPayload {
    front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TypeSlot {
    #[serde(default)]
    slot: u8,
    #[serde(rename = "type")]
    kind: NamedResource,
}

#[derive(Debug, Deserialize)]
struct AbilitySlot {
    ability: NamedResource,
}

fn entry_name(value: String) -> Result<EntryName, CatalogError> {
    EntryName::new(&value).map_err(|source| CatalogError::InvalidName { value, source })
}

impl TryFrom<ListingPayload> for CatalogListing {
    type Error = CatalogError;

    fn try_from(payload: ListingPayload) -> Result<Self, Self::Error> {
        let items = payload
            .results
            .into_iter()
            .map(|resource| Ok(CatalogIndexEntry::new(entry_name(resource.name)?, resource.url)))
            .collect::<Result<Vec<_>, CatalogError>>()?;
        Ok(Self {
            items,
            count: payload.count,
        })
    }
}

impl TryFrom<PokemonPayload> for EntryDetail {
    type Error = CatalogError;

    fn try_from(payload: PokemonPayload) -> Result<Self, Self::Error> {
        let PokemonPayload {
            id,
            name,
            height,
            weight,
            sprites,
            mut types,
            abilities,
        } = payload;

        let artwork_url = sprites
            .other
            .official_artwork
            .and_then(|artwork| artwork.front_default)
            .or(sprites.front_default);

        types.sort_by_key(|slot| slot.slot);

        Ok(Self {
            id,
            name: entry_name(name)?,
            artwork_url,
            types: types.into_iter().map(|slot| slot.kind.name).collect(),
            height,
            weight,
            abilities: abilities.into_iter().map(|slot| slot.ability.name).collect(),
        })
    }
}
