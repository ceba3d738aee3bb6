// FICHIER : src-core/src/views/home.rs

use super::state::{ViewSlot, ViewState};
use crate::backend::ItemFilter;
use crate::editor::split_tags;
use crate::models::{Collection, Item};
use crate::utils::i18n::Translator;
use crate::utils::VitrineResult;
use crate::AppContext;
use serde::Serialize;
use std::collections::HashSet;

pub const MAX_POPULAR_TAGS: usize = 50;
pub const MAX_LARGEST_COLLECTIONS: usize = 5;

/// Tag et premier item qui le porte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagLink {
    pub tag: String,
    pub item_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatestItem {
    pub id: u64,
    pub name: String,
    pub collection: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionSize {
    pub id: u64,
    pub name: String,
    pub item_count: usize,
}

/// Tags distincts dans l'ordre de première apparition.
pub fn popular_tags(items: &[Item]) -> Vec<TagLink> {
    let mut seen = HashSet::new();
    items
        .iter()
        .flat_map(|item| {
            split_tags(&item.tags)
                .into_iter()
                .map(move |tag| TagLink { tag, item_id: item.id })
        })
        .filter(|link| seen.insert(link.tag.clone()))
        .take(MAX_POPULAR_TAGS)
        .collect()
}

pub fn latest_items(items: &[Item], tr: &Translator) -> Vec<LatestItem> {
    items
        .iter()
        .map(|item| LatestItem {
            id: item.id,
            name: item.name.clone(),
            collection: item
                .collection
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_else(|| tr.t("no_collection")),
            author: item
                .owner
                .user_name
                .clone()
                .unwrap_or_else(|| tr.t("unknown_author")),
        })
        .collect()
}

/// Les plus grosses collections, à égalité l'ordre du backend est gardé.
pub fn largest_collections(collections: &[Collection]) -> Vec<CollectionSize> {
    let mut sizes: Vec<CollectionSize> = collections
        .iter()
        .map(|c| CollectionSize {
            id: c.id,
            name: c.name.clone(),
            item_count: c.item_count,
        })
        .collect();
    sizes.sort_by(|a, b| b.item_count.cmp(&a.item_count));
    sizes.truncate(MAX_LARGEST_COLLECTIONS);
    sizes
}

/// Tableau de bord d'accueil : trois sections chargées indépendamment.
pub struct HomeView {
    pub tags: ViewSlot<Vec<TagLink>>,
    pub latest: ViewSlot<Vec<LatestItem>>,
    pub largest: ViewSlot<Vec<CollectionSize>>,
}

impl HomeView {
    pub fn open(ctx: &AppContext) -> Self {
        let view = Self {
            tags: ViewSlot::new(),
            latest: ViewSlot::new(),
            largest: ViewSlot::new(),
        };

        let backend = ctx.backend.clone();
        view.tags.spawn(async move {
            let items = backend.list_items(ItemFilter::default()).await?;
            VitrineResult::Ok(popular_tags(&items))
        });

        let backend = ctx.backend.clone();
        let tr = ctx.translator.clone();
        view.latest.spawn(async move {
            let items = backend.list_items(ItemFilter::latest()).await?;
            VitrineResult::Ok(latest_items(&items, &tr))
        });

        let backend = ctx.backend.clone();
        view.largest.spawn(async move {
            let collections = backend.list_collections(None).await?;
            VitrineResult::Ok(largest_collections(&collections))
        });

        view
    }

    pub async fn settled(&self) {
        tokio::join!(self.tags.settled(), self.latest.settled(), self.largest.settled());
    }

    pub fn snapshot(
        &self,
    ) -> (
        ViewState<Vec<TagLink>>,
        ViewState<Vec<LatestItem>>,
        ViewState<Vec<CollectionSize>>,
    ) {
        (self.tags.snapshot(), self.latest.snapshot(), self.largest.snapshot())
    }
}
