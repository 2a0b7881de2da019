//! Canonical lot list plus the sort, search and favorite policies applied to it.
//!
//! [`LotAggregator`] owns the last received snapshot and exposes a derived,
//! ordered, filtered view. The view is computed on read; nothing is re-sorted
//! eagerly, so policy changes are cheap and `view()` can be called on every
//! keystroke of a search box.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use crate::geo::distance_meters;
use crate::ports::PreferenceStore;
use crate::presentation::LotRow;
use crate::types::{Coordinates, LotRecord, SortMode};

pub struct LotAggregator<P> {
    store: P,
    lots: Vec<LotRecord>,
    sort_mode: SortMode,
    favorites: BTreeSet<String>,
    search_query: Option<String>,
}

impl<P: PreferenceStore> LotAggregator<P> {
    /// Create an empty aggregator, reading the persisted sort mode and
    /// favorites from `store`.
    pub fn new(store: P) -> Self {
        let sort_mode = store.sort_mode();
        let favorites = store.favorites();
        tracing::debug!(
            sort_mode = %sort_mode,
            favorites = favorites.len(),
            "loaded list preferences"
        );
        Self {
            store,
            lots: Vec::new(),
            sort_mode,
            favorites,
            search_query: None,
        }
    }

    /// Swap in a freshly fetched snapshot.
    ///
    /// Sort mode, search query and favorites are untouched. Distances from the
    /// previous snapshot are gone with it; the next location update fills
    /// them in again. When a name appears more than once only its first
    /// record is kept.
    pub fn replace_lots(&mut self, records: Vec<LotRecord>) {
        let received = records.len();
        let mut seen = HashSet::with_capacity(received);
        let lots: Vec<LotRecord> = records
            .into_iter()
            .filter(|lot| {
                let fresh = seen.insert(lot.name.clone());
                if !fresh {
                    tracing::warn!(name = %lot.name, "dropping duplicate lot in snapshot");
                }
                fresh
            })
            .collect();
        tracing::info!(received, kept = lots.len(), "replaced lot snapshot");
        self.lots = lots;
    }

    /// Set the distance of every lot with coordinates to the great-circle
    /// distance from the given position, rounded to whole meters.
    ///
    /// Lots without coordinates are skipped. Returns how many lots were
    /// updated.
    pub fn apply_location_update(&mut self, latitude: f64, longitude: f64) -> usize {
        let here = Coordinates::new(latitude, longitude);
        let mut updated = 0;
        for lot in &mut self.lots {
            if let Some(coords) = lot.coordinates {
                lot.distance_meters = Some(distance_meters(here, coords).round());
                updated += 1;
            }
        }
        tracing::debug!(
            latitude,
            longitude,
            updated,
            skipped = self.lots.len() - updated,
            "applied location update"
        );
        updated
    }

    /// Change the ordering policy and persist it.
    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.sort_mode = mode;
        if let Err(err) = self.store.set_sort_mode(mode) {
            tracing::warn!(sort_mode = %mode, error = %err, "failed to persist sort mode");
        }
    }

    /// Restrict the view to lots whose name contains `query`, ignoring case.
    /// `None` and the empty string both clear the filter.
    pub fn set_search_query(&mut self, query: Option<String>) {
        self.search_query = query.filter(|q| !q.is_empty());
    }

    /// Add `name` to the favorites, or remove it if already present, and
    /// persist the result. Returns whether the lot is a favorite afterwards.
    ///
    /// The name does not have to be part of the current snapshot.
    pub fn toggle_favorite(&mut self, name: &str) -> bool {
        let now_favorite = if self.favorites.remove(name) {
            false
        } else {
            self.favorites.insert(name.to_owned());
            true
        };
        tracing::info!(name, favorite = now_favorite, "toggled favorite");
        if let Err(err) = self.store.set_favorites(&self.favorites) {
            tracing::warn!(name, error = %err, "failed to persist favorites");
        }
        now_favorite
    }

    /// The presented list: filtered by the search query, then ordered by the
    /// sort mode. Always a fresh vector; the snapshot itself is not touched.
    #[must_use]
    pub fn view(&self) -> Vec<LotRecord> {
        let mut visible: Vec<LotRecord> = match self.search_query.as_deref() {
            Some(query) => {
                let needle = query.to_lowercase();
                self.lots
                    .iter()
                    .filter(|lot| lot.name.to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            }
            None => self.lots.clone(),
        };

        let mode = self.sort_mode;
        if mode != SortMode::Default {
            // `sort_by` is stable: equal keys keep server order.
            visible.sort_by(|a, b| compare(mode, a, b));
        }
        visible
    }

    /// [`view`](Self::view) paired with the per-row presentation values.
    #[must_use]
    pub fn rows(&self) -> Vec<LotRow> {
        self.view()
            .into_iter()
            .map(|record| {
                let is_favorite = self.is_favorite(&record.name);
                LotRow::new(record, is_favorite, self.sort_mode)
            })
            .collect()
    }

    #[must_use]
    pub fn is_favorite(&self, name: &str) -> bool {
        self.favorites.contains(name)
    }

    #[must_use]
    pub fn favorites(&self) -> &BTreeSet<String> {
        &self.favorites
    }

    #[must_use]
    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    #[must_use]
    pub fn search_query(&self) -> Option<&str> {
        self.search_query.as_deref()
    }

    /// The snapshot in server order.
    #[must_use]
    pub fn lots(&self) -> &[LotRecord] {
        &self.lots
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }

    #[must_use]
    pub fn store(&self) -> &P {
        &self.store
    }
}

fn compare(mode: SortMode, a: &LotRecord, b: &LotRecord) -> Ordering {
    match mode {
        SortMode::Default => Ordering::Equal,
        SortMode::Distance => match (a.distance_meters, b.distance_meters) {
            (Some(da), Some(db)) => da.total_cmp(&db),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.name.cmp(&b.name),
        },
        SortMode::Alphabetical => a.name.cmp(&b.name),
        SortMode::FreeSpaces => b.free_spaces.cmp(&a.free_spaces),
    }
}

#[cfg(test)]
#[path = "aggregator_test.rs"]
mod tests;
