//! Turn raw feed entries into [`LotRecord`]s that respect the model invariants.

use lotlist_core::types::UNKNOWN_FREE;
use lotlist_core::{Coordinates, LotRecord, LotState};

use crate::types::{RawCoords, RawLot};

/// Normalize a feed snapshot, preserving server order.
///
/// Entries without a usable name are dropped.
#[must_use]
pub fn normalize_lots(raw: Vec<RawLot>) -> Vec<LotRecord> {
    raw.into_iter().filter_map(normalize_lot).collect()
}

fn normalize_lot(raw: RawLot) -> Option<LotRecord> {
    let name = raw.name.trim();
    if name.is_empty() {
        tracing::warn!("skipping lot without a name");
        return None;
    }

    let state = raw
        .state
        .as_deref()
        .map_or(LotState::NoData, LotState::from_feed);

    let total_capacity = raw
        .total
        .map_or(0, |t| u32::try_from(t.max(0)).unwrap_or(u32::MAX));

    // The state wins over a counter that contradicts it.
    let free_spaces = match raw.free {
        _ if state == LotState::NoData => UNKNOWN_FREE,
        Some(f) if f >= 0 => i32::try_from(f).unwrap_or(i32::MAX),
        _ => UNKNOWN_FREE,
    };
    let state = if free_spaces == UNKNOWN_FREE && state == LotState::Open {
        LotState::NoData
    } else {
        state
    };

    let mut lot = LotRecord::new(name, total_capacity, free_spaces, state);
    lot.coordinates = raw
        .coords
        .and_then(valid_coords)
        .map(|c| Coordinates::new(c.lat, c.lng));
    lot.address = raw
        .address
        .map(|a| a.trim().to_owned())
        .filter(|a| !a.is_empty());
    Some(lot)
}

fn valid_coords(c: RawCoords) -> Option<RawCoords> {
    let ok = c.lat.is_finite()
        && c.lng.is_finite()
        && (-90.0..=90.0).contains(&c.lat)
        && (-180.0..=180.0).contains(&c.lng);
    if !ok {
        tracing::debug!(lat = c.lat, lng = c.lng, "discarding out-of-range coordinates");
    }
    ok.then_some(c)
}
