//! Per-row values a presentation layer shows next to each lot.
//!
//! The arithmetic lives here so every frontend renders the same load and
//! distance figures; wording and localization stay with the frontend.

use crate::types::{LotRecord, LotState, SortMode};

impl LotRecord {
    /// Share of occupied spaces, in percent.
    ///
    /// A feed reporting more free spaces than the capacity clamps to 0, even
    /// for a full lot. Otherwise a full lot reports 100. `None` when the free
    /// count is unknown or the capacity is zero and the lot is not full.
    #[must_use]
    pub fn occupancy_percent(&self) -> Option<u8> {
        let load = (self.free_spaces >= 0 && self.total_capacity > 0).then(|| {
            (100.0 - f64::from(self.free_spaces) / f64::from(self.total_capacity) * 100.0).round()
        });
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        match load {
            Some(load) if load < 0.0 => Some(0),
            _ if self.state == LotState::Full => Some(100),
            Some(load) => Some(load.min(100.0) as u8),
            None => None,
        }
    }

    /// Free-space count as shown in the list, `?` when unknown.
    #[must_use]
    pub fn free_label(&self) -> String {
        if self.state == LotState::NoData || !self.has_load_data() {
            "?".to_owned()
        } else {
            self.free_spaces.to_string()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadDisplay {
    Unknown,
    Closed,
    Occupied(u8),
}

impl LoadDisplay {
    #[must_use]
    pub fn for_record(record: &LotRecord) -> Self {
        if record.state == LotState::NoData && !record.has_load_data() {
            return LoadDisplay::Unknown;
        }
        if record.state == LotState::Closed {
            return LoadDisplay::Closed;
        }
        record
            .occupancy_percent()
            .map_or(LoadDisplay::Unknown, LoadDisplay::Occupied)
    }
}

impl std::fmt::Display for LoadDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadDisplay::Unknown => write!(f, "unknown"),
            LoadDisplay::Closed => write!(f, "closed"),
            LoadDisplay::Occupied(percent) => write!(f, "{percent}% occupied"),
        }
    }
}

/// Secondary line of a row: distance while sorting by distance, address
/// otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailDisplay {
    /// Kilometers, rounded to one decimal.
    Distance { km: f64 },
    WaitingForLocation,
    Address(String),
    UnknownAddress,
}

impl DetailDisplay {
    #[must_use]
    pub fn for_record(record: &LotRecord, mode: SortMode) -> Self {
        match (mode, record.distance_meters, record.address.as_deref()) {
            (SortMode::Distance, Some(meters), _) => DetailDisplay::Distance {
                km: (meters / 100.0).round() / 10.0,
            },
            (SortMode::Distance, None, _) => DetailDisplay::WaitingForLocation,
            (_, _, Some(address)) => DetailDisplay::Address(address.to_owned()),
            (_, _, None) => DetailDisplay::UnknownAddress,
        }
    }
}

impl std::fmt::Display for DetailDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetailDisplay::Distance { km } => write!(f, "{km:.1}km"),
            DetailDisplay::WaitingForLocation => write!(f, "waiting for location"),
            DetailDisplay::Address(address) => f.write_str(address),
            DetailDisplay::UnknownAddress => write!(f, "unknown address"),
        }
    }
}

/// A lot from the view together with everything needed to render it.
#[derive(Debug, Clone, PartialEq)]
pub struct LotRow {
    pub record: LotRecord,
    pub is_favorite: bool,
    pub free: String,
    pub load: LoadDisplay,
    pub detail: DetailDisplay,
}

impl LotRow {
    #[must_use]
    pub fn new(record: LotRecord, is_favorite: bool, mode: SortMode) -> Self {
        let free = record.free_label();
        let load = LoadDisplay::for_record(&record);
        let detail = DetailDisplay::for_record(&record, mode);
        Self {
            record,
            is_favorite,
            free,
            load,
            detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(total: u32, free: i32, state: LotState) -> LotRecord {
        LotRecord::new("Altmarkt", total, free, state)
    }

    #[test]
    fn occupancy_rounds_to_nearest_percent() {
        assert_eq!(record(400, 120, LotState::Open).occupancy_percent(), Some(70));
        assert_eq!(record(3, 1, LotState::Open).occupancy_percent(), Some(67));
        assert_eq!(record(50, 0, LotState::Open).occupancy_percent(), Some(100));
        assert_eq!(record(50, 50, LotState::Open).occupancy_percent(), Some(0));
    }

    #[test]
    fn occupancy_clamps_overfull_free_count_to_zero() {
        assert_eq!(record(50, 52, LotState::Open).occupancy_percent(), Some(0));
    }

    #[test]
    fn occupancy_full_state_forces_hundred() {
        assert_eq!(record(50, 10, LotState::Full).occupancy_percent(), Some(100));
        assert_eq!(record(50, -1, LotState::Full).occupancy_percent(), Some(100));
        assert_eq!(record(0, 0, LotState::Full).occupancy_percent(), Some(100));
    }

    #[test]
    fn occupancy_clamp_wins_over_full_state() {
        assert_eq!(record(50, 52, LotState::Full).occupancy_percent(), Some(0));
    }

    #[test]
    fn occupancy_unknown_without_load_data_or_capacity() {
        assert_eq!(record(50, -1, LotState::NoData).occupancy_percent(), None);
        assert_eq!(record(0, 0, LotState::Open).occupancy_percent(), None);
    }

    #[test]
    fn load_display_precedence() {
        assert_eq!(
            LoadDisplay::for_record(&record(50, -1, LotState::NoData)),
            LoadDisplay::Unknown
        );
        assert_eq!(
            LoadDisplay::for_record(&record(50, 40, LotState::Closed)),
            LoadDisplay::Closed
        );
        assert_eq!(
            LoadDisplay::for_record(&record(50, -1, LotState::Closed)),
            LoadDisplay::Closed
        );
        assert_eq!(
            LoadDisplay::for_record(&record(50, 52, LotState::Open)),
            LoadDisplay::Occupied(0)
        );
    }

    #[test]
    fn load_display_text() {
        assert_eq!(LoadDisplay::Occupied(70).to_string(), "70% occupied");
        assert_eq!(LoadDisplay::Closed.to_string(), "closed");
        assert_eq!(LoadDisplay::Unknown.to_string(), "unknown");
    }

    #[test]
    fn free_label_hides_unknown_counts() {
        assert_eq!(record(50, -1, LotState::NoData).free_label(), "?");
        assert_eq!(record(50, 12, LotState::Open).free_label(), "12");
    }

    #[test]
    fn detail_shows_distance_in_tenths_of_km() {
        let mut lot = record(50, 1, LotState::Open).with_address("Wilsdruffer Str.");
        lot.distance_meters = Some(1_249.0);
        let detail = DetailDisplay::for_record(&lot, SortMode::Distance);
        assert_eq!(detail, DetailDisplay::Distance { km: 1.2 });
        assert_eq!(detail.to_string(), "1.2km");

        lot.distance_meters = Some(950.0);
        assert_eq!(
            DetailDisplay::for_record(&lot, SortMode::Distance).to_string(),
            "1.0km"
        );
    }

    #[test]
    fn detail_waits_for_location_in_distance_mode() {
        let lot = record(50, 1, LotState::Open).with_address("Wilsdruffer Str.");
        assert_eq!(
            DetailDisplay::for_record(&lot, SortMode::Distance),
            DetailDisplay::WaitingForLocation
        );
    }

    #[test]
    fn detail_falls_back_to_address() {
        let mut lot = record(50, 1, LotState::Open);
        lot.distance_meters = Some(300.0);
        assert_eq!(
            DetailDisplay::for_record(&lot, SortMode::Alphabetical),
            DetailDisplay::UnknownAddress
        );
        let lot = lot.with_address("Wilsdruffer Str.");
        assert_eq!(
            DetailDisplay::for_record(&lot, SortMode::Default).to_string(),
            "Wilsdruffer Str."
        );
    }
}
