//! Parking-lot domain types shared by every crate in the workspace.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Sentinel stored in [`LotRecord::free_spaces`] when no load data is known.
pub const UNKNOWN_FREE: i32 = -1;

/// Operational state of a lot as reported by the upstream feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LotState {
    Open,
    Full,
    Closed,
    NoData,
}

impl LotState {
    /// Map a raw feed value onto a state.
    ///
    /// The feed has historically used `many`/`few` for open lots and
    /// `unknown` for missing data. Anything unrecognised is treated as
    /// `NoData`.
    #[must_use]
    pub fn from_feed(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "open" | "many" | "few" => LotState::Open,
            "full" => LotState::Full,
            "closed" => LotState::Closed,
            "nodata" | "unknown" | "" => LotState::NoData,
            other => {
                tracing::warn!(state = other, "unrecognised lot state, treating as nodata");
                LotState::NoData
            }
        }
    }
}

impl std::fmt::Display for LotState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LotState::Open => write!(f, "open"),
            LotState::Full => write!(f, "full"),
            LotState::Closed => write!(f, "closed"),
            LotState::NoData => write!(f, "nodata"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// One parking facility's current status snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotRecord {
    /// Unique within a snapshot.
    pub name: String,
    pub total_capacity: u32,
    /// `-1` means unknown. May exceed `total_capacity` when the feed is noisy.
    pub free_spaces: i32,
    pub state: LotState,
    pub coordinates: Option<Coordinates>,
    pub address: Option<String>,
    /// Meters from the last known user position. Absent until a location
    /// update arrives for the current snapshot.
    pub distance_meters: Option<f64>,
}

impl LotRecord {
    #[must_use]
    pub fn new(name: impl Into<String>, total_capacity: u32, free_spaces: i32, state: LotState) -> Self {
        Self {
            name: name.into(),
            total_capacity,
            free_spaces,
            state,
            coordinates: None,
            address: None,
            distance_meters: None,
        }
    }

    #[must_use]
    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinates = Some(Coordinates::new(latitude, longitude));
        self
    }

    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    #[must_use]
    pub fn has_load_data(&self) -> bool {
        self.free_spaces != UNKNOWN_FREE
    }
}

/// User-selected ordering policy for the lot list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortMode {
    /// Server order.
    #[default]
    #[serde(rename = "standard")]
    Default,
    #[serde(rename = "distance")]
    Distance,
    #[serde(rename = "alphabetical")]
    Alphabetical,
    #[serde(rename = "free")]
    FreeSpaces,
}

impl SortMode {
    /// Key under which the mode is persisted.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            SortMode::Default => "standard",
            SortMode::Distance => "distance",
            SortMode::Alphabetical => "alphabetical",
            SortMode::FreeSpaces => "free",
        }
    }

    /// Lenient lookup for persisted values: anything unknown is `Default`.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        key.parse().unwrap_or_default()
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SortMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "default" => Ok(SortMode::Default),
            "distance" => Ok(SortMode::Distance),
            "alphabetical" | "name" => Ok(SortMode::Alphabetical),
            "free" => Ok(SortMode::FreeSpaces),
            _ => Err(CoreError::InvalidSortMode(s.to_string())),
        }
    }
}

/// Operator-pushed banner delivered on the notice channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerNotice {
    pub title: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_state_aliases_map_to_open() {
        assert_eq!(LotState::from_feed("many"), LotState::Open);
        assert_eq!(LotState::from_feed("few"), LotState::Open);
        assert_eq!(LotState::from_feed("Open"), LotState::Open);
    }

    #[test]
    fn feed_state_unknown_values_are_nodata() {
        assert_eq!(LotState::from_feed("unknown"), LotState::NoData);
        assert_eq!(LotState::from_feed(""), LotState::NoData);
        assert_eq!(LotState::from_feed("under construction"), LotState::NoData);
    }

    #[test]
    fn feed_state_full_and_closed() {
        assert_eq!(LotState::from_feed("full"), LotState::Full);
        assert_eq!(LotState::from_feed("closed"), LotState::Closed);
    }

    #[test]
    fn sort_mode_parses_persisted_keys() {
        for mode in [
            SortMode::Default,
            SortMode::Distance,
            SortMode::Alphabetical,
            SortMode::FreeSpaces,
        ] {
            assert_eq!(mode.key().parse::<SortMode>().unwrap(), mode);
        }
    }

    #[test]
    fn sort_mode_rejects_unknown_name() {
        let err = "fastest".parse::<SortMode>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidSortMode(ref v) if v == "fastest"));
    }

    #[test]
    fn sort_mode_from_key_falls_back_to_default() {
        assert_eq!(SortMode::from_key("fastest"), SortMode::Default);
        assert_eq!(SortMode::from_key("free"), SortMode::FreeSpaces);
    }

    #[test]
    fn sort_mode_serializes_as_persisted_key() {
        let json = serde_json::to_string(&SortMode::FreeSpaces).unwrap();
        assert_eq!(json, "\"free\"");
        let back: SortMode = serde_json::from_str("\"standard\"").unwrap();
        assert_eq!(back, SortMode::Default);
    }

    #[test]
    fn new_record_has_no_distance() {
        let lot = LotRecord::new("Altmarkt", 400, 120, LotState::Open).with_coordinates(51.05, 13.73);
        assert!(lot.distance_meters.is_none());
        assert!(lot.has_load_data());
        assert_eq!(lot.coordinates, Some(Coordinates::new(51.05, 13.73)));
    }
}
