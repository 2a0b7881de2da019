//! Collaborator ports consumed by the aggregator.
//!
//! - [`DataSource`]: asynchronous fetch of the lot list and the server notice
//! - [`LocationProvider`]: subscription to user position updates
//! - [`PreferenceStore`]: durable sort-mode and favorites storage
//!
//! The aggregator performs no I/O itself; everything that touches the network,
//! the disk or the positioning hardware lives behind one of these traits.

use std::collections::BTreeSet;
use std::future::Future;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::{Coordinates, LotRecord, ServerNotice, SortMode};

/// Classified failure of a single fetch attempt.
///
/// Both kinds are terminal for the attempt; retrying is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The server could not be reached (offline, DNS, timeout).
    #[error("could not reach the server: {0}")]
    Request(String),

    /// The server answered but the payload was unusable.
    #[error("could not read data from the server: {0}")]
    Server(String),
}

/// Source of lot snapshots and operator notices.
pub trait DataSource: Send + Sync {
    /// Fetch a complete snapshot of all lots, in server order.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Request`] on connectivity failure and
    /// [`FetchError::Server`] when the payload cannot be used.
    fn fetch_lots(&self) -> impl Future<Output = Result<Vec<LotRecord>, FetchError>> + Send;

    /// Fetch the current operator notice, if one is published.
    ///
    /// # Errors
    ///
    /// Same classification as [`DataSource::fetch_lots`].
    fn fetch_server_notice(
        &self,
    ) -> impl Future<Output = Result<Option<ServerNotice>, FetchError>> + Send;
}

/// Callback receiving position updates.
pub type LocationSubscriber = Box<dyn FnMut(Coordinates) + Send>;

/// Delivers zero or more position updates to registered subscribers.
///
/// Authorization is the host's concern; a provider only exists once the host
/// is allowed to read the position.
pub trait LocationProvider {
    fn on_update(&mut self, subscriber: LocationSubscriber);
}

/// Push-style provider: the host publishes fixes, every subscriber gets them.
#[derive(Default)]
pub struct LocationFeed {
    subscribers: Vec<LocationSubscriber>,
}

impl LocationFeed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `fix` to every subscriber, in registration order.
    pub fn publish(&mut self, fix: Coordinates) {
        tracing::debug!(
            latitude = fix.latitude,
            longitude = fix.longitude,
            subscribers = self.subscribers.len(),
            "publishing location fix"
        );
        for subscriber in &mut self.subscribers {
            subscriber(fix);
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl LocationProvider for LocationFeed {
    fn on_update(&mut self, subscriber: LocationSubscriber) {
        self.subscribers.push(subscriber);
    }
}

/// Errors surfaced by a durable [`PreferenceStore`] write.
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference file I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not encode preferences for {path}: {reason}")]
    Encode { path: PathBuf, reason: String },
}

/// Durable key-value storage for the sort mode and favorite lot names.
///
/// Reads never fail: a store with nothing saved (or unreadable contents)
/// reports the defaults.
pub trait PreferenceStore {
    fn sort_mode(&self) -> SortMode;

    /// # Errors
    ///
    /// Returns [`PreferenceError`] if the value could not be persisted.
    fn set_sort_mode(&mut self, mode: SortMode) -> Result<(), PreferenceError>;

    fn favorites(&self) -> BTreeSet<String>;

    /// # Errors
    ///
    /// Returns [`PreferenceError`] if the value could not be persisted.
    fn set_favorites(&mut self, favorites: &BTreeSet<String>) -> Result<(), PreferenceError>;
}

/// Non-durable store, for tests and hosts without persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    sort_mode: SortMode,
    favorites: BTreeSet<String>,
}

impl MemoryPreferences {
    #[must_use]
    pub fn new(sort_mode: SortMode, favorites: impl IntoIterator<Item = String>) -> Self {
        Self {
            sort_mode,
            favorites: favorites.into_iter().collect(),
        }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    fn set_sort_mode(&mut self, mode: SortMode) -> Result<(), PreferenceError> {
        self.sort_mode = mode;
        Ok(())
    }

    fn favorites(&self) -> BTreeSet<String> {
        self.favorites.clone()
    }

    fn set_favorites(&mut self, favorites: &BTreeSet<String>) -> Result<(), PreferenceError> {
        self.favorites.clone_from(favorites);
        Ok(())
    }
}
