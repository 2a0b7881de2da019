//! Thread-safe handle around a [`LotAggregator`].
//!
//! Fetch completions, location callbacks and user actions may arrive from
//! different tasks; every operation goes through one mutex so they apply in
//! some serial order. The lock is never held across an `.await`.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::aggregator::LotAggregator;
use crate::ports::{DataSource, FetchError, LocationProvider, PreferenceStore};
use crate::types::ServerNotice;

pub struct SharedAggregator<P> {
    inner: Arc<Mutex<LotAggregator<P>>>,
}

impl<P> Clone for SharedAggregator<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: PreferenceStore> SharedAggregator<P> {
    #[must_use]
    pub fn new(aggregator: LotAggregator<P>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(aggregator)),
        }
    }

    /// Lock the aggregator for a batch of operations.
    pub fn lock(&self) -> MutexGuard<'_, LotAggregator<P>> {
        self.inner.lock()
    }

    /// Fetch a new snapshot from `source` and swap it in.
    ///
    /// Returns the number of lots kept after duplicate names are dropped. On failure the current snapshot
    /// stays as it is and the classified error is handed back; there is no
    /// retry here.
    ///
    /// # Errors
    ///
    /// Returns the [`FetchError`] reported by `source`.
    pub async fn refresh<S: DataSource>(&self, source: &S) -> Result<usize, FetchError> {
        match source.fetch_lots().await {
            Ok(lots) => {
                let mut aggregator = self.inner.lock();
                aggregator.replace_lots(lots);
                Ok(aggregator.len())
            }
            Err(err) => {
                tracing::warn!(error = %err, "lot fetch failed, keeping last snapshot");
                Err(err)
            }
        }
    }

    /// Feed every update from `provider` into the aggregator.
    pub fn attach_location<L: LocationProvider>(&self, provider: &mut L)
    where
        P: Send + 'static,
    {
        let handle = self.clone();
        provider.on_update(Box::new(move |fix| {
            handle
                .inner
                .lock()
                .apply_location_update(fix.latitude, fix.longitude);
        }));
    }
}

/// Ask `source` for the current operator notice.
///
/// The notice channel is best effort: failures are logged and read as "no
/// notice".
pub async fn fetch_notice<S: DataSource>(source: &S) -> Option<ServerNotice> {
    match source.fetch_server_notice().await {
        Ok(notice) => notice,
        Err(err) => {
            tracing::warn!(error = %err, "server notice fetch failed");
            None
        }
    }
}

#[cfg(test)]
#[path = "shared_test.rs"]
mod tests;
