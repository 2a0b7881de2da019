//! `lotlist list`: fetch, aggregate and print.

use anyhow::Context;
use lotlist_client::ParkingApiClient;
use lotlist_core::{
    fetch_notice, AppConfig, Coordinates, LocationFeed, LotAggregator, SharedAggregator, SortMode,
};
use lotlist_store::JsonFilePreferences;

pub(crate) fn build_client(config: &AppConfig) -> anyhow::Result<ParkingApiClient> {
    ParkingApiClient::with_base_url(
        &config.api_base_url,
        &config.city,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .with_context(|| format!("cannot build client for {}", config.api_base_url))
}

pub(crate) async fn run_list(
    config: &AppConfig,
    search: Option<String>,
    position: Option<(f64, f64)>,
    favorites_only: bool,
) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let aggregator = SharedAggregator::new(LotAggregator::new(JsonFilePreferences::open(
        &config.prefs_path,
    )));
    aggregator.lock().set_search_query(search);

    let mut location = LocationFeed::new();
    aggregator.attach_location(&mut location);

    let (fetched, notice) = tokio::join!(aggregator.refresh(&client), fetch_notice(&client));
    if let Some(notice) = notice {
        println!("{}\n", crate::render::notice(&notice));
    }
    let count = fetched.with_context(|| format!("cannot load lots for {}", config.city))?;
    tracing::debug!(count, "lot list loaded");

    let sort_mode = aggregator.lock().sort_mode();
    match position {
        Some((lat, lon)) => location.publish(Coordinates::new(lat, lon)),
        None if sort_mode == SortMode::Distance => {
            tracing::warn!("sorting by distance but no --lat/--lon given");
        }
        None => {}
    }

    let rows = aggregator.lock().rows();
    let rows: Vec<_> = rows
        .into_iter()
        .filter(|row| !favorites_only || row.is_favorite)
        .collect();
    print!("{}", crate::render::table(&rows));
    Ok(())
}
