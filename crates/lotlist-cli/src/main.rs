mod list;
mod render;

use clap::{Parser, Subcommand};
use lotlist_core::{LotAggregator, SortMode};
use lotlist_store::JsonFilePreferences;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "lotlist")]
#[command(about = "Live parking lot occupancy, sorted and filtered")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch and print the lot list using the saved sort mode.
    List {
        /// Only show lots whose name contains this text (case-insensitive).
        #[arg(long)]
        search: Option<String>,
        /// Current latitude, used for distance sorting.
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Current longitude, used for distance sorting.
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
        /// Only show favorite lots.
        #[arg(long)]
        favorites: bool,
    },
    /// Mark a lot as favorite, or unmark it if it already is one.
    Favorite { name: String },
    /// Save the sort mode: standard, distance, alphabetical or free.
    Sort { mode: SortMode },
    /// Print the current server notice, if any.
    Notice,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = lotlist_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, city = %config.city, "starting");

    match cli.command {
        Commands::List {
            search,
            lat,
            lon,
            favorites,
        } => {
            let position = lat.zip(lon);
            list::run_list(&config, search, position, favorites).await?;
        }
        Commands::Favorite { name } => {
            let mut aggregator =
                LotAggregator::new(JsonFilePreferences::open(&config.prefs_path));
            if aggregator.toggle_favorite(&name) {
                println!("added {name} to favorites");
            } else {
                println!("removed {name} from favorites");
            }
        }
        Commands::Sort { mode } => {
            let mut aggregator =
                LotAggregator::new(JsonFilePreferences::open(&config.prefs_path));
            aggregator.set_sort_mode(mode);
            println!("sorting by {mode}");
        }
        Commands::Notice => {
            let client = list::build_client(&config)?;
            match lotlist_core::fetch_notice(&client).await {
                Some(notice) => println!("{}", render::notice(&notice)),
                None => println!("no server notice"),
            }
        }
    }

    Ok(())
}
