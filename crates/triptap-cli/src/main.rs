mod search;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "triptap-cli")]
#[command(about = "Resolve itinerary stops to places and find nearby alternatives")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve every stop of an itinerary file and search around each one
    Search {
        #[arg(long)]
        city: String,
        /// JSON or YAML file with `location`, `description` and `activity_type` columns
        #[arg(long)]
        itinerary: PathBuf,
        /// Nearby search radius in meters (defaults to `TRIPTAP_SEARCH_RADIUS_METERS`)
        #[arg(long)]
        radius: Option<f64>,
        /// Process stops one at a time, in file order
        #[arg(long)]
        single_thread: bool,
        /// Write places.json and nearby_places.json into this directory
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Refresh each anchor through the legacy details endpoint
        #[arg(long)]
        fetch_details: bool,
        /// Log every rejected nearby candidate with its reason
        #[arg(long)]
        verbose: bool,
    },
    /// Print the coordinate the geocoder reports for a city
    Geocode {
        #[arg(long)]
        city: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = triptap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Search {
            city,
            itinerary,
            radius,
            single_thread,
            output_dir,
            fetch_details,
            verbose,
        } => {
            let args = search::SearchArgs {
                city,
                itinerary,
                radius,
                single_thread,
                output_dir,
                fetch_details,
                verbose,
            };
            search::run_search(&config, args).await?;
        }
        Commands::Geocode { city } => search::run_geocode(&config, &city).await?,
    }

    Ok(())
}
