use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::{debug, info};

use tripframe::api::AppState;
use tripframe::cache::{self, ResultCache};
use tripframe::models::{Activity, Hotel, Itinerary, place_url};
use tripframe::services::{CachedHotelSearch, GenerationRequest, HotelApiClient, ItineraryApiClient};
use tripframe::{GeoPoint, TripFrameConfig, TripFrameError, ViewportSize, logging, viewport, web};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(short, long, env = "TRIPFRAME_CONFIG")]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Frame a list of "lat,lng" points
    Frame {
        points: Vec<GeoPoint>,
        #[arg(long)]
        width: Option<f64>,
        #[arg(long)]
        height: Option<f64>,
    },
    /// Map camera for a saved itinerary JSON document
    Camera {
        file: PathBuf,
        /// Zero based day; the whole trip when omitted
        #[arg(long)]
        day: Option<usize>,
        #[arg(long)]
        width: Option<f64>,
        #[arg(long)]
        height: Option<f64>,
    },
    /// Hotels around the center of a saved itinerary
    Hotels {
        file: PathBuf,
        /// Itinerary id used as the cache key
        #[arg(long)]
        id: Option<String>,
    },
    /// Generate an itinerary through the itinerary service
    Generate {
        #[arg(long)]
        uuid: String,
        #[arg(long = "where")]
        where_: String,
        #[arg(long, default_value = "")]
        what: String,
        #[arg(long, default_value = "")]
        when: String,
        #[arg(long, default_value = "")]
        preferences: String,
    },
    /// Serve the framing HTTP API
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
}

fn size_from_args(
    config: &TripFrameConfig,
    width: Option<f64>,
    height: Option<f64>,
) -> ViewportSize {
    ViewportSize::from_reported(width, height, config.map.fallback_size())
}

fn read_itinerary(path: &Path) -> Result<Itinerary> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read itinerary file: {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse itinerary file: {}", path.display()))?;
    // Accept either a bare itinerary or a saved generation response.
    if value.get("itinerary").is_some() {
        Ok(Itinerary::from_response(value)?.itinerary)
    } else {
        Ok(serde_json::from_value(value)?)
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Display fields of a hotel card
fn hotel_card(hotel: &Hotel) -> serde_json::Value {
    json!({
        "name": hotel.display_name,
        "rating": hotel.format_rating(),
        "price": hotel.format_price(),
        "address": hotel.formatted_address,
        "location": hotel.point(),
        "map_url": hotel.id.as_deref().map(place_url),
    })
}

/// Print the error chain and, for crate errors, a hint for the user, then exit
fn print_error_and_exit(error: &anyhow::Error) -> ! {
    eprintln!("Error: {error:#}");
    if let Some(err) = error.downcast_ref::<TripFrameError>() {
        eprintln!("{}", err.user_message());
    }
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli).await {
        print_error_and_exit(&error);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = TripFrameConfig::load_from_path(cli.config.clone())?;
    logging::init(&config.logging, cli.verbose)?;
    debug!(
        cache = %config.cache.location,
        base_url = %config.api.base_url,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Frame {
            points,
            width,
            height,
        } => {
            let size = size_from_args(&config, width, height);
            print_json(&json!({
                "center": viewport::compute_center(&points),
                "zoom": viewport::compute_zoom(&points, size.width_px, size.height_px),
            }))?;
        }
        Commands::Camera {
            file,
            day,
            width,
            height,
        } => {
            let itinerary = read_itinerary(&file)?;
            let size = size_from_args(&config, width, height);
            let days = match day {
                Some(day) if day >= itinerary.day_count() => {
                    return Err(anyhow!(
                        "Day {day} not found, itinerary has {} days",
                        itinerary.day_count()
                    ));
                }
                Some(day) => &itinerary.schedule[day..=day],
                None => &itinerary.schedule[..],
            };
            let points: Vec<GeoPoint> = days.iter().flat_map(|day| day.points()).collect();
            let stops: Vec<&str> = days
                .iter()
                .flat_map(|day| day.activities.iter().filter_map(Activity::name))
                .collect();
            print_json(&json!({
                "title": itinerary.itinerary_title,
                "center": viewport::compute_center(&points),
                "zoom": viewport::compute_zoom(&points, size.width_px, size.height_px),
                "poi_count": points.len(),
                "stops": stops,
                "warning": itinerary.warning(),
            }))?;
        }
        Commands::Hotels { file, id } => {
            let itinerary = read_itinerary(&file)?;
            let center = itinerary
                .trip_center()
                .ok_or_else(|| anyhow!("Itinerary has no located activities"))?;
            info!("Searching hotels near {}", center.format_coordinates());

            let cache = ResultCache::open(&config.cache.location).with_context(|| {
                format!("Failed to open cache database at {}", config.cache.location)
            })?;
            let client = HotelApiClient::new(&config.api)?;
            let search = CachedHotelSearch::new(client, cache, &config.cache);
            let hotels = search.search_for(id.as_deref(), center).await?;
            let cards: Vec<_> = hotels.iter().map(hotel_card).collect();
            print_json(&cards)?;
        }
        Commands::Generate {
            uuid,
            where_,
            what,
            when,
            preferences,
        } => {
            let request = GenerationRequest {
                uuid,
                what,
                where_,
                when,
                preferences,
            }
            .normalized()?;

            let cache = ResultCache::open(&config.cache.location).with_context(|| {
                format!("Failed to open cache database at {}", config.cache.location)
            })?;
            let key = cache::itinerary_key(&request.uuid);
            if let Some(json) = cache.get::<String>(&key).await? {
                info!("Using cached itinerary {}", request.uuid);
                println!("{json}");
                return Ok(());
            }

            let client = ItineraryApiClient::new(&config.api)?;
            let generated = client.generate(&request).await?;
            let json = serde_json::to_string_pretty(&generated.itinerary)?;
            let ttl = std::time::Duration::from_secs(u64::from(config.cache.ttl_minutes) * 60);
            cache.put(&key, json.clone(), cache::jittered(ttl)).await?;
            println!("{json}");
        }
        Commands::Serve { port } => {
            let state = AppState {
                fallback_size: config.map.fallback_size(),
            };
            web::run(port.unwrap_or(config.server.port), state).await?;
        }
    }

    Ok(())
}
