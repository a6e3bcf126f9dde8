//! Command-line front end: prints the bright-objects response as JSON.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sky_objects::{
    bright_objects, BrightObjectsRequest, BrightObjectsResponse, FixedStarResolver,
    PositionResolver, SkyError, SkyPipeline,
};

#[derive(Parser, Debug)]
#[command(
    name = "sky_objects",
    version,
    about = "Brightest celestial objects above the horizon at a location and time"
)]
struct Cli {
    /// Latitude in decimal degrees (-90 to 90)
    #[arg(long, allow_hyphen_values = true)]
    latitude: f64,

    /// Longitude in decimal degrees (-180 to 180)
    #[arg(long, allow_hyphen_values = true)]
    longitude: f64,

    /// Time in ISO format (YYYY-MM-DDTHH:MM:SS); defaults to now
    #[arg(long)]
    time: Option<String>,

    /// Maximum number of objects to return
    #[arg(long)]
    max_objects: Option<usize>,

    /// Resolve fixed stars only, without contacting JPL Horizons
    #[arg(long)]
    offline: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn run<R: PositionResolver>(
    resolver: R,
    request: &BrightObjectsRequest,
) -> Result<BrightObjectsResponse, SkyError> {
    let pipeline = SkyPipeline::with_standard_catalog(resolver);
    bright_objects(&pipeline, request)
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let request = BrightObjectsRequest {
        latitude: cli.latitude,
        longitude: cli.longitude,
        time: cli.time,
        max_objects: cli.max_objects,
    };

    let result = if cli.offline || cfg!(not(feature = "horizons")) {
        run(FixedStarResolver, &request)
    } else {
        online(&request)
    };

    let response = match result {
        Ok(response) => response,
        Err(err) => {
            eprintln!("error: {err}");
            return if err.is_client_error() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            };
        }
    };

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&response)
    } else {
        serde_json::to_string(&response)
    };
    match rendered {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: failed to serialize response: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(feature = "horizons")]
fn online(request: &BrightObjectsRequest) -> Result<BrightObjectsResponse, SkyError> {
    run(sky_objects::HorizonsResolver::new(), request)
}

#[cfg(not(feature = "horizons"))]
fn online(request: &BrightObjectsRequest) -> Result<BrightObjectsResponse, SkyError> {
    run(FixedStarResolver, request)
}
