use geodb_client::config::{LoggingSettings, Settings};
use geodb_client::{
    FindCitiesRequest, FindCountriesRequest, FindCurrenciesRequest, FindPlacesNearLocationRequest,
    FindRegionCitiesRequest, FindRegionsRequest, GeoDbApi, GeoDbApiClient, LocationRadiusUnit, NearLocationRequest,
};
use serde::Serialize;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use validator::Validate;

const USAGE: &str = "\
Usage: geodb <command> [args]

Commands:
  cities [name-prefix]                      Find cities
  near <lat> <lon> <radius> [mi|km]         Find places near a location
  countries [currency-code]                 Find countries
  currencies [country-code]                 Find currencies
  regions <country-code>                    Find the regions of a country
  region-cities <country-id> <region-code>  Find the cities of a region";

/// Initialize logging; `LOG_LEVEL` / `LOG_FORMAT` override the settings
fn init_logging(settings: &LoggingSettings) {
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.level.clone());
    let format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    match format.as_str() {
        "json" => subscriber.json().init(),
        "pretty" => subscriber.pretty().init(),
        _ => subscriber.init(),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn required<'a>(args: &'a [String], index: usize, name: &str) -> Result<&'a str, String> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| format!("missing argument <{}>\n\n{}", name, USAGE))
}

async fn run(api: &GeoDbApi, args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let command = required(args, 0, "command")?;
    let optional = |index: usize| args.get(index).cloned();

    match command {
        "cities" => {
            let request = FindCitiesRequest {
                name_prefix: optional(1),
                ..Default::default()
            };
            print_json(&api.find_cities(&request).await?)
        }
        "near" => {
            let latitude: f64 = required(args, 1, "lat")?.parse()?;
            let longitude: f64 = required(args, 2, "lon")?.parse()?;
            let radius: u32 = required(args, 3, "radius")?.parse()?;
            let unit = match optional(4).as_deref().map(str::to_ascii_uppercase).as_deref() {
                Some(tag) => tag.parse::<LocationRadiusUnit>()?,
                None => LocationRadiusUnit::Miles,
            };
            let near = NearLocationRequest::new(latitude, longitude, radius, unit);
            print_json(&api.find_places_near_location(&FindPlacesNearLocationRequest::new(near)).await?)
        }
        "countries" => {
            let request = FindCountriesRequest {
                currency_code: optional(1),
                ..Default::default()
            };
            print_json(&api.find_countries(&request).await?)
        }
        "currencies" => {
            let request = FindCurrenciesRequest {
                country_code: optional(1),
                ..Default::default()
            };
            print_json(&api.find_currencies(&request).await?)
        }
        "regions" => {
            let request = FindRegionsRequest::new(required(args, 1, "country-code")?);
            print_json(&api.find_regions(&request).await?)
        }
        "region-cities" => {
            let request = FindRegionCitiesRequest::new(
                required(args, 1, "country-id")?,
                required(args, 2, "region-code")?,
            );
            print_json(&api.find_region_cities(&request).await?)
        }
        other => Err(format!("unknown command: {}\n\n{}", other, USAGE).into()),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&settings.logging);

    if let Err(e) = settings.validate() {
        error!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }

    let client = match GeoDbApiClient::from_settings(&settings.client) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create GeoDB client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Using GeoDB instance at {}", client.base_url());

    let api = GeoDbApi::new(client);
    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(&api, &args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<geodb_client::ApiError>() {
                Some(api_error) => error!(
                    "Request failed: {} (status: {:?}, body: {})",
                    api_error,
                    api_error.code(),
                    api_error.response_body().unwrap_or("")
                ),
                None => eprintln!("{}", e),
            }
            ExitCode::FAILURE
        }
    }
}
