//! shopfusion-delivery: delivery distance and shipping resolution CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};
use shopfusion_cli::output::{format_count, format_duration, Status};
use shopfusion_cli::render::{quote_lines, ranking_lines, resolution_lines};
use shopfusion_core::config::Config;
use shopfusion_core::error::exit_codes;
use shopfusion_geo::{rank_locations, Coordinate, DeliveryResolution, DeliverySettings, FulfillmentMethod};
use shopfusion_telemetry::{TelemetryConfig, Timer};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "shopfusion-delivery")]
#[command(about = "Resolve delivery distance, nearest store and shipping cost")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "SHOPFUSION_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve an address into nearest store and shipping quote
    Resolve {
        /// Customer address
        address: String,

        /// Order total in rupiah
        #[arg(short, long, default_value_t = 0)]
        total: u64,

        /// Fulfillment method (delivery or pickup)
        #[arg(short, long, default_value = "delivery")]
        method: FulfillmentMethod,

        /// Seed the geocoder for reproducible coordinates
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Suggest addresses for partial input
    Suggest {
        /// Partial address (at least 3 characters)
        input: String,
    },

    /// Rank stores by distance from a coordinate
    Rank {
        /// Latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
    },

    /// Quote shipping for a distance and order total
    Quote {
        /// Distance in kilometers
        #[arg(short, long)]
        distance: f64,

        /// Order total in rupiah
        #[arg(short, long, default_value_t = 0)]
        total: u64,
    },

    /// Validate an address without resolving it
    Validate {
        /// Customer address
        address: String,
    },

    /// List fulfillment locations
    Stores,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            if cli.json {
                if let Ok(report) = serde_json::to_string_pretty(&e.to_report()) {
                    println!("{report}");
                }
            } else {
                Status::error(&e.to_string());
            }
            return exit_code(e.exit_code());
        }
    };

    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.schema.logging.level.clone()
    };
    if let Err(e) =
        shopfusion_telemetry::init_with_config(TelemetryConfig::new(level, config.schema.logging.json))
    {
        Status::warning(&e.to_string());
    }
    tracing::debug!(path = ?config.path, "Configuration loaded");

    match run(cli, &config.schema.delivery).await {
        Ok(code) => exit_code(code),
        Err(e) => {
            Status::error(&format!("{e:#}"));
            exit_code(exit_codes::FAILURE)
        }
    }
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli, settings: &DeliverySettings) -> Result<i32> {
    match cli.command {
        Commands::Resolve { address, total, method, seed } => {
            let resolver = match seed {
                Some(seed) => settings.build_seeded_resolver(seed),
                None => settings.build_resolver(),
            }
            .map_err(shopfusion_core::Error::from)?;

            let timer = Timer::start("resolve");
            let resolution = resolver.resolve(&address, total).await;
            let elapsed = timer.stop();

            if cli.json {
                print_json(&resolution)?;
            }

            match resolution {
                DeliveryResolution::Success(resolved) => {
                    if !cli.json {
                        Status::header(&format!("Delivery to {address}"));
                        for line in resolution_lines(&resolved, total, method) {
                            println!("  {line}");
                        }
                        Status::success(&format!("Resolved in {}", format_duration(elapsed)));
                    }
                    Ok(exit_codes::SUCCESS)
                }
                DeliveryResolution::Failure { errors } => {
                    if !cli.json {
                        for error in &errors {
                            Status::error(&error.to_string());
                        }
                    }
                    // A configuration fault outranks address problems.
                    let primary = errors
                        .iter()
                        .find(|e| e.is_fatal())
                        .or_else(|| errors.first())
                        .cloned()
                        .map_or(exit_codes::VALIDATION_ERROR, |e| {
                            shopfusion_core::Error::from(e).exit_code()
                        });
                    Ok(primary)
                }
            }
        }

        Commands::Suggest { input } => {
            let index = settings.suggestion_index();
            let suggestions = index.suggest(&input);

            if cli.json {
                print_json(&suggestions)?;
            } else if suggestions.is_empty() {
                Status::info("No suggestions");
            } else {
                for suggestion in &suggestions {
                    println!("{suggestion}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Rank { lat, lng } => {
            let origin = Coordinate::new(lat, lng);
            if !origin.is_valid() {
                Status::error(&format!("Invalid coordinate: {lat}, {lng}"));
                return Ok(exit_codes::VALIDATION_ERROR);
            }

            let registry = settings.registry().map_err(shopfusion_core::Error::from)?;
            let ranked = rank_locations(&registry, &origin);

            if cli.json {
                print_json(&ranked)?;
            } else {
                Status::header(&format!("Stores nearest to {lat}, {lng}"));
                for line in ranking_lines(&ranked) {
                    println!("{line}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Quote { distance, total } => {
            if !distance.is_finite() || distance < 0.0 {
                Status::error("Distance must be a non-negative number of kilometers");
                return Ok(exit_codes::VALIDATION_ERROR);
            }

            let policy = settings.shipping_policy().map_err(shopfusion_core::Error::from)?;
            let quote = policy.quote(distance, total);

            if cli.json {
                print_json(&quote)?;
            } else {
                for line in quote_lines(&quote) {
                    println!("{line}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Validate { address } => {
            let validation = settings.validator().validate(&address);

            if cli.json {
                print_json(&serde_json::json!({
                    "is_valid": validation.is_valid(),
                    "errors": validation.messages(),
                }))?;
            } else if validation.is_valid() {
                Status::success("Address is valid");
            } else {
                for message in validation.messages() {
                    Status::error(&message);
                }
            }

            if validation.is_valid() {
                Ok(exit_codes::SUCCESS)
            } else {
                Ok(exit_codes::VALIDATION_ERROR)
            }
        }

        Commands::Stores => {
            let registry = settings.registry().map_err(shopfusion_core::Error::from)?;

            if cli.json {
                print_json(&registry.all())?;
            } else {
                Status::header(&format_count(registry.len(), "store", "stores"));
                for store in registry.all() {
                    println!("{:<8} {:<28} {}  ({})", store.id, store.name, store.address, store.phone);
                }
            }
            Ok(exit_codes::SUCCESS)
        }
    }
}
