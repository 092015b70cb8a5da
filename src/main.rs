use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use weathergrid::weather::history_base_times;
use weathergrid::{
    GeoCoordinate, GeolocationClient, GridCell, LocationResolver, Metric, Observation,
    ResolvedLocation, WeatherApiClient, WeatherGridConfig, WeatherGridError, WeatherHistory,
    unproject,
};

/// KMA forecast grid tools: projection, region lookup and nowcasts
#[derive(Debug, Parser)]
#[command(name = "weathergrid", version, about)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Project a latitude/longitude onto the grid
    Project {
        #[command(flatten)]
        coordinate: CoordinateArgs,
        #[arg(long)]
        json: bool,
    },
    /// Centre coordinate of a grid cell
    Unproject { x: i32, y: i32 },
    /// Grid cell and nearest named region for a latitude/longitude
    Nearest {
        #[command(flatten)]
        coordinate: CoordinateArgs,
        #[arg(long)]
        json: bool,
    },
    /// Grid cell of a region, by exact name
    Lookup {
        name: String,
        #[arg(long)]
        json: bool,
    },
    /// Region name assigned to exactly this grid cell
    Grid {
        x: i32,
        y: i32,
        #[arg(long)]
        json: bool,
    },
    /// List the compiled-in regions
    Regions,
    /// Resolve the current position from the geolocation service
    Locate {
        #[arg(long)]
        json: bool,
    },
    /// Current observation and 12-hour history
    Weather(WeatherArgs),
}

#[derive(Debug, Args)]
struct CoordinateArgs {
    #[arg(long, allow_negative_numbers = true)]
    lat: f64,
    #[arg(long, allow_negative_numbers = true)]
    lon: f64,
}

#[derive(Debug, Args)]
struct WeatherArgs {
    /// Region name from the table
    #[arg(long, conflicts_with_all = ["grid", "locate"])]
    name: Option<String>,
    /// Grid cell as two numbers
    #[arg(long, num_args = 2, value_names = ["X", "Y"], conflicts_with = "locate")]
    grid: Option<Vec<i32>>,
    /// Use the geolocation service
    #[arg(long)]
    locate: bool,
}

fn init_logging(config: &WeatherGridConfig, verbose: bool) {
    let level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("weathergrid={level}")));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_value<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize output")?
    );
    Ok(())
}

fn print_location(location: &ResolvedLocation, json: bool) -> Result<()> {
    if json {
        return print_value(location);
    }

    println!("Location: {}", location.display_label());
    println!("Grid:     {}", location.grid_cell);
    if let Some(distance) = location.distance_km {
        println!("Distance: {distance:.2} km");
    }
    Ok(())
}

fn print_observation(observation: &Observation) {
    println!("Temp : {:.1} C", observation.temperature);
    println!("Humid: {:.0} %", observation.humidity);
    if let Some(rain) = observation.rainfall {
        println!("Rain : {rain:.1} mm");
    }
    if let Some(wind) = observation.wind_speed {
        println!("Wind : {wind:.1} m/s");
    }
}

fn print_history(history: &WeatherHistory, hours: &[String]) {
    for metric in Metric::ALL {
        let Some((min, max)) = history.range(metric) else {
            println!("{}: no data", metric.title());
            continue;
        };
        let values: Vec<String> = history
            .series(metric)
            .iter()
            .map(|value| value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}")))
            .collect();
        println!("{} min {min:.1} max {max:.1}", metric.title());
        println!("  {}", hours.join(" "));
        println!("  {}", values.join(" "));
    }
}

fn locate(config: &WeatherGridConfig, resolver: &LocationResolver<'_>) -> Result<ResolvedLocation> {
    let client = GeolocationClient::new(&config.geolocation)?;
    let (fix, _) = client.fetch()?;
    Ok(resolver.resolve_fix(fix))
}

fn run(cli: Cli, config: &WeatherGridConfig) -> Result<ExitCode> {
    let resolver = LocationResolver::default();

    match cli.command {
        Command::Project { coordinate, json } => {
            let cell = resolver
                .projection()
                .project(GeoCoordinate::new(coordinate.lat, coordinate.lon));
            if json {
                print_value(&cell)?;
            } else {
                println!("{cell}");
            }
        }
        Command::Unproject { x, y } => {
            let centre = unproject(GridCell::new(x, y));
            println!("{}", centre.format_coordinates());
        }
        Command::Nearest { coordinate, json } => {
            let location =
                resolver.resolve_fix(GeoCoordinate::new(coordinate.lat, coordinate.lon));
            print_location(&location, json)?;
        }
        Command::Lookup { name, json } => match resolver.resolve_name(&name) {
            Some(location) => print_location(&location, json)?,
            None => {
                eprintln!("Region not found: '{name}' (names must match the table exactly)");
                return Ok(ExitCode::FAILURE);
            }
        },
        Command::Grid { x, y, json } => {
            let location = resolver.resolve_grid(GridCell::new(x, y));
            print_location(&location, json)?;
        }
        Command::Regions => {
            for record in resolver.table() {
                println!("{}\t{}", record.grid_cell, record.name);
            }
        }
        Command::Locate { json } => {
            let location = locate(config, &resolver)?;
            print_location(&location, json)?;
        }
        Command::Weather(args) => {
            let location = if let Some(name) = args.name {
                let Some(location) = resolver.resolve_name(&name) else {
                    eprintln!("Region not found: '{name}' (names must match the table exactly)");
                    return Ok(ExitCode::FAILURE);
                };
                location
            } else if let Some(grid) = args.grid {
                let [x, y] = grid[..] else {
                    return Err(
                        WeatherGridError::validation("--grid takes exactly two values").into(),
                    );
                };
                if x <= 0 || y <= 0 {
                    return Err(
                        WeatherGridError::validation("Grid coordinates must be positive").into(),
                    );
                }
                resolver.resolve_grid(GridCell::new(x, y))
            } else if args.locate {
                locate(config, &resolver)?
            } else {
                resolver.resolve_grid(config.defaults.grid_cell())
            };

            debug!("Weather for {:?}", location);
            let client = WeatherApiClient::new(config)?;
            let now = Utc::now();
            let history = client.history(location.grid_cell, now);

            print_location(&location, false)?;
            match history.latest() {
                Some(observation) => print_observation(observation),
                None => println!("No current observation available"),
            }

            let hours: Vec<String> = history_base_times(now)
                .iter()
                .map(|base| format!("{:02}", base.hour()))
                .collect();
            print_history(&history, &hours);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match WeatherGridConfig::load_from_path(cli.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config, cli.verbose);

    match run(cli, &config) {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<WeatherGridError>() {
                Some(err) => eprintln!("Error: {}", err.user_message()),
                None => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
