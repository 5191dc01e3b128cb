use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::{fs::File, io::Write, path::PathBuf};
use travel_time::{
    sdk::city::{City, CityProfile, PointCatalog},
    sdk::config::ServiceConfig,
    sdk::overlay::{google_maps_url, RouteOverlay},
    sdk::predictor::TravelTimeService,
    sdk::trip::{parse_date, parse_time, TripRequest},
    sdk::util::log::init_logging,
};

/// Predicts city driving times from an ORS route and a pre-trained model
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the numbered pickup/drop-off points of a city
    Points(CityArgs),
    /// Route a trip and predict its driving time
    Predict(PredictArgs),
    /// Print an external maps link for a trip
    Link(TripEndpoints),
}

#[derive(Args, Debug)]
struct CityArgs {
    /// City name (Bangalore or Hyderabad)
    #[arg(short, long)]
    city: String,

    /// [Optional] CSV of `lat,lon[,label]` rows replacing the built-in points
    #[arg(long)]
    points: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TripEndpoints {
    #[command(flatten)]
    city: CityArgs,

    /// Source point: list number or `lat,lon`
    #[arg(short, long)]
    source: String,

    /// Destination point: list number or `lat,lon`
    #[arg(short, long)]
    destination: String,
}

#[derive(Args, Debug)]
struct PredictArgs {
    #[command(flatten)]
    endpoints: TripEndpoints,

    /// Date of the journey (YYYY-MM-DD)
    #[arg(long, default_value = "2020-01-01")]
    date: String,

    /// Departure time (HH:MM)
    #[arg(long, default_value = "00:00")]
    time: String,

    /// The journey falls on a holiday
    #[arg(long)]
    holiday: bool,

    /// [Optional] Model artifact to use instead of the city's default
    #[arg(long)]
    model: Option<PathBuf>,

    /// [Optional] Write the map overlay (route, markers, tooltip) to this JSON file
    #[arg(long)]
    overlay: Option<PathBuf>,
}

fn load_profile(args: &CityArgs) -> Result<CityProfile> {
    let city: City = args.city.parse()?;
    let profile = city.profile();
    Ok(match &args.points {
        Some(path) => profile.with_points(PointCatalog::from_csv(path)?),
        None => profile,
    })
}

fn list_points(args: &CityArgs) -> Result<()> {
    let profile = load_profile(args)?;
    println!("City: {}", profile.city);
    for (i, point) in profile.points.points().iter().enumerate() {
        match &point.label {
            Some(label) => println!("{:>3}. {} ({})", i + 1, point.coordinate, label),
            None => println!("{:>3}. {}", i + 1, point.coordinate),
        }
    }
    Ok(())
}

fn print_link(args: &TripEndpoints) -> Result<()> {
    let profile = load_profile(&args.city)?;
    let source = profile.points.resolve(&args.source)?;
    let destination = profile.points.resolve(&args.destination)?;
    println!("{}", google_maps_url(source, destination)?);
    Ok(())
}

fn predict(args: &PredictArgs) -> Result<()> {
    let profile = load_profile(&args.endpoints.city)?;
    let request = TripRequest::new(
        profile.points.resolve(&args.endpoints.source)?,
        profile.points.resolve(&args.endpoints.destination)?,
        parse_date(&args.date)?,
        parse_time(&args.time)?,
        args.holiday,
    )?;
    log::info!(
        "City: {}, date of journey: {}, time: {}",
        profile.city,
        request.date,
        request.departure_time
    );

    let config = ServiceConfig::from_env()?;
    let service = TravelTimeService::for_city(&config, &profile, args.model.as_deref())?;
    let estimate = service.estimate(&request)?;

    println!("Expected travel time is: {} minutes", estimate.predicted_minutes);
    println!(
        "{}",
        serde_json::to_string_pretty(&estimate).context("Failed to serialize estimate")?
    );

    if let Some(path) = &args.overlay {
        let overlay = RouteOverlay::new(&request, &estimate);
        let json_output = serde_json::to_string_pretty(&overlay)?;
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        file.write_all(json_output.as_bytes())?;
        log::info!("Route overlay written to {}", path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    dotenvy::dotenv().ok();

    match &cli.command {
        Command::Points(args) => list_points(args),
        Command::Predict(args) => predict(args),
        Command::Link(args) => print_link(args),
    }
}
