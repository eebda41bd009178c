use std::io::Write;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mapspider_export::{write_csv, write_map};
use mapspider_places::PlacesClient;
use mapspider_scan::Spider;

mod args;

use args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = mapspider_core::load_app_config_from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(points = cli.points.len(), radius = cli.radius, "mapspider started");

    let max_requests = cli.max_requests.unwrap_or(config.default_max_requests);
    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output_dir.clone());

    println!("Points:       {}", cli.points.len());
    println!("Radius:       {} m", cli.radius);
    println!("Max requests: {max_requests}");
    println!(
        "Place type:   {}",
        cli.place_type.as_deref().unwrap_or("all types")
    );

    let client = PlacesClient::new(
        &config.google_maps_api_key,
        config.request_timeout_secs,
        config.max_retries,
        config.retry_backoff_base_ms,
    )?;

    let report = Spider::new(&client, max_requests)
        .place_type(cli.place_type.clone())
        .on_progress(|percentage| {
            let mut stderr = std::io::stderr();
            let _ = write!(stderr, "\rProgress: {percentage:6.1}%");
            let _ = stderr.flush();
        })
        .on_budget_exhausted(|| {
            eprintln!("\nMaximum number of requests reached — scan stopped");
        })
        .run(&cli.points, cli.radius)
        .await?;
    eprintln!();

    let csv_path = write_csv(&report.places, &output_dir)?;
    println!("Unique places found: {}", report.places.len());
    println!("Requests spent:      {}", report.requests_used);
    println!("Results saved to     {}", csv_path.display());

    if cli.map {
        let map_path = write_map(&report.places, &output_dir)?;
        println!("Map generated at     {}", map_path.display());
        println!("Open the file in a browser to view the markers");
    }

    Ok(())
}
