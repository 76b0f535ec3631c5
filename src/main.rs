//! RPS Arena headless runner
//!
//! Runs the simulation back-to-back (no wall-clock pacing), logs a census
//! roughly once per simulated second and prints the final census as JSON.

use std::path::PathBuf;

use clap::Parser;
use rps_arena::sim::Kind;
use rps_arena::{Census, PopulationPreset, Settings};

/// Simulated seconds between progress lines
const LOG_EVERY_SECS: f64 = 1.0;

#[derive(Parser, Debug)]
#[command(name = "rps-arena")]
#[command(about = "Headless rock-paper-scissors arena simulation", long_about = None)]
struct Args {
    /// Settings JSON file (defaults are used when omitted)
    settings: Option<PathBuf>,

    /// Tick budget, overrides `max_ticks`
    #[arg(long)]
    ticks: Option<u64>,

    /// Starting population: sparse, balanced or crowded
    #[arg(long, value_parser = parse_preset)]
    preset: Option<PopulationPreset>,

    /// RNG seed, overrides the settings file
    #[arg(long)]
    seed: Option<u64>,
}

fn parse_preset(s: &str) -> Result<PopulationPreset, String> {
    PopulationPreset::from_str(s)
        .ok_or_else(|| format!("unknown preset '{s}' (expected sparse, balanced or crowded)"))
}

impl Args {
    /// Load the settings file (if any) and apply command-line overrides
    fn into_settings(self) -> rps_arena::Result<Settings> {
        let mut settings = match &self.settings {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(p) = self.preset {
            settings.apply_preset(p);
        }
        if let Some(t) = self.ticks {
            settings.max_ticks = t;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        Ok(settings)
    }
}

fn census_line(census: &Census) -> String {
    Kind::ALL
        .iter()
        .map(|&k| {
            format!(
                "{} {} ({:.1}%)",
                k.glyph(),
                census.counts.get(k),
                census.percentage(k)
            )
        })
        .collect::<Vec<_>>()
        .join("  ")
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("RPS Arena (headless) starting...");

    let mut settings = match Args::parse().into_settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    settings.seed = Some(settings.resolve_seed());

    let mut driver = match settings.build_driver() {
        Ok(driver) => driver,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    let log_every = ((LOG_EVERY_SECS / driver.tick_interval()).round() as u64).max(1);
    log::info!(
        "Seed {}, {} particles, {} ticks at {}s",
        driver.store.seed,
        driver.store.len(),
        settings.max_ticks,
        driver.tick_interval()
    );

    let mut conversions = 0u64;
    while driver.store.time_ticks < settings.max_ticks {
        conversions += driver.tick().conversions as u64;
        if driver.store.time_ticks % log_every == 0 {
            if let Some(sample) = driver.history.latest() {
                log::info!("tick {:>6}: {}", sample.tick, census_line(&sample.census));
            }
        }
        if driver.is_settled() {
            log::info!(
                "Settled at tick {} ({} wins)",
                driver.store.time_ticks,
                driver
                    .history
                    .latest()
                    .and_then(|s| s.census.dominant())
                    .map(|k| k.as_str())
                    .unwrap_or("nobody")
            );
            break;
        }
    }

    let census = driver.store.census();
    println!("{}", census_line(&census));
    match serde_json::to_string(&serde_json::json!({
        "seed": driver.store.seed,
        "ticks": driver.store.time_ticks,
        "simulated_secs": driver.store.time_ticks as f64 * driver.tick_interval(),
        "conversions": conversions,
        "census": census,
        "dominant": census.dominant(),
    })) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode summary: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library-only on wasm; hosts drive `Driver` directly
}
