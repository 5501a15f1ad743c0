use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;
use unicorn_infographic::{Config, run};

#[derive(Parser)]
#[command(author, version, about = "Render an infographic of unicorn companies", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config", default_value = "config/default.toml")]
    config: PathBuf,

    /// Company list CSV
    #[arg(long = "companies")]
    companies: Option<PathBuf>,

    /// City coordinates CSV
    #[arg(long = "cities")]
    cities: Option<PathBuf>,

    /// GeoJSON country boundaries for the map
    #[arg(short = 'w', long = "world")]
    world: Option<PathBuf>,

    /// Output image path
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Output resolution
    #[arg(long = "dpi")]
    dpi: Option<u32>,

    /// Write a JSON summary of the charted numbers
    #[arg(short = 's', long = "summary")]
    summary: Option<PathBuf>,

    /// TTF/OTF font file to use instead of a system font
    #[arg(long = "font")]
    font: Option<PathBuf>,
}

impl Args {
    fn apply(self, config: &mut Config) {
        if let Some(path) = self.companies {
            config.input.companies_csv = path;
        }
        if let Some(path) = self.cities {
            config.input.cities_csv = path;
        }
        if let Some(path) = self.world {
            config.input.world_boundaries = Some(path);
        }
        if let Some(path) = self.output {
            config.output.path = path;
        }
        if let Some(dpi) = self.dpi {
            config.output.dpi = dpi;
        }
        if let Some(path) = self.summary {
            config.output.summary = Some(path);
        }
        if let Some(path) = self.font {
            config.text.font_path = Some(path);
        }
    }
}

fn main() -> Result<()> {
    // Initialize logger - defaults to RUST_LOG if set, otherwise INFO
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let args = Args::parse();

    let mut config = if args.config.exists() {
        Config::load_from_file(&args.config)
            .with_context(|| format!("loading {}", args.config.display()))?
    } else {
        warn!(
            "Config file not found: {}, using default settings",
            args.config.display()
        );
        Config::default()
    };
    args.apply(&mut config);
    config.validate()?;

    info!("Unicorn infographic starting...");
    info!("Companies: {}", config.input.companies_csv.display());
    info!("Cities: {}", config.input.cities_csv.display());

    match run(&config) {
        Ok(report) => {
            info!(
                "Done: {} companies, {} cities on the map, {} without coordinates",
                report.companies, report.resolved_cities, report.unmatched_cities
            );
            Ok(())
        }
        Err(e) => {
            error!("Error: {e}");
            Err(e.into())
        }
    }
}
