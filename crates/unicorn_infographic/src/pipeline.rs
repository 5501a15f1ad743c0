use crate::compose::{ChartData, Composer};
use crate::config::Config;
use crate::csv_reader::load_datasets;
use crate::error::Result;
use crate::resolver::resolve_locations;
use crate::summary::InfographicSummary;
use crate::visualization::FontSet;
use crate::world::WorldBoundaries;

use log::{debug, info, warn};
use std::path::PathBuf;

/// What one run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub output: PathBuf,
    pub summary: Option<PathBuf>,
    pub companies: usize,
    pub resolved_cities: usize,
    pub unmatched_cities: usize,
}

/// Load, resolve, compose and save, in that order
pub fn run(config: &Config) -> Result<RunReport> {
    let fonts = FontSet::load(config.text.font_path.as_deref())?;
    run_with_fonts(config, fonts)
}

/// Same as [`run`] with fonts supplied by the caller
pub fn run_with_fonts(config: &Config, fonts: FontSet) -> Result<RunReport> {
    let datasets = load_datasets(&config.input)?;

    let resolution = resolve_locations(&datasets.companies, &datasets.cities);
    info!(
        "Resolved {} distinct cities for {} companies",
        resolution.resolved.len(),
        datasets.companies.len()
    );
    if !resolution.unmatched.is_empty() {
        warn!(
            "{} city/country pairs have no coordinates and are left off the map",
            resolution.unmatched.len()
        );
        for key in &resolution.unmatched {
            debug!("No coordinates for {}", key);
        }
    }

    let world = config
        .input
        .world_boundaries
        .as_deref()
        .map(WorldBoundaries::from_path)
        .transpose()?;

    let data = ChartData {
        companies: &datasets.companies,
        resolution: &resolution,
        world: world.as_ref(),
    };
    let renderer = Composer::new(config).render(&data, fonts)?;

    let output = &config.output.path;
    let summary = config.output.summary.as_ref().map(|path| {
        (
            path,
            InfographicSummary::new(output, &datasets.companies, &resolution, &config.charts),
        )
    });

    renderer.save(output)?;
    info!("Infographic saved to: {}", output.display());

    // a failed run leaves neither file behind
    if let Some((path, summary)) = &summary {
        if let Err(e) = summary.save(path) {
            if let Err(remove_err) = std::fs::remove_file(output) {
                warn!("Could not remove {}: {}", output.display(), remove_err);
            }
            return Err(e);
        }
        info!("Summary saved to: {}", path.display());
    }

    Ok(RunReport {
        output: output.clone(),
        summary: summary.map(|(path, _)| path.clone()),
        companies: datasets.companies.len(),
        resolved_cities: resolution.resolved.len(),
        unmatched_cities: resolution.unmatched.len(),
    })
}
