use crate::constants::{GRATICULE_STEP_DEG, MAP_LEGEND_COLUMNS, MAP_LEGEND_PT, MAP_MARKER_AREA_PT2, TICK_LABEL_PT};
use crate::error::Result;
use crate::resolver::{ResolvedCompanyLocation, companies_per_country};
use crate::visualization::{Colors, Legend, LegendEntry, LinearScale, Panel, Renderer, TextStyle, axes};
use crate::world::WorldBoundaries;

use log::debug;
use std::f64::consts::PI;

/// Equirectangular maps are twice as wide as they are tall
const MAP_ASPECT: f64 = 2.0;

/// Legend label for one country of the map
pub fn country_legend_label(country: &str, companies: usize) -> String {
    format!("{country} ({companies} companies)")
}

/// World map with one salmon marker per resolved city and a per-country legend below it
pub fn render_city_map(
    renderer: &mut Renderer,
    panel: &Panel,
    resolved: &[ResolvedCompanyLocation],
    world: Option<&WorldBoundaries>,
) -> Result<()> {
    let entries: Vec<LegendEntry> = companies_per_country(resolved)
        .into_iter()
        .map(|c| LegendEntry::new(country_legend_label(&c.country, c.companies), Colors::SALMON))
        .collect();
    let legend = Legend::new(entries, TextStyle::new(MAP_LEGEND_PT, Colors::BLACK))
        .with_columns(MAP_LEGEND_COLUMNS);

    let pad = renderer.pt(8.0);
    let legend_size = if legend.entries.is_empty() {
        (0.0, 0.0)
    } else {
        legend.measure(renderer)
    };
    let area = map_area(panel, legend_size.1, pad);

    renderer.fill_rect(area.x, area.y, area.width, area.height, Colors::WHITE_SMOKE);
    let (x_scale, y_scale) = projection(&area);

    match world {
        Some(world) if !world.is_empty() => {
            let width = renderer.pt(0.8).max(1.0);
            for ring in world.rings() {
                let points: Vec<(f64, f64)> = ring
                    .iter()
                    .map(|&(lng, lat)| (x_scale.map(lng), y_scale.map(lat)))
                    .collect();
                renderer.polyline(&points, Colors::DARK_SLATE_GRAY, width);
            }
        }
        _ => draw_graticule(renderer, &area, &x_scale, &y_scale),
    }
    axes::draw_frame(renderer, &area, Colors::DARK_SLATE_GRAY);

    if resolved.is_empty() {
        axes::draw_placeholder(renderer, &area, &TextStyle::new(TICK_LABEL_PT, Colors::BLACK));
        return Ok(());
    }

    // marker area is given in pt^2
    let radius = renderer.pt((MAP_MARKER_AREA_PT2 / PI).sqrt());
    let edge = renderer.pt(1.0).max(1.0);
    for location in resolved {
        let center = (x_scale.map(location.lng), y_scale.map(location.lat));
        renderer.marker(center, radius, Colors::SALMON, Colors::BLACK, edge);
    }
    debug!("Placed {} city markers", resolved.len());

    let legend_x = area.x + (area.width - legend_size.0) / 2.0;
    legend.draw(renderer, legend_x, area.bottom() + pad);

    Ok(())
}

fn map_area(panel: &Panel, legend_height: f64, pad: f64) -> Panel {
    let reserved = if legend_height > 0.0 {
        legend_height + pad * 2.0
    } else {
        pad
    };
    panel.inset(pad, pad, pad, reserved).fit_aspect(MAP_ASPECT)
}

fn projection(area: &Panel) -> (LinearScale, LinearScale) {
    (
        LinearScale::new((-180.0, 180.0), (area.x, area.right())),
        LinearScale::new((-90.0, 90.0), (area.bottom(), area.y)),
    )
}

fn draw_graticule(renderer: &mut Renderer, area: &Panel, x_scale: &LinearScale, y_scale: &LinearScale) {
    let width = renderer.pt(0.5).max(1.0);
    let steps = (360.0 / GRATICULE_STEP_DEG) as usize;

    for i in 1..steps {
        let x = x_scale.map(-180.0 + i as f64 * GRATICULE_STEP_DEG);
        renderer.line((x, area.y), (x, area.bottom()), Colors::GRID, width);
    }
    for i in 1..steps / 2 {
        let y = y_scale.map(-90.0 + i as f64 * GRATICULE_STEP_DEG);
        renderer.line((area.x, y), (area.right(), y), Colors::GRID, width);
    }
}
