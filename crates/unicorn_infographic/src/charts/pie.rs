use crate::constants::{
    PIE_EXPLODE_OFFSET, PIE_EXPLODE_THRESHOLD, PIE_LABEL_MIN_PERCENT, PIE_LABEL_RADIUS, PIE_START_ANGLE_DEG,
    PIE_TEXT_PT,
};
use crate::csv_reader::CompanyRecord;
use crate::error::Result;
use crate::stats::{percent_of, value_counts};
use crate::visualization::{
    Colors, HAlign, Legend, LegendEntry, Panel, Renderer, TextStyle, VAlign, axes, colors::set3,
};

use serde::Serialize;

/// Arc resolution of a wedge outline (degrees)
const ARC_STEP_DEG: f64 = 1.0;

/// One country's slice of the pie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryShare {
    pub country: String,
    pub count: usize,
    pub percent: f64,
    /// Pulled out of the pie by a tenth of the radius
    pub exploded: bool,
}

/// Per-country shares over the first `rows` companies of the list, most frequent first
pub fn country_shares(companies: &[CompanyRecord], rows: usize) -> Vec<CountryShare> {
    let head = &companies[..rows.min(companies.len())];
    let total = head.len();
    let threshold = total as f64 * PIE_EXPLODE_THRESHOLD;

    value_counts(head.iter().map(|c| c.country.as_str()))
        .into_iter()
        .map(|(country, count)| CountryShare {
            country,
            count,
            percent: percent_of(count, total),
            exploded: count as f64 > threshold,
        })
        .collect()
}

/// Text printed on a wedge. Small slices stay unlabeled.
pub fn wedge_label(percent: f64) -> Option<String> {
    (percent > PIE_LABEL_MIN_PERCENT).then(|| format!("{:.1}%", percent))
}

pub fn legend_label(share: &CountryShare) -> String {
    format!("{}: {:.1}%", share.country, share.percent)
}

/// Pie of country shares with a titled legend on its left
pub fn render_country_pie_chart(
    renderer: &mut Renderer,
    panel: &Panel,
    companies: &[CompanyRecord],
    rows: usize,
) -> Result<()> {
    let shares = country_shares(companies, rows);
    let text_style = TextStyle::new(PIE_TEXT_PT, Colors::BLACK);
    let xlabel_style = TextStyle::new(PIE_TEXT_PT, Colors::RED).bold();
    let pad = renderer.pt(8.0);

    let legend = Legend::new(
        shares
            .iter()
            .enumerate()
            .map(|(i, s)| LegendEntry::new(legend_label(s), set3(i)))
            .collect(),
        text_style,
    )
    .with_title("Legend");
    let (legend_w, legend_h) = legend.measure(renderer);
    let (_, xlabel_h) = renderer.text_size("Country-Wise-Percentage", &xlabel_style);

    let area = pie_area(panel, legend_w, xlabel_h, pad);
    legend.draw(renderer, panel.x + pad, panel.y + (panel.height - legend_h).max(0.0) / 2.0);
    axes::draw_x_label(renderer, &area, "Country-Wise-Percentage", &xlabel_style, pad);

    if shares.is_empty() {
        axes::draw_placeholder(renderer, &area, &text_style);
        return Ok(());
    }

    let (cx, cy) = area.center();
    // leave room for exploded wedges
    let radius = area.width.min(area.height) / 2.0 / (1.0 + PIE_EXPLODE_OFFSET);
    let edge_width = renderer.pt(3.0).max(1.0);

    let mut start = PIE_START_ANGLE_DEG;
    for (i, share) in shares.iter().enumerate() {
        let sweep = 360.0 * share.percent / 100.0;
        let mid = (start + sweep / 2.0).to_radians();
        let offset = if share.exploded {
            radius * PIE_EXPLODE_OFFSET
        } else {
            0.0
        };
        let center = (cx + offset * mid.cos(), cy - offset * mid.sin());

        if shares.len() == 1 {
            let outline = arc(center, radius, 0.0, 360.0);
            renderer.fill_circle(center, radius, set3(i));
            renderer.polyline(&outline, Colors::GREY, edge_width);
        } else {
            let mut outline = vec![center];
            outline.extend(arc(center, radius, start, sweep));
            renderer.fill_polygon(&outline, set3(i));
            outline.push(center);
            renderer.polyline(&outline, Colors::GREY, edge_width);
        }

        if let Some(label) = wedge_label(share.percent) {
            let label_r = radius * PIE_LABEL_RADIUS;
            renderer.draw_text(
                center.0 + label_r * mid.cos(),
                center.1 - label_r * mid.sin(),
                &label,
                &text_style,
                HAlign::Center,
                VAlign::Center,
            );
        }
        start += sweep;
    }

    Ok(())
}

/// Region right of the legend and above the axis label
fn pie_area(panel: &Panel, legend_width: f64, label_height: f64, pad: f64) -> Panel {
    panel.inset(legend_width + pad * 3.0, pad, pad, label_height + pad * 2.0)
}

/// Points along a counter-clockwise arc, in image coordinates
fn arc(center: (f64, f64), radius: f64, start_deg: f64, sweep_deg: f64) -> Vec<(f64, f64)> {
    let steps = (sweep_deg / ARC_STEP_DEG).ceil().max(1.0) as usize;
    (0..=steps)
        .map(|k| {
            let angle = (start_deg + sweep_deg * k as f64 / steps as f64).to_radians();
            (center.0 + radius * angle.cos(), center.1 - radius * angle.sin())
        })
        .collect()
}
