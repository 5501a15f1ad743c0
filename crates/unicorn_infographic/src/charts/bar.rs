use crate::constants::{AXIS_LABEL_PT, BAR_ANNOTATION_PT, TICK_LABEL_PT};
use crate::csv_reader::CompanyRecord;
use crate::error::Result;
use crate::stats::{percent_of, value_counts};
use crate::visualization::{
    Colors, HAlign, LinearScale, Panel, Renderer, TextStyle, VAlign,
    axes::{self, max_label_width},
    colors::viridis,
    nice_ticks,
    panel::format_tick,
};

use serde::Serialize;
use std::f64::consts::FRAC_1_SQRT_2;

/// Share of one industry in the full company list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustryShare {
    pub industry: String,
    pub count: usize,
    pub percent: f64,
}

/// Percentage of companies per industry, most frequent first.
///
/// Computed over every row of the list (no deduplication, no row cap).
pub fn industry_shares(companies: &[CompanyRecord]) -> Vec<IndustryShare> {
    let total = companies.len();
    value_counts(companies.iter().map(|c| c.industry.as_str()))
        .into_iter()
        .map(|(industry, count)| IndustryShare {
            industry,
            count,
            percent: percent_of(count, total),
        })
        .collect()
}

/// Bar label text
pub fn percent_label(percent: f64) -> String {
    format!("{:.2}%", percent)
}

/// Vertical bar chart of industry shares, one viridis bar per industry
pub fn render_industry_bar_chart(
    renderer: &mut Renderer,
    panel: &Panel,
    companies: &[CompanyRecord],
) -> Result<()> {
    let shares = industry_shares(companies);

    let tick_style = TextStyle::new(TICK_LABEL_PT, Colors::BLACK);
    let note_style = TextStyle::new(BAR_ANNOTATION_PT, Colors::BLACK);
    let xlabel_style = TextStyle::new(AXIS_LABEL_PT, Colors::RED).bold();
    let ylabel_style = TextStyle::new(AXIS_LABEL_PT, Colors::RED);
    let pad = renderer.pt(8.0);

    // value axis
    let max_percent = shares.iter().map(|s| s.percent).fold(0.0, f64::max);
    let ticks = if shares.is_empty() {
        nice_ticks(0.0, 1.0, 6)
    } else {
        nice_ticks(0.0, max_percent * 1.1 + 0.5, 6)
    };
    let y_max = ticks.last().copied().unwrap_or(1.0);
    let step = ticks.get(1).copied().unwrap_or(1.0);
    let tick_labels: Vec<String> = ticks.iter().map(|t| format_tick(*t, step)).collect();

    // rotated category labels hang below the axis
    let rotated_height = shares
        .iter()
        .map(|s| {
            let (w, h) = renderer.text_size(&s.industry, &tick_style);
            (w + h) * FRAC_1_SQRT_2
        })
        .fold(0.0, f64::max);
    let (_, xlabel_h) = renderer.text_size("Industries", &xlabel_style);
    let (_, ylabel_h) = renderer.text_size("Percentage", &ylabel_style);
    let (_, note_h) = renderer.text_size("0.00%", &note_style);

    let left = max_label_width(renderer, &tick_labels, &tick_style) + ylabel_h + pad * 3.0;
    let bottom = rotated_height + xlabel_h + pad * 3.0;
    let area = panel.inset(left, note_h + pad, pad, bottom);

    renderer.fill_rect(area.x, area.y, area.width, area.height, Colors::WHITE);
    let y_scale = LinearScale::new((0.0, y_max), (area.bottom(), area.y));
    axes::draw_y_ticks(renderer, &area, &y_scale, &ticks, &tick_style, Some(Colors::GRID));

    if shares.is_empty() {
        axes::draw_frame(renderer, &area, Colors::GRID);
        axes::draw_placeholder(renderer, &area, &tick_style);
    } else {
        let palette = viridis(shares.len());
        let slot = area.width / shares.len() as f64;
        let bar_width = slot * 0.8;

        for (i, (share, color)) in shares.iter().zip(palette).enumerate() {
            let cx = area.x + slot * (i as f64 + 0.5);
            let top = y_scale.map(share.percent);
            renderer.fill_rect(cx - bar_width / 2.0, top, bar_width, area.bottom() - top, color);

            renderer.draw_text(
                cx,
                y_scale.map(share.percent + 0.5),
                &percent_label(share.percent),
                &note_style,
                HAlign::Center,
                VAlign::Bottom,
            );
            renderer.draw_text_rotated(
                cx,
                area.bottom() + pad,
                &share.industry,
                &tick_style,
                45.0,
                HAlign::Right,
                VAlign::Top,
            );
        }
        axes::draw_frame(renderer, &area, Colors::GRID);
    }

    axes::draw_x_label(renderer, &area, "Industries", &xlabel_style, rotated_height + pad * 2.0);
    axes::draw_y_label(
        renderer,
        &area,
        "Percentage",
        &ylabel_style,
        max_label_width(renderer, &tick_labels, &tick_style) + pad * 2.0,
    );

    Ok(())
}
